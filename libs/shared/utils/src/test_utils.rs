//! Shared fixtures for cell tests: a disposable datastore seeded with
//! representative clinic data, plus record builders.

use std::path::Path;

use chrono::{Duration, Local, NaiveDateTime};

use shared_config::AppConfig;
use shared_database::Datastore;
use shared_models::records::{
    AppointmentSlot, DiseaseMapping, Doctor, FaqEntry, Patient, SlotStatus,
};

pub struct TestConfig {
    pub data_dir: String,
}

impl TestConfig {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.display().to_string(),
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            data_dir: self.data_dir.clone(),
            port: 0,
            mail_api_url: String::new(),
            mail_api_token: String::new(),
            mail_sender: String::new(),
            assistant_base_url: String::new(),
            assistant_api_key: String::new(),
            assistant_model: String::new(),
        }
    }
}

/// In-memory seed collections, written to disk by [`seed_datastore`].
pub struct TestData {
    pub patients: Vec<Patient>,
    pub slots: Vec<AppointmentSlot>,
    pub doctors: Vec<Doctor>,
    pub faqs: Vec<FaqEntry>,
    pub disease_map: Vec<DiseaseMapping>,
}

impl Default for TestData {
    fn default() -> Self {
        Self {
            patients: vec![patient("P001", "Jane Doe", "jane@example.com")],
            doctors: vec![
                doctor("Dr. Alice Morgan", "Dentistry", "alice.morgan@clinic.example"),
                doctor("Dr. Brian Khan", "Cardiology", "brian.khan@clinic.example"),
            ],
            slots: vec![
                future_slot("Dr. Alice Morgan", 1),
                future_slot("Dr. Alice Morgan", 2),
                future_slot("Dr. Brian Khan", 1),
            ],
            faqs: vec![
                FaqEntry {
                    question: "What are the visiting hours?".to_string(),
                    answer: "Visiting hours are 9am to 8pm every day.".to_string(),
                },
                FaqEntry {
                    question: "Do you accept insurance?".to_string(),
                    answer: "We accept all major insurance providers.".to_string(),
                },
            ],
            disease_map: vec![
                mapping("tooth", "Dentistry"),
                mapping("heart", "Cardiology"),
                mapping("skin", "Dermatology"),
            ],
        }
    }
}

/// Write the collections into `dir` and open a datastore over them.
pub async fn seed_datastore(dir: &Path, data: &TestData) -> Datastore {
    write_json(dir, "patients.json", &data.patients);
    write_json(dir, "appointments.json", &data.slots);
    write_json(dir, "doctors.json", &data.doctors);
    write_json(dir, "faqs.json", &data.faqs);
    write_json(dir, "disease_map.json", &data.disease_map);

    Datastore::open(dir)
        .await
        .expect("test datastore should load")
}

fn write_json<T: serde::Serialize>(dir: &Path, file: &str, records: &[T]) {
    let raw = serde_json::to_string_pretty(records).expect("seed data serializes");
    std::fs::write(dir.join(file), raw).expect("seed file writes");
}

pub fn patient(id: &str, name: &str, email: &str) -> Patient {
    Patient {
        patient_id: id.to_string(),
        name: name.to_string(),
        dob: "1990-01-01".to_string(),
        phone: "0851234567".to_string(),
        email: email.to_string(),
        address: "1 Main Street".to_string(),
        medical_history: vec![],
    }
}

pub fn doctor(name: &str, specialization: &str, contact: &str) -> Doctor {
    Doctor {
        name: name.to_string(),
        specialization: specialization.to_string(),
        education: "MB BCh BAO".to_string(),
        experience: "10 years".to_string(),
        fee: 80,
        contact: contact.to_string(),
        bio: format!("{} practice", specialization),
    }
}

pub fn mapping(keyword: &str, specialty: &str) -> DiseaseMapping {
    DiseaseMapping {
        keyword: keyword.to_string(),
        specialty: specialty.to_string(),
    }
}

pub fn slot_at(doctor: &str, when: NaiveDateTime, status: SlotStatus) -> AppointmentSlot {
    AppointmentSlot {
        doctor: doctor.to_string(),
        date: when.format("%Y-%m-%d").to_string(),
        time: when.format("%H:%M").to_string(),
        status,
        patient_id: None,
        patient_name: None,
    }
}

/// An available slot `days_ahead` days in the future.
pub fn future_slot(doctor: &str, days_ahead: i64) -> AppointmentSlot {
    slot_at(
        doctor,
        Local::now().naive_local() + Duration::days(days_ahead),
        SlotStatus::Available,
    )
}

/// An available slot `days_back` days in the past (rollover fodder).
pub fn past_slot(doctor: &str, days_back: i64) -> AppointmentSlot {
    slot_at(
        doctor,
        Local::now().naive_local() - Duration::days(days_back),
        SlotStatus::Available,
    )
}

/// A slot already booked by the given patient.
pub fn booked_slot(doctor: &str, days_ahead: i64, patient_id: &str, patient_name: &str) -> AppointmentSlot {
    let mut slot = future_slot(doctor, days_ahead);
    slot.status = SlotStatus::Booked;
    slot.patient_id = Some(patient_id.to_string());
    slot.patient_name = Some(patient_name.to_string());
    slot
}
