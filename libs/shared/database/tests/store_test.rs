use std::path::Path;

use tempfile::tempdir;

use shared_database::Datastore;
use shared_models::records::{Patient, SlotStatus};

fn seed(dir: &Path) {
    let patients = r#"[
        {
            "patient_id": "P001",
            "name": "Jane Doe",
            "dob": "1990-01-01",
            "phone": "0851234567",
            "email": "jane@example.com",
            "address": "1 Main Street",
            "medical_history": []
        }
    ]"#;
    let slots = r#"[
        {
            "doctor": "Dr. Alice Morgan",
            "date": "2031-05-20",
            "time": "10:00",
            "status": "available",
            "patient_id": null,
            "patient_name": null
        }
    ]"#;
    let doctors = r#"[
        {
            "name": "Dr. Alice Morgan",
            "specialization": "Dentistry",
            "education": "BDS",
            "experience": "10 years",
            "fee": 80,
            "contact": "alice.morgan@clinic.example",
            "bio": "Dental practice"
        }
    ]"#;
    let faqs = r#"[{"question": "What are the visiting hours?", "answer": "9am to 8pm."}]"#;
    let disease_map = r#"[{"keyword": "tooth", "specialty": "Dentistry"}]"#;

    std::fs::write(dir.join("patients.json"), patients).unwrap();
    std::fs::write(dir.join("appointments.json"), slots).unwrap();
    std::fs::write(dir.join("doctors.json"), doctors).unwrap();
    std::fs::write(dir.join("faqs.json"), faqs).unwrap();
    std::fs::write(dir.join("disease_map.json"), disease_map).unwrap();
}

#[tokio::test]
async fn open_loads_all_collections() {
    let dir = tempdir().unwrap();
    seed(dir.path());

    let store = Datastore::open(dir.path()).await.unwrap();

    assert_eq!(store.patients().await.len(), 1);
    assert_eq!(store.slots().await.len(), 1);
    assert_eq!(store.doctors().len(), 1);
    assert_eq!(store.faqs().len(), 1);
    assert_eq!(store.disease_map().len(), 1);
    assert_eq!(store.slots().await[0].status, SlotStatus::Available);
}

#[tokio::test]
async fn open_fails_on_missing_file() {
    let dir = tempdir().unwrap();
    seed(dir.path());
    std::fs::remove_file(dir.path().join("faqs.json")).unwrap();

    assert!(Datastore::open(dir.path()).await.is_err());
}

#[tokio::test]
async fn persisted_patients_survive_reload() {
    let dir = tempdir().unwrap();
    seed(dir.path());

    let store = Datastore::open(dir.path()).await.unwrap();
    {
        let mut patients = store.patients_mut().await;
        patients.push(Patient {
            patient_id: "P002".to_string(),
            name: "John Roe".to_string(),
            dob: "1985-06-15".to_string(),
            phone: "0867654321".to_string(),
            email: "john@example.com".to_string(),
            address: "2 High Street".to_string(),
            medical_history: vec![],
        });
        patients.persist().await.unwrap();
    }

    let reloaded = Datastore::open(dir.path()).await.unwrap();
    let patients = reloaded.patients().await;
    assert_eq!(patients.len(), 2);
    assert_eq!(patients[1].patient_id, "P002");
}

#[tokio::test]
async fn slot_mutation_rewrites_whole_file() {
    let dir = tempdir().unwrap();
    seed(dir.path());

    let store = Datastore::open(dir.path()).await.unwrap();
    {
        let mut slots = store.slots_mut().await;
        slots[0].status = SlotStatus::Booked;
        slots[0].patient_id = Some("P001".to_string());
        slots[0].patient_name = Some("Jane Doe".to_string());
        slots.persist().await.unwrap();
    }

    let raw = std::fs::read_to_string(dir.path().join("appointments.json")).unwrap();
    assert!(raw.contains("\"booked\""));
    assert!(raw.contains("\"P001\""));

    let reloaded = Datastore::open(dir.path()).await.unwrap();
    assert_eq!(reloaded.slots().await[0].status, SlotStatus::Booked);
}
