// libs/patient-cell/src/services/patient.rs
use tracing::info;

use shared_database::{AppState, Datastore};
use shared_models::records::Patient;

use crate::models::PatientError;

pub struct PatientService {
    store: Datastore,
}

impl PatientService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// Register a new patient and return the assigned id.
    ///
    /// Ids are sequential `P###` strings derived from the collection size.
    /// Patients are never deleted, so the sequence is strictly increasing.
    /// The append and the file write run under one write lock.
    pub async fn register(
        &self,
        name: &str,
        dob: &str,
        address: &str,
        phone: &str,
        email: &str,
    ) -> Result<String, PatientError> {
        let mut patients = self.store.patients_mut().await;

        let patient_id = format!("P{:03}", patients.len() + 1);
        patients.push(Patient {
            patient_id: patient_id.clone(),
            name: name.to_string(),
            dob: dob.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            address: address.to_string(),
            medical_history: vec![],
        });

        patients
            .persist()
            .await
            .map_err(|e| PatientError::Storage(e.to_string()))?;

        info!("Registered patient {} ({})", patient_id, name);
        Ok(patient_id)
    }

    /// Case-insensitive exact name lookup, first match wins.
    pub async fn find_by_name(&self, name: &str) -> Result<Patient, PatientError> {
        self.store
            .patients()
            .await
            .iter()
            .find(|p| p.name_matches(name))
            .cloned()
            .ok_or(PatientError::NotFound)
    }
}
