// libs/doctor-cell/src/services/matching.rs
use tracing::{debug, info};

use shared_database::{AppState, Datastore};
use shared_models::records::Doctor;

use crate::models::{DoctorError, DoctorSuggestion};
use crate::services::similarity::{best_match, EditDistanceScorer};

/// Minimum similarity between the full symptom text and a map keyword for
/// the fuzzy fallback to accept a match (0-1 scale).
pub const SYMPTOM_SCORE_CUTOFF: f64 = 0.4;

pub struct SpecialtyMatchService {
    store: Datastore,
    scorer: EditDistanceScorer,
}

impl SpecialtyMatchService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            scorer: EditDistanceScorer,
        }
    }

    /// Map a free-text symptom description to a specialty, then to the first
    /// doctor practising it. Match priority, first hit wins:
    /// substring, then whole token, then fuzzy against the full text.
    pub fn suggest_doctor(&self, symptom: &str) -> Result<DoctorSuggestion, DoctorError> {
        let specialty = self
            .resolve_specialty(symptom)
            .ok_or(DoctorError::NoConditionMatch)?;

        info!("Symptom resolved to specialty: {}", specialty);
        self.doctor_for_specialty(&specialty)
    }

    fn resolve_specialty(&self, symptom: &str) -> Option<String> {
        let symptom = symptom.to_lowercase();
        let map = self.store.disease_map();

        // Direct substring match, in map definition order.
        for mapping in map {
            if symptom.contains(&mapping.keyword) {
                debug!("Substring match on keyword '{}'", mapping.keyword);
                return Some(mapping.specialty.clone());
            }
        }

        // Word-by-word match.
        for word in symptom.split_whitespace() {
            if let Some(mapping) = map.iter().find(|m| m.keyword == word) {
                debug!("Token match on keyword '{}'", mapping.keyword);
                return Some(mapping.specialty.clone());
            }
        }

        // Fuzzy match against the full symptom text.
        let keywords = map.iter().map(|m| m.keyword.as_str());
        if let Some((keyword, score)) =
            best_match(&self.scorer, &symptom, keywords, SYMPTOM_SCORE_CUTOFF)
        {
            debug!("Fuzzy match on keyword '{}' (score {:.2})", keyword, score);
            return map
                .iter()
                .find(|m| m.keyword == keyword)
                .map(|m| m.specialty.clone());
        }

        None
    }

    /// First doctor (roster order) whose specialization contains the
    /// specialty, case-insensitive.
    pub fn doctor_for_specialty(&self, specialty: &str) -> Result<DoctorSuggestion, DoctorError> {
        let wanted = specialty.to_lowercase();
        self.store
            .doctors()
            .iter()
            .find(|doc| doc.specialization.to_lowercase().contains(&wanted))
            .map(|doc| DoctorSuggestion {
                specialty: specialty.to_string(),
                doctor: doc.clone(),
            })
            .ok_or_else(|| DoctorError::SpecialtyNotAvailable {
                specialty: specialty.to_string(),
            })
    }

    pub fn roster(&self) -> Vec<Doctor> {
        self.store.doctors().to_vec()
    }
}
