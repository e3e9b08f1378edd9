// libs/shared/models/src/records.rs
//
// The persisted record types shared by every cell. These mirror the flat
// JSON documents the datastore reads and writes.
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// PATIENT RECORDS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub patient_id: String,
    pub name: String,
    pub dob: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub medical_history: Vec<String>,
}

impl Patient {
    /// Case-insensitive name comparison, the rule every lookup uses.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

// ==============================================================================
// DOCTOR REFERENCE DATA
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub name: String,
    pub specialization: String,
    pub education: String,
    pub experience: String,
    pub fee: u32,
    pub contact: String,
    pub bio: String,
}

// ==============================================================================
// APPOINTMENT SLOTS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentSlot {
    pub doctor: String,
    pub date: String,
    pub time: String,
    pub status: SlotStatus,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
}

impl AppointmentSlot {
    /// Parse the slot's `date` (`%Y-%m-%d`) and `time` (`%H:%M`) fields.
    /// Returns None for records with malformed timestamps.
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()?;
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").ok()?;
        Some(date.and_time(time))
    }

    pub fn is_future(&self, now: NaiveDateTime) -> bool {
        self.start_time().map(|start| start > now).unwrap_or(false)
    }

    /// Trimmed, lower-cased doctor name used for slot-to-doctor equality.
    pub fn doctor_key(&self) -> String {
        self.doctor.trim().to_lowercase()
    }

    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Booked,
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotStatus::Available => write!(f, "available"),
            SlotStatus::Booked => write!(f, "booked"),
        }
    }
}

// ==============================================================================
// STATIC LOOKUP DATA
// ==============================================================================

/// One keyword of the symptom-to-specialty map. Kept as an ordered list:
/// matcher priority is definition order, first hit wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseMapping {
    pub keyword: String,
    pub specialty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}
