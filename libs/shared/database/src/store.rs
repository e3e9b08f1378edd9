// libs/shared/database/src/store.rs
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use shared_models::records::{AppointmentSlot, DiseaseMapping, Doctor, FaqEntry, Patient};

pub const PATIENTS_FILE: &str = "patients.json";
pub const APPOINTMENTS_FILE: &str = "appointments.json";
pub const DOCTORS_FILE: &str = "doctors.json";
pub const FAQS_FILE: &str = "faqs.json";
pub const DISEASE_MAP_FILE: &str = "disease_map.json";

/// Flat-file record store. Owns every collection; patients and appointment
/// slots are mutable behind a lock, the reference data (doctors, FAQs,
/// disease map) is immutable after load.
///
/// Mutations go through the write-guards returned by [`patients_mut`] and
/// [`slots_mut`], which hold the collection's write lock until dropped so a
/// whole read-modify-persist sequence is serialized against concurrent
/// requests. `persist` rewrites the backing file in full.
///
/// [`patients_mut`]: Datastore::patients_mut
/// [`slots_mut`]: Datastore::slots_mut
#[derive(Clone)]
pub struct Datastore {
    inner: Arc<Inner>,
}

struct Inner {
    dir: PathBuf,
    patients: RwLock<Vec<Patient>>,
    slots: RwLock<Vec<AppointmentSlot>>,
    doctors: Vec<Doctor>,
    faqs: Vec<FaqEntry>,
    disease_map: Vec<DiseaseMapping>,
}

async fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records =
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(records)
}

async fn write_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let raw = serde_json::to_string_pretty(records)?;
    tokio::fs::write(path, raw)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

impl Datastore {
    /// Load all five collections from `dir`. Every file must exist and parse.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        debug!("Loading record store from {}", dir.display());

        let patients: Vec<Patient> = read_collection(&dir.join(PATIENTS_FILE)).await?;
        let slots: Vec<AppointmentSlot> = read_collection(&dir.join(APPOINTMENTS_FILE)).await?;
        let doctors: Vec<Doctor> = read_collection(&dir.join(DOCTORS_FILE)).await?;
        let faqs: Vec<FaqEntry> = read_collection(&dir.join(FAQS_FILE)).await?;
        let disease_map: Vec<DiseaseMapping> = read_collection(&dir.join(DISEASE_MAP_FILE)).await?;

        debug!(
            "Loaded {} patients, {} slots, {} doctors, {} FAQs, {} disease mappings",
            patients.len(),
            slots.len(),
            doctors.len(),
            faqs.len(),
            disease_map.len()
        );

        Ok(Self {
            inner: Arc::new(Inner {
                dir,
                patients: RwLock::new(patients),
                slots: RwLock::new(slots),
                doctors,
                faqs,
                disease_map,
            }),
        })
    }

    pub async fn patients(&self) -> RwLockReadGuard<'_, Vec<Patient>> {
        self.inner.patients.read().await
    }

    pub async fn slots(&self) -> RwLockReadGuard<'_, Vec<AppointmentSlot>> {
        self.inner.slots.read().await
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.inner.doctors
    }

    pub fn faqs(&self) -> &[FaqEntry] {
        &self.inner.faqs
    }

    pub fn disease_map(&self) -> &[DiseaseMapping] {
        &self.inner.disease_map
    }

    pub async fn patients_mut(&self) -> PatientsGuard<'_> {
        PatientsGuard {
            records: self.inner.patients.write().await,
            path: self.inner.dir.join(PATIENTS_FILE),
        }
    }

    pub async fn slots_mut(&self) -> SlotsGuard<'_> {
        SlotsGuard {
            records: self.inner.slots.write().await,
            path: self.inner.dir.join(APPOINTMENTS_FILE),
        }
    }
}

/// Exclusive access to the patient collection. Call [`persist`] before
/// dropping to write changes back to disk.
///
/// [`persist`]: PatientsGuard::persist
pub struct PatientsGuard<'a> {
    records: RwLockWriteGuard<'a, Vec<Patient>>,
    path: PathBuf,
}

impl Deref for PatientsGuard<'_> {
    type Target = Vec<Patient>;

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl DerefMut for PatientsGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.records
    }
}

impl PatientsGuard<'_> {
    pub async fn persist(&self) -> Result<()> {
        write_collection(&self.path, &self.records).await
    }
}

/// Exclusive access to the appointment slot collection.
pub struct SlotsGuard<'a> {
    records: RwLockWriteGuard<'a, Vec<AppointmentSlot>>,
    path: PathBuf,
}

impl Deref for SlotsGuard<'_> {
    type Target = Vec<AppointmentSlot>;

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl DerefMut for SlotsGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.records
    }
}

impl SlotsGuard<'_> {
    pub async fn persist(&self) -> Result<()> {
        write_collection(&self.path, &self.records).await
    }
}
