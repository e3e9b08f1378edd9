// libs/appointment-cell/src/services/booking.rs
use chrono::{Duration, Local, NaiveDateTime};
use tracing::{debug, info};

use doctor_cell::services::similarity::{best_match, EditDistanceScorer};
use notification_cell::{AppointmentNotice, NoticeKind, NotificationService};
use shared_database::{AppState, Datastore};
use shared_models::records::{AppointmentSlot, Patient, SlotStatus};

use crate::models::{
    AppointmentDetail, AppointmentError, BookingOutcome, RescheduleOptions,
};

/// Minimum fuzzy-match score for a typed doctor name to resolve against the
/// names appearing in the slot list (0-100 scale).
pub const DOCTOR_NAME_MIN_SCORE: f64 = 60.0;

/// The slot lifecycle engine. Slots move between `available` and `booked`
/// only; every mutation runs read-modify-persist under the slot collection's
/// write lock and rewrites the whole collection once.
pub struct AppointmentBookingService {
    store: Datastore,
    notifications: NotificationService,
    scorer: EditDistanceScorer,
}

impl AppointmentBookingService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            notifications: NotificationService::new(state),
            scorer: EditDistanceScorer,
        }
    }

    /// Book the earliest future available slot for a (fuzzily named) doctor.
    ///
    /// Expired slots are rolled forward first: any slot strictly in the past
    /// advances one calendar day and reverts to available. That lazy cleanup
    /// only ever runs here, on the booking path.
    pub async fn book_appointment(
        &self,
        patient_id: &str,
        doctor_name: &str,
        payment_confirmed: bool,
    ) -> Result<BookingOutcome, AppointmentError> {
        if !payment_confirmed {
            info!("Booking for {} held pending payment confirmation", patient_id);
            return Ok(BookingOutcome::PaymentRequired);
        }

        let patient = self
            .patient_by_id(patient_id)
            .await
            .ok_or(AppointmentError::PatientNotFound)?;

        let now = Local::now().naive_local();
        let mut slots = self.store.slots_mut().await;

        let rolled = roll_over_expired(&mut slots, now);
        if rolled > 0 {
            debug!("Rolled {} expired slots forward one day", rolled);
            slots
                .persist()
                .await
                .map_err(|e| AppointmentError::Storage(e.to_string()))?;
        }

        // Resolve the typed name against the distinct doctor names the slot
        // list actually contains.
        let candidates = distinct_doctor_names(&slots);
        let query = doctor_name.trim().to_lowercase();
        let matched_key = {
            let lowered: Vec<String> = candidates.iter().map(|n| n.to_lowercase()).collect();
            best_match(
                &self.scorer,
                &query,
                lowered.iter().map(String::as_str),
                DOCTOR_NAME_MIN_SCORE / 100.0,
            )
            .map(|(name, score)| {
                debug!("Doctor name '{}' matched '{}' (score {:.0})", doctor_name, name, score * 100.0);
                name.to_string()
            })
        };

        let Some(matched_key) = matched_key else {
            info!("No doctor name close enough to '{}'", doctor_name);
            return Ok(BookingOutcome::DoctorNotRecognized {
                requested: doctor_name.to_string(),
                available_doctors: available_doctor_names(&slots),
            });
        };

        let chosen = slots.iter().position(|slot| {
            slot.is_available() && slot.is_future(now) && slot.doctor_key() == matched_key
        });

        let Some(chosen) = chosen else {
            info!("No future slots open for '{}'", matched_key);
            return Ok(BookingOutcome::NoFutureSlots {
                requested: doctor_name.to_string(),
                available_doctors: available_doctor_names(&slots),
            });
        };

        let slot = &mut slots[chosen];
        slot.status = SlotStatus::Booked;
        slot.patient_id = Some(patient.patient_id.clone());
        slot.patient_name = Some(patient.name.clone());

        let detail = AppointmentDetail {
            patient_name: patient.name.clone(),
            patient_id: patient.patient_id.clone(),
            date: slot.date.clone(),
            time: slot.time.clone(),
            doctor: slot.doctor.clone(),
        };

        slots
            .persist()
            .await
            .map_err(|e| AppointmentError::Storage(e.to_string()))?;
        drop(slots);

        info!(
            "Booked {} with {} on {} {}",
            detail.patient_id, detail.doctor, detail.date, detail.time
        );
        self.notifications
            .dispatch(NoticeKind::Booking, self.notice_for(&patient, &detail));

        Ok(BookingOutcome::Booked(detail))
    }

    /// Release the patient's first booked slot back to available.
    pub async fn cancel_appointment(
        &self,
        patient_name: &str,
    ) -> Result<AppointmentDetail, AppointmentError> {
        let patient = self
            .patient_by_name(patient_name)
            .await
            .ok_or(AppointmentError::PatientNotFound)?;

        let mut slots = self.store.slots_mut().await;

        let slot = slots
            .iter_mut()
            .find(|s| {
                s.status == SlotStatus::Booked
                    && s.patient_id.as_deref() == Some(patient.patient_id.as_str())
            })
            .ok_or(AppointmentError::NoActiveAppointment)?;

        let detail = AppointmentDetail {
            patient_name: patient.name.clone(),
            patient_id: patient.patient_id.clone(),
            date: slot.date.clone(),
            time: slot.time.clone(),
            doctor: slot.doctor.clone(),
        };

        slot.status = SlotStatus::Available;
        slot.patient_id = None;
        slot.patient_name = None;

        slots
            .persist()
            .await
            .map_err(|e| AppointmentError::Storage(e.to_string()))?;
        drop(slots);

        info!("Cancelled appointment for {} with {}", detail.patient_id, detail.doctor);
        self.notifications
            .dispatch(NoticeKind::Cancellation, self.notice_for(&patient, &detail));

        Ok(detail)
    }

    /// List the future slots a patient could move their appointment to.
    /// Selection happens later by index into this exact list.
    pub async fn reschedule_slots(
        &self,
        patient_name: &str,
        doctor_name: &str,
        same_doctor: bool,
    ) -> Result<RescheduleOptions, AppointmentError> {
        let patient = self
            .patient_by_name(patient_name)
            .await
            .ok_or(AppointmentError::PatientNotFound)?;

        let now = Local::now().naive_local();
        let slots = self.store.slots().await;

        let current = slots
            .iter()
            .find(|s| {
                s.status == SlotStatus::Booked
                    && s.patient_id.as_deref() == Some(patient.patient_id.as_str())
            })
            .ok_or(AppointmentError::NothingToReschedule)?;

        let selected_doctor = if same_doctor {
            current.doctor.clone()
        } else {
            doctor_name.to_string()
        };

        let available_slots: Vec<AppointmentSlot> = candidate_slots(&slots, &selected_doctor, now)
            .into_iter()
            .cloned()
            .collect();

        if available_slots.is_empty() {
            return Err(AppointmentError::NoSlotsForDoctor {
                doctor: selected_doctor,
            });
        }

        Ok(RescheduleOptions {
            current_appointment: current.clone(),
            available_slots,
            doctor: selected_doctor,
        })
    }

    /// Move the patient's appointment to the `slot_index`-th candidate slot.
    ///
    /// The candidate list is recomputed here, not carried over from
    /// [`reschedule_slots`]; the index is only as fresh as this call. Both
    /// calls take the same collection lock, so in-process the two lists can
    /// only differ if another request changed the slots in between, in which
    /// case a stale index is rejected or lands on a different free slot.
    pub async fn reschedule_appointment(
        &self,
        patient_name: &str,
        slot_index: usize,
        new_doctor: Option<&str>,
    ) -> Result<AppointmentDetail, AppointmentError> {
        let patient = self
            .patient_by_name(patient_name)
            .await
            .ok_or(AppointmentError::PatientNotFound)?;

        let now = Local::now().naive_local();
        let mut slots = self.store.slots_mut().await;

        let current_index = slots
            .iter()
            .position(|s| {
                s.status == SlotStatus::Booked
                    && s.patient_id.as_deref() == Some(patient.patient_id.as_str())
            })
            .ok_or(AppointmentError::NothingToReschedule)?;

        let selected_doctor = new_doctor
            .map(str::to_string)
            .unwrap_or_else(|| slots[current_index].doctor.clone());

        let candidate_indices: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                s.is_available() && s.is_future(now) && s.doctor_key() == doctor_key(&selected_doctor)
            })
            .map(|(i, _)| i)
            .collect();

        let &chosen_index = candidate_indices
            .get(slot_index)
            .ok_or(AppointmentError::InvalidSlotSelection)?;

        // Free the old slot, book the chosen one; one persist covers both.
        let old = &mut slots[current_index];
        old.status = SlotStatus::Available;
        old.patient_id = None;
        old.patient_name = None;

        let chosen = &mut slots[chosen_index];
        chosen.status = SlotStatus::Booked;
        chosen.patient_id = Some(patient.patient_id.clone());
        chosen.patient_name = Some(patient.name.clone());

        let detail = AppointmentDetail {
            patient_name: patient.name.clone(),
            patient_id: patient.patient_id.clone(),
            date: chosen.date.clone(),
            time: chosen.time.clone(),
            doctor: chosen.doctor.clone(),
        };

        slots
            .persist()
            .await
            .map_err(|e| AppointmentError::Storage(e.to_string()))?;
        drop(slots);

        info!(
            "Rescheduled {} to {} on {} {}",
            detail.patient_id, detail.doctor, detail.date, detail.time
        );
        self.notifications
            .dispatch(NoticeKind::Reschedule, self.notice_for(&patient, &detail));

        Ok(detail)
    }

    /// Every slot that is available and still ahead of the clock.
    pub async fn available_slots(&self) -> Vec<AppointmentSlot> {
        let now = Local::now().naive_local();
        self.store
            .slots()
            .await
            .iter()
            .filter(|s| s.is_available() && s.is_future(now))
            .cloned()
            .collect()
    }

    /// The booked slots currently held by a patient.
    pub async fn patient_appointments(
        &self,
        patient_name: &str,
    ) -> Result<Vec<AppointmentSlot>, AppointmentError> {
        let patient = self
            .patient_by_name(patient_name)
            .await
            .ok_or(AppointmentError::PatientNotFound)?;

        Ok(self
            .store
            .slots()
            .await
            .iter()
            .filter(|s| {
                s.status == SlotStatus::Booked
                    && s.patient_id.as_deref() == Some(patient.patient_id.as_str())
            })
            .cloned()
            .collect())
    }

    async fn patient_by_id(&self, patient_id: &str) -> Option<Patient> {
        self.store
            .patients()
            .await
            .iter()
            .find(|p| p.patient_id == patient_id)
            .cloned()
    }

    async fn patient_by_name(&self, name: &str) -> Option<Patient> {
        self.store
            .patients()
            .await
            .iter()
            .find(|p| p.name_matches(name))
            .cloned()
    }

    fn notice_for(&self, patient: &Patient, detail: &AppointmentDetail) -> AppointmentNotice {
        AppointmentNotice {
            patient_id: patient.patient_id.clone(),
            patient_name: patient.name.clone(),
            patient_email: patient.email.clone(),
            doctor: detail.doctor.clone(),
            date: detail.date.clone(),
            time: detail.time.clone(),
        }
    }
}

fn doctor_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Advance every expired slot one calendar day and reopen it. Returns how
/// many slots changed. Slots with unparseable timestamps are left alone.
fn roll_over_expired(slots: &mut [AppointmentSlot], now: NaiveDateTime) -> usize {
    let mut rolled = 0;
    for slot in slots.iter_mut() {
        let Some(start) = slot.start_time() else {
            continue;
        };
        if start < now {
            let next_day = start.date() + Duration::days(1);
            slot.date = next_day.format("%Y-%m-%d").to_string();
            slot.status = SlotStatus::Available;
            slot.patient_id = None;
            slot.patient_name = None;
            rolled += 1;
        }
    }
    rolled
}

/// Distinct trimmed doctor names, first-seen order.
fn distinct_doctor_names(slots: &[AppointmentSlot]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for slot in slots {
        let name = slot.doctor.trim().to_string();
        if !names.iter().any(|n| n.eq_ignore_ascii_case(&name)) {
            names.push(name);
        }
    }
    names
}

/// Doctors with at least one currently available slot, for failure replies.
fn available_doctor_names(slots: &[AppointmentSlot]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for slot in slots.iter().filter(|s| s.is_available()) {
        let name = slot.doctor.trim().to_string();
        if !names.iter().any(|n| n.eq_ignore_ascii_case(&name)) {
            names.push(name);
        }
    }
    names
}

fn candidate_slots<'a>(
    slots: &'a [AppointmentSlot],
    doctor: &str,
    now: NaiveDateTime,
) -> Vec<&'a AppointmentSlot> {
    let key = doctor_key(doctor);
    slots
        .iter()
        .filter(|s| s.is_available() && s.is_future(now) && s.doctor_key() == key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(date: &str, time: &str, status: SlotStatus, patient: Option<&str>) -> AppointmentSlot {
        AppointmentSlot {
            doctor: "Dr. Alice Morgan".to_string(),
            date: date.to_string(),
            time: time.to_string(),
            status,
            patient_id: patient.map(str::to_string),
            patient_name: patient.map(|_| "Jane Doe".to_string()),
        }
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn rollover_advances_past_slots_one_day() {
        let mut slots = vec![
            slot("2031-05-19", "10:00", SlotStatus::Booked, Some("P001")),
            slot("2031-05-21", "10:00", SlotStatus::Available, None),
        ];

        let rolled = roll_over_expired(&mut slots, at("2031-05-20", "09:00"));

        assert_eq!(rolled, 1);
        assert_eq!(slots[0].date, "2031-05-20");
        assert_eq!(slots[0].time, "10:00");
        assert_eq!(slots[0].status, SlotStatus::Available);
        assert_eq!(slots[0].patient_id, None);
        assert_eq!(slots[0].patient_name, None);
        // The future slot is untouched.
        assert_eq!(slots[1].date, "2031-05-21");
    }

    #[test]
    fn rollover_moves_exactly_one_day_even_for_older_slots() {
        let mut slots = vec![slot("2031-05-10", "10:00", SlotStatus::Booked, Some("P001"))];

        roll_over_expired(&mut slots, at("2031-05-20", "09:00"));

        assert_eq!(slots[0].date, "2031-05-11");
    }

    #[test]
    fn rollover_ignores_slots_later_the_same_day() {
        let mut slots = vec![slot("2031-05-20", "15:00", SlotStatus::Booked, Some("P001"))];

        let rolled = roll_over_expired(&mut slots, at("2031-05-20", "09:00"));

        assert_eq!(rolled, 0);
        assert_eq!(slots[0].status, SlotStatus::Booked);
    }

    #[test]
    fn rollover_skips_malformed_timestamps() {
        let mut slots = vec![slot("someday", "soon", SlotStatus::Available, None)];

        assert_eq!(roll_over_expired(&mut slots, at("2031-05-20", "09:00")), 0);
        assert_eq!(slots[0].date, "someday");
    }

    #[test]
    fn distinct_names_keep_first_seen_order_and_trim() {
        let mut a = slot("2031-05-21", "10:00", SlotStatus::Available, None);
        a.doctor = " Dr. Brian Khan ".to_string();
        let b = slot("2031-05-21", "11:00", SlotStatus::Available, None);
        let mut c = slot("2031-05-21", "12:00", SlotStatus::Available, None);
        c.doctor = "dr. brian khan".to_string();

        let names = distinct_doctor_names(&[a, b, c]);
        assert_eq!(names, vec!["Dr. Brian Khan", "Dr. Alice Morgan"]);
    }

    #[test]
    fn available_listing_excludes_booked_doctors() {
        let booked = slot("2031-05-21", "10:00", SlotStatus::Booked, Some("P001"));
        let mut open = slot("2031-05-21", "11:00", SlotStatus::Available, None);
        open.doctor = "Dr. Brian Khan".to_string();

        let names = available_doctor_names(&[booked, open]);
        assert_eq!(names, vec!["Dr. Brian Khan"]);
    }
}
