// libs/notification-cell/src/services/notify.rs
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::{AppState, Datastore};

use crate::models::{AppointmentNotice, NoticeKind};
use crate::services::mailer::Mailer;

/// Best-effort email dispatch for slot lifecycle events. Sends run on
/// spawned tasks; the state transition that triggered them never waits on
/// delivery and never observes a failure.
pub struct NotificationService {
    config: AppConfig,
    store: Datastore,
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    });
    re.is_match(email)
}

impl NotificationService {
    pub fn new(state: &AppState) -> Self {
        Self {
            config: state.config.clone(),
            store: state.store.clone(),
        }
    }

    /// Queue the patient and doctor emails for one appointment event.
    /// Returns immediately; delivery failures are logged and dropped.
    pub fn dispatch(&self, kind: NoticeKind, notice: AppointmentNotice) {
        if !self.config.is_mail_configured() {
            debug!("Mail not configured, skipping {:?} notification", kind);
            return;
        }

        let mailer = Mailer::new(&self.config);

        if is_valid_email(&notice.patient_email) {
            let mailer = mailer.clone();
            let to = notice.patient_email.clone();
            let subject = kind.patient_subject();
            let body = kind.patient_body(&notice);
            tokio::spawn(async move {
                if let Err(e) = mailer.send(&to, subject, &body).await {
                    warn!("Patient notification failed: {}", e);
                }
            });
        } else {
            debug!("Skipping patient mail, invalid address: {}", notice.patient_email);
        }

        match self.doctor_contact(&notice.doctor) {
            Some(contact) => {
                let subject = kind.doctor_subject();
                let body = kind.doctor_body(&notice);
                tokio::spawn(async move {
                    if let Err(e) = mailer.send(&contact, subject, &body).await {
                        warn!("Doctor notification failed: {}", e);
                    }
                });
            }
            None => debug!("No contact on file for doctor {}", notice.doctor),
        }
    }

    fn doctor_contact(&self, doctor_name: &str) -> Option<String> {
        self.store
            .doctors()
            .iter()
            .find(|doc| doc.name.eq_ignore_ascii_case(doctor_name))
            .map(|doc| doc.contact.clone())
    }
}
