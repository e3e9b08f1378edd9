pub mod models;
pub mod services;

pub use models::{AppointmentNotice, NoticeKind};
pub use services::{Mailer, NotificationService};
