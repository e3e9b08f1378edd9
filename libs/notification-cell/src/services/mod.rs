pub mod mailer;
pub mod notify;

pub use mailer::Mailer;
pub use notify::NotificationService;
