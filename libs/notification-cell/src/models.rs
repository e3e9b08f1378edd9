// libs/notification-cell/src/models.rs

/// Everything a notification needs to know about one appointment event.
#[derive(Debug, Clone)]
pub struct AppointmentNotice {
    pub patient_id: String,
    pub patient_name: String,
    pub patient_email: String,
    pub doctor: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Booking,
    Cancellation,
    Reschedule,
}

impl NoticeKind {
    pub fn patient_subject(&self) -> &'static str {
        match self {
            NoticeKind::Booking => "Appointment Booking Confirmation",
            NoticeKind::Cancellation => "Appointment Cancelled",
            NoticeKind::Reschedule => "Appointment Rescheduled Confirmation",
        }
    }

    fn patient_intro(&self) -> &'static str {
        match self {
            NoticeKind::Booking => "Your appointment has been successfully booked.",
            NoticeKind::Cancellation => "Your appointment has been cancelled.",
            NoticeKind::Reschedule => "Your appointment has been successfully rescheduled.",
        }
    }

    pub fn doctor_subject(&self) -> &'static str {
        match self {
            NoticeKind::Booking => "New Appointment Booked",
            NoticeKind::Cancellation => "Appointment Cancelled",
            NoticeKind::Reschedule => "Appointment Rescheduled",
        }
    }

    fn doctor_intro(&self) -> &'static str {
        match self {
            NoticeKind::Booking => "A new appointment has been booked for a patient.",
            NoticeKind::Cancellation => "An appointment has been cancelled.",
            NoticeKind::Reschedule => "An appointment has been rescheduled.",
        }
    }

    fn doctor_details_heading(&self) -> &'static str {
        match self {
            NoticeKind::Reschedule => "New Appointment Details:",
            _ => "Appointment Details:",
        }
    }

    pub fn patient_body(&self, notice: &AppointmentNotice) -> String {
        format!(
            "Dear {},\n\n{}\n\nDetails:\nDoctor: {}\nDate: {}\nTime: {}\n\nThank you for choosing our hospital.\n",
            notice.patient_name,
            self.patient_intro(),
            notice.doctor,
            notice.date,
            notice.time,
        )
    }

    pub fn doctor_body(&self, notice: &AppointmentNotice) -> String {
        format!(
            "Dear {},\n\n{}\n\n{}\nPatient ID: {}\nDate: {}\nTime: {}\n\nThank you.",
            notice.doctor,
            self.doctor_intro(),
            self.doctor_details_heading(),
            notice.patient_id,
            notice.date,
            notice.time,
        )
    }
}
