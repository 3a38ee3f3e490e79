use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: i32,
    pub establishment_id: i32,
    pub client_id: i32,
    pub professional_id: i32,
    pub service_id: i32,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub reminder_sent_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Canceled,
    NoShow,
}

impl AppointmentStatus {
    /// Allowed transitions: `Scheduled → Confirmed → Completed`, with
    /// `Canceled` and `NoShow` as exits from the two open states.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Scheduled, Confirmed)
                | (Scheduled, Completed)
                | (Scheduled, Canceled)
                | (Scheduled, NoShow)
                | (Confirmed, Completed)
                | (Confirmed, Canceled)
                | (Confirmed, NoShow)
        )
    }

    /// Open states still occupy the professional's calendar.
    pub fn is_open(self) -> bool {
        matches!(self, AppointmentStatus::Scheduled | AppointmentStatus::Confirmed)
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "Scheduled"),
            AppointmentStatus::Confirmed => write!(f, "Confirmed"),
            AppointmentStatus::Completed => write!(f, "Completed"),
            AppointmentStatus::Canceled => write!(f, "Canceled"),
            AppointmentStatus::NoShow => write!(f, "NoShow"),
        }
    }
}

impl From<&str> for AppointmentStatus {
    fn from(s: &str) -> Self {
        match s {
            "Confirmed" => AppointmentStatus::Confirmed,
            "Completed" => AppointmentStatus::Completed,
            "Canceled" => AppointmentStatus::Canceled,
            "NoShow" => AppointmentStatus::NoShow,
            _ => AppointmentStatus::Scheduled,
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewAppointment {
    pub establishment_id: i32,
    pub client_id: i32,
    pub professional_id: i32,
    pub service_id: i32,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub notes: Option<String>,
}

/// Reschedule payload; status changes go through the dedicated transition
/// operation instead.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateAppointment {
    pub professional_id: i32,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::AppointmentStatus::*;

    #[test]
    fn transitions_follow_lifecycle() {
        assert!(Scheduled.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Scheduled.can_transition_to(Canceled));
        assert!(Confirmed.can_transition_to(NoShow));

        assert!(!Completed.can_transition_to(Confirmed));
        assert!(!Canceled.can_transition_to(Scheduled));
        assert!(!Confirmed.can_transition_to(Scheduled));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [Scheduled, Confirmed, Completed, Canceled, NoShow] {
            assert_eq!(super::AppointmentStatus::from(status.to_string()), status);
        }
    }
}
