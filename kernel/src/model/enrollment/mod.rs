use crate::model::{
    id::{EnrollmentId, EventId},
    user::EnrolledUser,
};
use chrono::{DateTime, Utc};

pub mod event;
pub mod rule;

#[derive(Debug, Clone)]
pub struct Enrollment {
    pub enrollment_id: EnrollmentId,
    pub enrolled_at: DateTime<Utc>,
    pub user: EnrolledUser,
    pub event: EnrollmentEvent,
}

#[derive(Debug, Clone)]
pub struct EnrollmentEvent {
    pub event_id: EventId,
    pub event_name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub venue: String,
    pub room: String,
}
