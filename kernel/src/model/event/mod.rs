use crate::model::{id::EventId, user::EventOrganizer};
use chrono::{DateTime, Utc};

#[allow(clippy::module_inception)]
pub mod event;

#[derive(Debug, Clone)]
pub struct Event {
    pub event_id: EventId,
    pub event_name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub venue: String,
    pub room: String,
    pub speaker: Option<String>,
    pub description: Option<String>,
    pub capacity: i32,
    pub enrolled_count: i64,
    pub organizer: EventOrganizer,
}
