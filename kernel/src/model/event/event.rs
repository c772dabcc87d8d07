use crate::model::{
    id::{EventId, UserId},
    schedule::Schedule,
};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateEvent {
    pub event_name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub venue: String,
    pub room: String,
    pub speaker: Option<String>,
    pub description: Option<String>,
    pub capacity: i32,
}

impl CreateEvent {
    pub fn schedule(&self) -> Schedule {
        Schedule::new(self.starts_at, self.ends_at)
    }
}

// PUT replaces every editable column, so nothing here is optional
#[derive(Debug, new)]
pub struct UpdateEvent {
    pub event_id: EventId,
    pub event_name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub venue: String,
    pub room: String,
    pub speaker: Option<String>,
    pub description: Option<String>,
    pub capacity: i32,
    pub requested_user: UserId,
}

impl UpdateEvent {
    pub fn schedule(&self) -> Schedule {
        Schedule::new(self.starts_at, self.ends_at)
    }
}

#[derive(Debug, new)]
pub struct DeleteEvent {
    pub event_id: EventId,
    pub requested_user: UserId,
}
