use crate::model::id::{EventId, UserId};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateEnrollment {
    pub event_id: EventId,
    pub user_id: UserId,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, new)]
pub struct DeleteEnrollment {
    pub event_id: EventId,
    pub user_id: UserId,
}
