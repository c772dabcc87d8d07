use chrono::{DateTime, Utc};
use kernel::model::{
    enrollment::{Enrollment, EnrollmentEvent},
    id::{EnrollmentId, EventId, UserId},
};
use serde::Serialize;

use super::user::EnrolledUserResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentsResponse {
    pub items: Vec<EnrollmentResponse>,
}

impl From<Vec<Enrollment>> for EnrollmentsResponse {
    fn from(value: Vec<Enrollment>) -> Self {
        Self {
            items: value.into_iter().map(EnrollmentResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub enrollment_id: EnrollmentId,
    pub enrolled_at: DateTime<Utc>,
    pub user: EnrolledUserResponse,
    pub event: EnrollmentEventResponse,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(value: Enrollment) -> Self {
        let Enrollment {
            enrollment_id,
            enrolled_at,
            user,
            event,
        } = value;
        Self {
            enrollment_id,
            enrolled_at,
            user: user.into(),
            event: event.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentEventResponse {
    pub event_id: EventId,
    pub event_name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub venue: String,
    pub room: String,
}

impl From<EnrollmentEvent> for EnrollmentEventResponse {
    fn from(value: EnrollmentEvent) -> Self {
        let EnrollmentEvent {
            event_id,
            event_name,
            starts_at,
            ends_at,
            venue,
            room,
        } = value;
        Self {
            event_id,
            event_name,
            starts_at,
            ends_at,
            venue,
            room,
        }
    }
}

// 参加登録の直後に返すレスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEnrollmentResponse {
    pub enrollment_id: EnrollmentId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub enrolled_at: DateTime<Utc>,
}
