use chrono::{DateTime, Utc};
use kernel::model::{
    enrollment::{Enrollment, EnrollmentEvent},
    id::{EnrollmentId, EventId, UserId},
    user::EnrolledUser,
};

// 参加登録の一覧を取得する際に使う型
#[derive(sqlx::FromRow)]
pub struct EnrollmentRow {
    pub enrollment_id: EnrollmentId,
    pub enrolled_at: DateTime<Utc>,
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub event_id: EventId,
    pub event_name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub venue: String,
    pub room: String,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(value: EnrollmentRow) -> Self {
        let EnrollmentRow {
            enrollment_id,
            enrolled_at,
            user_id,
            user_name,
            email,
            event_id,
            event_name,
            starts_at,
            ends_at,
            venue,
            room,
        } = value;
        Enrollment {
            enrollment_id,
            enrolled_at,
            user: EnrolledUser {
                user_id,
                user_name,
                email,
            },
            event: EnrollmentEvent {
                event_id,
                event_name,
                starts_at,
                ends_at,
                venue,
                room,
            },
        }
    }
}
