use chrono::{DateTime, Utc};
use kernel::model::{
    enrollment::rule::{EnrollmentTarget, HeldEnrollment},
    event::Event,
    id::{EventId, UserId},
    schedule::Schedule,
    user::EventOrganizer,
};

#[derive(sqlx::FromRow)]
pub struct EventRow {
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
    pub organizer_id: UserId,
    pub organizer_name: String,
}

impl From<EventRow> for Event {
    fn from(value: EventRow) -> Self {
        let EventRow {
            event_id,
            event_name,
            starts_at,
            ends_at,
            venue,
            room,
            speaker,
            description,
            capacity,
            enrolled_count,
            organizer_id,
            organizer_name,
        } = value;
        Event {
            event_id,
            event_name,
            starts_at,
            ends_at,
            venue,
            room,
            speaker,
            description,
            capacity,
            enrolled_count,
            organizer: EventOrganizer {
                organizer_id,
                organizer_name,
            },
        }
    }
}

// ページネーション用の adapter 内部の型
#[derive(sqlx::FromRow)]
pub struct PaginatedEventRow {
    pub total: i64,
    pub event_id: EventId,
}

// 参加登録のトランザクション内で、対象イベントの定員と現在の参加数を読むための型
#[derive(sqlx::FromRow)]
pub struct EventCapacityRow {
    pub event_id: EventId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub capacity: i32,
    pub enrolled_count: i64,
}

impl From<EventCapacityRow> for EnrollmentTarget {
    fn from(value: EventCapacityRow) -> Self {
        EnrollmentTarget::new(
            value.event_id,
            Schedule::new(value.starts_at, value.ends_at),
            value.capacity,
            value.enrolled_count,
        )
    }
}

// ユーザーがすでに参加登録しているイベントの日程
#[derive(sqlx::FromRow)]
pub struct HeldScheduleRow {
    pub event_id: EventId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl From<HeldScheduleRow> for HeldEnrollment {
    fn from(value: HeldScheduleRow) -> Self {
        HeldEnrollment::new(value.event_id, Schedule::new(value.starts_at, value.ends_at))
    }
}
