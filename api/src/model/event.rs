use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    event::{
        event::{CreateEvent, UpdateEvent},
        Event,
    },
    id::{EventId, UserId},
    list::{ListOptions, PaginatedList},
};
use serde::{Deserialize, Serialize};

use super::user::EventOrganizerResponse;

// 終了時刻は開始時刻より後でなければならない
fn ends_after(starts_at: &DateTime<Utc>) -> impl FnOnce(&DateTime<Utc>, &()) -> garde::Result + '_ {
    move |ends_at, _| {
        if ends_at <= starts_at {
            return Err(garde::Error::new("endsAt must be later than startsAt"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[garde(length(min = 1))]
    pub event_name: String,
    #[garde(skip)]
    pub starts_at: DateTime<Utc>,
    #[garde(custom(ends_after(&self.starts_at)))]
    pub ends_at: DateTime<Utc>,
    #[garde(length(min = 1))]
    pub venue: String,
    #[garde(length(min = 1))]
    pub room: String,
    #[garde(skip)]
    pub speaker: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(range(min = 1))]
    pub capacity: i32,
}

impl From<CreateEventRequest> for CreateEvent {
    fn from(value: CreateEventRequest) -> Self {
        let CreateEventRequest {
            event_name,
            starts_at,
            ends_at,
            venue,
            room,
            speaker,
            description,
            capacity,
        } = value;
        CreateEvent {
            event_name,
            starts_at,
            ends_at,
            venue,
            room,
            speaker,
            description,
            capacity,
        }
    }
}

// PUT は全項目の置き換えなので、作成時と同じ項目をすべて要求する
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[garde(length(min = 1))]
    pub event_name: String,
    #[garde(skip)]
    pub starts_at: DateTime<Utc>,
    #[garde(custom(ends_after(&self.starts_at)))]
    pub ends_at: DateTime<Utc>,
    #[garde(length(min = 1))]
    pub venue: String,
    #[garde(length(min = 1))]
    pub room: String,
    #[garde(skip)]
    pub speaker: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(range(min = 1))]
    pub capacity: i32,
}

#[derive(new)]
pub struct UpdateEventRequestWithIds(EventId, UserId, UpdateEventRequest);
impl From<UpdateEventRequestWithIds> for UpdateEvent {
    fn from(value: UpdateEventRequestWithIds) -> Self {
        let UpdateEventRequestWithIds(
            event_id,
            requested_user,
            UpdateEventRequest {
                event_name,
                starts_at,
                ends_at,
                venue,
                room,
                speaker,
                description,
                capacity,
            },
        ) = value;
        UpdateEvent {
            event_id,
            event_name,
            starts_at,
            ends_at,
            venue,
            room,
            speaker,
            description,
            capacity,
            requested_user,
        }
    }
}

const DEFAULT_LIMIT: i64 = 20;
const fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[derive(Debug, Deserialize, Validate)]
pub struct EventListQuery {
    #[garde(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub offset: i64,
}

impl From<EventListQuery> for ListOptions {
    fn from(value: EventListQuery) -> Self {
        let EventListQuery { limit, offset } = value;
        Self { limit, offset }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
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
    pub organizer: EventOrganizerResponse,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let Event {
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
            organizer,
        } = value;
        Self {
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
            organizer: organizer.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedEventResponse {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<EventResponse>,
}

impl From<PaginatedList<Event>> for PaginatedEventResponse {
    fn from(value: PaginatedList<Event>) -> Self {
        let PaginatedList {
            total,
            limit,
            offset,
            items,
        } = value;
        Self {
            total,
            limit,
            offset,
            items: items.into_iter().map(EventResponse::from).collect(),
        }
    }
}
