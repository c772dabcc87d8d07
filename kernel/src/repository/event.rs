use crate::model::{
    event::{
        event::{CreateEvent, DeleteEvent, UpdateEvent},
        Event,
    },
    id::{EventId, UserId},
    list::{ListOptions, PaginatedList},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: CreateEvent, organizer_id: UserId) -> AppResult<EventId>;
    async fn find_all(&self, options: ListOptions) -> AppResult<PaginatedList<Event>>;
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    async fn update(&self, event: UpdateEvent) -> AppResult<()>;
    async fn delete(&self, event: DeleteEvent) -> AppResult<()>;
}
