use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    event::{event::DeleteEvent, Event},
    id::EventId,
    permission::Operation,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::{AppJson, AppPath, AppQuery, AuthorizedUser},
    model::{
        enrollment::EnrollmentsResponse,
        event::{
            CreateEventRequest, EventListQuery, EventResponse, PaginatedEventResponse,
            UpdateEventRequest, UpdateEventRequestWithIds,
        },
    },
};

pub async fn register_event(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    user.authorize(Operation::CreateEvent)?;
    req.validate(&())?;

    let event_id = registry
        .event_repository()
        .create(req.into(), user.id())
        .await?;
    let event = find_event(&registry, event_id).await?;

    Ok((StatusCode::CREATED, Json(event.into())))
}

pub async fn show_event_list(
    user: AuthorizedUser,
    AppQuery(query): AppQuery<EventListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedEventResponse>> {
    user.authorize(Operation::ViewEvents)?;
    query.validate(&())?;

    registry
        .event_repository()
        .find_all(query.into())
        .await
        .map(PaginatedEventResponse::from)
        .map(Json)
}

pub async fn show_event(
    user: AuthorizedUser,
    AppPath(event_id): AppPath<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    user.authorize(Operation::ViewEvents)?;

    find_event(&registry, event_id)
        .await
        .map(EventResponse::from)
        .map(Json)
}

pub async fn update_event(
    user: AuthorizedUser,
    AppPath(event_id): AppPath<EventId>,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateEventRequest>,
) -> AppResult<Json<EventResponse>> {
    let event = find_event(&registry, event_id).await?;
    user.authorize(Operation::ManageEvent {
        organizer_id: event.organizer.organizer_id,
    })?;
    req.validate(&())?;

    let update_event = UpdateEventRequestWithIds::new(event_id, user.id(), req);
    registry
        .event_repository()
        .update(update_event.into())
        .await?;

    find_event(&registry, event_id)
        .await
        .map(EventResponse::from)
        .map(Json)
}

pub async fn delete_event(
    user: AuthorizedUser,
    AppPath(event_id): AppPath<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let event = find_event(&registry, event_id).await?;
    user.authorize(Operation::ManageEvent {
        organizer_id: event.organizer.organizer_id,
    })?;

    let delete_event = DeleteEvent::new(event_id, user.id());
    registry
        .event_repository()
        .delete(delete_event)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_event_enrollments(
    user: AuthorizedUser,
    AppPath(event_id): AppPath<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EnrollmentsResponse>> {
    let event = find_event(&registry, event_id).await?;
    user.authorize(Operation::ManageEvent {
        organizer_id: event.organizer.organizer_id,
    })?;

    registry
        .enrollment_repository()
        .find_by_event_id(event_id)
        .await
        .map(EnrollmentsResponse::from)
        .map(Json)
}

async fn find_event(registry: &AppRegistry, event_id: EventId) -> AppResult<Event> {
    registry
        .event_repository()
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("event ({event_id}) not found")))
}
