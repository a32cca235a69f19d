//! Birthday handlers.
//!
//! Reads and writes go through [`crate::service::BirthdayService`], which
//! owns caching and invalidation.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use birthdays_core::birthday::{Birthday, BirthdayCalendar, BirthdayRange, MonthDayFilter};
use birthdays_core::storage::{RepositoryError, UserDirectory};

use crate::{
    error::ServiceError,
    handlers::AppError,
    models::{BirthdayView, ListBirthdaysQuery, RangeQuery, SaveBirthday},
    state::AppState,
};

/// Looks up the display name, logging and dropping directory failures.
async fn display_name(users: &dyn UserDirectory, uid: u32) -> Option<String> {
    match users.display_name(uid).await {
        Ok(name) => name,
        Err(err) => {
            tracing::warn!(uid, error = %err, "Failed to look up display name");
            None
        }
    }
}

async fn decorate(users: &dyn UserDirectory, birthday: &Birthday) -> BirthdayView {
    BirthdayView::new(birthday, display_name(users, birthday.uid).await)
}

/// List birthdays (GET /api/birthdays?month=&day=).
pub async fn list_birthdays(
    State(state): State<AppState>,
    Query(query): Query<ListBirthdaysQuery>,
) -> Result<Json<Vec<BirthdayView>>, AppError> {
    let filter = MonthDayFilter::new(query.month, query.day).map_err(ServiceError::from)?;
    let birthdays = state.service.get_all(filter).await?;

    let mut views = Vec::with_capacity(birthdays.len());
    for birthday in &birthdays {
        views.push(decorate(state.users.as_ref(), birthday).await);
    }

    Ok(Json(views))
}

/// Birthdays by occurrence date (GET /api/birthdays/range?start=&end=).
pub async fn birthday_range(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<BirthdayCalendar>, AppError> {
    let range = BirthdayRange::parse(&query.start, &query.end).map_err(ServiceError::from)?;
    let calendar = state.service.get_range(&range).await?;

    Ok(Json(calendar))
}

/// Get a single user's birthday (GET /api/birthdays/{uid}).
pub async fn get_birthday(
    State(state): State<AppState>,
    Path(uid): Path<u32>,
) -> Result<Json<BirthdayView>, AppError> {
    let birthday = state
        .service
        .get_user(uid)
        .await?
        .ok_or_else(|| RepositoryError::NotFound {
            entity_type: "Birthday",
            id: uid.to_string(),
        })?;

    Ok(Json(decorate(state.users.as_ref(), &birthday).await))
}

/// Save a user's birthday (PUT /api/birthdays/{uid}).
///
/// A zero month or day deletes it.
pub async fn save_birthday(
    State(state): State<AppState>,
    Path(uid): Path<u32>,
    Json(payload): Json<SaveBirthday>,
) -> Result<StatusCode, AppError> {
    state.service.save(uid, payload.month, payload.day).await?;
    tracing::info!(uid, month = payload.month, day = payload.day, "Saved birthday");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a user's birthday (DELETE /api/birthdays/{uid}).
pub async fn delete_birthday(
    State(state): State<AppState>,
    Path(uid): Path<u32>,
) -> Result<StatusCode, AppError> {
    state.service.delete(uid).await?;
    tracing::info!(uid, "Deleted birthday");

    Ok(StatusCode::NO_CONTENT)
}
