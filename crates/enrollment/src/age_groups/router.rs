use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{AgeGroup, NewAgeGroup};
use super::registry::{AgeGroupRegistry, RegistryError};
use super::repository::AgeGroupStore;
use crate::error::error_response;

/// Routes for registering, listing and deleting age groups.
pub fn age_group_router<S>(registry: Arc<AgeGroupRegistry<S>>) -> Router
where
    S: AgeGroupStore + 'static,
{
    Router::new()
        .route(
            "/age-groups",
            post(register_handler::<S>).get(list_handler::<S>),
        )
        .route("/age-groups/:age_group_id", delete(delete_handler::<S>))
        .with_state(registry)
}

pub(crate) async fn register_handler<S>(
    State(registry): State<Arc<AgeGroupRegistry<S>>>,
    Json(payload): Json<NewAgeGroup>,
) -> Result<(StatusCode, Json<AgeGroup>), RegistryError>
where
    S: AgeGroupStore + 'static,
{
    let group = registry
        .register(payload.min_age, payload.max_age)
        .await?;
    Ok((StatusCode::CREATED, Json(group)))
}

pub(crate) async fn list_handler<S>(
    State(registry): State<Arc<AgeGroupRegistry<S>>>,
) -> Result<Json<Vec<AgeGroup>>, RegistryError>
where
    S: AgeGroupStore + 'static,
{
    Ok(Json(registry.list().await?))
}

pub(crate) async fn delete_handler<S>(
    State(registry): State<Arc<AgeGroupRegistry<S>>>,
    Path(age_group_id): Path<String>,
) -> Result<Json<serde_json::Value>, RegistryError>
where
    S: AgeGroupStore + 'static,
{
    registry.delete(&age_group_id).await?;
    Ok(Json(json!({ "detail": "age group removed" })))
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let extra = match &self {
            RegistryError::Overlap { existing } => Some((
                "existing_group",
                json!({
                    "id": existing.id,
                    "min_age": existing.min_age,
                    "max_age": existing.max_age,
                }),
            )),
            _ => None,
        };
        error_response(self.kind(), self.to_string(), extra)
    }
}
