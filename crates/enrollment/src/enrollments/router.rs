use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::admission::AdmissionError;
use super::domain::{AcceptedEnrollment, Enrollment, EnrollmentRequest};
use super::repository::EnrollmentStore;
use super::service::{EnrollmentService, LookupError};
use crate::age_groups::AgeGroupStore;
use crate::error::error_response;
use crate::queue::EnrollmentQueue;

/// Routes for submitting enrollments and polling their status.
pub fn enrollment_router<G, E, Q>(service: Arc<EnrollmentService<G, E, Q>>) -> Router
where
    G: AgeGroupStore + 'static,
    E: EnrollmentStore + 'static,
    Q: EnrollmentQueue + 'static,
{
    Router::new()
        .route(
            "/enrollments",
            post(admit_handler::<G, E, Q>).get(list_handler::<G, E, Q>),
        )
        .route(
            "/enrollments/:enrollment_id/status",
            get(status_handler::<G, E, Q>),
        )
        .with_state(service)
}

pub(crate) async fn admit_handler<G, E, Q>(
    State(service): State<Arc<EnrollmentService<G, E, Q>>>,
    Json(request): Json<EnrollmentRequest>,
) -> Result<(StatusCode, Json<AcceptedEnrollment>), AdmissionError>
where
    G: AgeGroupStore + 'static,
    E: EnrollmentStore + 'static,
    Q: EnrollmentQueue + 'static,
{
    let accepted = service.admit(request).await?;
    Ok((StatusCode::ACCEPTED, Json(accepted)))
}

pub(crate) async fn list_handler<G, E, Q>(
    State(service): State<Arc<EnrollmentService<G, E, Q>>>,
) -> Result<Json<Vec<Enrollment>>, LookupError>
where
    G: AgeGroupStore + 'static,
    E: EnrollmentStore + 'static,
    Q: EnrollmentQueue + 'static,
{
    Ok(Json(service.list().await?))
}

pub(crate) async fn status_handler<G, E, Q>(
    State(service): State<Arc<EnrollmentService<G, E, Q>>>,
    Path(enrollment_id): Path<String>,
) -> Result<Json<Enrollment>, LookupError>
where
    G: AgeGroupStore + 'static,
    E: EnrollmentStore + 'static,
    Q: EnrollmentQueue + 'static,
{
    Ok(Json(service.status(&enrollment_id).await?))
}

impl IntoResponse for AdmissionError {
    fn into_response(self) -> Response {
        error_response(self.kind(), self.to_string(), None)
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        error_response(self.kind(), self.to_string(), None)
    }
}
