use crate::core::engine::ClassifierEngine;
use crate::domain::model::{
    ClassificationRequest, ClassificationResult, ClassifyError, ValidationError,
};
use crate::domain::ports::FactSource;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const DEFAULT_ROUTE: &str = "/api/classify-number";
pub const HEALTH_ROUTE: &str = "/health";

const MISSING_PARAMETER_MESSAGE: &str = "Number parameter is required";
const FACT_UNAVAILABLE_MESSAGE: &str = "Unable to fetch fun fact from Numbers API";

#[derive(Serialize)]
struct MessageBody {
    error: &'static str,
}

// Shape differs from `MessageBody`; clients already depend on both.
#[derive(Serialize)]
struct InvalidNumberBody<'a> {
    number: &'a str,
    error: bool,
}

impl IntoResponse for ClassifyError {
    fn into_response(self) -> Response {
        match self {
            ClassifyError::Validation(ValidationError::MissingParameter) => (
                StatusCode::BAD_REQUEST,
                Json(MessageBody {
                    error: MISSING_PARAMETER_MESSAGE,
                }),
            )
                .into_response(),
            ClassifyError::Validation(ValidationError::NotANumber { raw, is_alphabetic }) => {
                let number = if is_alphabetic { "alphabet" } else { raw.as_str() };
                (
                    StatusCode::BAD_REQUEST,
                    Json(InvalidNumberBody {
                        number,
                        error: true,
                    }),
                )
                    .into_response()
            }
            ClassifyError::FactUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(MessageBody {
                    error: FACT_UNAVAILABLE_MESSAGE,
                }),
            )
                .into_response(),
        }
    }
}

impl ClassificationRequest {
    /// Last `number` wins when the parameter is repeated.
    pub fn from_query_pairs(pairs: Vec<(String, String)>) -> Self {
        let number = pairs
            .into_iter()
            .filter(|(key, _)| key == "number")
            .map(|(_, value)| value)
            .last();
        Self { number }
    }
}

async fn classify_number<F: FactSource + 'static>(
    State(engine): State<Arc<ClassifierEngine<F>>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ClassificationResult>, ClassifyError> {
    let request = ClassificationRequest::from_query_pairs(pairs);
    engine.classify(request.number.as_deref()).await.map(Json)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> impl IntoResponse {
    let body = HealthResponse {
        status: "up",
        version: env!("CARGO_PKG_VERSION"),
    };

    (
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}

/// Builds the service router: the classification endpoint at `route` plus
/// a liveness check at `/health`.
pub fn router<F: FactSource + 'static>(engine: Arc<ClassifierEngine<F>>, route: &str) -> Router {
    Router::new()
        .route(route, get(classify_number::<F>))
        .route(HEALTH_ROUTE, get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}
