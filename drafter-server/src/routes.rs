//! HTTP routes for questions, recommendations and catalog administration.
//!
//! Request bodies are read as raw bytes and decoded here, so malformed input
//! gets the documented response instead of the extractor's rejection.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use drafter_core::{AnswerSet, Catalog, CatalogError, CatalogStore, CatalogStoreError};
use drafter_scorer::{MaxResults, MaxResultsError, Recommendation, Recommender};
use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::{
    WriteMode,
    proposal::{ProposalError, ProposalRecorder},
};

const PROPOSAL_MESSAGE: &str = "The proposal has been saved for review.";

/// Shared, cheaply clonable handler state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn CatalogStore>,
    recommender: Arc<Recommender>,
    write_mode: WriteMode,
    proposals: ProposalRecorder,
}

impl AppState {
    /// Bundle the store, recommender and write policy.
    pub fn new(
        store: Arc<dyn CatalogStore>,
        recommender: Recommender,
        write_mode: WriteMode,
        proposals: ProposalRecorder,
    ) -> Self {
        Self {
            store,
            recommender: Arc::new(recommender),
            write_mode,
            proposals,
        }
    }

    async fn with_store<T, F>(&self, operation: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn CatalogStore) -> Result<T, CatalogStoreError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || operation(store.as_ref())).await?;
        Ok(result?)
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(questions))
        .route("/recommend", post(recommend))
        .route("/api/champions", get(list_champions).post(save_champions))
        .route("/health", get(health))
        .with_state(state)
}

/// Wire form of a question; the reason label stays server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    text: String,
    key: String,
    weight: u32,
}

/// `GET /questions`
pub async fn questions(State(state): State<AppState>) -> Json<Vec<QuestionView>> {
    let views = state
        .recommender
        .scorer()
        .questions()
        .iter()
        .map(|question| QuestionView {
            text: question.text.clone(),
            key: question.key.clone(),
            weight: question.weight,
        })
        .collect();
    Json(views)
}

/// `POST /recommend`
pub async fn recommend(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    let Ok(Value::Object(request)) = serde_json::from_slice::<Value>(&body) else {
        tracing::debug!("recommend body is not a JSON object");
        return Ok(Json(Vec::new()));
    };
    let answers = match request.get("answers") {
        None | Some(Value::Null) => AnswerSet::new(),
        Some(Value::Object(answers)) => AnswerSet::from_json_object(answers),
        Some(_) => {
            tracing::debug!("recommend answers are not a JSON object");
            return Ok(Json(Vec::new()));
        }
    };
    let max_results = MaxResults::from_json(request.get("max_results"))?;

    let catalog = match request.get("payload") {
        Some(Value::Object(payload)) => Catalog::from_payload(payload),
        _ => state.with_store(|store| store.load()).await?,
    };
    let results = state.recommender.recommend(&catalog, &answers, max_results);
    tracing::debug!(
        answered = answers.len(),
        candidates = catalog.len(),
        returned = results.len(),
        "recommendations computed"
    );
    Ok(Json(results))
}

/// `GET /api/champions`
pub async fn list_champions(State(state): State<AppState>) -> Result<Json<Catalog>, ApiError> {
    let catalog = state.with_store(|store| store.load()).await?;
    Ok(Json(catalog))
}

/// `POST /api/champions`
pub async fn save_champions(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let Ok(Value::Object(payload)) = serde_json::from_slice::<Value>(&body) else {
        return Err(ApiError::Invalid {
            message: "payload must be a JSON object mapping champion names to records".to_owned(),
        });
    };
    match state.write_mode {
        WriteMode::Live => {
            let catalog = Catalog::from_json_value(Value::Object(payload))?;
            let count = catalog.len();
            state
                .with_store(move |store| store.replace_all(&catalog))
                .await?;
            tracing::info!(count, "catalog replaced");
            Ok(Json(json!({ "status": "saved", "count": count })))
        }
        WriteMode::Proposal => {
            validate_records(&payload)?;
            let recorder = state.proposals.clone();
            let proposal =
                tokio::task::spawn_blocking(move || recorder.record(&payload)).await??;
            tracing::info!(%proposal, "catalog proposal recorded");
            Ok(Json(json!({
                "status": "received",
                "proposal": proposal,
                "message": PROPOSAL_MESSAGE,
            })))
        }
    }
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn validate_records(payload: &Map<String, Value>) -> Result<(), ApiError> {
    match payload.iter().find(|(_, record)| !record.is_object()) {
        Some((name, _)) => Err(CatalogError::InvalidRecord { name: name.clone() }.into()),
        None => Ok(()),
    }
}

/// Failures surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was malformed.
    #[error("{message}")]
    Invalid { message: String },
    /// The catalog store failed.
    #[error(transparent)]
    Storage(#[from] CatalogStoreError),
    /// Recording a proposal failed.
    #[error(transparent)]
    Proposal(#[from] ProposalError),
    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<MaxResultsError> for ApiError {
    fn from(err: MaxResultsError) -> Self {
        Self::Invalid {
            message: err.to_string(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self::Invalid {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, label) = match &self {
            Self::Invalid { .. } => (StatusCode::BAD_REQUEST, "invalid"),
            Self::Storage(_) | Self::Proposal(_) | Self::Join(_) => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "error")
            }
        };
        let body = Json(json!({ "status": label, "message": self.to_string() }));
        (status, body).into_response()
    }
}
