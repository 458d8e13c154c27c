use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use schain_core::chain::ResellerIdentity;
use schain_core::export::render_validation_csv;
use schain_core::report::{ValidationReport, ValidationRow};
use schain_core::run_id::is_run_id;
use schain_core::validator::{ChainValidator, ValidationRequest};
use serde::Deserialize;
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

const INDEX_HTML: &str = include_str!("../static/index.html");
const CSV_FILENAME: &str = "validation_results.csv";

/// Fields of the validation form. The same names are accepted as JSON, where
/// `schain` may also be given as an object instead of a string. Unknown fields,
/// such as the legacy `pubmatic_json_url`, are ignored: the reseller registry
/// always lives at `https://{reseller_domain}/sellers.json`.
#[derive(Debug, Default, Deserialize)]
pub struct ValidateForm {
    #[serde(default)]
    pub schain: Value,
    #[serde(default)]
    pub ads_txt_url: String,
    #[serde(default, alias = "pubmatic_id")]
    pub reseller_id: String,
    #[serde(default)]
    pub reseller_domain: String,
}

impl ValidateForm {
    fn into_request(self, default_reseller_domain: &str) -> ValidationRequest {
        let schain = match self.schain {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        let domain = if self.reseller_domain.trim().is_empty() {
            default_reseller_domain
        } else {
            self.reseller_domain.as_str()
        };
        ValidationRequest {
            schain,
            ads_txt_url: self.ads_txt_url.trim().to_string(),
            reseller: ResellerIdentity::from_fields(domain, &self.reseller_id),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/validate", post(validate))
        .route("/download", get(download_latest))
        .route("/download/:run_id", get(download_run))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /validate (form-encoded or JSON)
async fn validate(
    State(state): State<AppState>,
    req: Request,
) -> Result<Json<ValidationReport>, AppError> {
    let is_json = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false);

    let form = if is_json {
        Json::<ValidateForm>::from_request(req, &state)
            .await
            .map(|Json(f)| f)
            .map_err(|e| AppError::BadRequest(e.body_text()))?
    } else {
        Form::<ValidateForm>::from_request(req, &state)
            .await
            .map(|Form(f)| f)
            .map_err(|e| AppError::BadRequest(e.body_text()))?
    };

    let request = form.into_request(&state.config.reseller_domain);
    let config = (*state.config).clone();
    let fetchers = state.fetchers.clone();

    let report = tokio::task::spawn_blocking(move || -> Result<ValidationReport, AppError> {
        let fetcher = fetchers(&config)?;
        Ok(ChainValidator::new(fetcher, config).validate_request(&request))
    })
    .await
    .map_err(|e| AppError::Internal(format!("validation worker failed: {}", e)))??;

    state.store.replace(&report);
    tracing::info!(
        run_id = %report.run_id,
        status = ?report.status,
        rows = report.table.len(),
        "validation request served"
    );
    Ok(Json(report))
}

/// GET /download
async fn download_latest(State(state): State<AppState>) -> Result<Response, AppError> {
    let rows = state.store.latest().map(|r| r.rows).unwrap_or_default();
    csv_response(&rows)
}

/// GET /download/:run_id
async fn download_run(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Result<Response, AppError> {
    if !is_run_id(&run_id) {
        return Err(AppError::BadRequest(format!("not a run id: {}", run_id)));
    }
    let run = state
        .store
        .get(&run_id)
        .ok_or_else(|| AppError::NotFound(format!("run not available: {}", run_id)))?;
    csv_response(&run.rows)
}

fn csv_response(rows: &[ValidationRow]) -> Result<Response, AppError> {
    let body = render_validation_csv(rows)?;
    Ok((
        [
            (CONTENT_TYPE, "text/csv".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILENAME),
            ),
        ],
        body,
    )
        .into_response())
}
