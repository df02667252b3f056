/*! HTTP front for pre/postprocessing and translation.

| route              | body                                    | answer                         |
|--------------------|-----------------------------------------|--------------------------------|
| `GET /healthz`     |                                         | `{"status": "ok"}`             |
| `POST /preprocess` | `{"contents": [...], "lang": "is"}`     | `{"contents": [...]}`          |
| `POST /postprocess`| `{"contents": [...], "lang": "en"}`     | `{"contents": [...]}`          |
| `POST /translate`  | see [crate::client::TranslationRequest] | see [crate::client::TranslationResponse] |

Preprocessing truecases with the model loaded for the request language, if any.
Pipeline work and outbound calls are blocking and run on tokio's blocking pool.
!*/
use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client::{
    HttpTransport, TranslateBulk, Translation, TranslationRequest, TranslationResponse,
};
use crate::error::Error;
use crate::lang::check_lang;
use crate::pipeline::process::Processor;
use crate::pipeline::truecase::TruecaseModel;

/// Shared, read-only server state.
#[derive(Debug, Clone)]
pub struct AppState {
    debug: bool,
    translation_url: String,
    batch_size: usize,
    processors: Arc<HashMap<String, Arc<Processor>>>,
}

impl AppState {
    /// `models` maps a language code to its truecasing model.
    pub fn new(
        debug: bool,
        translation_url: &str,
        batch_size: usize,
        models: HashMap<String, TruecaseModel>,
    ) -> Self {
        let processors = models
            .into_iter()
            .map(|(lang, model)| {
                let processor = Arc::new(Processor::new(&lang, Some(model)));
                (lang, processor)
            })
            .collect();
        Self {
            debug,
            translation_url: translation_url.to_string(),
            batch_size,
            processors: Arc::new(processors),
        }
    }

    /// Processor loaded for `lang`, or a model-less one. Never copies a model.
    fn processor(&self, lang: &str) -> Arc<Processor> {
        match self.processors.get(lang) {
            Some(p) => Arc::clone(p),
            None => Arc::new(Processor::new(lang, None)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub contents: Vec<String>,
    pub lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub contents: Vec<String>,
}

/// Error answered to clients.
///
/// The message is only detailed in debug mode.
struct ApiError {
    error: Error,
    debug: bool,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.error {
            Error::InvalidConfig(_) | Error::UnknownLang(_) | Error::Invariant(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::Upstream(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!("{}: {}", status, self.error);
        let message = if self.debug {
            self.error.to_string()
        } else {
            status
                .canonical_reason()
                .unwrap_or("error")
                .to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Run `f` on the blocking pool.
async fn blocking<T, F>(debug: bool, f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    let res = match tokio::task::spawn_blocking(f).await {
        Ok(res) => res,
        Err(e) => Err(Error::Custom(format!("worker failed: {}", e))),
    };
    res.map_err(|error| ApiError { error, debug })
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn preprocess(
    State(state): State<AppState>,
    Json(req): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let processor = state.processor(&req.lang);
    let contents: Vec<String> = blocking(state.debug, move || {
        check_lang(&req.lang)?;
        Ok(req
            .contents
            .iter()
            .map(|line| processor.preprocess_line(line))
            .collect())
    })
    .await?;
    Ok(Json(ProcessResponse { contents }))
}

async fn postprocess(
    State(state): State<AppState>,
    Json(req): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let processor = Processor::new(&req.lang, None);
    let contents: Vec<String> = blocking(state.debug, move || {
        check_lang(&req.lang)?;
        Ok(req
            .contents
            .iter()
            .map(|line| processor.postprocess_line(line))
            .collect())
    })
    .await?;
    Ok(Json(ProcessResponse { contents }))
}

async fn translate(
    State(state): State<AppState>,
    Json(req): Json<TranslationRequest>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let url = state.translation_url.clone();
    let batch_size = state.batch_size;
    let translations = blocking(state.debug, move || {
        check_lang(&req.source_language_code)?;
        check_lang(&req.target_language_code)?;
        let transport = HttpTransport::new(&url)?;
        let lines = req.contents.into_iter().map(Ok);
        TranslateBulk::new(
            lines,
            transport,
            &req.source_language_code,
            &req.target_language_code,
            &req.model,
            batch_size,
        )?
        .map(|line| line.map(|translated_text| Translation { translated_text }))
        .collect::<Result<Vec<Translation>, Error>>()
    })
    .await?;
    Ok(Json(TranslationResponse { translations }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/preprocess", post(preprocess))
        .route("/postprocess", post(postprocess))
        .route("/translate", post(translate))
        .with_state(state)
}

/// Serve until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), Error> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let lines = vec![Ok("Yesterday the Smiths left .".to_string())];
        let model = TruecaseModel::train(lines.into_iter(), 1).unwrap();
        let mut models = HashMap::new();
        models.insert("en".to_string(), model);
        AppState::new(false, "http://localhost:1/translate", 10, models)
    }

    #[test]
    fn test_requests_share_model() {
        let state = state();
        let first = state.processor("en");
        let second = state.clone().processor("en");
        assert!(Arc::ptr_eq(&first, &second));
        match (first.model(), second.model()) {
            (Some(a), Some(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("en model missing"),
        }
    }

    #[test]
    fn test_unknown_lang_has_no_model() {
        assert!(state().processor("is").model().is_none());
    }
}
