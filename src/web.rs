use actix_web::{web, App, HttpServer, HttpResponse, Result, ResponseError, middleware};
use actix_web::http::{header, StatusCode};
use actix_files::Files;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::config::AppConfig;
use crate::error::LoggerError;
use crate::form::LogActionRequest;
use crate::session::{self, MatchSession};
use crate::store::LogStore;
use crate::tracker::{Action, EventRecord, MatchState, Team};

/// Shared state for the single operator's session
pub struct AppState {
    pub store: LogStore,
    pub session: Mutex<Option<MatchSession>>,
}

impl AppState {
    pub fn new(store: LogStore) -> Self {
        AppState {
            store,
            session: Mutex::new(None),
        }
    }

    fn session(&self) -> MutexGuard<'_, Option<MatchSession>> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ResponseError for LoggerError {
    fn status_code(&self) -> StatusCode {
        match self {
            LoggerError::NoActiveLog | LoggerError::LogExists(_) => StatusCode::CONFLICT,
            LoggerError::LogNotFound(_) => StatusCode::NOT_FOUND,
            e if e.is_input_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string()
        }))
    }
}

#[derive(Deserialize)]
pub struct SelectRequest {
    name: String,
}

#[derive(Deserialize)]
pub struct CreateRequest {
    name: Option<String>,
}

#[derive(Serialize)]
pub struct LogsResponse {
    logs: Vec<String>,
    active: Option<String>,
}

#[derive(Serialize)]
pub struct StateResponse {
    log_name: String,
    entries: usize,
    state: MatchState,
}

#[derive(Serialize)]
pub struct LogActionResponse {
    success: bool,
    record: EventRecord,
    state: MatchState,
}

#[derive(Serialize)]
pub struct FormOptions {
    teams: Vec<&'static str>,
    actions: Vec<&'static str>,
}

// Log listing endpoint
async fn list_logs(state: web::Data<AppState>) -> Result<HttpResponse, LoggerError> {
    let logs = state.store.list()?;
    let active = state.session().as_ref().map(|s| s.log_name.clone());
    Ok(HttpResponse::Ok().json(LogsResponse { logs, active }))
}

// New log endpoint; the created log becomes the active one
async fn create_log(
    req: web::Json<CreateRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LoggerError> {
    let name = state.store.create(req.name.as_deref())?;
    session::select(&mut state.session(), &state.store, &name)?;
    Ok(HttpResponse::Created().json(serde_json::json!({"success": true, "name": name})))
}

// Log selection endpoint
async fn select_log(
    req: web::Json<SelectRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LoggerError> {
    let mut active = state.session();
    session::select(&mut active, &state.store, &req.name)?;
    let entries = active.as_ref().map(|s| s.entries.len()).unwrap_or(0);
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "entries": entries})))
}

// Current match state endpoint
async fn get_state(state: web::Data<AppState>) -> Result<HttpResponse, LoggerError> {
    let active = state.session();
    let session = active.as_ref().ok_or(LoggerError::NoActiveLog)?;
    Ok(HttpResponse::Ok().json(StateResponse {
        log_name: session.log_name.clone(),
        entries: session.entries.len(),
        state: session.state.clone(),
    }))
}

// Logged rows endpoint
async fn get_entries(state: web::Data<AppState>) -> Result<HttpResponse, LoggerError> {
    let active = state.session();
    let session = active.as_ref().ok_or(LoggerError::NoActiveLog)?;
    Ok(HttpResponse::Ok().json(&session.entries))
}

// Action logging endpoint
async fn log_action(
    req: web::Json<LogActionRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LoggerError> {
    let mut active = state.session();
    let record = session::log_action(&mut active, &state.store, &req)?;
    let match_state = active.as_ref().map(|s| s.state.clone()).unwrap_or_default();
    Ok(HttpResponse::Ok().json(LogActionResponse {
        success: true,
        record,
        state: match_state,
    }))
}

// CSV download endpoint
async fn download(state: web::Data<AppState>) -> Result<HttpResponse, LoggerError> {
    let active = state.session();
    let session = active.as_ref().ok_or(LoggerError::NoActiveLog)?;
    let csv = session.to_csv()?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", session.log_name),
        ))
        .body(csv))
}

// Dropdown choices for the form
async fn form_options() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(FormOptions {
        teams: Team::ALL.iter().map(|t| t.as_str()).collect(),
        actions: Action::ALL.iter().map(|a| a.as_str()).collect(),
    }))
}

// HTML page handler
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Registers every route; shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/options", web::get().to(form_options))
        .route("/api/logs", web::get().to(list_logs))
        .route("/api/logs", web::post().to(create_log))
        .route("/api/select", web::post().to(select_log))
        .route("/api/state", web::get().to(get_state))
        .route("/api/entries", web::get().to(get_entries))
        .route("/api/log", web::post().to(log_action))
        .route("/api/download", web::get().to(download));
}

pub async fn start_server(config: AppConfig) -> std::io::Result<()> {
    let store = LogStore::open(&config.log_dir)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let app_state = web::Data::new(AppState::new(store));

    info!(port = config.port, log_dir = %config.log_dir.display(), "starting web server");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .configure(configure)
    })
    .bind((config.bind.as_str(), config.port))?
    .run()
    .await
}
