// routes.rs — The HTTP edge.
//
// The endpoints mirror the engine's inbound triggers:
//   POST /inbound  — a normalized email from the mail collaborator
//   GET  /reshare  — a human hitting a reshare landing link
//   POST /changes  — a batch of store change notifications
//   POST /signin   — a completed sign-in from the identity collaborator
// plus GET /health. Handlers hold no state of their own; everything
// lives in AppState and the directory store behind it.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::error;

use vine_directory::{Deadline, MemoryDirectory};
use vine_lifecycle::{JsonlSink, Lifecycle};
use vine_mail::notify::send_welcome_email;
use vine_mail::users::{create_or_update_user, SignInProfile};
use vine_mail::{
    InboundMessage, MailRouter, MemoryAttachmentStore, PassthroughShortener, RouteOutcome,
    RouterConfig,
};
use vine_reconcile::{ReconcileReport, Reconciler, ShareActionChange};
use vine_reshare::{ReshareConfig, ReshareGenerator};

use crate::config::VineConfig;
use crate::mailer::TracingMailer;

/// Everything the handlers share.
pub struct AppState {
    pub config: VineConfig,
    pub directory: MemoryDirectory,
    pub mailer: TracingMailer,
    pub attachments: MemoryAttachmentStore,
    pub shortener: PassthroughShortener,
    pub lifecycle: Lifecycle,
}

impl AppState {
    pub fn new(config: VineConfig) -> Self {
        let lifecycle = Lifecycle::new(Box::new(JsonlSink::new(&config.audit_log)));
        Self {
            directory: MemoryDirectory::new(),
            mailer: TracingMailer,
            attachments: MemoryAttachmentStore::new(format!("{}/attachments", config.api_url)),
            shortener: PassthroughShortener,
            lifecycle,
            config,
        }
    }

    fn deadline(&self) -> Deadline {
        Deadline::within(self.config.request_deadline_window())
    }

    fn router_config(&self) -> RouterConfig {
        RouterConfig {
            mail_domain: self.config.mail_domain.clone(),
            sender: self.config.sender.clone(),
            api_url: self.config.api_url.clone(),
            app_url: self.config.app_url.clone(),
        }
    }
}

/// Build the axum application.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/inbound", post(inbound))
        .route("/reshare", get(reshare))
        .route("/changes", post(changes))
        .route("/signin", post(signin))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn inbound(
    State(state): State<Arc<AppState>>,
    Json(message): Json<InboundMessage>,
) -> Result<Json<RouteOutcome>, (StatusCode, String)> {
    let router = MailRouter::new(
        &state.directory,
        &state.mailer,
        &state.attachments,
        &state.shortener,
        state.router_config(),
    );
    router
        .route(&message, &state.deadline())
        .map(Json)
        .map_err(|e| {
            error!("inbound routing failed: {}", e);
            (StatusCode::BAD_GATEWAY, e.to_string())
        })
}

#[derive(Deserialize)]
struct ReshareParams {
    #[serde(rename = "transactionId")]
    transaction_id: String,
    #[serde(rename = "challengeId")]
    challenge_id: String,
}

async fn reshare(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReshareParams>,
) -> impl IntoResponse {
    let generator = ReshareGenerator::new(
        &state.directory,
        &state.shortener,
        ReshareConfig {
            mail_domain: state.config.mail_domain.clone(),
            api_url: state.config.api_url.clone(),
            app_url: state.config.app_url.clone(),
        },
    );
    match generator.generate(
        &params.challenge_id,
        &params.transaction_id,
        &state.deadline(),
    ) {
        Ok(html) => (StatusCode::CREATED, Html(html)).into_response(),
        Err(e) => {
            error!("reshare generation failed: {}", e);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
    }
}

async fn changes(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<Vec<ShareActionChange>>,
) -> Json<ReconcileReport> {
    let reconciler = Reconciler::new(&state.lifecycle);
    Json(reconciler.process(&batch))
}

/// The post-OAuth completion step: the identity collaborator has done
/// the handshake and hands over the resulting profile.
async fn signin(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<SignInProfile>,
) -> Result<Json<vine_model::User>, (StatusCode, String)> {
    let deadline = state.deadline();
    let (user, created) = create_or_update_user(&state.directory, profile, &deadline)
        .map_err(|e| {
            error!("sign-in upsert failed: {}", e);
            (StatusCode::BAD_GATEWAY, e.to_string())
        })?;

    if created {
        // Welcome failures cost the email, not the sign-in.
        if let Err(e) = send_welcome_email(&state.mailer, &state.router_config(), &user, &deadline)
        {
            error!("welcome email failed: {}", e);
        }
    }

    Ok(Json(user))
}
