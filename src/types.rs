use std::{collections::HashMap, path::PathBuf, sync::Arc};

use serde::Deserialize;
use sqlx::PgPool;
use tokio::sync::Mutex;

pub struct AppState {
    pub db: PgPool,
    pub http_client: reqwest::Client,
    pub threads_dir: PathBuf,
    pub thread_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    pub ai_base_url: String,
    pub provider_base_url: String,
    pub auth_token_secret: String,
}

#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub plan_status: String,
    pub instance_name: String,
    pub instance_apikey: String,
    pub workspace_chat_id: String,
    pub workspace_apikey: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub pass: String,
    #[serde(default)]
    pub status_plan: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub pass: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkWorkspaceBody {
    pub instance: String,
    pub apikey: String,
    pub chat: String,
    pub chat_apikey: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryBody {
    pub instance: String,
    pub apikey: String,
}

/// One inbound messages-upsert delivery, reduced to the fields the
/// orchestrator consumes. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    pub message: String,
    pub remote_id: String,
    pub server_url: String,
    pub apikey: String,
    pub instance: String,
}
