use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::clients;

/// Outcome of the read-through-create thread lookup. `Created` means a fresh
/// thread was provisioned at the workspace and persisted under the remote id.
#[derive(Debug, Clone, PartialEq)]
pub enum ThreadResolution {
    Existing(String),
    Created(String),
}

impl ThreadResolution {
    pub fn thread_id(&self) -> &str {
        match self {
            ThreadResolution::Existing(id) | ThreadResolution::Created(id) => id,
        }
    }
}

fn sanitize_instance_dir(instance: &str) -> String {
    instance
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect::<String>()
        .replace("..", "-")
}

pub fn thread_table_path(threads_dir: &Path, instance: &str) -> PathBuf {
    threads_dir
        .join(sanitize_instance_dir(instance))
        .join("data.json")
}

pub async fn load_thread_table(path: &Path) -> Result<HashMap<String, String>, String> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| format!("failed to read thread table {}: {err}", path.display()))?;
    serde_json::from_str::<HashMap<String, String>>(&raw)
        .map_err(|err| format!("failed to parse thread table {}: {err}", path.display()))
}

pub async fn store_thread_table(
    path: &Path,
    table: &HashMap<String, String>,
) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|err| format!("failed to create {}: {err}", parent.display()))?;
    }
    let raw = serde_json::to_string(table)
        .map_err(|err| format!("failed to serialize thread table: {err}"))?;
    tokio::fs::write(path, raw)
        .await
        .map_err(|err| format!("failed to write thread table {}: {err}", path.display()))
}

/// Resolves the workspace thread for (instance, remote conversation).
///
/// An unreadable table and a missing key share the same branch: both provision
/// a fresh thread at the workspace and persist the table again. A table that
/// fails to load is replaced wholesale, so any prior entries in a corrupt file
/// are discarded. The created id is persisted before this returns, so the
/// caller never talks to the workspace with an unrecorded thread.
pub async fn resolve_or_create_thread(
    http_client: &reqwest::Client,
    ai_base_url: &str,
    chat_id: &str,
    workspace_apikey: &str,
    threads_dir: &Path,
    instance: &str,
    remote_id: &str,
) -> Result<ThreadResolution, String> {
    let path = thread_table_path(threads_dir, instance);
    let mut table = match load_thread_table(&path).await {
        Ok(table) => table,
        Err(err) => {
            eprintln!("thread table unavailable for {instance}, provisioning fresh: {err}");
            HashMap::new()
        }
    };

    if let Some(thread_id) = table.get(remote_id) {
        return Ok(ThreadResolution::Existing(thread_id.clone()));
    }

    let thread_id = clients::create_thread(http_client, ai_base_url, chat_id, workspace_apikey).await?;
    table.insert(remote_id.to_string(), thread_id.clone());
    store_thread_table(&path, &table).await?;
    Ok(ThreadResolution::Created(thread_id))
}
