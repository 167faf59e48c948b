use serde_json::{json, Value};

/// Simulated-typing options sent with every relayed text message.
pub const TYPING_DELAY_MS: u64 = 1200;
pub const TYPING_PRESENCE: &str = "composing";

pub async fn create_thread(
    http_client: &reqwest::Client,
    base_url: &str,
    chat_id: &str,
    api_key: &str,
) -> Result<String, String> {
    let url = format!(
        "{}/api/chat/{chat_id}/new-thread",
        base_url.trim_end_matches('/')
    );
    let response = http_client
        .post(&url)
        .header("X-Workspace-API-Key", api_key)
        .json(&json!({}))
        .send()
        .await
        .map_err(|err| format!("workspace new-thread request failed: {err}"))?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(format!("workspace new-thread returned {status}: {body}"));
    }
    let payload = response
        .json::<Value>()
        .await
        .map_err(|err| format!("workspace new-thread parse failed: {err}"))?;
    let thread_id = payload
        .get("threadId")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or("")
        .to_string();
    if thread_id.is_empty() {
        return Err("workspace new-thread response had no threadId".to_string());
    }
    Ok(thread_id)
}

pub async fn request_reply(
    http_client: &reqwest::Client,
    base_url: &str,
    chat_id: &str,
    api_key: &str,
    thread_id: &str,
    input: &str,
) -> Result<String, String> {
    let url = format!(
        "{}/api/chat/{chat_id}/response",
        base_url.trim_end_matches('/')
    );
    let response = http_client
        .post(&url)
        .header("X-Workspace-API-Key", api_key)
        .json(&json!({
            "threadId": thread_id,
            "input": input,
        }))
        .send()
        .await
        .map_err(|err| format!("workspace response request failed: {err}"))?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(format!("workspace response returned {status}: {body}"));
    }
    let payload = response
        .json::<Value>()
        .await
        .map_err(|err| format!("workspace response parse failed: {err}"))?;
    let reply = payload
        .get("response")
        .and_then(|r| r.get("value"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    if reply.is_empty() {
        return Err("workspace response had empty reply value".to_string());
    }
    Ok(reply)
}

pub async fn send_text(
    http_client: &reqwest::Client,
    server_url: &str,
    instance: &str,
    api_key: &str,
    number: &str,
    text: &str,
) -> Result<Value, String> {
    let url = format!(
        "{}/message/sendText/{instance}",
        server_url.trim_end_matches('/')
    );
    let response = http_client
        .post(&url)
        .header("apikey", api_key)
        .json(&json!({
            "number": number,
            "options": {
                "delay": TYPING_DELAY_MS,
                "presence": TYPING_PRESENCE,
                "linkPreview": false,
            },
            "textMessage": { "text": text },
        }))
        .send()
        .await
        .map_err(|err| format!("sendText request failed: {err}"))?;
    let status = response.status();
    let raw_body = response.text().await.unwrap_or_default();
    if !status.is_success() {
        return Err(format!("sendText returned {status}: {raw_body}"));
    }
    Ok(serde_json::from_str::<Value>(&raw_body).unwrap_or_else(|_| json!({ "raw": raw_body })))
}

pub async fn find_messages(
    http_client: &reqwest::Client,
    base_url: &str,
    instance: &str,
    api_key: &str,
) -> Result<Value, String> {
    let url = format!(
        "{}/chat/findMessages/{instance}",
        base_url.trim_end_matches('/')
    );
    let response = http_client
        .post(&url)
        .header("apikey", api_key)
        .json(&json!({}))
        .send()
        .await
        .map_err(|err| format!("findMessages request failed: {err}"))?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(format!("findMessages returned {status}: {body}"));
    }
    response
        .json::<Value>()
        .await
        .map_err(|err| format!("findMessages parse failed: {err}"))
}
