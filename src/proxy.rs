use crate::config::ProxyConfig;
use crate::error::{ProxyError, Result};
use crate::logging::{LogLevel, SharedLogger};
use crate::translate::oneminai_types::ProviderPayload;
use crate::translate::openai_types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::translate::request::openai_to_oneminai;
use crate::translate::response::{oneminai_to_openai, synthetic_response};

use reqwest::StatusCode;
use serde_json::Value;

/// Prompt sent by [`probe`].
pub const PROBE_PROMPT: &str = "Hello, how are you?";

/// Complete a chat request through 1minAI, always answering in-shape.
///
/// Failures (missing credential, upstream errors, timeouts) are logged and
/// turned into a synthetic completion describing them.
pub async fn complete(
    req: &ChatCompletionRequest,
    config: &ProxyConfig,
    client: &reqwest::Client,
    logger: &SharedLogger,
) -> ChatCompletionResponse {
    match try_complete(req, config, client, logger).await {
        Ok(resp) => resp,
        Err(e) => {
            logger.log_with_context(
                LogLevel::Error,
                "proxy",
                format!("Falling back to synthetic response: {}", e),
                serde_json::json!({ "model": req.model }),
            );
            synthetic_response(&e, &req.model)
        }
    }
}

/// Complete a chat request, surfacing failures to the caller.
pub async fn try_complete(
    req: &ChatCompletionRequest,
    config: &ProxyConfig,
    client: &reqwest::Client,
    logger: &SharedLogger,
) -> Result<ChatCompletionResponse> {
    // Checked before translating so a misconfigured proxy never calls out.
    let api_key = config.require_api_key()?;
    let payload = openai_to_oneminai(req)?;

    let body = call_provider(&payload, api_key, config, client, logger).await?;
    let resp = oneminai_to_openai(&body, &req.model, &payload.prompt_object.prompt);

    logger.info(
        "proxy",
        format!(
            "Completed: model={} prompt={} completion={} tokens",
            req.model, resp.usage.prompt_tokens, resp.usage.completion_tokens
        ),
    );

    Ok(resp)
}

/// POST one payload to the features endpoint. Exactly one attempt; the
/// client's timeout bounds it.
pub async fn call_provider(
    payload: &ProviderPayload,
    api_key: &str,
    config: &ProxyConfig,
    client: &reqwest::Client,
    logger: &SharedLogger,
) -> Result<Value> {
    let url = config.features_url();

    logger.info(
        "proxy",
        format!(
            "POST {} model={} api_key={}",
            url,
            payload.model,
            config.masked_api_key()
        ),
    );

    let response = client
        .post(&url)
        .header("API-KEY", api_key)
        .header("Content-Type", "application/json")
        .json(payload)
        .send()
        .await
        .map_err(|e| ProxyError::upstream(describe_send_error(&e)))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProxyError::upstream(format!("Failed to read response body: {}", e)))?;

    logger.debug(
        "proxy",
        format!("Response status={} body_len={}", status.as_u16(), body.len()),
    );

    if status != StatusCode::OK {
        logger.log_with_context(
            LogLevel::Warn,
            "proxy",
            "Provider returned an error status",
            serde_json::json!({ "status": status.as_u16(), "body": truncate(&body, 500) }),
        );
        return Err(ProxyError::upstream(format!(
            "Provider returned status {}: {}",
            status.as_u16(),
            truncate(&body, 300)
        )));
    }

    serde_json::from_str(&body).map_err(|e| {
        ProxyError::upstream(format!(
            "Failed to parse provider response: {}. Body: {}",
            e,
            truncate(&body, 300)
        ))
    })
}

/// Send one fixed request and return the raw status and body.
/// Used by `--probe` to check a credential without starting the server.
pub async fn probe(
    config: &ProxyConfig,
    client: &reqwest::Client,
    logger: &SharedLogger,
) -> Result<(u16, Value)> {
    let api_key = config.require_api_key()?;
    let payload = ProviderPayload::chat(crate::aliases::DEFAULT_PROVIDER_MODEL, PROBE_PROMPT);

    logger.info("probe", format!("POST {} api_key={}", config.features_url(), config.masked_api_key()));

    let response = client
        .post(config.features_url())
        .header("API-KEY", api_key)
        .json(&payload)
        .send()
        .await?;

    let status = response.status().as_u16();
    let text = response.text().await?;
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

    Ok((status, body))
}

fn describe_send_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Request timed out: {}", e)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
