use crate::completion::{Completer, CompletionError, CompletionRequest};
use crate::message::prompt::{FALLBACK_MAX_TOKENS, FALLBACK_SYSTEM_PROMPT, FALLBACK_TEMPERATURE};
use crate::{ClientError, ClientResult};

pub fn completion_request(message: &str) -> CompletionRequest {
    CompletionRequest {
        system: FALLBACK_SYSTEM_PROMPT.to_string(),
        user: message.to_string(),
        temperature: FALLBACK_TEMPERATURE,
        max_tokens: FALLBACK_MAX_TOKENS,
    }
}

/// Sends the trimmed message to the completion service once. Any failure,
/// including blank content, is reported as `fallback_unavailable`.
pub fn invoke(completer: &dyn Completer, message: &str) -> ClientResult<String> {
    let request = completion_request(message);
    let content = completer.complete(&request).map_err(|error| {
        tracing::warn!(%error, "completion fallback failed");
        map_completion_error(&error)
    })?;

    if content.trim().is_empty() {
        tracing::warn!("completion fallback returned blank content");
        return Err(map_completion_error(&CompletionError::EmptyContent));
    }

    Ok(content)
}

fn map_completion_error(error: &CompletionError) -> ClientError {
    match error {
        CompletionError::NotConfigured { variable } => ClientError::fallback_not_configured(variable),
        other => ClientError::fallback_unavailable(&other.to_string()),
    }
}
