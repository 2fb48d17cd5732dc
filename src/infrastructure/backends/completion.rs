#[cfg(test)]
#[path = "completion_test.rs"]
mod tests;

use serde::Serialize;
use serde_derive::Deserialize;

use crate::domain::models::DispatchError;

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Maps a proxy response body onto the reply text or a dispatch error. Both
/// payload shapes share the same response contract.
pub fn parse_completion(body: &str) -> Result<String, DispatchError> {
    let res = match serde_json::from_str::<CompletionResponse>(body) {
        Ok(res) => res,
        Err(err) => {
            tracing::warn!(error = ?err, "Completion response could not be parsed");
            return Err(DispatchError::UnexpectedResponseShape);
        }
    };

    let text = res
        .candidates
        .first()
        .and_then(|candidate| return candidate.content.as_ref())
        .and_then(|content| return content.parts.first())
        .and_then(|part| return part.text.clone());

    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(error) = res.error {
        let message = error
            .get("message")
            .and_then(|message| return message.as_str())
            .unwrap_or_default();

        if message.is_empty() {
            return Err(DispatchError::Remote(body.trim().to_string()));
        }

        return Err(DispatchError::Remote(message.to_string()));
    }

    return Err(DispatchError::UnexpectedResponseShape);
}

/// Issues exactly one JSON POST and parses whatever body comes back. The
/// status code is not consulted, error payloads arrive with 4xx and 5xx too.
pub async fn post_completion<T: Serialize + ?Sized>(
    url: &str,
    req: &T,
) -> Result<String, DispatchError> {
    let res = reqwest::Client::new()
        .post(url)
        .json(req)
        .send()
        .await
        .map_err(|err| return DispatchError::Transport(err.to_string()))?;

    let status = res.status().as_u16();
    if status >= 400 {
        tracing::warn!(status = status, "Completion proxy returned an error status");
    }

    let body = res
        .text()
        .await
        .map_err(|err| return DispatchError::Transport(err.to_string()))?;

    return parse_completion(&body);
}
