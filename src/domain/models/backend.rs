#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumString;
use strum::EnumVariantNames;

use super::ConversationId;
use super::Message;
use super::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumString, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum BackendName {
    /// Sends `{ messages, settings }` and lets the proxy build the prompt.
    Proxy,
    /// Sends `{ contents }` with the instruction folded into the last user turn.
    ProxyLegacy,
}

impl BackendName {
    pub fn parse(text: String) -> Option<BackendName> {
        return text.parse::<BackendName>().ok();
    }
}

/// Everything a backend needs to answer one send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchRequest {
    pub conversation_id: ConversationId,
    pub messages: Vec<Message>,
    pub settings: Settings,
}

const TRANSPORT_DIAGNOSTIC: &str = "Sorry, I couldn't connect to the AI service.";
const FAILURE_DIAGNOSTIC: &str = "Sorry, I encountered an error processing your request";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("{0}")]
    Transport(String),
    #[error("AI Response Error: {0}")]
    Remote(String),
    #[error("unexpected response shape")]
    UnexpectedResponseShape,
}

impl DispatchError {
    /// User facing text, stored as an assistant message so it stays in the
    /// conversation history.
    pub fn diagnostic(&self) -> String {
        match self {
            DispatchError::Transport(details) => {
                return format!("{TRANSPORT_DIAGNOSTIC} Details: {details}");
            }
            DispatchError::Remote(_) => {
                return format!("{FAILURE_DIAGNOSTIC}. Details: {self}");
            }
            DispatchError::UnexpectedResponseShape => {
                return format!("{FAILURE_DIAGNOSTIC} (AI response failed).");
            }
        }
    }

    /// Whether stored assistant text is one of the diagnostics above.
    pub fn is_diagnostic(text: &str) -> bool {
        return text.starts_with(TRANSPORT_DIAGNOSTIC) || text.starts_with(FAILURE_DIAGNOSTIC);
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct DispatchResponse {
    pub conversation_id: ConversationId,
    pub result: Result<String, DispatchError>,
}

impl DispatchResponse {
    pub fn content(&self) -> String {
        match &self.result {
            Ok(text) => return text.to_string(),
            Err(err) => return err.diagnostic(),
        }
    }
}

#[async_trait]
pub trait Backend {
    fn name(&self) -> BackendName;

    /// Issues exactly one request for the conversation in `request` and
    /// returns the assistant's reply. Never retries.
    async fn get_completion(&self, request: &DispatchRequest) -> Result<String, DispatchError>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
