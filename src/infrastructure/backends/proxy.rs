#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;

use async_trait::async_trait;
use serde_derive::Serialize;

use super::completion::post_completion;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::DispatchError;
use crate::domain::models::DispatchRequest;
use crate::domain::models::Message;
use crate::domain::models::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [Message],
    settings: &'a Settings,
}

/// Sends the raw history and the settings, leaving prompt assembly to the
/// proxy.
pub struct Proxy {
    url: String,
}

impl Default for Proxy {
    fn default() -> Proxy {
        return Proxy {
            url: Config::get(ConfigKey::Endpoint),
        };
    }
}

#[async_trait]
impl Backend for Proxy {
    fn name(&self) -> BackendName {
        return BackendName::Proxy;
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, request: &DispatchRequest) -> Result<String, DispatchError> {
        let req = CompletionRequest {
            messages: &request.messages,
            settings: &request.settings,
        };

        tracing::debug!(
            conversation_id = request.conversation_id,
            messages = request.messages.len(),
            "Sending completion request"
        );

        return post_completion(&self.url, &req).await;
    }
}
