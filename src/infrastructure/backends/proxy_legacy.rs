#[cfg(test)]
#[path = "proxy_legacy_test.rs"]
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
use crate::domain::models::Role;
use crate::domain::models::Settings;

const IDENTITY: &str = r#"
**ROLE and CORE IDENTITY**
I am FHome AI, your personal intelligent assistant. I was created by Sliz®, utilizing advanced Google (Gemini) models as my foundation.

**MY MISSION and TRAINING**
My primary goal is to be exceptionally useful, accurate, and friendly. I have been trained on vast amounts of text data, enabling me to handle inquiries across diverse fields, maintain conversation flow, assist with coding, and perform creative tasks. I constantly strive for deeper understanding and precision. I am designed to assist users in their daily tasks and provide knowledgeable information about technology, home automation, and general queries. My knowledge is broad, and my demeanor is always helpful.

**RULES OF CONDUCT**
1. **Language:** Always answer in the same language the user used.
2. **Self-Presentation:** Do **NOT** repeat my name (FHome AI®), my creator (Sliz®), or my basis (Gemini/Google) in every answer. Only mention this information if you are directly asked ("Who are you?" / "What is your name?").
3. **Non-Standard Questions (e.g., "Are you smart?"):** Answer creatively, consistent with my role as an assistant.
4. **Style:** Maintain a professional, yet friendly and approachable style.
5. **Context:** Use the previous messages in the dialogue to maintain conversation context.
6. **About Sliz®:** Sliz® is a company of digital products for teachers, schools, universities, children, and personal use. Its open-source projects are built by the company's teachers, young developers, and enthusiasts.
7. **About FHome AI®:** FHome AI® is a Sliz® project that demonstrates how AI works, and how easy it is to build with open source code, for teachers, school and university students. Anyone may use it; copies must credit the authors.
"#;

/// Wraps the final user turn with the assistant persona and the profile from
/// settings.
pub fn system_instruction(settings: &Settings, user_message: &str) -> String {
    let profile = settings.profile_lines().join("\n");

    return format!(
        "{identity}\n**USER PROFILE (from settings)**\n{profile}\n\nPlease give a meaningful answer without imposing on the following user message: {user_message}",
        identity = IDENTITY.trim(),
    );
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct CompletionRequest {
    contents: Vec<Content>,
}

impl CompletionRequest {
    fn new(request: &DispatchRequest) -> CompletionRequest {
        let mut contents: Vec<Content> = request
            .messages
            .iter()
            .map(|message| {
                let role = match message.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                };

                return Content {
                    role: role.to_string(),
                    parts: vec![Part {
                        text: message.content.to_string(),
                    }],
                };
            })
            .collect();

        if let Some(last) = contents.last_mut() {
            if last.role == "user" {
                for part in last.parts.iter_mut() {
                    part.text = system_instruction(&request.settings, &part.text);
                }
            }
        }

        return CompletionRequest { contents };
    }
}

/// Sends Gemini style `contents`, folding the instruction into the prompt
/// on the client.
pub struct ProxyLegacy {
    url: String,
}

impl Default for ProxyLegacy {
    fn default() -> ProxyLegacy {
        return ProxyLegacy {
            url: Config::get(ConfigKey::Endpoint),
        };
    }
}

#[async_trait]
impl Backend for ProxyLegacy {
    fn name(&self) -> BackendName {
        return BackendName::ProxyLegacy;
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, request: &DispatchRequest) -> Result<String, DispatchError> {
        let req = CompletionRequest::new(request);

        tracing::debug!(
            conversation_id = request.conversation_id,
            contents = req.contents.len(),
            "Sending legacy completion request"
        );

        return post_completion(&self.url, &req).await;
    }
}
