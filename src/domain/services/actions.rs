#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use super::clipboard::ClipboardService;
use crate::domain::models::Action;
use crate::domain::models::Backend;
use crate::domain::models::BackendBox;
use crate::domain::models::DispatchRequest;
use crate::domain::models::DispatchResponse;
use crate::domain::models::Event;

async fn dispatch(
    backend: Arc<dyn Backend + Send + Sync>,
    request: DispatchRequest,
    tx: mpsc::UnboundedSender<Event>,
) {
    tracing::debug!(
        backend = %backend.name(),
        conversation_id = request.conversation_id,
        messages = request.messages.len(),
        "Dispatching request"
    );

    let result = backend.get_completion(&request).await;
    let response = DispatchResponse {
        conversation_id: request.conversation_id,
        result,
    };

    if tx.send(Event::BackendResponse(response)).is_err() {
        tracing::warn!("UI loop is gone, dropping backend response");
    }
}

fn copy_to_clipboard(text: String, tx: &mpsc::UnboundedSender<Event>) {
    if let Err(err) = ClipboardService::set(text) {
        tracing::error!(error = ?err, "Failed to copy to clipboard");
        if tx.send(Event::ClipboardFailed(err.to_string())).is_err() {
            tracing::warn!("UI loop is gone, dropping clipboard failure");
        }
    }
}

/// Runs actions requested by the UI loop. Each dispatch runs on its own task
/// so the worker keeps serving clipboard requests while a reply is pending.
pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        backend: BackendBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let backend: Arc<dyn Backend + Send + Sync> = Arc::from(backend);

        while let Some(action) = rx.recv().await {
            match action {
                Action::BackendRequest(request) => {
                    tokio::spawn(dispatch(backend.clone(), request, tx.clone()));
                }
                Action::CopyToClipboard(text) => {
                    copy_to_clipboard(text, &tx);
                }
            }
        }

        return Ok(());
    }
}
