//! Host side of the bridge: answers whiteboard messages from a storage slot.

use crate::bridge::{BridgeError, ClientMessage, HostMessage};
use crate::state::now_millis;
use crate::storage::{AutoSaveTicker, Storage, StorageError};
use std::sync::Arc;
use thiserror::Error;

/// Storage key the whiteboard state lives under.
pub const STATE_KEY: &str = "whiteboardState";

/// Host panel errors.
#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Persists whiteboard state for one panel and drives its autosave.
pub struct HostPanel<S: Storage> {
    storage: Arc<S>,
    key: String,
    ticker: AutoSaveTicker,
}

impl<S: Storage> HostPanel<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self::with_key(storage, STATE_KEY)
    }

    /// Use a custom storage key, e.g. one per workspace.
    pub fn with_key(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            ticker: AutoSaveTicker::default(),
        }
    }

    pub fn with_ticker(mut self, ticker: AutoSaveTicker) -> Self {
        self.ticker = ticker;
        self
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Handle a message from the whiteboard, returning the reply to post back.
    pub async fn handle(&self, message: ClientMessage) -> Result<Option<HostMessage>, HostError> {
        match message {
            ClientMessage::SaveState { mut data } => {
                data.last_modified = now_millis();
                self.storage.save(&self.key, &data).await?;
                log::debug!("Stored {} elements under {}", data.elements.len(), self.key);
                Ok(None)
            }
            ClientMessage::GetState => {
                let state = match self.storage.load(&self.key).await {
                    Ok(state) => Some(state),
                    Err(StorageError::NotFound(_)) => None,
                    Err(e) => {
                        log::warn!("Could not load {}: {}", self.key, e);
                        None
                    }
                };
                Ok(Some(HostMessage::LoadState { state }))
            }
            ClientMessage::Log { data } => {
                log::info!("Whiteboard: {}", data);
                Ok(None)
            }
        }
    }

    /// Decode and handle a raw JSON message from the whiteboard.
    pub async fn handle_json(&self, json: &str) -> Result<Option<HostMessage>, HostError> {
        let message = ClientMessage::from_json(json)?;
        self.handle(message).await
    }

    /// Check the autosave ticker; a firing asks the whiteboard to save.
    pub fn poll_autosave(&mut self) -> Option<HostMessage> {
        self.ticker.poll().then_some(HostMessage::RequestSave)
    }
}
