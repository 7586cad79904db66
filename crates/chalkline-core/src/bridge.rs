//! Message bridge between the whiteboard and its host.
//!
//! Messages are fire-and-forget in both directions; nothing is correlated or
//! acknowledged. The host channel is injected, so a whiteboard can run (and be
//! tested) without any host attached.

use crate::config::SessionConfig;
use crate::input::InputEvent;
use crate::session::{Response, Session};
use crate::state::WhiteboardState;
use kurbo::Point;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Bridge errors.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A message could not be decoded (unknown command or bad payload).
    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Messages sent from the whiteboard to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Persist this snapshot, replacing the stored one.
    SaveState { data: WhiteboardState },
    /// Ask for the last persisted snapshot.
    GetState,
    /// Diagnostic passthrough.
    Log { data: Value },
}

impl ClientMessage {
    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Messages sent from the host to the whiteboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum HostMessage {
    /// The persisted snapshot, or none if nothing was stored.
    LoadState {
        #[serde(default, deserialize_with = "lenient_state")]
        #[serde(skip_serializing_if = "Option::is_none")]
        state: Option<WhiteboardState>,
    },
    /// Autosave tick: push the current state.
    RequestSave,
}

impl HostMessage {
    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn lenient_state<'de, D>(deserializer: D) -> Result<Option<WhiteboardState>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(|v| !v.is_null())
        .map(|v| WhiteboardState::from_value(&v)))
}

/// Outgoing half of the host connection.
pub trait HostChannel {
    /// Send a message. Delivery is not confirmed.
    fn send(&mut self, message: ClientMessage);
}

/// Channel that keeps sent messages in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryChannel {
    sent: Vec<ClientMessage>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> &[ClientMessage] {
        &self.sent
    }

    /// Drain the sent messages.
    pub fn take(&mut self) -> Vec<ClientMessage> {
        std::mem::take(&mut self.sent)
    }
}

impl HostChannel for MemoryChannel {
    fn send(&mut self, message: ClientMessage) {
        self.sent.push(message);
    }
}

/// Channel for a whiteboard without a host: nothing is loaded or persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedChannel;

impl HostChannel for DetachedChannel {
    fn send(&mut self, message: ClientMessage) {
        log::trace!("No host attached; dropping {:?}", message);
    }
}

/// A drawing session wired to a host channel.
#[derive(Debug)]
pub struct Whiteboard<C: HostChannel> {
    session: Session,
    channel: C,
}

impl<C: HostChannel> Whiteboard<C> {
    /// Create a whiteboard and ask the host for the persisted state.
    pub fn new(config: SessionConfig, mut channel: C) -> Self {
        channel.send(ClientMessage::GetState);
        Self {
            session: Session::new(config),
            channel,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Forward an input event, saving if the session asks for it.
    pub fn handle(&mut self, event: InputEvent) -> Response {
        let response = self.session.handle(event);
        if response.save {
            self.save();
        }
        response
    }

    /// Place a text label and save.
    pub fn place_text(&mut self, device_point: Point, text: impl Into<String>) -> Response {
        let response = self.session.place_text(device_point, text);
        if response.save {
            self.save();
        }
        response
    }

    /// Push the current state to the host.
    pub fn save(&mut self) {
        let data = self.session.to_state();
        log::debug!("Saving {} elements", data.elements.len());
        self.channel.send(ClientMessage::SaveState { data });
    }

    /// Send a diagnostic message to the host log.
    pub fn log(&mut self, data: impl Into<Value>) {
        self.channel.send(ClientMessage::Log { data: data.into() });
    }

    /// Apply a message from the host.
    pub fn receive(&mut self, message: HostMessage) -> Response {
        match message {
            HostMessage::LoadState { state: Some(state) } => self.session.load(state),
            HostMessage::LoadState { state: None } => {
                log::debug!("Host has no stored state; keeping current session");
                Response::NONE
            }
            HostMessage::RequestSave => {
                self.save();
                Response::NONE
            }
        }
    }

    /// Decode and apply a raw JSON message from the host.
    pub fn receive_json(&mut self, json: &str) -> Result<Response, BridgeError> {
        let message = HostMessage::from_json(json)?;
        Ok(self.receive(message))
    }

    /// Split into the session and the channel.
    pub fn into_parts(self) -> (Session, C) {
        (self.session, self.channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Redraw;
    use crate::tools::ToolKind;
    use serde_json::json;

    fn whiteboard() -> Whiteboard<MemoryChannel> {
        Whiteboard::new(SessionConfig::default(), MemoryChannel::new())
    }

    fn stroke(board: &mut Whiteboard<MemoryChannel>) {
        board.handle(InputEvent::PointerDown {
            position: Point::new(0.0, 0.0),
        });
        board.handle(InputEvent::PointerMove {
            position: Point::new(10.0, 0.0),
        });
        board.handle(InputEvent::PointerUp {
            position: Point::new(10.0, 0.0),
        });
    }

    #[test]
    fn test_requests_state_on_start() {
        let board = whiteboard();
        assert_eq!(board.channel().sent(), &[ClientMessage::GetState]);
    }

    #[test]
    fn test_commit_sends_save() {
        let mut board = whiteboard();
        board.channel_mut().take();
        stroke(&mut board);

        let sent = board.channel_mut().take();
        assert_eq!(sent.len(), 1);
        match &sent[0] {
            ClientMessage::SaveState { data } => assert_eq!(data.elements.len(), 1),
            other => panic!("expected saveState, got {:?}", other),
        }
    }

    #[test]
    fn test_request_save_always_saves() {
        let mut board = whiteboard();
        board.channel_mut().take();
        board.receive(HostMessage::RequestSave);
        board.receive(HostMessage::RequestSave);
        assert_eq!(board.channel().sent().len(), 2);
    }

    #[test]
    fn test_load_state_from_json() {
        let mut board = whiteboard();
        let response = board
            .receive_json(
                r##"{"command": "loadState", "state": {
                    "elements": [{"id": "1", "type": "circle", "color": "#000", "strokeWidth": 2, "x": 5, "y": 5, "width": 10, "height": 0}],
                    "viewOffset": {"x": 3, "y": 4},
                    "zoom": 2
                }}"##,
            )
            .unwrap();
        assert_eq!(response.redraw, Redraw::Full);
        assert_eq!(board.session().elements().len(), 1);
        assert!((board.session().camera().zoom - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_absent_state_keeps_session() {
        let mut board = whiteboard();
        stroke(&mut board);
        let response = board.receive_json(r#"{"command": "loadState"}"#).unwrap();
        assert_eq!(response, Response::NONE);
        assert_eq!(board.session().elements().len(), 1);

        board.receive_json(r#"{"command": "loadState", "state": null}"#).unwrap();
        assert_eq!(board.session().elements().len(), 1);
    }

    #[test]
    fn test_malformed_message() {
        let mut board = whiteboard();
        assert!(matches!(
            board.receive_json(r#"{"command": "explode"}"#),
            Err(BridgeError::Malformed(_))
        ));
        assert!(board.receive_json("not json").is_err());
    }

    #[test]
    fn test_client_message_wire_format() {
        let value = serde_json::to_value(ClientMessage::GetState).unwrap();
        assert_eq!(value, json!({"command": "getState"}));

        let log = ClientMessage::Log { data: json!("ready") };
        assert_eq!(serde_json::to_value(&log).unwrap(), json!({"command": "log", "data": "ready"}));

        let save = ClientMessage::SaveState {
            data: WhiteboardState::default(),
        };
        let value = serde_json::to_value(&save).unwrap();
        assert_eq!(value["command"], "saveState");
        assert_eq!(value["data"]["zoom"], 1.0);
    }

    #[test]
    fn test_detached_whiteboard_still_draws() {
        let mut board = Whiteboard::new(SessionConfig::default(), DetachedChannel);
        board.handle(InputEvent::SelectTool { tool: ToolKind::Line });
        board.handle(InputEvent::PointerDown {
            position: Point::new(0.0, 0.0),
        });
        board.handle(InputEvent::PointerLeave);
        assert_eq!(board.session().elements().len(), 1);
    }

    #[test]
    fn test_log_passthrough() {
        let mut board = whiteboard();
        board.log("hello");
        assert_eq!(
            board.channel().sent().last(),
            Some(&ClientMessage::Log { data: json!("hello") })
        );
    }
}
