use axum::extract::ws::Message;
use serde::{Deserialize, Serialize};

use crate::room::PlayerSummary;

/// Message types sent from client to server.
///
/// Closed tagged variants: a payload with a missing or mistyped field
/// fails deserialization instead of being trusted at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Join handshake; answered with a `joinAck` unicast
    #[serde(rename_all = "camelCase")]
    JoinRoom { username: String, room_id: String },
    /// Stroke begins (drawer only)
    #[serde(rename_all = "camelCase")]
    DrawStart { room_id: String, x: f64, y: f64 },
    /// Stroke continues (drawer only)
    #[serde(rename_all = "camelCase")]
    Draw { room_id: String, x: f64, y: f64 },
    /// Stroke ends (drawer only)
    #[serde(rename_all = "camelCase")]
    DrawEnd { room_id: String },
    /// Wipe the shared canvas (drawer only)
    #[serde(rename_all = "camelCase")]
    Clear { room_id: String },
    /// Chat line, evaluated as a guess
    #[serde(rename_all = "camelCase")]
    Chat { room_id: String, msg: String },
}

/// Message types sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Join handshake result, unicast to the requesting connection
    JoinAck {
        ok: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// Full player list refresh, in join order
    Players { players: Vec<PlayerSummary> },
    /// Private word reveal to the new drawer. Never broadcast.
    YourTurn { word: String },
    /// Turn-reset signal
    NotYourTurn,
    /// Canvas-clear broadcast
    Clear,
    /// System and player chat share one channel
    Chat { msg: String },
    /// Relayed stroke events, room minus the drawer
    DrawStart { x: f64, y: f64 },
    Draw { x: f64, y: f64 },
    DrawEnd,
}

impl ServerMessage {
    pub fn to_ws_message(&self) -> Message {
        // Serialization of a field-complete enum cannot fail
        let json = serde_json::to_string(self).expect("serialize server message");
        Message::Text(json)
    }
}
