use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::GameError;
use crate::room::turn;
use crate::websocket::message::{ClientMessage, ServerMessage};
use crate::websocket::ConnectionSession;
use crate::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle a WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    let mut session = ConnectionSession::new();
    tracing::info!("Connected: {}", session.connection_id);

    // Spawn task for sending outgoing messages
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    // Handle incoming messages
    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                handle_text_message(&state, &mut session, &tx, &text).await;
            }
            Ok(Message::Close(_)) => {
                tracing::info!("Disconnected: {}", session.connection_id);
                break;
            }
            Ok(_) => {
                // Ignore other message types (binary, ping, pong)
            }
            Err(e) => {
                tracing::warn!("WebSocket error for {}: {}", session.connection_id, e);
                break;
            }
        }
    }

    // Cleanup: remove the player from their room
    cleanup_session(&state, &session).await;

    // Abort the send task
    send_task.abort();
}

/// Parse a text frame and route it to the right handler
async fn handle_text_message(
    state: &AppState,
    session: &mut ConnectionSession,
    tx: &UnboundedSender<Message>,
    text: &str,
) {
    let msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("Malformed message from {}: {}", session.connection_id, e);
            return;
        }
    };

    match msg {
        ClientMessage::JoinRoom { username, room_id } => {
            handle_join(state, session, tx, &username, &room_id).await;
        }
        ClientMessage::DrawStart { room_id, x, y } => {
            relay_stroke(state, session, &room_id, ServerMessage::DrawStart { x, y }).await;
        }
        ClientMessage::Draw { room_id, x, y } => {
            relay_stroke(state, session, &room_id, ServerMessage::Draw { x, y }).await;
        }
        ClientMessage::DrawEnd { room_id } => {
            relay_stroke(state, session, &room_id, ServerMessage::DrawEnd).await;
        }
        ClientMessage::Clear { room_id } => {
            // Unlike strokes, a clear goes to the whole room, sender included
            let registry = state.registry.read().await;
            if let Some(room) = registry.get(&room_id) {
                if room.is_drawer(session.connection_id) {
                    room.broadcast(ServerMessage::Clear.to_ws_message());
                }
            }
        }
        ClientMessage::Chat { room_id, msg } => {
            let mut registry = state.registry.write().await;
            if let Some(room) = registry.get_mut(&room_id) {
                let outcome =
                    turn::evaluate_guess(room, session.connection_id, &msg, &state.words);
                tracing::debug!(
                    "Chat from {} in room {}: {:?}",
                    session.connection_id,
                    room_id,
                    outcome
                );
            }
        }
    }
}

/// Join handshake: validate, create/join the room, unicast the ack.
/// The first player in a room triggers the initial turn start.
async fn handle_join(
    state: &AppState,
    session: &mut ConnectionSession,
    tx: &UnboundedSender<Message>,
    username: &str,
    room_id: &str,
) {
    let username = username.trim();
    let room_id = room_id.trim();

    if username.is_empty() {
        send_ack(tx, Err(GameError::EmptyUsername));
        return;
    }
    if room_id.is_empty() {
        send_ack(tx, Err(GameError::EmptyRoomId));
        return;
    }

    let mut registry = state.registry.write().await;
    let room = registry.get_or_create(room_id, &state.words);

    match room.join(session.connection_id, username, tx.clone()) {
        Ok(outcome) => {
            session.room_id = Some(room_id.to_string());
            send_ack(tx, Ok(()));

            room.broadcast(
                ServerMessage::Players {
                    players: room.player_list(),
                }
                .to_ws_message(),
            );

            if outcome.is_first_player {
                turn::start_turn(room, &state.words);
            }

            tracing::info!(
                "Player {} ({}) joined room {}. Total players: {}",
                username,
                session.connection_id,
                room_id,
                room.player_count()
            );
        }
        Err(e) => {
            send_ack(tx, Err(e));
        }
    }

    // A failed join may have left behind a freshly created empty room
    registry.remove_if_empty(room_id);
}

/// Relay a stroke event to the rest of the room iff the sender holds the
/// drawer role. Non-drawers are dropped without feedback.
async fn relay_stroke(
    state: &AppState,
    session: &ConnectionSession,
    room_id: &str,
    event: ServerMessage,
) {
    let registry = state.registry.read().await;
    if let Some(room) = registry.get(room_id) {
        if room.is_drawer(session.connection_id) {
            room.broadcast_except(event.to_ws_message(), session.connection_id);
        }
    }
}

fn send_ack(tx: &UnboundedSender<Message>, result: Result<(), GameError>) {
    let ack = match result {
        Ok(()) => ServerMessage::JoinAck {
            ok: true,
            error: None,
        },
        Err(e) => ServerMessage::JoinAck {
            ok: false,
            error: Some(e.to_string()),
        },
    };
    let _ = tx.send(ack.to_ws_message());
}

/// Remove the player from their room on disconnect.
///
/// One atomic pass under the registry write lock: if the drawer left and
/// players remain, the next turn starts immediately so the room never
/// stalls on a stale drawer; an emptied room is deleted.
async fn cleanup_session(state: &AppState, session: &ConnectionSession) {
    let Some(room_id) = session.room_id.as_deref() else {
        return;
    };

    let mut registry = state.registry.write().await;
    let Some(room) = registry.get_mut(room_id) else {
        return;
    };
    let Some(removed) = room.remove(session.connection_id) else {
        return;
    };

    tracing::info!(
        "Player {} left room {}. Remaining players: {}",
        removed.player.username,
        room_id,
        room.player_count()
    );

    if !room.is_empty() {
        if removed.was_drawer {
            turn::start_turn(room, &state.words);
        } else {
            room.broadcast(
                ServerMessage::Players {
                    players: room.player_list(),
                }
                .to_ws_message(),
            );
        }
    }

    registry.remove_if_empty(room_id);
}
