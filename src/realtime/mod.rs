//! Realtime push channel for dashboard clients.
//!
//! A single broadcast channel fans events out to every connected WebSocket.
//! Aggregate stats go to all clients; guild-scoped update events are only
//! forwarded to clients subscribed to that guild's room.

use std::collections::HashSet;

use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const BROADCAST_CAPACITY: usize = 256;

/// Event pushed to dashboard clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RealtimeEvent {
    /// Periodic aggregate stats, delivered to every client.
    Stats {
        guilds: u64,
        users: u64,
        shards: usize,
    },
    /// Something changed for one guild; delivered to its subscribers.
    GuildUpdate {
        guild_id: u64,
        kind: GuildUpdateKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuildUpdateKind {
    SettingsUpdated,
    ModuleToggled,
    WelcomeUpdated,
    StickyUpdated,
    CaseCreated,
    TicketOpened,
    TicketClosed,
}

/// Messages a client may send over the socket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
    Subscribe { guild_id: u64 },
    Unsubscribe { guild_id: u64 },
}

/// Cheap-to-clone handle publishing into the realtime channel.
#[derive(Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<RealtimeEvent>,
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Broadcaster {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }

    /// Publishes an event. Having no connected clients is not an error.
    pub fn publish(&self, event: RealtimeEvent) {
        let _ = self.tx.send(event);
    }

    pub fn guild_update(&self, guild_id: u64, kind: GuildUpdateKind) {
        self.publish(RealtimeEvent::GuildUpdate { guild_id, kind });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.tx.subscribe()
    }
}

/// Drives one WebSocket connection: forwards broadcast events the client
/// should see and tracks its room subscriptions.
pub async fn handle_socket(socket: WebSocket, broadcaster: Broadcaster) {
    let (mut sink, mut stream) = socket.split();
    let mut events = broadcaster.subscribe();
    let mut rooms: HashSet<u64> = HashSet::new();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let deliver = match &event {
                        RealtimeEvent::Stats { .. } => true,
                        RealtimeEvent::GuildUpdate { guild_id, .. } => rooms.contains(guild_id),
                    };
                    if !deliver {
                        continue;
                    }
                    let Ok(text) = serde_json::to_string(&event) else {
                        continue;
                    };
                    if sink.send(WsMessage::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!("realtime client lagged, skipped {} events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            message = stream.next() => match message {
                Some(Ok(WsMessage::Text(text))) => {
                    match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(ClientMessage::Subscribe { guild_id }) => {
                            rooms.insert(guild_id);
                        }
                        Ok(ClientMessage::Unsubscribe { guild_id }) => {
                            rooms.remove(&guild_id);
                        }
                        // Unknown client messages are ignored.
                        Err(_) => {}
                    }
                }
                Some(Ok(WsMessage::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(_)) => break,
            },
        }
    }

    tracing::debug!("realtime client disconnected");
}
