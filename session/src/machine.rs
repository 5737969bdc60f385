//! Session state machine.
//!
//! `SessionMachine` owns the rule engine and the authoritative
//! [`SessionState`]. It moves through
//! `Disconnected -> Connecting -> WaitingForOpponent -> Active -> Ended`
//! and nothing else mutates session state. Every input (protocol event or
//! local move) is handled synchronously and returns the [`Effect`]s the
//! driver must perform; the machine itself does no I/O, so feeding it a
//! recorded event sequence replays a session deterministically.
//!
//! Channel close is emitted at most once per session, and so is
//! [`Effect::Exit`].

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

use board::{BoardSnapshot, Color, MoveRequest, Square};
use serde::{Deserialize, Serialize};
use wire::{GameStatus, Inbound, JoinMessage, MoveMessage, Outbound};

use crate::error::MoveRejected;
use crate::rules::RuleEngine;

/// Identity of the local player within a room, fixed for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub room_id: String,
    pub player_id: String,
    #[serde(alias = "color")]
    pub player_color: Color,
}

impl Seat {
    #[must_use]
    pub fn join_message(&self) -> JoinMessage {
        JoinMessage {
            room_id: self.room_id.clone(),
            player_id: self.player_id.clone(),
            player_color: self.player_color,
        }
    }
}

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Connecting,
    WaitingForOpponent,
    Active,
    Ended,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::WaitingForOpponent => "waiting_for_opponent",
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }
}

/// Everything the UI renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub board: BoardSnapshot,
    pub turn: Color,
    pub in_check: Option<Color>,
    pub room_exists: bool,
    pub waiting_for_opponent: bool,
    pub board_disabled: bool,
    pub game_status: Option<GameStatus>,
}

impl SessionState {
    /// Square of the king currently in check.
    #[must_use]
    pub fn checked_king(&self) -> Option<Square> {
        self.in_check.and_then(|color| self.board.king_square(color))
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.game_status.is_some()
    }
}

/// How a session ended, as reported to whoever started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionExit {
    GameOver(GameStatus),
    Error(String),
    Disconnected,
    Left,
}

/// Work the driver performs after a transition, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Send(Outbound),
    CloseChannel,
    Notify(String),
    Exit(SessionExit),
}

/// Inputs other than local moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The channel is open; join the room.
    Start,
    /// A validated message from the relay.
    Inbound(Inbound),
    /// The local user left the session.
    Teardown,
}

pub struct SessionMachine<E> {
    engine: E,
    seat: Seat,
    phase: Phase,
    state: SessionState,
    channel_open: bool,
    exited: bool,
}

impl<E: RuleEngine> SessionMachine<E> {
    /// New session in `Disconnected` with the board disabled.
    #[must_use]
    pub fn new(engine: E, seat: Seat) -> Self {
        let state = SessionState {
            board: engine.snapshot(),
            turn: engine.current_turn(),
            in_check: engine.in_check(),
            room_exists: false,
            waiting_for_opponent: false,
            board_disabled: true,
            game_status: None,
        };
        Self { engine, seat, phase: Phase::Disconnected, state, channel_open: false, exited: false }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn seat(&self) -> &Seat {
        &self.seat
    }

    #[must_use]
    pub fn local_color(&self) -> Color {
        self.seat.player_color
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Whether an [`Effect::Exit`] has been emitted.
    #[must_use]
    pub fn has_exited(&self) -> bool {
        self.exited
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Start => self.on_start(),
            Event::Inbound(message) => self.on_inbound(message),
            Event::Teardown => self.on_teardown(),
        }
    }

    /// Play a move on behalf of the local player.
    ///
    /// # Errors
    ///
    /// Returns the reason the move was not played. A rejected move changes
    /// nothing and sends nothing.
    pub fn submit_local_move(&mut self, request: MoveRequest) -> Result<Vec<Effect>, MoveRejected> {
        if self.state.is_over() {
            return Err(MoveRejected::GameOver);
        }
        if self.state.board_disabled {
            return Err(MoveRejected::BoardDisabled);
        }
        if self.engine.current_turn() != self.local_color() {
            return Err(MoveRejected::NotYourTurn);
        }
        let board = self.engine.attempt_move(&request).map_err(|_| MoveRejected::Illegal)?;
        self.fold(board);
        tracing::debug!(%request, turn = %self.state.turn, "local move played");

        Ok(vec![Effect::Send(Outbound::Move(MoveMessage {
            room_id: self.seat.room_id.clone(),
            player_id: self.seat.player_id.clone(),
            mv: request,
        }))])
    }

    fn on_start(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Disconnected || self.exited || self.channel_open {
            tracing::debug!(phase = self.phase.as_str(), "start ignored");
            return Vec::new();
        }
        self.phase = Phase::Connecting;
        self.channel_open = true;
        tracing::info!(room_id = %self.seat.room_id, color = %self.local_color(), "joining room");
        vec![Effect::Send(Outbound::JoinRoom(self.seat.join_message()))]
    }

    fn on_inbound(&mut self, message: Inbound) -> Vec<Effect> {
        if !self.channel_open && message != Inbound::Disconnect {
            tracing::debug!(name = message.name(), "message without open channel ignored");
            return Vec::new();
        }
        match message {
            Inbound::RoomJoined(join) => {
                self.on_room_joined(&join);
                Vec::new()
            }
            Inbound::BothPlayersReady => {
                self.on_both_ready();
                Vec::new()
            }
            Inbound::MoveMade { mv, color } => {
                self.on_remote_move(mv, color);
                Vec::new()
            }
            Inbound::GameOver(over) => self.on_game_over(over.game_status),
            Inbound::Error(message) => self.on_error(message),
            Inbound::Disconnect => self.on_disconnect(),
        }
    }

    fn on_room_joined(&mut self, join: &JoinMessage) {
        if self.phase != Phase::Connecting {
            tracing::debug!(player_id = %join.player_id, phase = self.phase.as_str(), "room join notice");
            return;
        }
        if join.room_id != self.seat.room_id {
            tracing::warn!(expected = %self.seat.room_id, got = %join.room_id, "join ack for another room dropped");
            return;
        }
        self.phase = Phase::WaitingForOpponent;
        self.state.room_exists = true;
        self.state.waiting_for_opponent = true;
        self.state.board_disabled = true;
        tracing::info!(room_id = %join.room_id, "waiting for opponent");
    }

    fn on_both_ready(&mut self) {
        if !matches!(self.phase, Phase::Connecting | Phase::WaitingForOpponent) {
            tracing::debug!(phase = self.phase.as_str(), "duplicate ready ignored");
            return;
        }
        self.phase = Phase::Active;
        self.state.room_exists = true;
        self.state.waiting_for_opponent = false;
        self.recompute_disabled();
        tracing::info!(turn = %self.state.turn, "game started");
    }

    fn on_remote_move(&mut self, mv: MoveRequest, color: Color) {
        if self.phase != Phase::Active {
            tracing::warn!(%mv, phase = self.phase.as_str(), "remote move outside active game dropped");
            return;
        }
        if color == self.local_color() {
            tracing::debug!(%mv, "own move echo dropped");
            return;
        }
        match self.engine.attempt_move(&mv) {
            Ok(board) => {
                self.fold(board);
                tracing::debug!(%mv, turn = %self.state.turn, "remote move played");
            }
            Err(_) => tracing::warn!(%mv, %color, "remote move rejected by rule engine"),
        }
    }

    fn on_game_over(&mut self, status: GameStatus) -> Vec<Effect> {
        if !matches!(self.phase, Phase::Active | Phase::WaitingForOpponent) {
            tracing::debug!(%status, phase = self.phase.as_str(), "game over ignored");
            return Vec::new();
        }
        self.phase = Phase::Ended;
        self.state.game_status = Some(status);
        self.state.waiting_for_opponent = false;
        self.state.board_disabled = true;
        tracing::info!(%status, "game over");

        let mut effects = vec![Effect::Notify(format!("Game over: {status}"))];
        effects.extend(self.close_channel());
        effects.extend(self.exit(SessionExit::GameOver(status)));
        effects
    }

    fn on_error(&mut self, message: String) -> Vec<Effect> {
        if self.phase == Phase::Ended || self.exited {
            tracing::debug!(reason = %message, "error after session end ignored");
            return Vec::new();
        }
        tracing::warn!(reason = %message, "relay reported an error");
        self.drop_to_disconnected();
        let mut effects = vec![Effect::Notify(message.clone())];
        effects.extend(self.close_channel());
        effects.extend(self.exit(SessionExit::Error(message)));
        effects
    }

    fn on_disconnect(&mut self) -> Vec<Effect> {
        if self.phase == Phase::Ended || self.exited {
            self.channel_open = false;
            return Vec::new();
        }
        if self.phase == Phase::Disconnected && !self.channel_open {
            return Vec::new();
        }
        tracing::warn!(phase = self.phase.as_str(), "channel closed unexpectedly");
        self.drop_to_disconnected();
        let mut effects = vec![Effect::Notify("Connection lost".to_owned())];
        effects.extend(self.close_channel());
        effects.extend(self.exit(SessionExit::Disconnected));
        effects
    }

    fn on_teardown(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Ended {
            self.drop_to_disconnected();
        }
        let mut effects = self.close_channel();
        effects.extend(self.exit(SessionExit::Left));
        effects
    }

    fn drop_to_disconnected(&mut self) {
        self.phase = Phase::Disconnected;
        self.state.board_disabled = true;
        self.state.waiting_for_opponent = false;
    }

    /// Re-read turn and check after an accepted move.
    fn fold(&mut self, board: BoardSnapshot) {
        self.state.board = board;
        self.state.turn = self.engine.current_turn();
        self.state.in_check = self.engine.in_check();
        self.recompute_disabled();
    }

    fn recompute_disabled(&mut self) {
        self.state.board_disabled = self.phase != Phase::Active || self.state.turn != self.local_color();
    }

    fn close_channel(&mut self) -> Vec<Effect> {
        if !self.channel_open {
            return Vec::new();
        }
        self.channel_open = false;
        vec![Effect::CloseChannel]
    }

    fn exit(&mut self, exit: SessionExit) -> Vec<Effect> {
        if self.exited {
            return Vec::new();
        }
        self.exited = true;
        vec![Effect::Exit(exit)]
    }
}
