//! Session event loop.
//!
//! One task owns the [`Table`] and the [`Transport`]. It takes relay messages
//! and UI commands one at a time, in arrival order per source, performs the
//! resulting effects, and publishes a fresh [`SessionView`] after each step.
//! The loop returns the [`SessionExit`] the machine reports.

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;

use std::collections::VecDeque;

use board::input::Button;
use board::{Color, Point, Square};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;
use wire::Inbound;

use crate::machine::{Effect, Event, Phase, SessionExit, SessionState};
use crate::rules::RuleEngine;
use crate::table::{Hint, Table};
use crate::transport::Transport;

/// Pending UI commands before senders wait.
const COMMAND_CAPACITY: usize = 64;

/// Input from the host UI, in board-relative CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiCommand {
    PointerDown { point: Point, button: Button, scroll: Point },
    PointerMove(Point),
    Scroll(Point),
    PointerUp,
    Blur,
    Resize { square_size: f64 },
    Leave,
}

/// Snapshot of everything a renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub phase: Phase,
    pub state: SessionState,
    pub local_color: Color,
    pub flipped: bool,
    pub dragging: Option<Square>,
    pub translation: Option<Point>,
    pub hints: Vec<Hint>,
    /// Last user-facing message (relay error, lost connection, snapped-back move).
    pub notice: Option<String>,
}

impl SessionView {
    #[must_use]
    pub fn capture<E: RuleEngine>(table: &Table<E>, notice: Option<String>) -> Self {
        Self {
            phase: table.phase(),
            state: table.state().clone(),
            local_color: table.machine().local_color(),
            flipped: table.flipped(),
            dragging: table.drag().origin(),
            translation: table.drag().translation(),
            hints: table.hints(),
            notice,
        }
    }
}

/// A running session task.
pub struct SessionHandle {
    commands: mpsc::Sender<UiCommand>,
    view: watch::Receiver<SessionView>,
    task: JoinHandle<SessionExit>,
}

impl SessionHandle {
    #[must_use]
    pub fn commands(&self) -> mpsc::Sender<UiCommand> {
        self.commands.clone()
    }

    #[must_use]
    pub fn view(&self) -> watch::Receiver<SessionView> {
        self.view.clone()
    }

    /// Wait for the session to end.
    pub async fn join(self) -> SessionExit {
        match self.task.await {
            Ok(exit) => exit,
            Err(error) => {
                tracing::error!(%error, "session task failed");
                SessionExit::Error(error.to_string())
            }
        }
    }
}

/// Start a session on the current runtime.
pub fn spawn_session<E, T>(table: Table<E>, transport: T) -> SessionHandle
where
    E: RuleEngine + Send + 'static,
    T: Transport + 'static,
{
    let (commands, command_rx) = mpsc::channel(COMMAND_CAPACITY);
    let (view_tx, view) = watch::channel(SessionView::capture(&table, None));
    let task = tokio::spawn(run_session(table, transport, command_rx, view_tx));
    SessionHandle { commands, view, task }
}

/// Drive a session to completion.
///
/// Closing the command channel counts as leaving.
pub async fn run_session<E, T>(
    table: Table<E>,
    transport: T,
    commands: mpsc::Receiver<UiCommand>,
    view: watch::Sender<SessionView>,
) -> SessionExit
where
    E: RuleEngine + Send,
    T: Transport,
{
    let span = tracing::info_span!(
        "session",
        session_id = %Uuid::new_v4(),
        room_id = %table.machine().seat().room_id,
        color = %table.machine().local_color(),
    );
    let driver = Driver { table, transport, view, notice: None, exit: None };
    driver.run(commands).instrument(span).await
}

struct Driver<E, T> {
    table: Table<E>,
    transport: T,
    view: watch::Sender<SessionView>,
    notice: Option<String>,
    exit: Option<SessionExit>,
}

impl<E, T> Driver<E, T>
where
    E: RuleEngine + Send,
    T: Transport,
{
    async fn run(mut self, mut commands: mpsc::Receiver<UiCommand>) -> SessionExit {
        let effects = self.table.handle(Event::Start);
        self.perform(effects).await;
        self.publish();

        let mut transport_open = true;
        loop {
            if let Some(exit) = self.exit.take() {
                tracing::info!(?exit, "session finished");
                return exit;
            }
            tokio::select! {
                inbound = self.transport.recv(), if transport_open => {
                    let message = match inbound {
                        Some(message) => message,
                        None => {
                            transport_open = false;
                            Inbound::Disconnect
                        }
                    };
                    let effects = self.table.handle(Event::Inbound(message));
                    self.perform(effects).await;
                }
                command = commands.recv() => {
                    let command = command.unwrap_or(UiCommand::Leave);
                    self.command(command).await;
                }
            }
            self.publish();
        }
    }

    async fn command(&mut self, command: UiCommand) {
        match command {
            UiCommand::PointerDown { point, button, scroll } => {
                self.table.pointer_down(point, button, scroll);
            }
            UiCommand::PointerMove(point) => self.table.pointer_move(point),
            UiCommand::Scroll(scroll) => self.table.scroll(scroll),
            UiCommand::PointerUp => match self.table.pointer_up() {
                Ok(effects) => {
                    if !effects.is_empty() {
                        self.notice = None;
                    }
                    self.perform(effects).await;
                }
                Err(reason) => self.notice = Some(reason.to_string()),
            },
            UiCommand::Blur => {
                self.table.blur();
            }
            UiCommand::Resize { square_size } => self.table.set_square_size(square_size),
            UiCommand::Leave => {
                let effects = self.table.handle(Event::Teardown);
                self.perform(effects).await;
            }
        }
    }

    async fn perform(&mut self, effects: Vec<Effect>) {
        let mut queue = VecDeque::from(effects);
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Send(message) => {
                    if let Err(error) = self.transport.send(&message).await {
                        tracing::warn!(%error, name = message.name(), "send failed; treating channel as lost");
                        queue.extend(self.table.handle(Event::Inbound(Inbound::Disconnect)));
                    }
                }
                Effect::CloseChannel => {
                    if let Err(error) = self.transport.close().await {
                        tracing::warn!(%error, "channel close failed");
                    }
                }
                Effect::Notify(text) => {
                    tracing::info!(notice = %text, "notify");
                    self.notice = Some(text);
                }
                Effect::Exit(exit) => {
                    if self.exit.is_none() {
                        self.exit = Some(exit);
                    }
                }
            }
        }
    }

    fn publish(&self) {
        let next = SessionView::capture(&self.table, self.notice.clone());
        self.view.send_modify(|view| *view = next);
    }
}
