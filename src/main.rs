mod prompt;
mod render;

use std::io::{self, BufRead};

use board::Color;
use clap::{Args, Parser, Subcommand};
use session::{
    MatchmakingClient, Seat, SessionConfig, SessionError, SessionExit, SessionView, ShakmatyEngine, Table, UiCommand,
    WsTransport, spawn_session,
};
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("relay error: {0}")]
    Relay(String),
    #[error("connection to the relay was lost")]
    ConnectionLost,
}

#[derive(Parser, Debug)]
#[command(name = "rookery", about = "Play networked two-player chess in the terminal")]
struct Cli {
    #[arg(long, env = "ROOKERY_SERVER_URL")]
    server_url: Option<String>,

    /// Rendered board edge in pixels; drags are resolved on this grid.
    #[arg(long, env = "ROOKERY_BOARD_SIZE_PX")]
    board_size: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a room and wait for an opponent.
    New,
    /// Join an existing room.
    Join(JoinArgs),
}

#[derive(Args, Debug)]
struct JoinArgs {
    room_id: String,

    /// Player id issued for this room; a fresh one is generated if omitted.
    #[arg(long)]
    player: Option<String>,

    /// Seat color: w or b.
    #[arg(long)]
    color: Color,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let client = MatchmakingClient::new(&config)?;

    let seat = match cli.command {
        Command::New => {
            let seat = client.create_room().await?;
            println!("room {} created; you play {}", seat.room_id, seat.player_color);
            println!("opponent joins with: rookery join {} --color {}", seat.room_id, seat.player_color.opposite().as_wire());
            seat
        }
        Command::Join(args) => {
            let seat = Seat {
                room_id: args.room_id,
                player_id: args.player.unwrap_or_else(|| Uuid::new_v4().to_string()),
                player_color: args.color,
            };
            client.ensure_open(&seat).await?;
            seat
        }
    };

    match play(&config, seat).await? {
        SessionExit::GameOver(_) | SessionExit::Left => Ok(()),
        SessionExit::Error(message) => Err(CliError::Relay(message)),
        SessionExit::Disconnected => Err(CliError::ConnectionLost),
    }
}

/// Environment config with command-line overrides.
fn load_config(cli: &Cli) -> Result<SessionConfig, SessionError> {
    let mut config = SessionConfig::from_env()?;
    if let Some(url) = &cli.server_url {
        config.server_url.clone_from(url);
    }
    if let Some(size) = cli.board_size {
        config.board_size_px = size;
    }
    config.validated()
}

async fn play(config: &SessionConfig, seat: Seat) -> Result<SessionExit, CliError> {
    let transport = WsTransport::connect(&config.ws_url()?, config.timeouts.connect()).await?;
    let table = Table::new(ShakmatyEngine::new(), seat, config.square_size());
    let flipped = table.flipped();
    let handle = spawn_session(table, transport);

    let printer = tokio::spawn(print_views(handle.view()));
    let commands = handle.commands();
    let square_size = config.square_size();
    // Blocking stdin on its own thread so runtime shutdown never waits on it.
    std::thread::spawn(move || read_moves(&commands, square_size, flipped));

    let exit = handle.join().await;
    if let Err(error) = printer.await {
        tracing::warn!(%error, "printer task failed");
    }
    Ok(exit)
}

/// Print the board whenever something other than drag state changes.
async fn print_views(mut views: watch::Receiver<SessionView>) {
    let mut shown: Option<SessionView> = None;
    loop {
        let view = views.borrow_and_update().clone();
        let unchanged = shown.as_ref().is_some_and(|last| {
            last.phase == view.phase && last.state == view.state && last.notice == view.notice
        });
        if !unchanged {
            print!("\n{}", render::diagram(&view));
            println!("{}", render::status(&view));
            if let Some(notice) = &view.notice {
                println!("! {notice}");
            }
            shown = Some(view);
        }
        if views.changed().await.is_err() {
            break;
        }
    }
}

fn read_moves(commands: &mpsc::Sender<UiCommand>, square_size: f64, flipped: bool) {
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                tracing::warn!(%error, "stdin read failed");
                break;
            }
        };
        match prompt::parse(&line) {
            prompt::Input::Move { from, to } => {
                for command in prompt::drag_commands(from, to, square_size, flipped) {
                    if commands.blocking_send(command).is_err() {
                        return;
                    }
                }
            }
            prompt::Input::Quit => break,
            prompt::Input::Help => eprintln!("{}", prompt::HELP),
            prompt::Input::Empty => {}
            prompt::Input::Unknown(text) => eprintln!("unrecognized input {text:?}; {}", prompt::HELP),
        }
    }
    if commands.blocking_send(UiCommand::Leave).is_err() {
        tracing::debug!("session already ended");
    }
}
