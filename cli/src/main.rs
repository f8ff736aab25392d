use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use minefield_core::{CellCount, Coord, GameConfig, GameSession, RevealOutcome};
use std::io::{self, BufRead, Write};

use command::{Command, HELP};
use render::{SessionView, format_elapsed};
use ticker::Ticker;

mod command;
mod render;
mod ticker;

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for GameConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => GameConfig::beginner(),
            Preset::Intermediate => GameConfig::intermediate(),
            Preset::Expert => GameConfig::expert(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset, individual dimensions below override it
    #[arg(short, long, value_enum, default_value_t = Preset::Beginner)]
    preset: Preset,

    /// Columns on the board
    #[arg(long)]
    width: Option<Coord>,

    /// Rows on the board
    #[arg(long)]
    height: Option<Coord>,

    /// Number of mines
    #[arg(long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let preset = GameConfig::from(self.preset);
        let config = GameConfig::new(
            self.width.unwrap_or(preset.width),
            self.height.unwrap_or(preset.height),
            self.mines.unwrap_or(preset.mines),
        )
        .context("Invalid board configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("Error initializing logger")?;

    let config = args.game_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let session = GameSession::new(config, seed)?;
    play(session, io::stdin().lock(), io::stdout().lock())
}

/// Reads commands until `q` or end of input, redrawing the board after every one.
fn play(mut session: GameSession, input: impl BufRead, mut out: impl Write) -> Result<()> {
    let mut ticker = Ticker::new();
    write!(out, "{}", SessionView(&session))?;
    writeln!(out, "Type h for help.")?;

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        ticker.pump(&mut session);

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}, type h for help.")?;
                continue;
            }
        };
        log::trace!("command: {:?}", command);

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Redraw => {}
            Command::Restart => session.restart(),
            Command::Flag(coords) => {
                if !session.toggle_flag(coords).has_update() {
                    writeln!(out, "Nothing to flag at {coords:?}.")?;
                }
            }
            Command::Reveal(coords) => {
                let was_running = session.is_timer_running();
                let outcome = session.reveal(coords)?;
                ticker.follow(was_running, &session);

                match outcome {
                    RevealOutcome::NoChange => writeln!(out, "Nothing to reveal at {coords:?}.")?,
                    RevealOutcome::Revealed => {}
                    RevealOutcome::HitMine => writeln!(out, "Boom! Type n to play again.")?,
                    RevealOutcome::Won => writeln!(
                        out,
                        "Cleared in {}! Type n to play again.",
                        format_elapsed(session.time_elapsed())
                    )?,
                }
            }
        }

        write!(out, "{}", SessionView(&session))?;
    }

    out.flush().context("Failed to flush output")?;
    Ok(())
}
