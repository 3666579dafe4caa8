use anyhow::Context;
use clap::{Parser, ValueEnum};
use sapper_core::{
    Callbacks, CellCount, Clock, Coord, Coord2, GameConfig, GameOutcome, InputMode, Level, ManualClock,
    PointerEvent, RandomBoardGenerator, SessionConfig, SessionController, SystemClock,
};
use std::io::{self, BufRead, Write};

use command::{Command, HELP};

mod command;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LevelArg {
    Relax,
    Easy,
    Medium,
    Hard,
}

impl From<LevelArg> for Level {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Relax => Level::Relax,
            LevelArg::Easy => Level::Easy,
            LevelArg::Medium => Level::Medium,
            LevelArg::Hard => Level::Hard,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Play sapper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Difficulty preset
    #[arg(short, long, value_enum, default_value_t = LevelArg::Easy)]
    level: LevelArg,

    /// Override the board width
    #[arg(long)]
    width: Option<Coord>,

    /// Override the board height
    #[arg(long)]
    height: Option<Coord>,

    /// Override the bomb count
    #[arg(long)]
    bombs: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Use touch events instead of mouse events
    #[arg(long)]
    touch: bool,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let preset = Level::from(self.level).config();
        let size = (
            self.width.unwrap_or(preset.size.0),
            self.height.unwrap_or(preset.size.1),
        );
        let bombs = self.bombs.unwrap_or(preset.bombs);
        GameConfig::new(size, bombs).context("invalid board configuration")
    }
}

type Session = SessionController<ManualClock, RandomBoardGenerator>;

/// Plays a session on virtual time that never runs behind the wall clock.
struct Driver {
    session: Session,
    clock: ManualClock,
    wall: SystemClock,
}

impl Driver {
    fn sync(&self) {
        self.clock.set(self.clock.now().max(self.wall.now()));
    }

    /// Fast-forwards through cascades and the end-of-game pause.
    fn settle(&mut self) {
        while self.session.is_revealing() || self.session.outcome().is_finished() {
            let Some(deadline) = self.session.next_deadline() else {
                break;
            };
            self.clock.set(self.clock.now().max(deadline));
            self.session.poll();
        }
    }

    fn press(&mut self, coords: Coord2) {
        let event = match self.session.input_mode() {
            InputMode::Mouse => PointerEvent::MouseDown,
            InputMode::Touch => PointerEvent::TouchStart,
        };
        self.session.handle_pointer(coords, event);
    }

    fn release(&mut self, coords: Coord2) {
        let event = match self.session.input_mode() {
            InputMode::Mouse => PointerEvent::MouseUp,
            InputMode::Touch => PointerEvent::TouchEnd,
        };
        self.session.handle_pointer(coords, event);
    }

    fn run(&mut self, command: Command) -> anyhow::Result<()> {
        self.sync();
        match command {
            Command::Open(coords) => self.session.open(coords),
            Command::Flag(coords) => self.session.toggle_flag(coords),
            Command::Tap(coords) => {
                self.press(coords);
                self.release(coords);
            }
            Command::Hold(coords) => {
                self.press(coords);
                self.clock.advance(self.session.timings().press_ms);
                self.session.poll();
                self.release(coords);
            }
            Command::Drag(coords) => {
                if self.session.input_mode() != InputMode::Touch {
                    log::warn!("Dragging needs --touch, ignoring");
                    return Ok(());
                }
                self.session.handle_pointer(coords, PointerEvent::TouchStart);
                self.session.handle_pointer(coords, PointerEvent::TouchMove);
                self.session.handle_pointer(coords, PointerEvent::TouchEnd);
            }
            Command::Restart => self.session.restart()?,
            Command::Show | Command::Help | Command::Quit => {}
        }
        self.settle();
        Ok(())
    }

    fn print(&self, out: &mut impl Write) -> io::Result<()> {
        let state = match self.session.outcome() {
            GameOutcome::Playing => "playing",
            GameOutcome::Won => "won",
            GameOutcome::Lost => "lost",
        };
        writeln!(
            out,
            "flags left: {}  time: {}s  ({})",
            self.session.flags_left(),
            self.session.elapsed_secs(),
            state
        )?;
        write!(out, "{}", self.session.snapshot())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("args: {:?}", args);

    let game = args.game_config()?;
    let input_mode = if args.touch {
        InputMode::Touch
    } else {
        InputMode::Mouse
    };
    let generator = match args.seed {
        Some(seed) => RandomBoardGenerator::new(seed),
        None => RandomBoardGenerator::from_entropy(),
    };
    let observer = Callbacks::new(
        |secs| println!("You win! Cleared in {secs}s, starting a new board."),
        |secs| println!("Boom! Lost after {secs}s, starting a new board."),
    );
    let config = SessionConfig::new(game)
        .with_input_mode(input_mode)
        .with_observer(observer);

    let clock = ManualClock::new();
    let session = SessionController::with_parts(config, clock.clone(), generator)?;
    let mut driver = Driver {
        session,
        clock,
        wall: SystemClock::new(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "{}x{} board with {} bombs, type \"help\" for commands",
        game.size.0, game.size.1, game.bombs
    )?;
    driver.print(&mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read input")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}")?,
            command => {
                driver.run(command)?;
                driver.print(&mut out)?;
            }
        }
        out.flush()?;
    }

    Ok(())
}
