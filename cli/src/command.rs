use anyhow::{Context, bail};
use sapper_core::{Coord, Coord2};
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Open intent, bypassing pointer events
    Open(Coord2),
    /// Flag intent, bypassing pointer events
    Flag(Coord2),
    /// Press and release
    Tap(Coord2),
    /// Press, wait for the long-press timer, release
    Hold(Coord2),
    /// Touch press that turns into a scroll
    Drag(Coord2),
    Restart,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  open X Y     open a cell
  flag X Y     toggle a flag
  tap X Y      press and release a cell
  hold X Y     long-press a cell
  drag X Y     start a touch on a cell and scroll away
  restart      start over with a new board
  show         print the board
  help         print this message
  quit         leave the game";

fn parse_coords<'a>(mut args: impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let mut next = |axis: &str| -> anyhow::Result<Coord> {
        let arg = args.next().with_context(|| format!("missing {axis} coordinate"))?;
        arg.parse()
            .with_context(|| format!("invalid {axis} coordinate {arg:?}"))
    };
    let x = next("x")?;
    let y = next("y")?;
    Ok((x, y))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Command::Show);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "open" | "o" => Command::Open(parse_coords(&mut words)?),
            "flag" | "f" => Command::Flag(parse_coords(&mut words)?),
            "tap" | "t" => Command::Tap(parse_coords(&mut words)?),
            "hold" | "h" => Command::Hold(parse_coords(&mut words)?),
            "drag" | "d" => Command::Drag(parse_coords(&mut words)?),
            "restart" | "r" => Command::Restart,
            "show" | "s" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => bail!("unknown command {other:?}, try \"help\""),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument {extra:?}");
        }
        Ok(command)
    }
}
