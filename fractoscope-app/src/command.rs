//! Text commands accepted by the interactive session, one per line.

use thiserror::Error;

use fractoscope_core::{Event, JuliaPath};

/// A parsed session command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Input(Event),
    /// Render a batch of Julia sets along a path, outside the cache.
    Series(JuliaPath),
    Status,
    Quit,
}

const SERIES_USAGE: &str =
    "series cardioid SLICES [DERAILMENT] | series radial ANGLE_DEG LENGTH SLICES";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try: zoom-in, zoom-out, left, right, toggle, reset, series, status, quit)")]
    Unknown(String),

    #[error("'{command}' expects two pixel coordinates, e.g. '{command} 960 540'")]
    MissingCoordinates { command: String },

    #[error("invalid pixel coordinate '{0}'")]
    BadCoordinate(String),

    #[error("'{0}' takes no arguments")]
    UnexpectedArguments(String),

    #[error("usage: {}", SERIES_USAGE)]
    SeriesUsage,

    #[error("invalid number '{0}'")]
    BadNumber(String),
}

/// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.split('#').next().unwrap_or("").trim();
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();
    let name = name.to_ascii_lowercase();

    let command = match name.as_str() {
        "zoom-in" | "wheel-forward" => {
            let (x, y) = coordinates(&name, &args)?;
            Command::Input(Event::WheelForward { x, y })
        }
        "zoom-out" | "wheel-backward" => {
            let (x, y) = coordinates(&name, &args)?;
            Command::Input(Event::WheelBackward { x, y })
        }
        "left" => {
            let (x, y) = coordinates(&name, &args)?;
            Command::Input(Event::LeftClick { x, y })
        }
        "right" => {
            let (x, y) = coordinates(&name, &args)?;
            Command::Input(Event::RightClick { x, y })
        }
        "toggle" => no_args(&name, &args, Command::Input(Event::ToggleMode))?,
        "reset" => no_args(&name, &args, Command::Input(Event::Reset))?,
        "series" => Command::Series(series(&args)?),
        "status" => no_args(&name, &args, Command::Status)?,
        "quit" | "exit" => no_args(&name, &args, Command::Quit)?,
        _ => return Err(CommandError::Unknown(name)),
    };
    Ok(Some(command))
}

fn coordinates(name: &str, args: &[&str]) -> Result<(i64, i64), CommandError> {
    match args {
        [x, y] => Ok((pixel(x)?, pixel(y)?)),
        _ => Err(CommandError::MissingCoordinates {
            command: name.to_string(),
        }),
    }
}

/// Pixel positions may be fractional (scene coordinates); they are rounded.
fn pixel(word: &str) -> Result<i64, CommandError> {
    if let Ok(v) = word.parse::<i64>() {
        return Ok(v);
    }
    match word.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v.round() as i64),
        _ => Err(CommandError::BadCoordinate(word.to_string())),
    }
}

fn series(args: &[&str]) -> Result<JuliaPath, CommandError> {
    match args {
        [kind, rest @ ..] if kind.eq_ignore_ascii_case("cardioid") => match rest {
            [slices] => Ok(JuliaPath::cardioid(count(slices)?, 0.0)),
            [slices, derailment] => Ok(JuliaPath::cardioid(count(slices)?, number(derailment)?)),
            _ => Err(CommandError::SeriesUsage),
        },
        [kind, angle, length, slices] if kind.eq_ignore_ascii_case("radial") => Ok(
            JuliaPath::radial(number(angle)?.to_radians(), number(length)?, count(slices)?),
        ),
        _ => Err(CommandError::SeriesUsage),
    }
}

fn number(word: &str) -> Result<f64, CommandError> {
    match word.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CommandError::BadNumber(word.to_string())),
    }
}

fn count(word: &str) -> Result<u32, CommandError> {
    word.parse::<u32>()
        .map_err(|_| CommandError::BadNumber(word.to_string()))
}

fn no_args(name: &str, args: &[&str], command: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::UnexpectedArguments(name.to_string()))
    }
}
