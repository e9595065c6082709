//! Line commands standing in for the host UI controls

use nativestate_shared::{SCALE_RANGE, SpotlightPreset, TextureChoice, UnknownPreset};
use thiserror::Error;

/// One host UI action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Preload textures and start the engine
    Start,
    /// Unload the engine
    Stop,
    /// Scale slider
    Scale(f32),
    /// Visibility toggle
    Visible(bool),
    /// Texture picker
    Texture(TextureChoice),
    /// Spotlight picker
    Spotlight(SpotlightPreset),
    /// Print lifecycle state and the current record
    State,
    /// Write the current presentation state to the config file
    Save,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error("scale {0} is outside {min}..={max}", min = SCALE_RANGE.start(), max = SCALE_RANGE.end())]
    ScaleOutOfRange(f32),
    #[error(transparent)]
    Preset(#[from] UnknownPreset),
}

pub const HELP: &str = "\
commands:
  start                              preload textures and start the engine
  stop                               unload the engine
  scale <1.0-3.0>                    set the object scale
  show | hide                        toggle visibility
  texture <none|marble|checkerboard> pick a texture
  spotlight <neutral|warm|cool|#hex> pick a spotlight colour
  state                              print lifecycle and current record
  save                               save the current state as the initial state
  quit                               exit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match name.to_ascii_lowercase().as_str() {
        "start" => Command::Start,
        "stop" => Command::Stop,
        "scale" => {
            let value = arg.ok_or(CommandError::MissingArgument("scale"))?;
            let scale: f32 = value
                .parse()
                .map_err(|_| CommandError::InvalidNumber(value.to_string()))?;
            if !SCALE_RANGE.contains(&scale) {
                return Err(CommandError::ScaleOutOfRange(scale));
            }
            Command::Scale(scale)
        }
        "show" => Command::Visible(true),
        "hide" => Command::Visible(false),
        "texture" => Command::Texture(
            arg.ok_or(CommandError::MissingArgument("texture"))?
                .parse()?,
        ),
        "spotlight" => Command::Spotlight(
            arg.ok_or(CommandError::MissingArgument("spotlight"))?
                .parse()?,
        ),
        "state" => Command::State,
        "save" => Command::Save,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}
