use interventions::{InterventionType, ParseInterventionError};
use scene::ScreenPoint;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Tool button press.
    Tool(InterventionType),
    /// Left click in the viewport.
    Click(ScreenPoint),
    /// Await every in-flight click.
    Wait,
    Markers,
    Info,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Tool(#[from] ParseInterventionError),
    #[error("invalid pixel coordinate '{0}'")]
    Coordinate(String),
}

pub const HELP: &str = "\
commands:
  tool <tree|roof|water|building>   select the active intervention
  click <x> <y>                     click the globe at a pixel
  wait                              wait for in-flight clicks
  markers                           list placed interventions as JSON
  info                              show the current status message
  quit                              wait for clicks and exit";

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("tool", [name]) => Command::Tool(name.parse()?),
        ("tool", _) => return Err(CommandError::Usage("tool <tree|roof|water|building>")),
        ("click", [x, y]) => Command::Click(ScreenPoint::new(pixel(x)?, pixel(y)?)),
        ("click", _) => return Err(CommandError::Usage("click <x> <y>")),
        ("wait", []) => Command::Wait,
        ("markers", []) => Command::Markers,
        ("info", []) => Command::Info,
        ("help", _) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => return Err(CommandError::Unknown(line.to_string())),
    };
    Ok(Some(command))
}

fn pixel(raw: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::Coordinate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{Command, CommandError, parse_command};
    use interventions::InterventionType;
    use scene::ScreenPoint;

    #[test]
    fn parses_tool_and_click() {
        assert_eq!(
            parse_command("tool roof"),
            Ok(Some(Command::Tool(InterventionType::Roof)))
        );
        assert_eq!(
            parse_command("  click 640 360.5 "),
            Ok(Some(Command::Click(ScreenPoint::new(640.0, 360.5))))
        );
        assert_eq!(parse_command("QUIT"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("# set up"), Ok(None));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse_command("tool lawn"), Err(CommandError::Tool(_))));
        assert!(matches!(parse_command("click 1"), Err(CommandError::Usage(_))));
        assert!(matches!(parse_command("click a 2"), Err(CommandError::Coordinate(_))));
        assert!(matches!(parse_command("dance"), Err(CommandError::Unknown(_))));
    }
}
