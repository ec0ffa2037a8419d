//! Line-oriented command scripts.
//!
//! ```text
//! # grab the flashlight, then turn the first painting twice
//! pick flashlight
//! rotate 1
//! rotate 1
//! pick door 0 1.7 2
//! ```

use dreamroom_common::{Asset, CodeSlot, Command, ItemKind, Painting, PickTarget};
use glam::Vec3;

/// A script line that could not be understood.
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParseErrorKind {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("{command}: missing argument")]
    MissingArgument { command: &'static str },
    #[error("{command}: invalid argument {value:?}")]
    InvalidArgument { command: &'static str, value: String },
    #[error("{command}: unexpected trailing input {rest:?}")]
    Trailing { command: &'static str, rest: String },
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(text: &str) -> Result<Vec<Command>, ParseError> {
    let mut commands = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let command = parse_command(line).map_err(|kind| ParseError { line: i + 1, kind })?;
        commands.push(command);
    }
    tracing::debug!(count = commands.len(), "parsed script");
    Ok(commands)
}

/// Parse a single command line.
pub fn parse_command(line: &str) -> Result<Command, ParseErrorKind> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(ParseErrorKind::UnknownCommand(String::new()));
    };
    let args: Vec<&str> = words.collect();
    let command = match head.to_ascii_lowercase().as_str() {
        "pick" => {
            let target = parse_target(arg(&args, 0, "pick")?)?;
            let player = match args.len() {
                1 => Vec3::ZERO,
                4 => Vec3::new(
                    parse_f32("pick", args[1])?,
                    parse_f32("pick", args[2])?,
                    parse_f32("pick", args[3])?,
                ),
                _ => {
                    return Err(ParseErrorKind::InvalidArgument {
                        command: "pick",
                        value: args[1..].join(" "),
                    });
                }
            };
            return Ok(Command::Pick { target, player });
        }
        "equip" => Command::Equip(parse_item("equip", arg(&args, 0, "equip")?)?),
        "unequip" => Command::Unequip,
        "rotate" => Command::RotatePainting(parse_painting("rotate", arg(&args, 0, "rotate")?)?),
        "digit" => {
            let value = arg(&args, 0, "digit")?;
            let slot = value
                .parse()
                .ok()
                .and_then(CodeSlot::from_number)
                .ok_or_else(|| invalid("digit", value))?;
            match arg(&args, 1, "digit")? {
                "up" | "+" => Command::IncrementDigit(slot),
                "down" | "-" => Command::DecrementDigit(slot),
                other => return Err(invalid("digit", other)),
            }
        }
        "submit" => Command::SubmitCode,
        "close-safe" => Command::CloseSafePanel,
        "ready" => match arg(&args, 0, "ready")? {
            "lever" | "mounted-lever" => Command::AssetReady(Asset::MountedLever),
            other => return Err(invalid("ready", other)),
        },
        "frame" => Command::FrameTick {
            light_intensity: parse_f32("frame", arg(&args, 0, "frame")?)?,
        },
        "flashlight" => match arg(&args, 0, "flashlight")? {
            "on" => Command::SetFlashlight(true),
            "off" => Command::SetFlashlight(false),
            other => return Err(invalid("flashlight", other)),
        },
        "inventory" => Command::ToggleInventoryPanel,
        "close-inventory" => Command::CloseInventoryPanel,
        "close-panels" => Command::ClosePanels,
        _ => return Err(ParseErrorKind::UnknownCommand(head.to_string())),
    };
    let used = expected_args(&command);
    if args.len() > used {
        return Err(ParseErrorKind::Trailing {
            command: command_name(&command),
            rest: args[used..].join(" "),
        });
    }
    Ok(command)
}

fn arg<'a>(args: &[&'a str], i: usize, command: &'static str) -> Result<&'a str, ParseErrorKind> {
    args.get(i)
        .copied()
        .ok_or(ParseErrorKind::MissingArgument { command })
}

fn invalid(command: &'static str, value: &str) -> ParseErrorKind {
    ParseErrorKind::InvalidArgument {
        command,
        value: value.to_string(),
    }
}

fn parse_f32(command: &'static str, value: &str) -> Result<f32, ParseErrorKind> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(command, value))
}

fn parse_item(command: &'static str, value: &str) -> Result<ItemKind, ParseErrorKind> {
    ItemKind::from_name(value).ok_or_else(|| invalid(command, value))
}

fn parse_painting(command: &'static str, value: &str) -> Result<Painting, ParseErrorKind> {
    value
        .parse()
        .ok()
        .and_then(Painting::from_number)
        .ok_or_else(|| invalid(command, value))
}

fn parse_target(value: &str) -> Result<PickTarget, ParseErrorKind> {
    let lower = value.to_ascii_lowercase();
    match lower.as_str() {
        "safe" => return Ok(PickTarget::Safe),
        "mount" | "lever-mount" => return Ok(PickTarget::LeverMount),
        "door" => return Ok(PickTarget::Door),
        _ => {}
    }
    if let Some(item) = ItemKind::from_name(&lower) {
        return Ok(PickTarget::Item(item));
    }
    lower
        .strip_prefix("painting")
        .and_then(|n| n.parse().ok())
        .and_then(Painting::from_number)
        .map(PickTarget::Painting)
        .ok_or_else(|| invalid("pick", value))
}

fn expected_args(command: &Command) -> usize {
    match command {
        Command::IncrementDigit(_) | Command::DecrementDigit(_) => 2,
        Command::Equip(_)
        | Command::RotatePainting(_)
        | Command::AssetReady(_)
        | Command::FrameTick { .. }
        | Command::SetFlashlight(_) => 1,
        _ => 0,
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Pick { .. } => "pick",
        Command::Equip(_) => "equip",
        Command::Unequip => "unequip",
        Command::RotatePainting(_) => "rotate",
        Command::IncrementDigit(_) | Command::DecrementDigit(_) => "digit",
        Command::SubmitCode => "submit",
        Command::CloseSafePanel => "close-safe",
        Command::AssetReady(_) => "ready",
        Command::FrameTick { .. } => "frame",
        Command::SetFlashlight(_) => "flashlight",
        Command::ToggleInventoryPanel => "inventory",
        Command::CloseInventoryPanel => "close-inventory",
        Command::ClosePanels => "close-panels",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        let script = "\
            pick flashlight\n\
            pick painting2\n\
            pick door 0 1.5 2\n\
            equip Key\n\
            unequip\n\
            rotate 3\n\
            digit 1 up\n\
            digit 4 -\n\
            submit\n\
            close-safe\n\
            ready lever\n\
            frame 0.25\n\
            flashlight off\n\
            inventory\n\
            close-inventory\n\
            close-panels\n";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                Command::pick(PickTarget::Item(ItemKind::Flashlight)),
                Command::pick(PickTarget::Painting(Painting::Second)),
                Command::Pick {
                    target: PickTarget::Door,
                    player: Vec3::new(0.0, 1.5, 2.0)
                },
                Command::Equip(ItemKind::Key),
                Command::Unequip,
                Command::RotatePainting(Painting::Third),
                Command::IncrementDigit(CodeSlot::First),
                Command::DecrementDigit(CodeSlot::Fourth),
                Command::SubmitCode,
                Command::CloseSafePanel,
                Command::AssetReady(Asset::MountedLever),
                Command::FrameTick {
                    light_intensity: 0.25
                },
                Command::SetFlashlight(false),
                Command::ToggleInventoryPanel,
                Command::CloseInventoryPanel,
                Command::ClosePanels,
            ]
        );
    }

    #[test]
    fn skips_comments_and_blanks() {
        let commands = parse_script("# intro\n\n  submit   # try it\n").unwrap();
        assert_eq!(commands, vec![Command::SubmitCode]);
    }

    #[test]
    fn reports_line_numbers() {
        let err = parse_script("submit\nequip parchment\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(
            err.kind,
            ParseErrorKind::InvalidArgument {
                command: "equip",
                value: "parchment".into()
            }
        );
        assert!(err.to_string().starts_with("line 2:"));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse_command("dance"),
            Err(ParseErrorKind::UnknownCommand("dance".into()))
        );
        assert_eq!(
            parse_command("rotate"),
            Err(ParseErrorKind::MissingArgument { command: "rotate" })
        );
        assert!(parse_command("rotate 4").is_err());
        assert!(parse_command("digit 0 up").is_err());
        assert!(parse_command("digit 2 sideways").is_err());
        assert!(parse_command("pick door 1 2").is_err());
        assert!(parse_command("frame NaN").is_err());
        assert_eq!(
            parse_command("submit now"),
            Err(ParseErrorKind::Trailing {
                command: "submit",
                rest: "now".into()
            })
        );
    }
}
