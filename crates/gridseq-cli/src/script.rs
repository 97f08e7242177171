//! Input event script: one command per line, `#` starts a comment

use std::str::FromStr;

use anyhow::{Context, anyhow, bail};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Load a new clip of the given length in beats
    Clip(f64),
    Set { step: u32, row: u32, velocity: f64, duration: f64 },
    /// Pad press on a visible column
    Toggle { column: u32, row: u32 },
    Clear { step: u32, row: u32 },
    ClearRow(u32),
    /// Choose the visible cell the knobs edit
    Select { column: u32, row: u32 },
    Knob { index: usize, control: i32, fast: bool },
    Scene(usize),
    Left,
    Right,
    /// Playback position in steps
    Play(Option<u64>),
    Loop { start: u64, end: u64 },
    Show,
}

fn arg<T>(parts: &[&str], i: usize, name: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = parts.get(i).ok_or_else(|| anyhow!("missing {}", name))?;
    raw.parse::<T>().with_context(|| format!("invalid {} '{}'", name, raw))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&name) = parts.first() else {
            bail!("empty command");
        };
        let command = match name {
            "clip" => Self::Clip(arg(&parts, 1, "length")?),
            "set" => Self::Set {
                step: arg(&parts, 1, "step")?,
                row: arg(&parts, 2, "row")?,
                velocity: arg(&parts, 3, "velocity")?,
                duration: arg(&parts, 4, "duration")?,
            },
            "toggle" => Self::Toggle { column: arg(&parts, 1, "column")?, row: arg(&parts, 2, "row")? },
            "clear" => Self::Clear { step: arg(&parts, 1, "step")?, row: arg(&parts, 2, "row")? },
            "clear-row" => Self::ClearRow(arg(&parts, 1, "row")?),
            "select" => Self::Select { column: arg(&parts, 1, "column")?, row: arg(&parts, 2, "row")? },
            "knob" => Self::Knob {
                index: arg(&parts, 1, "knob")?,
                control: arg(&parts, 2, "control")?,
                fast: parts.get(3) == Some(&"fast"),
            },
            "scene" => Self::Scene(arg(&parts, 1, "scene")?),
            "left" => Self::Left,
            "right" => Self::Right,
            "play" => match parts.get(1) {
                Some(&"stop") | None => Self::Play(None),
                Some(_) => Self::Play(Some(arg(&parts, 1, "step")?)),
            },
            "loop" => Self::Loop { start: arg(&parts, 1, "start page")?, end: arg(&parts, 2, "end page")? },
            "show" => Self::Show,
            other => bail!("unknown command '{}'", other),
        };
        Ok(command)
    }
}

/// Parse a whole script, skipping blank lines and comments
pub fn parse(source: &str) -> anyhow::Result<Vec<Command>> {
    source
        .lines()
        .enumerate()
        .map(|(n, line)| (n, line.split('#').next().unwrap_or("").trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(n, line)| line.parse::<Command>().with_context(|| format!("line {}", n + 1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let commands = parse(
            "# demo\nclip 16\nset 2 3 0.8 0.5\n\nknob 2 127 fast  # slower\nplay stop\nshow\n",
        )
        .unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Clip(16.0),
                Command::Set { step: 2, row: 3, velocity: 0.8, duration: 0.5 },
                Command::Knob { index: 2, control: 127, fast: true },
                Command::Play(None),
                Command::Show,
            ]
        );
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let err = parse("show\nset 1 x 0.5 1").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
        assert!(parse("jump 3").is_err());
        assert!(parse("toggle 1").is_err());
    }
}
