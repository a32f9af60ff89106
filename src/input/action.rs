//! Session actions and the gesture script format.
//!
//! One action per line, arguments separated by whitespace:
//!
//! ```text
//! # erase a short stroke on the first item, then keep it
//! fit 800 600
//! radius 12
//! press 400 300
//! drag 410 305
//! release
//! save
//! next
//! ```

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One user-level operation on an editing session.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Pointer pressed at screen coordinates
    Press { x: f64, y: f64 },
    /// Pointer moved to screen coordinates
    Drag { x: f64, y: f64 },
    /// Pointer released
    Release,
    /// Roll back the current gesture
    Recover,
    /// Show/hide the overlay
    ToggleOverlay,
    /// Set the brush radius in raster pixels
    Radius(i32),
    /// Next catalog item
    Next,
    /// Previous catalog item
    Prev,
    /// Write the binary export of the current item
    Save,
    /// Fit the current item into a view of the given screen size
    Fit { width: u32, height: u32 },
    /// Screen coordinates equal raster coordinates
    Identity,
    /// Zoom by `factor` keeping the screen point under the cursor fixed
    Zoom { factor: f64, x: f64, y: f64 },
    /// Pan the view by a screen-space delta
    Pan { dx: f64, dy: f64 },
}

impl Action {
    /// Keyword that introduces this action in a script.
    pub fn keyword(&self) -> &'static str {
        match self {
            Action::Press { .. } => "press",
            Action::Drag { .. } => "drag",
            Action::Release => "release",
            Action::Recover => "recover",
            Action::ToggleOverlay => "toggle",
            Action::Radius(_) => "radius",
            Action::Next => "next",
            Action::Prev => "prev",
            Action::Save => "save",
            Action::Fit { .. } => "fit",
            Action::Identity => "identity",
            Action::Zoom { .. } => "zoom",
            Action::Pan { .. } => "pan",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Press { x, y } | Action::Drag { x, y } => {
                write!(f, "{} {} {}", self.keyword(), x, y)
            }
            Action::Radius(radius) => write!(f, "radius {radius}"),
            Action::Fit { width, height } => write!(f, "fit {width} {height}"),
            Action::Zoom { factor, x, y } => write!(f, "zoom {factor} {x} {y}"),
            Action::Pan { dx, dy } => write!(f, "pan {dx} {dy}"),
            _ => f.write_str(self.keyword()),
        }
    }
}

/// A script line that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ActionParseError {
    /// 1-based line number (0 when parsing a lone action)
    pub line: usize,
    pub message: String,
}

impl ActionParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            line: 0,
            message: message.into(),
        }
    }

    fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let keyword = words
            .next()
            .ok_or_else(|| ActionParseError::new("empty action"))?;
        let args: Vec<&str> = words.collect();

        let action = match keyword.to_ascii_lowercase().as_str() {
            "press" => {
                let [x, y] = arguments::<f64, 2>(keyword, &args)?;
                Action::Press { x, y }
            }
            "drag" => {
                let [x, y] = arguments::<f64, 2>(keyword, &args)?;
                Action::Drag { x, y }
            }
            "release" => unit(keyword, &args, Action::Release)?,
            "recover" => unit(keyword, &args, Action::Recover)?,
            "toggle" => unit(keyword, &args, Action::ToggleOverlay)?,
            "radius" => {
                let [radius] = arguments::<i32, 1>(keyword, &args)?;
                Action::Radius(radius)
            }
            "next" => unit(keyword, &args, Action::Next)?,
            "prev" => unit(keyword, &args, Action::Prev)?,
            "save" => unit(keyword, &args, Action::Save)?,
            "fit" => {
                let [width, height] = arguments::<u32, 2>(keyword, &args)?;
                Action::Fit { width, height }
            }
            "identity" => unit(keyword, &args, Action::Identity)?,
            "zoom" => {
                let [factor, x, y] = arguments::<f64, 3>(keyword, &args)?;
                Action::Zoom { factor, x, y }
            }
            "pan" => {
                let [dx, dy] = arguments::<f64, 2>(keyword, &args)?;
                Action::Pan { dx, dy }
            }
            other => {
                return Err(ActionParseError::new(format!(
                    "unknown action '{other}'"
                )));
            }
        };
        Ok(action)
    }
}

/// Parses a whole script, skipping blank lines and `#` comments.
pub fn parse_script(source: &str) -> Result<Vec<Action>, ActionParseError> {
    let mut actions = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = match raw.split_once('#') {
            Some((code, _comment)) => code,
            None => raw,
        }
        .trim();
        if line.is_empty() {
            continue;
        }
        let action = line
            .parse::<Action>()
            .map_err(|err| err.at_line(index + 1))?;
        actions.push(action);
    }
    Ok(actions)
}

fn unit(keyword: &str, args: &[&str], action: Action) -> Result<Action, ActionParseError> {
    if args.is_empty() {
        Ok(action)
    } else {
        Err(ActionParseError::new(format!(
            "'{keyword}' takes no arguments"
        )))
    }
}

fn arguments<T: FromStr, const N: usize>(
    keyword: &str,
    args: &[&str],
) -> Result<[T; N], ActionParseError> {
    if args.len() != N {
        return Err(ActionParseError::new(format!(
            "'{keyword}' expects {N} argument(s), got {}",
            args.len()
        )));
    }

    let mut parsed = Vec::with_capacity(N);
    for arg in args {
        let value = arg.parse::<T>().map_err(|_| {
            ActionParseError::new(format!("'{keyword}': invalid number '{arg}'"))
        })?;
        parsed.push(value);
    }
    parsed
        .try_into()
        .map_err(|_| ActionParseError::new(format!("'{keyword}': bad argument count")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_keyword() {
        let script = "\
            press 1.5 2\n\
            drag 3 4\n\
            release\n\
            recover\n\
            toggle\n\
            radius 7\n\
            next\n\
            prev\n\
            save\n\
            fit 640 480\n\
            identity\n\
            zoom 2 10 20\n\
            pan -5 5\n";
        let actions = parse_script(script).unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Press { x: 1.5, y: 2.0 },
                Action::Drag { x: 3.0, y: 4.0 },
                Action::Release,
                Action::Recover,
                Action::ToggleOverlay,
                Action::Radius(7),
                Action::Next,
                Action::Prev,
                Action::Save,
                Action::Fit {
                    width: 640,
                    height: 480
                },
                Action::Identity,
                Action::Zoom {
                    factor: 2.0,
                    x: 10.0,
                    y: 20.0
                },
                Action::Pan { dx: -5.0, dy: 5.0 },
            ]
        );
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let actions = parse_script("# header\n\n  next   # trailing\n\t\nSAVE\n").unwrap();
        assert_eq!(actions, vec![Action::Next, Action::Save]);
    }

    #[test]
    fn errors_carry_line_numbers() {
        let err = parse_script("next\n\npress 1\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.to_string().starts_with("line 3:"));

        let err = parse_script("jump 1 2").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("unknown action"));

        assert!(parse_script("radius ten").is_err());
        assert!(parse_script("save now").is_err());
        assert!(parse_script("fit -1 10").is_err());
    }

    #[test]
    fn display_matches_script_syntax() {
        for action in [
            Action::Press { x: 3.0, y: 4.5 },
            Action::Radius(-2),
            Action::Fit {
                width: 10,
                height: 20,
            },
            Action::ToggleOverlay,
        ] {
            let reparsed: Action = action.to_string().parse().unwrap();
            assert_eq!(reparsed, action);
        }
    }

    #[test]
    fn only_left_button_starts_gesture() {
        use crate::input::MouseButton;
        assert!(MouseButton::Left.starts_gesture());
        assert!(!MouseButton::Right.starts_gesture());
        assert!(!MouseButton::Middle.starts_gesture());
    }
}
