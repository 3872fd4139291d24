//! Remote command grammar.
//!
//! ```text
//! press [ss ...]     push the button, optionally at one of the given seconds
//! release [ss ...]   let go of the button, optionally at one of the seconds
//! press up           press the up arrow
//! press down         press the down arrow
//! uncap              ask for more stages
//! ```
//!
//! Matching is case-insensitive and ignores surrounding whitespace. `ss` is a
//! two-digit second of the minute, `00` to `59`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::puzzle::Arrow;

/// Seconds-of-minute a timed command waits for.
pub type Times = SmallVec<[u8; 4]>;

static TIMED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(press|release)((?: +[0-5][0-9])*)\s*$").unwrap()
});

static ARROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*press\s+(up|down)\s*$").unwrap());

static UNCAP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*uncap\s*$").unwrap());

/// A recognised remote command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Push the main button, at one of `times` if any are given.
    Press(Times),
    /// Release the main button, at one of `times` if any are given.
    Release(Times),
    /// Press an arrow.
    PressArrow(Arrow),
    /// Request (or confirm) more stages.
    Uncap,
}

impl Command {
    /// Parse command text. Returns `None` for anything unrecognised.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.to_lowercase();

        if let Some(caps) = TIMED_RE.captures(&text) {
            let times: Times = caps[2]
                .split_whitespace()
                .filter_map(|t| t.parse().ok())
                .collect();
            return Some(match &caps[1] {
                "press" => Command::Press(times),
                _ => Command::Release(times),
            });
        }

        if let Some(caps) = ARROW_RE.captures(&text) {
            let arrow = if &caps[1] == "up" { Arrow::Up } else { Arrow::Down };
            return Some(Command::PressArrow(arrow));
        }

        if UNCAP_RE.is_match(&text) {
            return Some(Command::Uncap);
        }

        None
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (verb, times) = match self {
            Command::Press(times) => ("press", times),
            Command::Release(times) => ("release", times),
            Command::PressArrow(Arrow::Up) => return write!(f, "press up"),
            Command::PressArrow(Arrow::Down) => return write!(f, "press down"),
            Command::Uncap => return write!(f, "uncap"),
        };
        write!(f, "{}", verb)?;
        for t in times {
            write!(f, " {:02}", t)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_press_and_release() {
        assert_eq!(Command::parse("press"), Some(Command::Press(Times::new())));
        assert_eq!(Command::parse("  RELEASE  "), Some(Command::Release(Times::new())));
        assert_eq!(
            Command::parse("press 05 15"),
            Some(Command::Press(smallvec![5, 15]))
        );
        assert_eq!(
            Command::parse("Release   00 59 30"),
            Some(Command::Release(smallvec![0, 59, 30]))
        );
    }

    #[test]
    fn test_bad_times() {
        assert_eq!(Command::parse("press 60"), None);
        assert_eq!(Command::parse("press 5"), None);
        assert_eq!(Command::parse("press 123"), None);
        assert_eq!(Command::parse("press05"), None);
    }

    #[test]
    fn test_arrows() {
        assert_eq!(Command::parse("press up"), Some(Command::PressArrow(Arrow::Up)));
        assert_eq!(Command::parse("PRESS   Down "), Some(Command::PressArrow(Arrow::Down)));
        assert_eq!(Command::parse("press left"), None);
    }

    #[test]
    fn test_uncap() {
        assert_eq!(Command::parse("uncap"), Some(Command::Uncap));
        assert_eq!(Command::parse(" UnCap "), Some(Command::Uncap));
        assert_eq!(Command::parse("uncap now"), None);
    }

    #[test]
    fn test_unrecognised() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("hold"), None);
        assert_eq!(Command::parse("press up down"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::Press(smallvec![5, 15]).to_string(), "press 05 15");
        assert_eq!(Command::Release(Times::new()).to_string(), "release");
        assert_eq!(Command::PressArrow(Arrow::Down).to_string(), "press down");
    }
}
