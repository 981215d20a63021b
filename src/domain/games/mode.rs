use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Snake rule set. `walls` ends the run on the border, `pass-through` wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum GameMode {
    #[serde(rename = "walls")]
    Walls,
    #[serde(rename = "pass-through")]
    PassThrough,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Walls => "walls",
            GameMode::PassThrough => "pass-through",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown game mode: {0}")]
pub struct UnknownGameMode(pub String);

impl FromStr for GameMode {
    type Err = UnknownGameMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "walls" => Ok(GameMode::Walls),
            "pass-through" => Ok(GameMode::PassThrough),
            other => Err(UnknownGameMode(other.to_string())),
        }
    }
}

/// Mode selector used by read queries; `all` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeFilter {
    #[default]
    All,
    Only(GameMode),
}

impl ModeFilter {
    pub fn parse(raw: Option<&str>) -> Result<Self, UnknownGameMode> {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => Ok(ModeFilter::All),
            Some(other) => other.parse().map(ModeFilter::Only),
        }
    }

    pub fn matches(&self, mode: GameMode) -> bool {
        match self {
            ModeFilter::All => true,
            ModeFilter::Only(m) => *m == mode,
        }
    }

    pub fn mode(&self) -> Option<GameMode> {
        match self {
            ModeFilter::All => None,
            ModeFilter::Only(m) => Some(*m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!("walls".parse::<GameMode>().unwrap(), GameMode::Walls);
        assert_eq!(
            "pass-through".parse::<GameMode>().unwrap(),
            GameMode::PassThrough
        );
        assert!("wrap".parse::<GameMode>().is_err());
    }

    #[test]
    fn filter_defaults_to_all() {
        assert_eq!(ModeFilter::parse(None).unwrap(), ModeFilter::All);
        assert_eq!(ModeFilter::parse(Some("all")).unwrap(), ModeFilter::All);
        assert_eq!(ModeFilter::parse(Some("")).unwrap(), ModeFilter::All);
        let only = ModeFilter::parse(Some("walls")).unwrap();
        assert!(only.matches(GameMode::Walls));
        assert!(!only.matches(GameMode::PassThrough));
    }

    #[test]
    fn serde_uses_kebab_names() {
        let json = serde_json::to_string(&GameMode::PassThrough).unwrap();
        assert_eq!(json, "\"pass-through\"");
    }
}
