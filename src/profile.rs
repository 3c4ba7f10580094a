//! Player identity chosen on the welcome screen.

use crate::error::{GameError, GameResult};
use bevy::prelude::Resource;

/// Validated player profile handed to [`crate::session::GameSession::new`].
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    name: String,
}

impl PlayerProfile {
    /// Trim `raw` and reject it if nothing is left.
    pub fn parse(raw: &str) -> GameResult<Self> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(GameError::BlankPlayerName);
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Fallback when gameplay starts without going through the welcome screen.
impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            name: "Player".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        let profile = PlayerProfile::parse("  Ana \n").unwrap();
        assert_eq!(profile.name(), "Ana");
    }

    #[test]
    fn whitespace_only_name_is_rejected() {
        assert!(matches!(
            PlayerProfile::parse(" \t "),
            Err(GameError::BlankPlayerName)
        ));
        assert!(PlayerProfile::parse("").is_err());
    }
}
