//! Game-specific error types.
//!
//! Nothing in the game is fatal: every error here ends up as a log line, a
//! sound cue, or a fallback to defaults.  Callers propagate them with `?`
//! and decide at the edge how to surface them.
//!
//! ## Usage
//!
//! ```rust
//! use coin_arena::error::{GameResult, PurchaseError};
//!
//! fn check(level: u32, max_level: u32) -> GameResult<()> {
//!     if level >= max_level {
//!         return Err(PurchaseError::MaxLevelReached.into());
//!     }
//!     Ok(())
//! }
//! # assert!(check(3, 3).is_err());
//! ```

use crate::economy::UpgradeKind;
use std::fmt;

/// Why a purchase request was refused.  The player only ever hears these as
/// the failure cue; the variants exist for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseError {
    /// A purchase was requested while the player is outside the shop zone.
    ShopClosed,
    /// The requested catalog slot does not exist.
    UnknownSlot {
        /// 1-based slot number that was pressed.
        slot: usize,
    },
    /// The upgrade kind is not offered by this catalog.
    UnknownUpgrade { kind: UpgradeKind },
    /// The upgrade is already at its maximum level.
    MaxLevelReached,
    /// The player cannot pay the current cost.
    InsufficientFunds {
        /// Current cost of the upgrade.
        cost: u32,
        /// Currency the player holds.
        balance: u32,
    },
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseError::ShopClosed => write!(f, "the shop is closed"),
            PurchaseError::UnknownSlot { slot } => write!(f, "no upgrade in slot {}", slot),
            PurchaseError::UnknownUpgrade { kind } => {
                write!(f, "upgrade '{}' is not in the catalog", kind.key())
            }
            PurchaseError::MaxLevelReached => write!(f, "upgrade is already at max level"),
            PurchaseError::InsufficientFunds { cost, balance } => write!(
                f,
                "not enough currency: costs ${}, have ${}",
                cost, balance
            ),
        }
    }
}

impl std::error::Error for PurchaseError {}

/// Top-level error enum for the game.
#[derive(Debug)]
pub enum GameError {
    /// The welcome screen was submitted with an empty or whitespace-only name.
    BlankPlayerName,

    /// A purchase was refused.
    Purchase(PurchaseError),

    /// `assets/game.toml` could not be parsed.
    ConfigParse {
        /// Parser message, including the offending line where available.
        message: String,
    },

    /// A configuration value is outside the range the game can work with.
    InvalidConfig {
        /// Name of the config key.
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// The backend save request could not be delivered.
    SaveFailed {
        /// Transport-specific reason.
        reason: String,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::BlankPlayerName => write!(f, "player name must not be blank"),
            GameError::Purchase(err) => write!(f, "purchase refused: {}", err),
            GameError::ConfigParse { message } => {
                write!(f, "failed to parse game config: {}", message)
            }
            GameError::InvalidConfig {
                name,
                value,
                expected,
            } => write!(
                f,
                "config value '{}' = {} is outside the accepted range {}",
                name, value, expected
            ),
            GameError::SaveFailed { reason } => write!(f, "save request failed: {}", reason),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Purchase(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PurchaseError> for GameError {
    fn from(err: PurchaseError) -> Self {
        GameError::Purchase(err)
    }
}

impl From<toml::de::Error> for GameError {
    fn from(err: toml::de::Error) -> Self {
        GameError::ConfigParse {
            message: err.to_string(),
        }
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;
