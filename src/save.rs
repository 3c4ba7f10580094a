//! Best-effort progress upload.
//!
//! The game can report `{username, xp, level}` to `POST /api/save`.  Nothing
//! depends on the answer: failures are logged and dropped, there is no retry,
//! and no authentication.  The actual HTTP hop is behind [`SaveTransport`];
//! the bundled [`LogTransport`] only writes the request to the log, which is
//! all a build without a backend needs.

use crate::error::{GameError, GameResult};
use bevy::log::{info, warn};
use serde::{Deserialize, Serialize};

/// Endpoint the payload is posted to.
pub const SAVE_ENDPOINT: &str = "/api/save";

/// JSON body of the save call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub username: String,
    /// Lifetime currency earned in the session.
    pub xp: u32,
    /// `1 +` total upgrade levels bought.
    pub level: u32,
}

impl SaveRequest {
    pub fn to_json(&self) -> GameResult<String> {
        serde_json::to_string(self).map_err(|err| GameError::SaveFailed {
            reason: err.to_string(),
        })
    }
}

/// Delivers a JSON body to a path.
pub trait SaveTransport {
    fn post_json(&mut self, path: &str, body: &str) -> GameResult<()>;
}

/// Transport that logs the request and reports success.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTransport;

impl SaveTransport for LogTransport {
    fn post_json(&mut self, path: &str, body: &str) -> GameResult<()> {
        info!("[SAVE] POST {path} {body}");
        Ok(())
    }
}

/// Send `request` and swallow any failure.  Returns whether it went through,
/// for logging and tests only.
pub fn save_best_effort(transport: &mut impl SaveTransport, request: &SaveRequest) -> bool {
    let result = request
        .to_json()
        .and_then(|body| transport.post_json(SAVE_ENDPOINT, &body));
    match result {
        Ok(()) => {
            info!("✅ Progress saved for '{}'", request.username);
            true
        }
        Err(err) => {
            warn!("❌ Could not save progress: {err}");
            false
        }
    }
}
