//! Notifications the game core emits for the front-end.
//!
//! The session never plays sounds or touches UI itself.  It pushes
//! [`Feedback`] values onto a queue, and the front-end drains the queue once
//! per frame (see [`crate::session::GameSession::drain_feedback`]).

use crate::audio::SoundCue;
use crate::economy::UpgradeKind;
use crate::entities::EntityId;
use crate::error::PurchaseError;

#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    /// Play a sound cue.
    Cue(SoundCue),
    /// The player walked into the shop zone.
    ShopOpened,
    /// The player walked out of the shop zone.
    ShopClosed,
    /// An upgrade was bought.
    Purchased {
        kind: UpgradeKind,
        new_level: u32,
        paid: u32,
    },
    /// A purchase request was refused.
    PurchaseRejected(PurchaseError),
    /// A target ran out of hit points.
    TargetDestroyed { target: EntityId, coins: u32 },
    /// The player picked up a coin.
    CoinCollected { coin: EntityId, value: u32 },
}
