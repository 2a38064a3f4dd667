//! Table defaults.

use crate::entities::Usd;

pub const DEFAULT_SMALL_BLIND: Usd = 10;
pub const DEFAULT_BIG_BLIND: Usd = 20;
pub const DEFAULT_MIN_PLAYERS: usize = 2;
pub const DEFAULT_MAX_PLAYERS: usize = 5;
pub const DEFAULT_BUY_IN: Usd = 1000;

/// Milliseconds a seated player may take before being auto-folded.
pub const DEFAULT_MAX_TIME_PER_TURN_MS: u64 = 15_000;

/// Usernames longer than this are truncated.
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Capacity of the actor inbox and of each subscriber channel created by
/// [`crate::table::TableHandle::subscribe`].
pub const CHANNEL_CAPACITY: usize = 100;
