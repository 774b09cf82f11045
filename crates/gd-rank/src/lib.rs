//! `gd-rank` — the guard progression model.
//!
//! A guard starts as an unspecialised **Recruit** (tier 0) and is promoted one
//! tier at a time along exactly one **path** (melee or ranged), committed at
//! the first tier-1 purchase.  Everything derived from rank (stats, costs,
//! upgrade options) is a pure function of the rank identity.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`rank`]    | `GuardRank`, `GuardPath`, the static rank table            |
//! | [`stats`]   | `RankStats` (derived per-rank attributes)                  |
//! | [`model`]   | `stats_for`, `cost_to_purchase`, `next_rank`, `available_upgrades`, `can_purchase` |
//! | [`state`]   | `RankState` (per-guard mutable progression), `RankProgress` |
//! | [`error`]   | `RankError`, `RankResult<T>`                               |

pub mod error;
pub mod model;
pub mod rank;
pub mod state;
pub mod stats;


pub use error::{RankError, RankResult};
pub use model::{available_upgrades, can_purchase, cost_to_purchase, next_rank, stats_for};
pub use rank::{GuardPath, GuardRank, MAX_TIER};
pub use state::{RankProgress, RankState};
pub use stats::RankStats;
