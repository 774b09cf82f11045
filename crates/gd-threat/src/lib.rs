//! `gd-threat` — finds and holds a combat target for one guard.
//!
//! # Search
//!
//! [`find_target`] runs two phases within the guard's detection range:
//!
//! 1. Hostiles currently attacking the guard or anything it protects
//!    (another guard, a civilian, a player).  No line of sight needed.
//! 2. Hostiles the guard can see.
//!
//! The nearest phase-1 hostile wins.  Only when phase 1 is empty does the
//! nearest phase-2 hostile win.
//!
//! # Holding
//!
//! [`ThreatDetector`] wraps the search with a held target: re-searched at most
//! once every [`REEVALUATE_INTERVAL`] ticks while the held target is valid,
//! immediately when none is held, and dropped as soon as it dies or leaves
//! range.

pub mod detector;


pub use detector::{REEVALUATE_INTERVAL, Target, ThreatDetector, ThreatReason, find_target};
