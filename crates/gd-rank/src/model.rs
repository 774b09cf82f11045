//! Pure rank lookups and purchase rules.
//!
//! These free functions are the whole progression model.  They hold no state;
//! the per-guard mutable side lives in [`RankState`](crate::RankState).

use crate::{GuardPath, GuardRank, RankStats};

/// Stats granted by `rank`.
#[inline]
pub fn stats_for(rank: GuardRank) -> RankStats {
    rank.stats()
}

/// Currency required to be promoted into `rank`.
#[inline]
pub fn cost_to_purchase(rank: GuardRank) -> u32 {
    rank.cost()
}

/// The next rank on `rank`'s path.  `None` for the recruit rank (which needs
/// a path choice, see [`available_upgrades`]) and at max tier.
#[inline]
pub fn next_rank(rank: GuardRank) -> Option<GuardRank> {
    rank.next()
}

/// Ranks `current` may be promoted into, given the guard's committed path.
///
/// - Recruit with no path chosen: both tier-1 ranks, melee first.
/// - Otherwise: the next rank on `chosen_path` only.
/// - Max tier: nothing.
///
/// Never returns a rank whose path differs from a committed `chosen_path`.
pub fn available_upgrades(current: GuardRank, chosen_path: GuardPath) -> Vec<GuardRank> {
    if current.tier() == 0 {
        return match chosen_path {
            GuardPath::None => vec![GuardRank::ManAtArmsI, GuardRank::MarksmanI],
            path            => path.entry_rank().into_iter().collect(),
        };
    }
    current
        .next()
        .filter(|next| !chosen_path.is_specialized() || next.path() == chosen_path)
        .into_iter()
        .collect()
}

/// `true` if `candidate` is exactly one tier above `current` and on the same
/// path, or `current` is the unspecialised recruit rank.
pub fn can_purchase(candidate: GuardRank, current: GuardRank) -> bool {
    if candidate == current || candidate == GuardRank::Recruit {
        return false;
    }
    if candidate.tier() != current.tier() + 1 {
        return false;
    }
    !current.path().is_specialized() || candidate.path() == current.path()
}
