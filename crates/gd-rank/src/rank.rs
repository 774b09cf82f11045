//! Rank identities and the static rank table.
//!
//! Each rank is a row of immutable data: tier, path, purchase cost, and the
//! stat line it grants.  The table is a `const` so every lookup is a match
//! with no allocation.

use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::RankStats;

/// Highest reachable tier.
pub const MAX_TIER: u8 = 4;

// ── GuardPath ─────────────────────────────────────────────────────────────────

/// Specialization branch.  `None` is the unspecialised recruit path.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuardPath {
    #[default]
    None,
    Melee,
    Ranged,
}

impl GuardPath {
    #[inline]
    pub fn is_specialized(self) -> bool {
        !matches!(self, GuardPath::None)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GuardPath::None   => "none",
            GuardPath::Melee  => "melee",
            GuardPath::Ranged => "ranged",
        }
    }

    /// The tier-1 rank that opens this path, if any.
    pub fn entry_rank(self) -> Option<GuardRank> {
        match self {
            GuardPath::None   => None,
            GuardPath::Melee  => Some(GuardRank::ManAtArmsI),
            GuardPath::Ranged => Some(GuardRank::MarksmanI),
        }
    }
}

impl std::fmt::Display for GuardPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── GuardRank ─────────────────────────────────────────────────────────────────

/// Every rank a guard can hold.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, EnumIter, EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuardRank {
    #[default]
    Recruit,
    ManAtArmsI,
    ManAtArmsII,
    ManAtArmsIII,
    Knight,
    MarksmanI,
    MarksmanII,
    MarksmanIII,
    Sharpshooter,
}

/// One row of the rank table.
struct RankRow {
    display: &'static str,
    tier:    u8,
    path:    GuardPath,
    cost:    u32,
    stats:   RankStats,
}

const fn row(display: &'static str, tier: u8, path: GuardPath, cost: u32, stats: RankStats) -> RankRow {
    RankRow { display, tier, path, cost, stats }
}

impl GuardRank {
    const fn row(self) -> RankRow {
        use GuardPath as P;
        match self {
            GuardRank::Recruit      => row("Recruit",      0, P::None,   0,  RankStats::recruit()),
            GuardRank::ManAtArmsI   => row("Soldier I",    1, P::Melee,  15, RankStats::melee(14.0, 1.5)),
            GuardRank::ManAtArmsII  => row("Soldier II",   2, P::Melee,  20, RankStats::melee(18.0, 2.5)),
            GuardRank::ManAtArmsIII => row("Soldier III",  3, P::Melee,  45, RankStats::melee(22.0, 3.0)),
            GuardRank::Knight       => row("Knight",       4, P::Melee,  75, RankStats::melee(26.0, 4.0)),
            GuardRank::MarksmanI    => row("Ranger I",     1, P::Ranged, 15, RankStats::ranged(14.0, 1.5, 2.0)),
            GuardRank::MarksmanII   => row("Ranger II",    2, P::Ranged, 20, RankStats::ranged(18.0, 2.5, 1.5)),
            GuardRank::MarksmanIII  => row("Ranger III",   3, P::Ranged, 45, RankStats::ranged(22.0, 3.5, 1.0)),
            GuardRank::Sharpshooter => row("Sharpshooter", 4, P::Ranged, 75, RankStats::ranged(26.0, 4.5, 0.8)),
        }
    }

    #[inline]
    pub fn tier(self) -> u8 {
        self.row().tier
    }

    #[inline]
    pub fn path(self) -> GuardPath {
        self.row().path
    }

    /// Currency needed to be promoted *into* this rank.
    #[inline]
    pub fn cost(self) -> u32 {
        self.row().cost
    }

    #[inline]
    pub fn stats(self) -> RankStats {
        self.row().stats
    }

    /// Human-readable title shown to players.
    pub fn display_name(self) -> &'static str {
        self.row().display
    }

    #[inline]
    pub fn is_max_tier(self) -> bool {
        self.tier() >= MAX_TIER
    }

    /// The rank at `tier` on `path`, if one exists.  Tier 0 is the recruit
    /// rank regardless of `path`.
    pub fn at(path: GuardPath, tier: u8) -> Option<GuardRank> {
        if tier == 0 {
            return Some(GuardRank::Recruit);
        }
        GuardRank::iter().find(|r| r.tier() == tier && r.path() == path)
    }

    /// The next rank on this rank's own path.  `None` for the recruit rank
    /// (a path must be chosen first) and at max tier.
    pub fn next(self) -> Option<GuardRank> {
        if !self.path().is_specialized() {
            return None;
        }
        GuardRank::at(self.path(), self.tier() + 1)
    }

    /// The rank one tier below.  Tier-1 ranks fall back to the recruit rank.
    pub fn previous(self) -> Option<GuardRank> {
        match self.tier() {
            0 => None,
            t => GuardRank::at(self.path(), t - 1),
        }
    }

    /// All ranks on `path` in ascending tier order, starting with the recruit
    /// rank.
    pub fn ranks_for_path(path: GuardPath) -> Vec<GuardRank> {
        let mut ranks: Vec<GuardRank> = GuardRank::iter()
            .filter(|r| r.tier() == 0 || (path.is_specialized() && r.path() == path))
            .collect();
        ranks.sort_by_key(|r| r.tier());
        ranks
    }

    /// Sum of purchase costs from the recruit rank up to and including `self`.
    pub fn total_cost(self) -> u32 {
        GuardRank::ranks_for_path(self.path())
            .into_iter()
            .take_while(|r| r.tier() <= self.tier())
            .map(GuardRank::cost)
            .sum()
    }
}

impl std::fmt::Display for GuardRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
