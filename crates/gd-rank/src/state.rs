//! Per-guard progression state.

use tracing::debug;

use crate::{GuardPath, GuardRank, RankError, RankResult, RankStats, can_purchase};

/// Mutable progression record for one guard.
///
/// # Invariants
///
/// - A tier-N (N ≥ 1) `current_rank` is on `chosen_path`.
/// - `chosen_path` is set once, at the first tier-1 promotion, and never
///   reset while the entity stays a guard.
/// - `total_spent` only grows.
/// - Promotions are strictly sequential (tier k → k + 1).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankState {
    current_rank: GuardRank,
    chosen_path:  GuardPath,
    total_spent:  u32,
}

/// Snapshot of where a guard stands on its path.  Shown by host UIs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankProgress {
    pub current:      GuardRank,
    pub chosen_path:  GuardPath,
    /// Next rank on the committed path; `None` for an unspecialised recruit
    /// (two options exist) and at max tier.
    pub next:         Option<GuardRank>,
    pub cost_to_next: Option<u32>,
    pub total_spent:  u32,
    pub is_max:       bool,
}

impl RankState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from host-persisted values, repairing an inconsistent path.
    pub fn restore(current_rank: GuardRank, chosen_path: GuardPath, total_spent: u32) -> Self {
        let mut state = Self { current_rank, chosen_path, total_spent };
        state.repair_path();
        state
    }

    #[inline]
    pub fn current_rank(&self) -> GuardRank {
        self.current_rank
    }

    #[inline]
    pub fn chosen_path(&self) -> GuardPath {
        self.chosen_path
    }

    #[inline]
    pub fn total_spent(&self) -> u32 {
        self.total_spent
    }

    #[inline]
    pub fn tier(&self) -> u8 {
        self.current_rank.tier()
    }

    #[inline]
    pub fn stats(&self) -> RankStats {
        self.current_rank.stats()
    }

    #[inline]
    pub fn is_max_rank(&self) -> bool {
        self.current_rank.is_max_tier()
    }

    /// Upgrade options, filtered by the committed path.
    pub fn available_upgrades(&self) -> Vec<GuardRank> {
        crate::available_upgrades(self.current_rank, self.chosen_path)
    }

    /// `true` if `target` is a legal next step for this guard.
    pub fn can_advance_to(&self, target: GuardRank) -> bool {
        can_purchase(target, self.current_rank)
            && (!self.chosen_path.is_specialized() || target.path() == self.chosen_path)
    }

    /// Promote to `target`, paying from `available_currency`.
    ///
    /// Returns the cost charged.  The caller deducts it from wherever the
    /// currency lives.
    pub fn purchase(&mut self, target: GuardRank, available_currency: u32) -> RankResult<u32> {
        if !self.can_advance_to(target) {
            return Err(RankError::NotPurchasable { from: self.current_rank, to: target });
        }
        let cost = target.cost();
        if available_currency < cost {
            return Err(RankError::InsufficientCurrency {
                to:        target,
                needed:    cost,
                available: available_currency,
            });
        }
        self.commit(target);
        Ok(cost)
    }

    /// Promote to `target` without a currency check.  Used when the host has
    /// already settled payment and only reports the new rank.
    pub fn advance_to(&mut self, target: GuardRank) -> RankResult<()> {
        if !self.can_advance_to(target) {
            return Err(RankError::NotPurchasable { from: self.current_rank, to: target });
        }
        self.commit(target);
        Ok(())
    }

    fn commit(&mut self, target: GuardRank) {
        if !self.chosen_path.is_specialized() && target.path().is_specialized() {
            self.chosen_path = target.path();
        }
        self.total_spent = self.total_spent.saturating_add(target.cost());
        debug!(
            from = %self.current_rank,
            to = %target,
            path = %self.chosen_path,
            spent = self.total_spent,
            "rank promoted"
        );
        self.current_rank = target;
    }

    /// Make `chosen_path` agree with a specialised `current_rank`.
    ///
    /// Returns `true` if anything changed.
    pub fn repair_path(&mut self) -> bool {
        let rank_path = self.current_rank.path();
        if rank_path.is_specialized() && rank_path != self.chosen_path {
            debug!(
                rank = %self.current_rank,
                stored = %self.chosen_path,
                "repairing inconsistent rank path"
            );
            self.chosen_path = rank_path;
            return true;
        }
        false
    }

    pub fn progression(&self) -> RankProgress {
        let next = match self.chosen_path {
            GuardPath::None => None,
            _               => self.available_upgrades().first().copied(),
        };
        RankProgress {
            current:      self.current_rank,
            chosen_path:  self.chosen_path,
            next,
            cost_to_next: next.map(GuardRank::cost),
            total_spent:  self.total_spent,
            is_max:       self.is_max_rank(),
        }
    }
}
