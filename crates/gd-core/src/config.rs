//! Per-guard behavior configuration.
//!
//! The configuration is owned and mutated by the host (UI, persistence,
//! network sync).  The core only ever reads a snapshot of it.  Whenever no
//! snapshot is available the [`Default`] value applies.

/// Which idle behavior a guard runs while it has no target.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorMode {
    /// Stay close to an ally, owner, or civilian.
    Follow,
    /// Wander between random waypoints around the guard post.
    #[default]
    Patrol,
    /// Hold position.
    Stand,
}

impl BehaviorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorMode::Follow => "follow",
            BehaviorMode::Patrol => "patrol",
            BehaviorMode::Stand  => "stand",
        }
    }
}

impl std::fmt::Display for BehaviorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one guard's host-side configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorConfig {
    pub mode:              BehaviorMode,
    /// Target search radius in world units.  Always within
    /// [`MIN_DETECTION_RANGE`](Self::MIN_DETECTION_RANGE)..=[`MAX_DETECTION_RANGE`](Self::MAX_DETECTION_RANGE)
    /// when read through [`detection_range`](Self::detection_range).
    detection_range:       f64,
    pub follow_target:     Option<crate::EntityId>,
    pub profession_locked: bool,
}

impl BehaviorConfig {
    pub const MIN_DETECTION_RANGE:     f64 = 10.0;
    pub const MAX_DETECTION_RANGE:     f64 = 30.0;
    pub const DEFAULT_DETECTION_RANGE: f64 = 20.0;

    pub fn new(mode: BehaviorMode, detection_range: f64) -> Self {
        Self {
            mode,
            detection_range:   clamp_range(detection_range),
            follow_target:     None,
            profession_locked: false,
        }
    }

    /// Detection range clamped to the supported band.
    ///
    /// Clamped again on read because deserialized snapshots bypass `new`.
    #[inline]
    pub fn detection_range(&self) -> f64 {
        clamp_range(self.detection_range)
    }

    pub fn set_detection_range(&mut self, range: f64) {
        self.detection_range = clamp_range(range);
    }

    pub fn with_follow_target(mut self, target: crate::EntityId) -> Self {
        self.follow_target = Some(target);
        self
    }

    pub fn with_profession_locked(mut self, locked: bool) -> Self {
        self.profession_locked = locked;
        self
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self::new(BehaviorMode::default(), Self::DEFAULT_DETECTION_RANGE)
    }
}

fn clamp_range(range: f64) -> f64 {
    if range.is_nan() {
        return BehaviorConfig::DEFAULT_DETECTION_RANGE;
    }
    range.clamp(BehaviorConfig::MIN_DETECTION_RANGE, BehaviorConfig::MAX_DETECTION_RANGE)
}
