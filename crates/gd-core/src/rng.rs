//! Per-guard random stream.
//!
//! Every guard owns one `AgentRng`, seeded from the run seed and its own
//! entity id (`seed ^ id * φ`, with φ the 64-bit golden-ratio fraction).
//! Streams are never shared: one guard's trigger rolls cannot shift another
//! guard's patrol waypoints, and handing the role to a new entity leaves
//! every existing stream untouched.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::EntityId;

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Clone, Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(run_seed: u64, agent: EntityId) -> Self {
        let mixed = u64::from(agent.raw()).wrapping_mul(GOLDEN_GAMMA);
        AgentRng(SmallRng::seed_from_u64(run_seed ^ mixed))
    }

    /// A value drawn uniformly from `range`.
    #[inline]
    pub fn uniform<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// One trigger roll: `true` with probability `chance`.  Out-of-range
    /// chances saturate, so `1.0` always and `0.0` never fires.
    #[inline]
    pub fn roll(&mut self, chance: f64) -> bool {
        if chance.is_nan() {
            return false;
        }
        self.0.gen_bool(chance.clamp(0.0, 1.0))
    }
}
