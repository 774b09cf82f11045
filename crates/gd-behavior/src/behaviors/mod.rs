//! The six guard behaviors and the closed `GuardBehavior` set.
//!
//! | Behavior  | Priority | Claims                     |
//! |-----------|----------|----------------------------|
//! | combat    | 0        | MOVEMENT, AIM, TARGETING   |
//! | defend    | 1        | TARGETING                  |
//! | retreat   | 2        | MOVEMENT, TARGETING        |
//! | follow    | 5        | MOVEMENT                   |
//! | patrol    | 7        | MOVEMENT                   |
//! | stand     | 8        | MOVEMENT                   |

pub mod combat;
pub mod defend;
pub mod follow;
pub mod patrol;
pub mod retreat;
pub mod stand;

use gd_world::World;

use crate::{Behavior, BehaviorContext, BehaviorResult, Resources};

pub use combat::Combat;
pub use defend::Defend;
pub use follow::Follow;
pub use patrol::Patrol;
pub use retreat::Retreat;
pub use stand::Stand;

/// One of the six guard behaviors, each carrying its own state.
#[derive(Clone, Debug)]
pub enum GuardBehavior {
    Combat(Combat),
    Defend(Defend),
    Retreat(Retreat),
    Follow(Follow),
    Patrol(Patrol),
    Stand(Stand),
}

/// Every guard gets exactly this set.
pub fn standard_set() -> Vec<GuardBehavior> {
    vec![
        GuardBehavior::Combat(Combat::new()),
        GuardBehavior::Defend(Defend::new()),
        GuardBehavior::Retreat(Retreat::new()),
        GuardBehavior::Follow(Follow::new()),
        GuardBehavior::Patrol(Patrol::new()),
        GuardBehavior::Stand(Stand::new()),
    ]
}

macro_rules! each {
    ($self:expr, $b:ident => $body:expr) => {
        match $self {
            GuardBehavior::Combat($b)  => $body,
            GuardBehavior::Defend($b)  => $body,
            GuardBehavior::Retreat($b) => $body,
            GuardBehavior::Follow($b)  => $body,
            GuardBehavior::Patrol($b)  => $body,
            GuardBehavior::Stand($b)   => $body,
        }
    };
}

impl Behavior for GuardBehavior {
    fn name(&self) -> &'static str {
        each!(self, b => b.name())
    }

    fn priority(&self) -> u8 {
        each!(self, b => b.priority())
    }

    fn claims(&self) -> Resources {
        each!(self, b => b.claims())
    }

    fn can_start<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        each!(self, b => b.can_start(ctx))
    }

    fn should_continue<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        each!(self, b => b.should_continue(ctx))
    }

    fn on_start<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        each!(self, b => b.on_start(ctx))
    }

    fn on_tick<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        each!(self, b => b.on_tick(ctx))
    }

    fn on_stop<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        each!(self, b => b.on_stop(ctx))
    }
}
