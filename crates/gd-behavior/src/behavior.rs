//! The `Behavior` trait — one scheduler-managed unit of guard logic.

use gd_world::World;

use crate::{BehaviorContext, BehaviorResult, Resources};

/// A prioritized behavior with exclusive resource claims.
///
/// The scheduler only ever talks to behaviors through this trait.  The
/// eligibility checks return `BehaviorResult<bool>`; an `Err` excludes the
/// behavior for the current tick without disturbing the others.
///
/// `on_stop` must always leave the guard resumable: no held navigation, no
/// dangling target.
pub trait Behavior {
    fn name(&self) -> &'static str;

    /// Lower runs first.  Unique within one scheduler.
    fn priority(&self) -> u8;

    fn claims(&self) -> Resources;

    /// May this behavior start now?
    fn can_start<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool>;

    /// May this running behavior keep going?  Defaults to `can_start`.
    fn should_continue<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        self.can_start(ctx)
    }

    fn on_start<W: World + ?Sized>(&mut self, _ctx: &mut BehaviorContext<'_, W>) {}

    fn on_tick<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>);

    fn on_stop<W: World + ?Sized>(&mut self, _ctx: &mut BehaviorContext<'_, W>) {}
}
