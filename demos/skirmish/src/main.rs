//! skirmish — a small guard post under attack.
//!
//! Three guards (a knight, a sharpshooter, and an unarmed recruit) hold a
//! hamlet with two villagers and a player.  Three raiders walk in from
//! different sides.  The run ends when every raider is down or the tick
//! budget runs out.
//!
//! Set `RUST_LOG=gd_behavior=debug` to watch every behavior transition.

mod raiders;

use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gd_core::{BehaviorConfig, BehaviorMode, EntityId, Tick, Vec3};
use gd_rank::{GuardPath, GuardRank, RankState};
use gd_sim::{GuardObserver, GuardSetup, GuardSimBuilder};
use gd_world::{EntityKind, Sandbox};

use raiders::{Raider, resolve_arrows};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:      u64 = 42;
const MAX_TICKS: u64 = 2_000;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Chronicle {
    starts:  usize,
    stops:   usize,
    /// Guard updates summed over every tick.
    updates: usize,
}

impl GuardObserver for Chronicle {
    fn on_tick_end(&mut self, _tick: Tick, updated: usize) {
        self.updates += updated;
    }

    fn on_transition(&mut self, agent: EntityId, behavior: &'static str, started: bool) {
        if started {
            self.starts += 1;
            info!(%agent, behavior, "started");
        } else {
            self.stops += 1;
            info!(%agent, behavior, "stopped");
        }
    }

    fn on_role_assigned(&mut self, agent: EntityId) {
        info!(%agent, "guard on duty");
    }
}

fn rank(rank: GuardRank, path: GuardPath) -> RankState {
    RankState::restore(rank, path, rank.total_cost())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== skirmish — rust_guard ===");
    println!("Seed: {SEED}  |  Tick budget: {MAX_TICKS}");
    println!();

    // 1. Populate the hamlet.
    let mut world = Sandbox::new();
    let post = Vec3::ZERO;
    let knight = world.spawn(EntityKind::Guard, post);
    let archer = world.spawn(EntityKind::Guard, Vec3::new(4.0, 0.0, 2.0));
    let recruit = world.spawn(EntityKind::Guard, Vec3::new(-3.0, 0.0, 1.0));
    let baker = world.spawn(EntityKind::Civilian, Vec3::new(2.0, 0.0, -3.0));
    world.spawn(EntityKind::Civilian, Vec3::new(-4.0, 0.0, -2.0));
    world.spawn(EntityKind::Player, Vec3::new(1.0, 0.0, 5.0));

    // The archer holds its ground; the recruit shadows the baker.
    world.set_config(archer, BehaviorConfig::new(BehaviorMode::Stand, 24.0));
    world.set_config(
        recruit,
        BehaviorConfig::new(BehaviorMode::Follow, BehaviorConfig::DEFAULT_DETECTION_RANGE)
            .with_follow_target(baker),
    );

    let mut raiders: Vec<Raider> = [
        Vec3::new(18.0, 0.0, 0.0),
        Vec3::new(-16.0, 0.0, 10.0),
        Vec3::new(5.0, 0.0, -20.0),
    ]
    .into_iter()
    .map(|at| Raider::new(world.spawn(EntityKind::Hostile, at)))
    .collect();

    // 2. Hand out the guard role.
    let mut sim = GuardSimBuilder::new().seed(SEED).build()?;
    let mut chronicle = Chronicle::default();
    sim.on_role_assigned(
        &mut world,
        knight,
        GuardSetup::melee().with_rank(rank(GuardRank::Knight, GuardPath::Melee)).with_home(post),
        &mut chronicle,
    )?;
    sim.on_role_assigned(
        &mut world,
        archer,
        GuardSetup::ranged()
            .with_rank(rank(GuardRank::Sharpshooter, GuardPath::Ranged))
            .with_home(Vec3::new(4.0, 0.0, 2.0)),
        &mut chronicle,
    )?;
    sim.on_role_assigned(&mut world, recruit, GuardSetup::default(), &mut chronicle)?;
    println!("Guards on duty: {}  |  Raiders: {}", sim.len(), raiders.len());

    // 3. Run.
    let t0 = Instant::now();
    let mut arrows_seen = 0;
    let mut ticks = 0;
    while ticks < MAX_TICKS && raiders.iter().any(|r| r.is_alive(&world)) {
        sim.run_ticks(1, &mut world, &mut chronicle);
        for raider in &mut raiders {
            raider.act(&mut world);
        }
        world.step();
        arrows_seen = resolve_arrows(&mut world, arrows_seen);
        ticks += 1;
    }
    let elapsed = t0.elapsed();

    // 4. Report.
    let standing = raiders.iter().filter(|r| r.is_alive(&world)).count();
    let guards_alive = sim
        .agents()
        .into_iter()
        .filter(|&g| world.get(g).is_some_and(|e| e.alive))
        .count();
    let dealt: f64 = raiders.iter().map(|r| world.log.damage_to(r.id)).sum();
    let healed: f64 = world.log.heals.iter().map(|h| h.1).sum();

    println!();
    println!("Finished after {ticks} ticks in {:.2?}", elapsed);
    println!("  Raiders standing:   {standing}/{}", raiders.len());
    println!("  Guards standing:    {guards_alive}/{}", sim.len());
    println!("  Damage to raiders:  {dealt:.1}");
    println!("  Arrows loosed:      {}", world.log.projectiles.len());
    println!("  Alerts raised:      {}", world.log.alerts.len());
    println!("  Health recovered:   {healed:.1}");
    println!(
        "  Guard updates:      {}  ({} starts, {} stops)",
        chronicle.updates, chronicle.starts, chronicle.stops
    );
    Ok(())
}
