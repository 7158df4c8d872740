//! Transient obstacle population management.
//!
//! Obstacles are spawned with a fixed per-tick probability, drift linearly
//! under their own sampled velocity, and retire when their tick lifetime
//! runs out. They never interact with each other and are never removed for
//! leaving the visible region.

use rand::Rng;
use rand::rngs::StdRng;

use crate::simulation::kinematics::Aabb;
use crate::simulation::types::{ObstacleTuple, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Per-tick probability of attempting a spawn.
pub const SPAWN_CHANCE: f64 = 5e-3;
/// Uniform radius range for new obstacles, in world units.
const RADIUS_MIN: u32 = 10;
const RADIUS_MAX: u32 = 20;
/// Uniform lifetime range for new obstacles, in ticks.
const LIFETIME_MIN: u32 = 4000;
const LIFETIME_MAX: u32 = 5000;
/// Per-axis speed bound for the sampled obstacle velocity.
const OBSTACLE_SPEED_LIMIT: f64 = 1.0;
/// Placement attempts before a colliding spawn is skipped for the tick.
/// Collision probability is tiny at the reference geometry, so the cap is
/// unobservable in practice but keeps pathological configurations from
/// hanging the loop.
const MAX_SPAWN_ATTEMPTS: u32 = 16;

/// A single drifting obstacle.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub radius: u32,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Remaining ticks before retirement; strictly positive while live.
    pub lifetime: u32,
}

impl Obstacle {
    /// Draw a candidate obstacle. All sampling goes through the passed RNG
    /// so a fixed seed reproduces the exact population.
    fn sample(rng: &mut StdRng) -> Self {
        Self {
            radius: rng.gen_range(RADIUS_MIN..RADIUS_MAX),
            x: rng.gen_range(0.0..SCREEN_WIDTH),
            y: rng.gen_range(0.0..SCREEN_HEIGHT),
            vx: rng.gen_range(-OBSTACLE_SPEED_LIMIT..=OBSTACLE_SPEED_LIMIT),
            vy: rng.gen_range(-OBSTACLE_SPEED_LIMIT..=OBSTACLE_SPEED_LIMIT),
            lifetime: rng.gen_range(LIFETIME_MIN..LIFETIME_MAX),
        }
    }

    /// The obstacle's coarse square footprint (side 2r).
    pub fn footprint(&self) -> Aabb {
        let side = 2.0 * self.radius as f64;
        Aabb::centered(self.x, self.y, side, side)
    }

    fn integrate(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
    }

    fn as_tuple(&self) -> ObstacleTuple {
        (self.radius, self.x, self.y, self.vx, self.vy)
    }
}

/// The live obstacle set, bounded by the configured maximum.
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    max_obstacles: usize,
}

impl ObstacleField {
    pub fn new(max_obstacles: usize) -> Self {
        Self {
            obstacles: Vec::with_capacity(max_obstacles),
            max_obstacles,
        }
    }

    /// Advance the population one tick: integrate every obstacle, retire
    /// the expired ones, then roll the spawn check. Retirement runs before
    /// the spawn check so a freed slot is usable the same tick.
    pub fn step(&mut self, boat_footprint: &Aabb, rng: &mut StdRng) {
        for obstacle in &mut self.obstacles {
            obstacle.integrate();
            obstacle.lifetime -= 1;
        }
        self.obstacles.retain(|obstacle| obstacle.lifetime > 0);

        // The spawn roll is drawn every tick, even at capacity, so the RNG
        // stream does not depend on the population size.
        let roll = rng.gen_range(0.0..1.0);
        if roll < SPAWN_CHANCE && self.obstacles.len() < self.max_obstacles {
            self.spawn(boat_footprint, rng);
        }
    }

    /// Rejection-sample a spawn position that does not collide with the
    /// boat's footprint, up to the attempt cap.
    fn spawn(&mut self, boat_footprint: &Aabb, rng: &mut StdRng) {
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let candidate = Obstacle::sample(rng);
            if !candidate.footprint().overlaps(boat_footprint) {
                self.obstacles.push(candidate);
                return;
            }
        }
        log::warn!("obstacle spawn skipped after {MAX_SPAWN_ATTEMPTS} colliding placements");
    }

    /// Drop the entire population.
    pub fn reset(&mut self) {
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Render the population as the plain tuples carried in snapshots.
    pub fn tuples(&self) -> Vec<ObstacleTuple> {
        self.obstacles.iter().map(Obstacle::as_tuple).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::kinematics::BoatState;
    use rand::SeedableRng;

    fn boat_aabb() -> Aabb {
        BoatState::reset_pose().footprint()
    }

    #[test]
    fn population_never_exceeds_maximum() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = ObstacleField::new(10);
        let boat = boat_aabb();
        for _ in 0..20_000 {
            field.step(&boat, &mut rng);
            assert!(field.len() <= 10);
        }
        // At p = 5e-3 over 20k ticks the cap is essentially always reached.
        assert_eq!(field.len(), 10);
    }

    #[test]
    fn lifetimes_decrease_by_exactly_one_per_tick() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut field = ObstacleField::new(5);
        let boat = boat_aabb();

        // Step until something spawns.
        while field.is_empty() {
            field.step(&boat, &mut rng);
        }
        let mut expected = field.as_slice()[0].lifetime;

        while expected > 1 {
            field.step(&boat, &mut rng);
            expected -= 1;
            let first = &field.as_slice()[0];
            assert_eq!(first.lifetime, expected);
            assert!(first.lifetime > 0);
        }

    }

    #[test]
    fn expired_obstacles_are_removed_on_the_zero_tick() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ObstacleField::new(1);
        let boat = boat_aabb();
        while field.is_empty() {
            field.step(&boat, &mut rng);
        }
        let lifetime = field.as_slice()[0].lifetime;

        // One tick before expiry the obstacle is still live.
        for _ in 0..lifetime - 1 {
            field.step(&boat, &mut rng);
        }
        assert_eq!(field.len(), 1);
        assert_eq!(field.as_slice()[0].lifetime, 1);

        // The expiry tick removes it; anything still present can only be a
        // fresh spawn carrying a full lifetime.
        field.step(&boat, &mut rng);
        assert!(field.as_slice().iter().all(|o| o.lifetime >= 1000));
    }

    #[test]
    fn spawned_obstacles_never_overlap_the_boat() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut field = ObstacleField::new(50);
        let boat = boat_aabb();
        for _ in 0..50_000 {
            field.step(&boat, &mut rng);
        }
        // Check at spawn time is what matters; re-run sampling directly.
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10_000 {
            let mut probe = ObstacleField::new(1);
            probe.spawn(&boat, &mut rng);
            if let Some(obstacle) = probe.as_slice().first() {
                assert!(!obstacle.footprint().overlaps(&boat));
            }
        }
    }

    #[test]
    fn obstacles_drift_linearly() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = ObstacleField::new(1);
        let boat = boat_aabb();
        while field.is_empty() {
            field.step(&boat, &mut rng);
        }
        let start = field.as_slice()[0].clone();
        field.step(&boat, &mut rng);
        let moved = &field.as_slice()[0];
        assert!((moved.x - (start.x + start.vx)).abs() < 1e-12);
        assert!((moved.y - (start.y + start.vy)).abs() < 1e-12);
        assert_eq!(moved.vx, start.vx);
        assert_eq!(moved.vy, start.vy);
    }

    #[test]
    fn reset_clears_everything() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut field = ObstacleField::new(10);
        let boat = boat_aabb();
        for _ in 0..10_000 {
            field.step(&boat, &mut rng);
        }
        assert!(!field.is_empty());
        field.reset();
        assert!(field.is_empty());
    }
}
