//! Core collision detection system
//!
//! Detection is split into two phases:
//! - **broad phase**: every unordered pair is filtered by collision layers,
//!   then by a cheap bounding-circle distance check
//! - **narrow phase**: surviving pairs get the exact shape-vs-shape test
//!
//! The system keeps the previous tick's pairs so callers can tell which
//! collisions started or ended this tick.

use std::collections::BTreeSet;

use crate::foundation::math::{Vec3, Vec3Ext};
use crate::physics::collision::CollisionBox;
use crate::physics::collision_layers::CollisionLayers;
use crate::world::MatterId;

/// Collision pair representing two bodies that are colliding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    /// The body with the smaller id
    pub matter_a: MatterId,
    /// The body with the larger id
    pub matter_b: MatterId,
}

impl CollisionPair {
    /// Create a new collision pair (always stores the smaller id first)
    pub fn new(matter_a: MatterId, matter_b: MatterId) -> Self {
        if matter_a <= matter_b {
            Self { matter_a, matter_b }
        } else {
            Self { matter_a: matter_b, matter_b: matter_a }
        }
    }

    /// True when `id` is one side of this pair
    pub fn involves(&self, id: MatterId) -> bool {
        self.matter_a == id || self.matter_b == id
    }

    /// The other side of the pair, if `id` is one side
    pub fn other(&self, id: MatterId) -> Option<MatterId> {
        if self.matter_a == id {
            Some(self.matter_b)
        } else if self.matter_b == id {
            Some(self.matter_a)
        } else {
            None
        }
    }
}

/// Read-only view of one collider for a detection pass
#[derive(Debug, Clone, Copy)]
pub struct Collider<'a> {
    /// Owning body
    pub id: MatterId,
    /// Owning body's current position
    pub position: Vec3,
    /// The collision shape
    pub shape: &'a CollisionBox,
    /// Layers this collider is on
    pub layer: CollisionLayers,
    /// Layers this collider collides with
    pub mask: CollisionLayers,
}

/// Counters from the last detection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionStats {
    /// Pairs considered before any filtering
    pub candidate_pairs: usize,
    /// Pairs that reached the narrow phase
    pub narrow_phase_tests: usize,
    /// Pairs found colliding
    pub collisions: usize,
}

/// Collision detection over all registered pairs
#[derive(Debug, Default)]
pub struct CollisionSystem {
    /// Collision pairs from the current tick
    current_pairs: BTreeSet<CollisionPair>,

    /// Collision pairs from the previous tick
    previous_pairs: BTreeSet<CollisionPair>,

    stats: DetectionStats,
}

impl CollisionSystem {
    /// Create an empty collision system
    pub fn new() -> Self {
        Self::default()
    }

    /// Perform collision detection (broad phase + narrow phase)
    /// Returns the collision pairs for this tick
    pub fn detect(&mut self, colliders: &[Collider<'_>]) -> &BTreeSet<CollisionPair> {
        std::mem::swap(&mut self.current_pairs, &mut self.previous_pairs);
        self.current_pairs.clear();

        let candidates = self.broad_phase(colliders);
        self.narrow_phase(colliders, &candidates);

        self.stats.collisions = self.current_pairs.len();
        log::trace!(
            "Collision pass: {} candidates, {} narrow tests, {} collisions",
            self.stats.candidate_pairs,
            self.stats.narrow_phase_tests,
            self.stats.collisions
        );

        &self.current_pairs
    }

    /// Broad phase: indices of pairs that pass layer and bounding-circle checks
    fn broad_phase(&mut self, colliders: &[Collider<'_>]) -> Vec<(usize, usize)> {
        let n = colliders.len();
        self.stats.candidate_pairs = n * n.saturating_sub(1) / 2;

        let mut potential = Vec::new();
        for i in 0..n {
            let a = &colliders[i];
            for (j, b) in colliders.iter().enumerate().skip(i + 1) {
                if !CollisionLayers::should_collide(a.layer, a.mask, b.layer, b.mask) {
                    continue;
                }

                let reach = a.shape.bounding_radius() + b.shape.bounding_radius();
                let distance_squared = (a.position - b.position).planar().magnitude_squared();
                if distance_squared > reach * reach {
                    continue;
                }

                potential.push((i, j));
            }
        }

        self.stats.narrow_phase_tests = potential.len();
        potential
    }

    /// Narrow phase: exact shape intersection tests
    fn narrow_phase(&mut self, colliders: &[Collider<'_>], candidates: &[(usize, usize)]) {
        for &(i, j) in candidates {
            let a = &colliders[i];
            let b = &colliders[j];

            if a.shape.collision_with(a.position, b.position, b.shape) {
                self.current_pairs.insert(CollisionPair::new(a.id, b.id));
            }
        }
    }

    /// Pairs that started colliding this tick
    pub fn entered(&self) -> Vec<CollisionPair> {
        self.current_pairs
            .difference(&self.previous_pairs)
            .copied()
            .collect()
    }

    /// Pairs that stopped colliding this tick
    pub fn exited(&self) -> Vec<CollisionPair> {
        self.previous_pairs
            .difference(&self.current_pairs)
            .copied()
            .collect()
    }

    /// All current collision pairs
    pub fn current(&self) -> &BTreeSet<CollisionPair> {
        &self.current_pairs
    }

    /// Counters from the last pass
    pub fn stats(&self) -> DetectionStats {
        self.stats
    }

    /// Forget any pair involving `id` (used when a body is removed)
    pub fn forget(&mut self, id: MatterId) {
        self.current_pairs.retain(|pair| !pair.involves(id));
        self.previous_pairs.retain(|pair| !pair.involves(id));
    }

    /// Clear all collision data
    pub fn clear(&mut self) {
        self.current_pairs.clear();
        self.previous_pairs.clear();
        self.stats = DetectionStats::default();
    }
}
