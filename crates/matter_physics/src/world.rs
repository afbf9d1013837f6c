//! Universe: the owning store of [`Matter`] and the tick driver
//!
//! Bodies are addressed by generational [`MatterId`] handles, so a stale id
//! from a despawned body can never alias a newer one.
//!
//! One [`Universe::tick`] runs these phases in order:
//! 1. accumulate gravity into every receiving body
//! 2. integrate every body not flagged `ignore_forces`
//! 3. clamp speeds if a limit is configured
//! 4. detect collisions (broad phase + narrow phase)
//! 5. resolve contacts if enabled
//! 6. forward each attached graphic's position to the render sink
//!
//! Integration is the only writer of positions and finishes for every body
//! before any collision test reads them.

use std::collections::BTreeSet;

use slotmap::{new_key_type, SlotMap};

use crate::config::{Config, ConfigError, PhysicsConfig};
use crate::foundation::math::{Vec3, Vec3Ext};
use crate::foundation::time::FixedTimestep;
use crate::graphic::RenderSink;
use crate::matter::Matter;
use crate::physics::error::check_time_step;
use crate::physics::resolution::Body;
use crate::physics::{
    accumulate_gravity,
    contact_between,
    resolve_contact,
    Collider,
    CollisionPair,
    CollisionSystem,
    Mass,
    PhysicsError,
    ResolutionMode,
};

new_key_type! {
    /// Handle to a [`Matter`] owned by a [`Universe`]
    pub struct MatterId;
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Every pair overlapping after integration
    pub collisions: BTreeSet<CollisionPair>,
    /// Pairs that started overlapping this tick
    pub entered: Vec<CollisionPair>,
    /// Pairs that stopped overlapping this tick
    pub exited: Vec<CollisionPair>,
    /// Pairs whose overlap was corrected
    pub resolved: usize,
}

/// A collection of simulated bodies advanced together
pub struct Universe {
    config: PhysicsConfig,
    matter: SlotMap<MatterId, Matter>,
    collisions: CollisionSystem,
    timestep: FixedTimestep,
    elapsed: f64,
    ticks: u64,
}

impl Universe {
    /// Create an empty universe
    ///
    /// The configuration is validated first, whether it came from a file or
    /// was built in code.
    pub fn new(config: PhysicsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let timestep = FixedTimestep::new(config.fixed_timestep, config.max_substeps)
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;

        Ok(Self {
            config,
            matter: SlotMap::with_key(),
            collisions: CollisionSystem::new(),
            timestep,
            elapsed: 0.0,
            ticks: 0,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Add a body and return its handle
    pub fn spawn(&mut self, matter: Matter) -> MatterId {
        let id = self.matter.insert(matter);
        log::debug!("Spawned matter {id:?}");
        id
    }

    /// Remove a body, returning it if it existed
    pub fn despawn(&mut self, id: MatterId) -> Option<Matter> {
        let removed = self.matter.remove(id);
        if removed.is_some() {
            self.collisions.forget(id);
            log::debug!("Despawned matter {id:?}");
        }
        removed
    }

    /// Borrow a body
    pub fn get(&self, id: MatterId) -> Option<&Matter> {
        self.matter.get(id)
    }

    /// Mutably borrow a body
    pub fn get_mut(&mut self, id: MatterId) -> Option<&mut Matter> {
        self.matter.get_mut(id)
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.matter.len()
    }

    /// True when there are no bodies
    pub fn is_empty(&self) -> bool {
        self.matter.is_empty()
    }

    /// Iterate over all bodies
    pub fn iter(&self) -> impl Iterator<Item = (MatterId, &Matter)> {
        self.matter.iter()
    }

    /// Simulated seconds elapsed
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Accumulate a force on a body for the next tick
    pub fn apply_force(&mut self, id: MatterId, force: Vec3) -> Result<(), PhysicsError> {
        self.matter
            .get_mut(id)
            .ok_or(PhysicsError::UnknownMatter(id))?
            .mass
            .apply_force(force)
    }

    /// Bodies whose shape contains `point`
    pub fn matter_at(&self, point: Vec3) -> Vec<MatterId> {
        self.matter
            .iter()
            .filter(|(_, matter)| matter.is_at(point))
            .map(|(id, _)| id)
            .collect()
    }

    /// Advance every body by `dt` seconds
    pub fn tick<S: RenderSink>(&mut self, dt: f64, sink: &mut S) -> Result<TickReport, PhysicsError> {
        check_time_step(dt)?;

        self.apply_gravity()?;
        self.integrate(dt)?;

        let mut report = self.detect();
        if self.config.resolution.mode == ResolutionMode::Separate {
            report.resolved = self.resolve(&report.collisions);
        }

        self.forward_poses(sink);

        self.elapsed += dt;
        self.ticks += 1;
        log::debug!(
            "Tick {} (dt = {dt}): {} collisions, {} entered, {} exited",
            self.ticks,
            report.collisions.len(),
            report.entered.len(),
            report.exited.len()
        );

        Ok(report)
    }

    /// Bank `frame_time` and run as many fixed-length ticks as it covers
    ///
    /// Returns one report per tick run, possibly none.
    pub fn step_fixed<S: RenderSink>(
        &mut self,
        frame_time: f64,
        sink: &mut S,
    ) -> Result<Vec<TickReport>, PhysicsError> {
        let ticks = self.timestep.advance(frame_time);
        let dt = self.timestep.step();
        (0..ticks).map(|_| self.tick(dt, sink)).collect()
    }

    fn apply_gravity(&mut self) -> Result<(), PhysicsError> {
        if self.config.gravitational_constant == 0.0 {
            return Ok(());
        }

        let (ids, bodies): (Vec<MatterId>, Vec<&Mass>) =
            self.matter.iter().map(|(id, matter)| (id, &matter.mass)).unzip();
        let forces = accumulate_gravity(
            &bodies,
            self.config.gravitational_constant,
            self.config.gravity_policy,
        );

        // All or nothing: a rejected force must not leave others applied
        if let Some(bad) = forces.iter().find(|force| !force.all_finite()) {
            return Err(PhysicsError::DegenerateInput(format!(
                "non-finite gravity force {bad:?}"
            )));
        }

        for (id, force) in ids.into_iter().zip(forces) {
            if force != Vec3::zeros() {
                self.apply_force(id, force)?;
            }
        }
        Ok(())
    }

    fn integrate(&mut self, dt: f64) -> Result<(), PhysicsError> {
        let speed_limit = self.config.speed_limit;
        for matter in self.matter.values_mut() {
            matter.step(dt)?;
            if let (Some(limit), false) = (speed_limit, matter.ignore_forces) {
                matter.mass.clamp_speed(limit);
            }
        }
        Ok(())
    }

    fn detect(&mut self) -> TickReport {
        let colliders: Vec<Collider<'_>> = self
            .matter
            .iter()
            .map(|(id, matter)| Collider {
                id,
                position: matter.position(),
                shape: &matter.collision_box,
                layer: matter.layer,
                mask: matter.mask,
            })
            .collect();

        let collisions = self.collisions.detect(&colliders).clone();
        TickReport {
            collisions,
            entered: self.collisions.entered(),
            exited: self.collisions.exited(),
            resolved: 0,
        }
    }

    fn resolve(&mut self, pairs: &BTreeSet<CollisionPair>) -> usize {
        let restitution = self.config.resolution.restitution;
        let mut resolved = 0;

        for pair in pairs {
            let Some([a, b]) = self.matter.get_disjoint_mut([pair.matter_a, pair.matter_b]) else {
                continue;
            };
            if a.is_trigger() || b.is_trigger() {
                continue;
            }

            let Some(contact) =
                contact_between(a.position(), &a.collision_box, b.position(), &b.collision_box)
            else {
                continue;
            };

            let (a_static, b_static) = (a.ignore_forces, b.ignore_forces);
            if resolve_contact(
                Body { mass: &mut a.mass, is_static: a_static },
                Body { mass: &mut b.mass, is_static: b_static },
                &contact,
                restitution,
            ) {
                log::trace!("Resolved {pair:?} (depth {:.4})", contact.depth);
                resolved += 1;
            }
        }

        resolved
    }

    fn forward_poses<S: RenderSink>(&self, sink: &mut S) {
        for matter in self.matter.values() {
            if let Some(graphic) = matter.graphic {
                sink.update_pose(graphic, matter.position());
            }
        }
    }
}
