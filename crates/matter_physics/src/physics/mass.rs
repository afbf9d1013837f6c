//! Point mass state and explicit Euler integration
//!
//! A [`Mass`] is the physical record of one body: its mass, position,
//! velocity and the forces acting on it. Forces follow an accumulator
//! contract: [`Mass::apply_force`] adds into a transient accumulator and
//! [`Mass::step`] turns the total force into a velocity change via F = ma,
//! integrates position, then clears the accumulator.

use crate::foundation::math::{Vec3, Vec3Ext};
use crate::physics::error::{check_time_step, PhysicsError};

/// Separations below this are treated as coincident for gravity
const MIN_SEPARATION_SQUARED: f64 = f64::EPSILON;

/// Physical state of one simulated body
#[derive(Debug, Clone, PartialEq)]
pub struct Mass {
    mass: f64,

    /// Position in world units
    pub position: Vec3,

    /// Velocity in world units per second
    pub velocity: Vec3,

    /// Constant force applied every step (e.g. an engine)
    pub force_base: Vec3,

    /// Force accumulated this tick, cleared after each step
    force_applied: Vec3,

    /// Whether this body takes part in gravitational attraction
    pub affected_by_gravity: bool,
}

impl Mass {
    /// Create a new mass at rest with no applied forces
    ///
    /// Fails with [`PhysicsError::InvalidMass`] unless `mass` is positive and
    /// finite.
    pub fn new(mass: f64, position: Vec3, velocity: Vec3) -> Result<Self, PhysicsError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidMass(mass));
        }

        Ok(Self {
            mass,
            position,
            velocity,
            force_base: Vec3::zeros(),
            force_applied: Vec3::zeros(),
            affected_by_gravity: true,
        })
    }

    /// Set the constant base force
    pub fn with_base_force(mut self, force: Vec3) -> Self {
        self.force_base = force;
        self
    }

    /// Opt in or out of gravitational attraction
    pub fn with_gravity(mut self, affected: bool) -> Self {
        self.affected_by_gravity = affected;
        self
    }

    /// The body's mass
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Force accumulated since the last step
    pub fn force_applied(&self) -> Vec3 {
        self.force_applied
    }

    /// Total force that the next step will integrate
    pub fn net_force(&self) -> Vec3 {
        self.force_base + self.force_applied
    }

    /// Accumulate a force for the next step
    pub fn apply_force(&mut self, force: Vec3) -> Result<(), PhysicsError> {
        if !force.all_finite() {
            return Err(PhysicsError::DegenerateInput(format!(
                "non-finite force {force:?}"
            )));
        }
        self.force_applied += force;
        Ok(())
    }

    /// Drop any accumulated force without integrating it
    pub fn clear_forces(&mut self) {
        self.force_applied = Vec3::zeros();
    }

    /// Advance by `dt` seconds
    ///
    /// Velocity is updated from the net force first, then position from the
    /// new velocity. The applied force accumulator is cleared afterwards.
    pub fn step(&mut self, dt: f64) -> Result<(), PhysicsError> {
        check_time_step(dt)?;

        let acceleration = self.net_force() / self.mass;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
        self.clear_forces();

        Ok(())
    }

    /// Newtonian attraction on `self` from `other`
    ///
    /// Magnitude is `g * m1 * m2 / d²`, pointing from `self` toward `other`.
    /// Coincident positions, or a magnitude too large for `f64`, yield the
    /// zero vector.
    pub fn gravitational_force_to(&self, other: &Mass, g: f64) -> Vec3 {
        self.try_gravitational_force_to(other, g)
            .unwrap_or_else(|_| Vec3::zeros())
    }

    /// Like [`Mass::gravitational_force_to`], but coincident positions and
    /// overflowing magnitudes are an error instead of zero force
    pub fn try_gravitational_force_to(&self, other: &Mass, g: f64) -> Result<Vec3, PhysicsError> {
        let r = other.position - self.position;
        let d2 = r.magnitude_squared();

        if d2 < MIN_SEPARATION_SQUARED || !d2.is_finite() {
            return Err(PhysicsError::DegenerateInput(format!(
                "gravity between coincident positions {:?}",
                self.position
            )));
        }

        // g * m1 * m2 / d² along r / |r|
        let coef = g * self.mass * other.mass / (d2 * d2.sqrt());
        let force = r * coef;
        if !coef.is_finite() || !force.all_finite() {
            return Err(PhysicsError::DegenerateInput(format!(
                "gravity between {:?} and {:?} overflows",
                self.position, other.position
            )));
        }
        Ok(force)
    }

    /// Kinetic energy ½mv²
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    /// Linear momentum mv
    pub fn momentum(&self) -> Vec3 {
        self.velocity * self.mass
    }

    /// Cap the speed at `limit`, keeping direction
    pub fn clamp_speed(&mut self, limit: f64) {
        let speed = self.velocity.magnitude();
        if speed > limit {
            self.velocity = self.velocity.normalized_or_zero() * limit;
        }
    }
}
