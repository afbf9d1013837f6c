//! Contact resolution
//!
//! Pushes overlapping bodies apart along the contact normal and reflects
//! their approaching velocity. Static bodies behave as if infinitely heavy.

use serde::{Deserialize, Serialize};

use crate::physics::collision::Contact;
use crate::physics::mass::Mass;

/// How detected collisions are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Report only; bodies pass through each other
    #[default]
    None,
    /// Separate overlapping bodies and bounce them off each other
    Separate,
}

/// Contact resolution settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Resolution strategy
    pub mode: ResolutionMode,
    /// Fraction of approach speed kept after a bounce, in `[0, 1]`
    pub restitution: f64,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            mode: ResolutionMode::None,
            restitution: 0.5,
        }
    }
}

/// One side of a contact
pub struct Body<'a> {
    /// Physical state to correct
    pub mass: &'a mut Mass,
    /// Static bodies are never moved
    pub is_static: bool,
}

impl Body<'_> {
    fn inverse_mass(&self) -> f64 {
        if self.is_static {
            0.0
        } else {
            self.mass.mass().recip()
        }
    }
}

/// Resolve one contact between `a` and `b`
///
/// `contact.normal` must point from `a` to `b`. Returns `false` when both
/// bodies are static and nothing was changed.
pub fn resolve_contact(a: Body<'_>, b: Body<'_>, contact: &Contact, restitution: f64) -> bool {
    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return false;
    }

    // Positional correction split by inverse mass
    let correction = contact.normal * (contact.depth / inv_sum);
    a.mass.position -= correction * inv_a;
    b.mass.position += correction * inv_b;

    // Only bounce if the bodies are approaching along the normal
    let relative_velocity = b.mass.velocity - a.mass.velocity;
    let approach_speed = relative_velocity.dot(&contact.normal);
    if approach_speed < 0.0 {
        let restitution = restitution.clamp(0.0, 1.0);
        let impulse = -(1.0 + restitution) * approach_speed / inv_sum;
        let impulse = contact.normal * impulse;

        a.mass.velocity -= impulse * inv_a;
        b.mass.velocity += impulse * inv_b;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    fn contact_x(depth: f64) -> Contact {
        Contact {
            normal: Vec3::x(),
            depth,
        }
    }

    #[test]
    fn test_equal_masses_split_correction() {
        let mut a = Mass::new(1.0, Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let mut b = Mass::new(1.0, Vec3::new(1.5, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)).unwrap();

        let resolved = resolve_contact(
            Body { mass: &mut a, is_static: false },
            Body { mass: &mut b, is_static: false },
            &contact_x(0.5),
            1.0,
        );

        assert!(resolved);
        assert_relative_eq!(a.position, Vec3::new(-0.25, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(b.position, Vec3::new(1.75, 0.0, 0.0), epsilon = 1e-12);
        // Perfectly elastic head-on: velocities swap
        assert_relative_eq!(a.velocity, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(b.velocity, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_static_body_does_not_move() {
        let mut wall = Mass::new(1.0, Vec3::zeros(), Vec3::zeros()).unwrap();
        let mut ball = Mass::new(2.0, Vec3::new(0.8, 0.0, 0.0), Vec3::new(-3.0, 0.0, 0.0)).unwrap();

        resolve_contact(
            Body { mass: &mut wall, is_static: true },
            Body { mass: &mut ball, is_static: false },
            &contact_x(0.2),
            0.0,
        );

        assert_eq!(wall.position, Vec3::zeros());
        assert_eq!(wall.velocity, Vec3::zeros());
        assert_relative_eq!(ball.position, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        // Fully inelastic: normal velocity removed
        assert_relative_eq!(ball.velocity, Vec3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn test_separating_bodies_keep_velocity() {
        let mut a = Mass::new(1.0, Vec3::zeros(), Vec3::new(-1.0, 0.0, 0.0)).unwrap();
        let mut b = Mass::new(1.0, Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)).unwrap();

        resolve_contact(
            Body { mass: &mut a, is_static: false },
            Body { mass: &mut b, is_static: false },
            &contact_x(0.1),
            1.0,
        );

        assert_eq!(a.velocity, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.velocity, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_two_static_bodies_are_left_alone() {
        let mut a = Mass::new(1.0, Vec3::zeros(), Vec3::zeros()).unwrap();
        let mut b = Mass::new(1.0, Vec3::new(0.5, 0.0, 0.0), Vec3::zeros()).unwrap();

        let resolved = resolve_contact(
            Body { mass: &mut a, is_static: true },
            Body { mass: &mut b, is_static: true },
            &contact_x(1.5),
            1.0,
        );

        assert!(!resolved);
        assert_eq!(b.position, Vec3::new(0.5, 0.0, 0.0));
    }
}
