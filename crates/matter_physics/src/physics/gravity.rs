//! All-pairs Newtonian gravity
//!
//! Sums the pairwise attraction of every participating body. Each unordered
//! pair `(i, j)` with `i < j` is visited once and contributes equal and
//! opposite forces.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Vec3, Vec3Ext};
use crate::physics::mass::Mass;

/// Which bodies exert and receive gravitational force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GravityPolicy {
    /// Only bodies with `affected_by_gravity` exert and receive gravity
    #[default]
    Mutual,
    /// Every body exerts gravity, only flagged bodies receive it
    AllExert,
}

impl GravityPolicy {
    fn exerts(self, body: &Mass) -> bool {
        match self {
            Self::Mutual => body.affected_by_gravity,
            Self::AllExert => true,
        }
    }

    fn receives(self, body: &Mass) -> bool {
        body.affected_by_gravity
    }
}

/// Compute the gravitational force on every body in `bodies`
///
/// `out[i]` is the total force on `bodies[i]`. Coincident or overflowing
/// pairs contribute nothing, and a total that overflows is reported as zero.
pub fn accumulate_gravity(bodies: &[&Mass], g: f64, policy: GravityPolicy) -> Vec<Vec3> {
    let n = bodies.len();
    let mut out = vec![Vec3::zeros(); n];

    for i in 0..n {
        let bi = bodies[i];
        for j in (i + 1)..n {
            let bj = bodies[j];

            let i_pulls_j = policy.exerts(bi) && policy.receives(bj);
            let j_pulls_i = policy.exerts(bj) && policy.receives(bi);
            if !i_pulls_j && !j_pulls_i {
                continue;
            }

            // Force on i from j; j feels the opposite
            let force = match bi.try_gravitational_force_to(bj, g) {
                Ok(force) => force,
                Err(err) => {
                    log::trace!("Skipping gravity pair ({i}, {j}): {err}");
                    continue;
                }
            };

            if j_pulls_i {
                out[i] += force;
            }
            if i_pulls_j {
                out[j] -= force;
            }
        }
    }

    for (i, force) in out.iter_mut().enumerate() {
        if !force.all_finite() {
            log::warn!("Dropping non-finite gravity total on body {i}: {force:?}");
            *force = Vec3::zeros();
        }
    }

    out
}
