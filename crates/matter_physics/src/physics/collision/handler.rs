//! Pairwise narrow-phase tests
//!
//! One function per unordered shape pair. [`CollisionBox::collision_with`]
//! picks the right one by matching on both variants.
//!
//! [`CollisionBox::collision_with`]: super::CollisionBox::collision_with

use crate::foundation::math::{Vec3, Vec3Ext};
use super::shape::{Circle, Rectangle};

/// Narrow-phase overlap tests between shape pairs
///
/// All tests are inclusive: shapes that exactly touch collide. Distances are
/// compared squared so the result is the same on every call.
pub struct CollisionHandler;

impl CollisionHandler {
    /// AABB overlap: centers closer than the summed half extents on both axes
    pub fn rectangle_rectangle(
        rect1_pos: Vec3,
        rect1: &Rectangle,
        rect2_pos: Vec3,
        rect2: &Rectangle,
    ) -> bool {
        let (hw1, hh1) = rect1.half_extents();
        let (hw2, hh2) = rect2.half_extents();

        (rect1_pos.x - rect2_pos.x).abs() <= hw1 + hw2
            && (rect1_pos.y - rect2_pos.y).abs() <= hh1 + hh2
    }

    /// Clamp the circle center onto the rectangle and compare against the radius
    pub fn rectangle_circle(
        rect_pos: Vec3,
        rect: &Rectangle,
        circ_pos: Vec3,
        circ: &Circle,
    ) -> bool {
        let center = circ_pos.planar();
        let closest = rect.clamp_point(rect_pos.planar(), center);
        let r = circ.radius();

        (center - closest).magnitude_squared() <= r * r
    }

    /// Center distance against the summed radii
    pub fn circle_circle(
        circ1_pos: Vec3,
        circ1: &Circle,
        circ2_pos: Vec3,
        circ2: &Circle,
    ) -> bool {
        let distance_squared = (circ1_pos - circ2_pos).planar().magnitude_squared();
        let radius_sum = circ1.radius() + circ2.radius();

        distance_squared <= radius_sum * radius_sum
    }
}
