//! Contact generation for overlapping shapes
//!
//! Where [`CollisionHandler`](super::CollisionHandler) only answers "do they
//! overlap", this computes how: the separating direction and how deep the
//! overlap goes. Resolution uses it to push bodies apart.

use crate::foundation::math::{Vec3, Vec3Ext};
use super::shape::{Circle, CollisionBox, Rectangle};

/// Overlap between two shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal in the XY plane, pointing from the first shape to the second
    pub normal: Vec3,
    /// Penetration depth along `normal` (zero when just touching)
    pub depth: f64,
}

impl Contact {
    fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            depth: self.depth,
        }
    }
}

fn sign(value: f64) -> f64 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// Compute the contact between shape `a` at `pos_a` and shape `b` at `pos_b`
///
/// Returns `None` when the shapes do not overlap. Coincident centers fall back
/// to a +X normal.
pub fn contact_between(
    pos_a: Vec3,
    a: &CollisionBox,
    pos_b: Vec3,
    b: &CollisionBox,
) -> Option<Contact> {
    match (a, b) {
        (CollisionBox::Rectangle(ra), CollisionBox::Rectangle(rb)) => {
            rectangle_rectangle(pos_a, ra, pos_b, rb)
        }
        (CollisionBox::Rectangle(rect), CollisionBox::Circle(circle)) => {
            rectangle_circle(pos_a, rect, pos_b, circle)
        }
        (CollisionBox::Circle(circle), CollisionBox::Rectangle(rect)) => {
            rectangle_circle(pos_b, rect, pos_a, circle).map(Contact::flipped)
        }
        (CollisionBox::Circle(ca), CollisionBox::Circle(cb)) => {
            circle_circle(pos_a, ca, pos_b, cb)
        }
    }
}

fn rectangle_rectangle(pos_a: Vec3, a: &Rectangle, pos_b: Vec3, b: &Rectangle) -> Option<Contact> {
    let (hw_a, hh_a) = a.half_extents();
    let (hw_b, hh_b) = b.half_extents();
    let delta = (pos_b - pos_a).planar();

    let overlap_x = hw_a + hw_b - delta.x.abs();
    let overlap_y = hh_a + hh_b - delta.y.abs();
    if overlap_x < 0.0 || overlap_y < 0.0 {
        return None;
    }

    // Separate along the axis of least penetration
    Some(if overlap_x <= overlap_y {
        Contact {
            normal: Vec3::new(sign(delta.x), 0.0, 0.0),
            depth: overlap_x,
        }
    } else {
        Contact {
            normal: Vec3::new(0.0, sign(delta.y), 0.0),
            depth: overlap_y,
        }
    })
}

fn rectangle_circle(rect_pos: Vec3, rect: &Rectangle, circ_pos: Vec3, circ: &Circle) -> Option<Contact> {
    let rect_center = rect_pos.planar();
    let center = circ_pos.planar();
    let closest = rect.clamp_point(rect_center, center);
    let r = circ.radius();

    let diff = center - closest;
    let distance_squared = diff.magnitude_squared();
    if distance_squared > r * r {
        return None;
    }

    if distance_squared > 0.0 {
        let distance = distance_squared.sqrt();
        return Some(Contact {
            normal: diff / distance,
            depth: r - distance,
        });
    }

    // Circle center is inside the rectangle: exit through the nearest face
    let (hw, hh) = rect.half_extents();
    let delta = center - rect_center;
    let to_face_x = hw - delta.x.abs();
    let to_face_y = hh - delta.y.abs();

    Some(if to_face_x <= to_face_y {
        Contact {
            normal: Vec3::new(sign(delta.x), 0.0, 0.0),
            depth: to_face_x + r,
        }
    } else {
        Contact {
            normal: Vec3::new(0.0, sign(delta.y), 0.0),
            depth: to_face_y + r,
        }
    })
}

fn circle_circle(pos_a: Vec3, a: &Circle, pos_b: Vec3, b: &Circle) -> Option<Contact> {
    let delta = (pos_b - pos_a).planar();
    let radius_sum = a.radius() + b.radius();
    let distance_squared = delta.magnitude_squared();
    if distance_squared > radius_sum * radius_sum {
        return None;
    }

    let distance = distance_squared.sqrt();
    let normal = if distance > f64::EPSILON {
        delta / distance
    } else {
        Vec3::x()
    };

    Some(Contact {
        normal,
        depth: radius_sum - distance,
    })
}
