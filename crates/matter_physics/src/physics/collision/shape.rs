//! Collision shapes
//!
//! Shapes carry only their geometry. The owning body's position is passed in
//! at test time, so whatever the integrator wrote last is what collision
//! tests see. All geometry lives in the XY plane; z is ignored.

use crate::foundation::math::{Vec3, Vec3Ext};
use crate::physics::error::PhysicsError;
use super::handler::CollisionHandler;

fn check_dimension(name: &str, value: f64) -> Result<f64, PhysicsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidGeometry(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

/// Axis-aligned rectangle centered on its owner's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    width: f64,
    height: f64,
}

impl Rectangle {
    /// Creates a rectangle, rejecting non-positive dimensions
    pub fn new(width: f64, height: f64) -> Result<Self, PhysicsError> {
        Ok(Self {
            width: check_dimension("rectangle width", width)?,
            height: check_dimension("rectangle height", height)?,
        })
    }

    /// Extent along X
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Extent along Y
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Half width and half height
    pub fn half_extents(&self) -> (f64, f64) {
        (self.width * 0.5, self.height * 0.5)
    }

    /// Closest point of the rectangle (centered at `center`) to `point`
    pub fn clamp_point(&self, center: Vec3, point: Vec3) -> Vec3 {
        let (hw, hh) = self.half_extents();
        Vec3::new(
            point.x.clamp(center.x - hw, center.x + hw),
            point.y.clamp(center.y - hh, center.y + hh),
            0.0,
        )
    }
}

/// Circle centered on its owner's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    /// Creates a circle, rejecting a non-positive radius
    pub fn new(radius: f64) -> Result<Self, PhysicsError> {
        Ok(Self {
            radius: check_dimension("circle radius", radius)?,
        })
    }

    /// The radius
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Collision shape attached to a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionBox {
    /// Axis-aligned rectangle
    Rectangle(Rectangle),
    /// Circle
    Circle(Circle),
}

impl CollisionBox {
    /// Creates a rectangular collision box
    pub fn rectangle(width: f64, height: f64) -> Result<Self, PhysicsError> {
        Rectangle::new(width, height).map(Self::Rectangle)
    }

    /// Creates a circular collision box
    pub fn circle(radius: f64) -> Result<Self, PhysicsError> {
        Circle::new(radius).map(Self::Circle)
    }

    /// True for rectangles
    pub fn is_rectangle(&self) -> bool {
        matches!(self, Self::Rectangle(_))
    }

    /// True for circles
    pub fn is_circle(&self) -> bool {
        matches!(self, Self::Circle(_))
    }

    /// Radius of the smallest circle around the shape's center that encloses it
    pub fn bounding_radius(&self) -> f64 {
        match self {
            Self::Rectangle(rect) => {
                let (hw, hh) = rect.half_extents();
                hw.hypot(hh)
            }
            Self::Circle(circle) => circle.radius(),
        }
    }

    /// Half extents of the shape's axis-aligned bounds
    pub fn half_extents(&self) -> (f64, f64) {
        match self {
            Self::Rectangle(rect) => rect.half_extents(),
            Self::Circle(circle) => (circle.radius(), circle.radius()),
        }
    }

    /// Test whether this shape at `this_pos` overlaps `other` at `other_pos`
    ///
    /// Touching boundaries count as overlapping.
    pub fn collision_with(&self, this_pos: Vec3, other_pos: Vec3, other: &CollisionBox) -> bool {
        match (self, other) {
            (Self::Rectangle(a), Self::Rectangle(b)) => {
                CollisionHandler::rectangle_rectangle(this_pos, a, other_pos, b)
            }
            (Self::Rectangle(rect), Self::Circle(circle)) => {
                CollisionHandler::rectangle_circle(this_pos, rect, other_pos, circle)
            }
            (Self::Circle(circle), Self::Rectangle(rect)) => {
                CollisionHandler::rectangle_circle(other_pos, rect, this_pos, circle)
            }
            (Self::Circle(a), Self::Circle(b)) => {
                CollisionHandler::circle_circle(this_pos, a, other_pos, b)
            }
        }
    }

    /// Test whether `point` lies inside this shape placed at `me`
    ///
    /// Points on the boundary count as inside.
    pub fn is_at(&self, me: Vec3, point: Vec3) -> bool {
        let offset = (point - me).planar();
        match self {
            Self::Rectangle(rect) => {
                let (hw, hh) = rect.half_extents();
                offset.x.abs() <= hw && offset.y.abs() <= hh
            }
            Self::Circle(circle) => {
                offset.magnitude_squared() <= circle.radius() * circle.radius()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_invalid_dimensions() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                CollisionBox::circle(bad),
                Err(PhysicsError::InvalidGeometry(_))
            ));
            assert!(matches!(
                CollisionBox::rectangle(bad, 1.0),
                Err(PhysicsError::InvalidGeometry(_))
            ));
            assert!(matches!(
                CollisionBox::rectangle(1.0, bad),
                Err(PhysicsError::InvalidGeometry(_))
            ));
        }
    }

    #[test]
    fn test_variant_queries() {
        let rect = CollisionBox::rectangle(2.0, 4.0).unwrap();
        let circle = CollisionBox::circle(1.0).unwrap();

        assert!(rect.is_rectangle() && !rect.is_circle());
        assert!(circle.is_circle() && !circle.is_rectangle());
    }

    #[test]
    fn test_bounding_radius() {
        let rect = CollisionBox::rectangle(6.0, 8.0).unwrap();
        assert_relative_eq!(rect.bounding_radius(), 5.0);

        let circle = CollisionBox::circle(1.5).unwrap();
        assert_relative_eq!(circle.bounding_radius(), 1.5);
    }

    #[test]
    fn test_rectangle_vs_circle_scenario() {
        let rect = CollisionBox::rectangle(2.0, 2.0).unwrap();
        let circle = CollisionBox::circle(1.0).unwrap();
        let origin = Vec3::zeros();

        assert!(!rect.collision_with(origin, Vec3::new(3.0, 0.0, 0.0), &circle));
        assert!(rect.collision_with(origin, Vec3::new(1.5, 0.0, 0.0), &circle));

        // Same answer with the roles swapped
        assert!(!circle.collision_with(Vec3::new(3.0, 0.0, 0.0), origin, &rect));
        assert!(circle.collision_with(Vec3::new(1.5, 0.0, 0.0), origin, &rect));
    }

    #[test]
    fn test_rectangle_collision_is_commutative() {
        let a = CollisionBox::rectangle(2.0, 1.0).unwrap();
        let b = CollisionBox::rectangle(1.0, 3.0).unwrap();

        let cases = [
            (Vec3::zeros(), Vec3::new(1.4, 0.0, 0.0)),
            (Vec3::zeros(), Vec3::new(1.6, 0.0, 0.0)),
            (Vec3::new(-2.0, 1.0, 0.0), Vec3::new(-1.0, 2.9, 0.0)),
            (Vec3::new(5.0, 5.0, 0.0), Vec3::new(-5.0, -5.0, 0.0)),
        ];

        for (pa, pb) in cases {
            assert_eq!(a.collision_with(pa, pb, &b), b.collision_with(pb, pa, &a));
        }
    }

    #[test]
    fn test_touching_circles_collide_consistently() {
        let a = CollisionBox::circle(1.0).unwrap();
        let b = CollisionBox::circle(2.0).unwrap();
        let pa = Vec3::zeros();
        let pb = Vec3::new(3.0, 0.0, 0.0);

        let first = a.collision_with(pa, pb, &b);
        assert!(first);
        for _ in 0..10 {
            assert_eq!(a.collision_with(pa, pb, &b), first);
        }
    }

    #[test]
    fn test_z_is_ignored() {
        let a = CollisionBox::circle(1.0).unwrap();
        let b = CollisionBox::circle(1.0).unwrap();

        assert!(a.collision_with(Vec3::zeros(), Vec3::new(1.0, 0.0, 50.0), &b));
        assert!(a.is_at(Vec3::zeros(), Vec3::new(0.5, 0.0, -9.0)));
    }

    #[test]
    fn test_is_at() {
        let rect = CollisionBox::rectangle(4.0, 2.0).unwrap();
        let center = Vec3::new(10.0, 10.0, 0.0);

        assert!(rect.is_at(center, Vec3::new(12.0, 11.0, 0.0)));
        assert!(rect.is_at(center, Vec3::new(8.5, 9.5, 0.0)));
        assert!(!rect.is_at(center, Vec3::new(12.1, 10.0, 0.0)));
        assert!(!rect.is_at(center, Vec3::new(10.0, 11.1, 0.0)));

        let circle = CollisionBox::circle(1.0).unwrap();
        assert!(circle.is_at(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0)));
        assert!(!circle.is_at(Vec3::zeros(), Vec3::new(0.8, 0.8, 0.0)));
    }
}
