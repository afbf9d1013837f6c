//! Math utilities and types
//!
//! Provides the vector type used for positions, velocities and forces.

pub use nalgebra::Vector3;

/// 3D vector type (double precision for physics)
pub type Vec3 = Vector3<f64>;

/// Extension trait for Vec3 with additional convenience methods
pub trait Vec3Ext {
    /// Create a vector with all three components set to `value`
    fn splat(value: f64) -> Vec3;

    /// Normalize, returning the zero vector instead of NaN for zero length
    fn normalized_or_zero(&self) -> Vec3;

    /// Project onto the XY plane (z = 0)
    fn planar(&self) -> Vec3;

    /// True when every component is finite
    fn all_finite(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    fn splat(value: f64) -> Vec3 {
        Vec3::repeat(value)
    }

    fn normalized_or_zero(&self) -> Vec3 {
        self.try_normalize(f64::EPSILON).unwrap_or_else(Vec3::zeros)
    }

    fn planar(&self) -> Vec3 {
        Vec3::new(self.x, self.y, 0.0)
    }

    fn all_finite(&self) -> bool {
        self.iter().all(|c| c.is_finite())
    }
}

/// Physical constants
pub mod constants {
    /// Gravitational constant in m³·kg⁻¹·s⁻²
    pub const G: f64 = 6.674_301_5e-11;

    /// Speed of light in m/s
    pub const C: f64 = 299_792_458.0;
}
