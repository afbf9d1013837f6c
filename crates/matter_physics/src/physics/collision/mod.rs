//! Collision shapes and narrow-phase tests
//!
//! # Module Organization
//!
//! - [`shape`] - Rectangle / circle shapes and the [`CollisionBox`] enum
//! - [`handler`] - Pairwise overlap tests
//! - [`contact`] - Contact normal and depth for overlapping pairs
//!
//! Shapes are stored without a position. Tests take the owning body's
//! position as an argument, so shapes never go stale after integration.

pub mod shape;
pub mod handler;
pub mod contact;

// Re-export commonly used types
pub use shape::{Circle, CollisionBox, Rectangle};
pub use handler::CollisionHandler;
pub use contact::{contact_between, Contact};
