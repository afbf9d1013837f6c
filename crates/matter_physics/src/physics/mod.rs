//! Physics module: point masses, gravity, collision detection and response
//!
//! Each tick the [`Universe`](crate::world::Universe) drives these pieces in
//! order: gravity accumulation, integration, collision detection, then
//! optional contact resolution.

pub mod error;
pub mod mass;
pub mod gravity;
pub mod collision;
pub mod collision_layers;
pub mod collision_system;
pub mod resolution;

#[cfg(test)]
mod tests;

pub use error::PhysicsError;
pub use mass::Mass;
pub use gravity::{accumulate_gravity, GravityPolicy};
pub use collision::{
    contact_between,
    Circle,
    CollisionBox,
    CollisionHandler,
    Contact,
    Rectangle,
};
pub use collision_layers::CollisionLayers;
pub use collision_system::{Collider, CollisionPair, CollisionSystem, DetectionStats};
pub use resolution::{resolve_contact, ResolutionConfig, ResolutionMode};
