//! # Matter Physics
//!
//! Point-mass physics and 2D collision detection for games.
//!
//! ## Features
//!
//! - **Integration**: explicit Euler steps driven by accumulated forces
//! - **Gravity**: all-pairs Newtonian attraction with a participation policy
//! - **Collision**: axis-aligned rectangles and circles, layer filtering,
//!   entered / exited tracking and optional contact resolution
//! - **Handles**: bodies live in a [`Universe`] and are named by [`MatterId`]
//!
//! ## Quick Start
//!
//! ```rust
//! use matter_physics::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut universe = Universe::new(PhysicsConfig::default())?;
//!
//!     let mass = Mass::new(10.0, Vec3::zeros(), Vec3::zeros())?
//!         .with_base_force(Vec3::new(10.0, 0.0, 0.0));
//!     let ship = universe.spawn(Matter::new(mass, CollisionBox::circle(1.0)?));
//!
//!     universe.tick(1.0, &mut NullSink)?;
//!
//!     assert_eq!(universe.get(ship).unwrap().position().x, 1.0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod physics;
pub mod graphic;
pub mod matter;
pub mod world;

pub use world::{MatterId, TickReport, Universe};

/// Common imports for users of the crate
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, PhysicsConfig},
        foundation::math::{Vec3, Vec3Ext},
        graphic::{GraphicHandle, NullSink, RecordingSink, RenderSink},
        matter::Matter,
        physics::{
            CollisionBox,
            CollisionLayers,
            CollisionPair,
            GravityPolicy,
            Mass,
            PhysicsError,
            ResolutionConfig,
            ResolutionMode,
        },
        world::{MatterId, TickReport, Universe},
    };
}
