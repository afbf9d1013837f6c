//! Matter: one simulated game object
//!
//! Combines the physical state ([`Mass`]), a collision shape, an optional
//! handle to an external renderable, and collision filtering. Bodies flagged
//! `ignore_forces` are static scenery: they collide and can attract, but the
//! integrator never moves them.

use crate::foundation::math::Vec3;
use crate::graphic::GraphicHandle;
use crate::physics::{CollisionBox, CollisionLayers, Mass, PhysicsError};

/// A simulated game object
#[derive(Debug, Clone, PartialEq)]
pub struct Matter {
    /// Physical state
    pub mass: Mass,

    /// Collision shape, positioned at `mass.position`
    pub collision_box: CollisionBox,

    /// Renderable this body drives, if any
    pub graphic: Option<GraphicHandle>,

    /// Excluded from force integration when set
    pub ignore_forces: bool,

    /// Layers this body is on
    pub layer: CollisionLayers,

    /// Layers this body collides with
    pub mask: CollisionLayers,
}

impl Matter {
    /// Create a dynamic body on every collision layer
    pub fn new(mass: Mass, collision_box: CollisionBox) -> Self {
        Self {
            mass,
            collision_box,
            graphic: None,
            ignore_forces: false,
            layer: CollisionLayers::ALL,
            mask: CollisionLayers::ALL,
        }
    }

    /// Attach a renderable
    pub fn add_graphic(&mut self, graphic: GraphicHandle) {
        self.graphic = Some(graphic);
    }

    /// Builder form of [`Matter::add_graphic`]
    pub fn with_graphic(mut self, graphic: GraphicHandle) -> Self {
        self.add_graphic(graphic);
        self
    }

    /// Set collision layer and mask
    pub fn with_layers(mut self, layer: CollisionLayers, mask: CollisionLayers) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Mark as static scenery
    pub fn static_scenery(mut self) -> Self {
        self.ignore_forces = true;
        self
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.mass.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec3 {
        self.mass.velocity
    }

    /// True for trigger volumes, which are reported but never resolved
    ///
    /// Only a body on the `TRIGGER` layer alone counts; a solid body that
    /// also sits on `TRIGGER` is still resolved.
    pub fn is_trigger(&self) -> bool {
        self.layer == CollisionLayers::TRIGGER
    }

    /// Integrate one tick, unless this body ignores forces
    ///
    /// Static bodies still drop whatever force was accumulated so nothing
    /// carries over into the next tick.
    pub fn step(&mut self, dt: f64) -> Result<(), PhysicsError> {
        if self.ignore_forces {
            crate::physics::error::check_time_step(dt)?;
            self.mass.clear_forces();
            return Ok(());
        }
        self.mass.step(dt)
    }

    /// Shape overlap with another body at their current positions
    pub fn collides_with(&self, other: &Matter) -> bool {
        self.collision_box
            .collision_with(self.position(), other.position(), &other.collision_box)
    }

    /// Point containment at the current position
    pub fn is_at(&self, point: Vec3) -> bool {
        self.collision_box.is_at(self.position(), point)
    }
}
