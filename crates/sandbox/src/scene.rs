//! Scene files
//!
//! A scene is a RON list of bodies. Each entry maps onto one
//! [`Matter`]; shapes and masses are validated on the way in.
//!
//! ```ron
//! (
//!     bodies: [
//!         (
//!             name: "sun",
//!             mass: 1000.0,
//!             position: (0.0, 0.0, 0.0),
//!             shape: Circle(radius: 2.0),
//!             ignore_forces: true,
//!         ),
//!     ],
//! )
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use matter_physics::prelude::*;

/// Shape as written in a scene file
#[derive(Debug, Clone, Deserialize)]
pub enum ShapeDescription {
    /// Axis-aligned rectangle
    Rectangle {
        /// Extent along X
        width: f64,
        /// Extent along Y
        height: f64,
    },
    /// Circle
    Circle {
        /// The radius
        radius: f64,
    },
}

impl ShapeDescription {
    fn build(&self) -> Result<CollisionBox, PhysicsError> {
        match *self {
            Self::Rectangle { width, height } => CollisionBox::rectangle(width, height),
            Self::Circle { radius } => CollisionBox::circle(radius),
        }
    }
}

fn vec3((x, y, z): (f64, f64, f64)) -> Vec3 {
    Vec3::new(x, y, z)
}

fn default_true() -> bool {
    true
}

/// One body as written in a scene file
#[derive(Debug, Clone, Deserialize)]
pub struct BodyDescription {
    /// Label used in log output
    pub name: String,
    /// Mass, must be positive
    pub mass: f64,
    /// Initial position
    pub position: (f64, f64, f64),
    /// Initial velocity
    #[serde(default)]
    pub velocity: (f64, f64, f64),
    /// Constant force, e.g. thrust
    #[serde(default)]
    pub base_force: (f64, f64, f64),
    /// Collision shape
    pub shape: ShapeDescription,
    /// Static scenery when set
    #[serde(default)]
    pub ignore_forces: bool,
    /// Takes part in gravity
    #[serde(default = "default_true")]
    pub affected_by_gravity: bool,
    /// Collision layer
    #[serde(default)]
    pub layer: CollisionLayers,
    /// Collision mask
    #[serde(default)]
    pub mask: CollisionLayers,
    /// Renderable handle to forward poses to
    #[serde(default)]
    pub graphic: Option<GraphicHandle>,
}

impl BodyDescription {
    /// Build the runtime body
    pub fn build(&self) -> Result<Matter, PhysicsError> {
        let mass = Mass::new(self.mass, vec3(self.position), vec3(self.velocity))?
            .with_base_force(vec3(self.base_force))
            .with_gravity(self.affected_by_gravity);

        let mut matter = Matter::new(mass, self.shape.build()?).with_layers(self.layer, self.mask);
        matter.ignore_forces = self.ignore_forces;
        matter.graphic = self.graphic;
        Ok(matter)
    }
}

/// A whole scene file
#[derive(Debug, Clone, Deserialize)]
pub struct SceneDescription {
    /// Bodies to spawn, in order
    pub bodies: Vec<BodyDescription>,
}

impl SceneDescription {
    /// Parse a scene from RON text
    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).context("failed to parse scene")
    }

    /// Load a scene from a RON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene {}", path.display()))?;
        Self::from_ron(&text).with_context(|| format!("in scene {}", path.display()))
    }

    /// Spawn every body into `universe`, returning names paired with handles
    pub fn spawn_into(&self, universe: &mut Universe) -> Result<Vec<(String, MatterId)>> {
        self.bodies
            .iter()
            .map(|body| {
                let matter = body
                    .build()
                    .with_context(|| format!("invalid body '{}'", body.name))?;
                Ok((body.name.clone(), universe.spawn(matter)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SCENE: &str = r#"
        (
            bodies: [
                (
                    name: "ground",
                    mass: 1.0,
                    position: (0.0, 0.0, 0.0),
                    shape: Rectangle(width: 20.0, height: 1.0),
                    ignore_forces: true,
                    layer: "ENVIRONMENT",
                ),
                (
                    name: "ball",
                    mass: 2.0,
                    position: (0.0, 5.0, 0.0),
                    velocity: (1.0, 0.0, 0.0),
                    shape: Circle(radius: 0.5),
                    graphic: Some(3),
                ),
            ],
        )
    "#;

    #[test]
    fn test_parse_and_spawn() {
        let scene = SceneDescription::from_ron(SCENE).unwrap();
        assert_eq!(scene.bodies.len(), 2);

        let mut universe = Universe::new(PhysicsConfig::default()).unwrap();
        let spawned = scene.spawn_into(&mut universe).unwrap();
        assert_eq!(universe.len(), 2);

        let ground = universe.get(spawned[0].1).unwrap();
        assert!(ground.ignore_forces);
        assert!(ground.collision_box.is_rectangle());
        assert_eq!(ground.layer, CollisionLayers::ENVIRONMENT);
        assert_eq!(ground.mask, CollisionLayers::ALL);

        let ball = universe.get(spawned[1].1).unwrap();
        assert_eq!(spawned[1].0, "ball");
        assert_relative_eq!(ball.mass.mass(), 2.0);
        assert_eq!(ball.velocity(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ball.graphic, Some(GraphicHandle(3)));
        assert!(ball.mass.affected_by_gravity);
    }

    #[test]
    fn test_invalid_body_is_reported() {
        let scene = SceneDescription::from_ron(
            r#"(bodies: [(name: "flat", mass: 1.0, position: (0.0, 0.0, 0.0), shape: Circle(radius: 0.0))])"#,
        )
        .unwrap();

        let mut universe = Universe::new(PhysicsConfig::default()).unwrap();
        let err = scene.spawn_into(&mut universe).unwrap_err();
        assert!(format!("{err:#}").contains("flat"));
    }
}
