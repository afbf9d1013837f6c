//! Collision layer system for filtering collision detection
//!
//! Every collider sits on one or more layers and carries a mask of the layers
//! it wants to hit. A pair is only tested when each side's layer appears in
//! the other's mask.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Collision layer bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct CollisionLayers: u32 {
        /// Player-controlled bodies
        const PLAYER = 1 << 0;
        /// Hostile bodies
        const ENEMY = 1 << 1;
        /// Projectiles (bullets, missiles, etc.)
        const PROJECTILE = 1 << 2;
        /// Static environment geometry
        const ENVIRONMENT = 1 << 3;
        /// Trigger volumes (reported, never resolved)
        const TRIGGER = 1 << 4;
        /// Debris and small physics objects
        const DEBRIS = 1 << 5;
        /// Pickups and collectibles
        const PICKUP = 1 << 6;
        /// No layer at all
        const NONE = 0;
        /// Every layer, including custom bits
        const ALL = u32::MAX;
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::ALL
    }
}

impl CollisionLayers {
    /// Check if two colliders should collide based on their layers and masks
    ///
    /// # Example
    /// ```
    /// use matter_physics::physics::CollisionLayers;
    ///
    /// let player = (CollisionLayers::PLAYER, CollisionLayers::ENEMY | CollisionLayers::ENVIRONMENT);
    /// let enemy = (CollisionLayers::ENEMY, CollisionLayers::PLAYER | CollisionLayers::PROJECTILE);
    ///
    /// assert!(CollisionLayers::should_collide(player.0, player.1, enemy.0, enemy.1));
    /// ```
    pub fn should_collide(
        layer_a: CollisionLayers,
        mask_a: CollisionLayers,
        layer_b: CollisionLayers,
        mask_b: CollisionLayers,
    ) -> bool {
        layer_a.intersects(mask_b) && layer_b.intersects(mask_a)
    }
}
