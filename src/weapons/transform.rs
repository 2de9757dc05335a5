//! Muzzle transform math.
//!
//! Muzzle offsets are authored in the weapon's local, **unscaled** pixel space.
//! At fire time they are scaled by the host's live scale, rotated by the host's
//! rotation, then translated to the host position:
//!
//! ```text
//! lx = ox * scale_x;  ly = oy * scale_y
//! world_x = host_x + lx*cos(r) - ly*sin(r)
//! world_y = host_y + lx*sin(r) + ly*cos(r)
//! ```
//!
//! Art is authored facing "up", so the direction of travel is the host rotation
//! minus a quarter turn. The projectile *sprite* keeps the unmodified host
//! rotation; the two headings differ by 90° on purpose.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

/// Offset between the host rotation and the direction a projectile travels.
pub const FORWARD_HEADING_OFFSET: f32 = -FRAC_PI_2;

/// Snapshot of the firing host, sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostTransform {
    pub position: Vec2,
    /// Radians, counter-clockwise.
    pub rotation: f32,
    pub scale: Vec2,
    pub active: bool,
}

impl Default for HostTransform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            active: true,
        }
    }
}

impl HostTransform {
    pub fn new(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation, ..default() }
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl From<&Transform> for HostTransform {
    fn from(tf: &Transform) -> Self {
        let (z, _, _) = tf.rotation.to_euler(EulerRot::ZYX);
        Self {
            position: tf.translation.truncate(),
            rotation: z,
            scale: tf.scale.truncate(),
            active: true,
        }
    }
}

/// World-space position of a muzzle offset on the given host.
#[inline]
pub fn muzzle_world_position(host: &HostTransform, offset: Vec2) -> Vec2 {
    let local = offset * host.scale;
    let (sin, cos) = host.rotation.sin_cos();
    host.position + Vec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos)
}

/// Direction of travel for a projectile fired by a host with this rotation.
#[inline]
pub fn firing_heading(host_rotation: f32) -> f32 {
    host_rotation + FORWARD_HEADING_OFFSET
}

/// Sprite rotation for a projectile travelling along `heading`.
#[inline]
pub fn visual_rotation(heading: f32) -> f32 {
    heading - FORWARD_HEADING_OFFSET
}

/// `speed * (cos heading, sin heading)`.
#[inline]
pub fn velocity_along(heading: f32, speed: f32) -> Vec2 {
    Vec2::from_angle(heading) * speed
}
