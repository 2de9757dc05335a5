//! Weapon overlay sprites.
//!
//! `OverlaySprite` is what the weapon core drives. It only records facts
//! (frame, animation, pose, released); `present_overlays` applies them to the
//! overlay entity after the post-step sync.

use bevy::prelude::*;

use crate::weapons::{FrameId, Renderable2D};

/// Draw order of overlays, just above their host.
pub const OVERLAY_Z: f32 = 1.5;

/// Marker for overlay entities.
#[derive(Component, Debug, Clone, Copy)]
pub struct WeaponOverlay;

/// What a sprite is showing: texture, still frame, and (optionally) a looping
/// animation. An asset-backed renderer resolves these names to atlas indices.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct SpriteVisual {
    pub texture_key: String,
    pub frame: FrameId,
    pub animation: Option<String>,
}

impl SpriteVisual {
    pub fn new(texture_key: impl Into<String>) -> Self {
        Self { texture_key: texture_key.into(), ..default() }
    }
}

#[derive(Debug, Clone)]
pub struct OverlaySprite {
    entity: Entity,
    frame: FrameId,
    animation: Option<String>,
    pose: Option<(Vec2, f32)>,
    released: bool,
}

impl OverlaySprite {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            frame: FrameId::default(),
            animation: None,
            pose: None,
            released: false,
        }
    }

    #[inline]
    pub fn entity(&self) -> Entity {
        self.entity
    }

    #[inline]
    pub fn frame(&self) -> &FrameId {
        &self.frame
    }

    #[inline]
    pub fn animation(&self) -> Option<&str> {
        self.animation.as_deref()
    }

    #[inline]
    pub fn pose(&self) -> Option<(Vec2, f32)> {
        self.pose
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Renderable2D for OverlaySprite {
    fn set_frame(&mut self, frame: &FrameId) {
        self.frame = frame.clone();
    }

    fn play(&mut self, animation: &str) {
        self.animation = Some(animation.to_owned());
    }

    fn stop(&mut self) {
        self.animation = None;
    }

    fn set_pose(&mut self, position: Vec2, rotation: f32) {
        self.pose = Some((position, rotation));
    }

    fn release(&mut self) {
        self.released = true;
    }
}
