//! Narrow capabilities the weapon core consumes from the surrounding game.
//!
//! Everything here is synchronous and local. Implementations live in
//! `crate::plugins` (ECS adapters) and in the core's test doubles.

use bevy::prelude::*;

use super::lifecycle::ProjectileId;
use super::transform::HostTransform;

/// Frame identifier resolved for a texture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameId {
    Named(String),
    Index(usize),
}

impl Default for FrameId {
    fn default() -> Self {
        Self::Index(0)
    }
}

// -----------------------------------------------------------------------------
// Host
// -----------------------------------------------------------------------------

pub trait HostTransformProvider {
    fn sample(&self) -> HostTransform;
}

impl HostTransformProvider for HostTransform {
    fn sample(&self) -> HostTransform {
        *self
    }
}

impl HostTransformProvider for Transform {
    fn sample(&self) -> HostTransform {
        HostTransform::from(self)
    }
}

// -----------------------------------------------------------------------------
// Resources (textures, animations)
// -----------------------------------------------------------------------------

pub trait ResourceRegistry {
    /// Whether a texture or animation with this name is registered.
    fn exists(&self, name: &str) -> bool;

    /// Frame names of a texture, in registration order. Empty if the texture is
    /// unknown or not frame-enumerable.
    fn list_frame_names(&self, resource_key: &str) -> Vec<String>;

    fn list_animation_names(&self) -> Vec<String>;
}

/// A visual that can show frames and play animations.
///
/// Visuals without this capability are simply not handed to the core.
pub trait Renderable2D {
    fn set_frame(&mut self, frame: &FrameId);
    fn play(&mut self, animation: &str);
    fn stop(&mut self);
    fn set_pose(&mut self, position: Vec2, rotation: f32);
    fn release(&mut self);
}

// -----------------------------------------------------------------------------
// Physics bodies
// -----------------------------------------------------------------------------

/// Opaque handle to a physics body created by a [`Spawner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u64);

pub trait Spawner {
    /// Create a body at `position` showing `resource_key`. `None` when no body
    /// can be produced (e.g. pool exhaustion).
    fn create_physics_object(&mut self, position: Vec2, resource_key: &str) -> Option<BodyHandle>;

    fn set_position(&mut self, body: BodyHandle, position: Vec2);
    fn set_rotation(&mut self, body: BodyHandle, rotation: f32);
    fn set_scale(&mut self, body: BodyHandle, scale: f32);
    fn set_tint(&mut self, body: BodyHandle, tint: Color);
    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2);
    fn set_frame(&mut self, body: BodyHandle, frame: &FrameId);
    fn play_animation(&mut self, body: BodyHandle, animation: &str);

    /// Destroy (or return to pool). Must tolerate an already-destroyed body.
    fn destroy(&mut self, body: BodyHandle);
}

// -----------------------------------------------------------------------------
// Timers
// -----------------------------------------------------------------------------

/// Work a one-shot timer performs when it comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    ExpireProjectile(ProjectileId),
}

pub trait TimerService {
    /// Fire-and-forget. There is no cancellation; tasks must tolerate stale targets.
    fn schedule_once(&mut self, delay_ms: f64, task: TimerTask);
}

// -----------------------------------------------------------------------------
// Audio
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

pub trait AudioService {
    /// Reuse the handle for `key` if one exists, otherwise create it.
    fn get_or_create(&mut self, key: &str) -> Option<SoundHandle>;
    fn play(&mut self, handle: SoundHandle);
}

// -----------------------------------------------------------------------------
// Event bus
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusEvent {
    /// After the host's physics/transform step.
    PostStep,
    /// The owning scene/session is ending.
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

pub trait EventBus {
    fn subscribe(&mut self, event: BusEvent) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Post-step + shutdown registrations held by one controller.
///
/// Released exactly once: [`Subscription::dispose`] consumes it.
#[derive(Debug)]
#[must_use]
pub struct Subscription {
    pub post_step: SubscriptionId,
    pub shutdown: SubscriptionId,
}

impl Subscription {
    pub fn register(bus: &mut dyn EventBus) -> Self {
        Self {
            post_step: bus.subscribe(BusEvent::PostStep),
            shutdown: bus.subscribe(BusEvent::Shutdown),
        }
    }

    pub fn dispose(self, bus: &mut dyn EventBus) {
        bus.unsubscribe(self.post_step);
        bus.unsubscribe(self.shutdown);
    }
}

/// Ports used while firing, bundled so call sites stay short.
pub struct WeaponPorts<'a> {
    pub spawner: &'a mut dyn Spawner,
    pub registry: &'a dyn ResourceRegistry,
    pub timers: &'a mut dyn TimerService,
    pub audio: &'a mut dyn AudioService,
}
