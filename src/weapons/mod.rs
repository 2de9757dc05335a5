//! Weapon + projectile simulation core.
//!
//! Engine-facing concerns (bodies, timers, sounds, sprites, event dispatch) are
//! reached only through the traits in [`ports`]. The ECS adapters live in
//! `crate::plugins`.
//!
//! # Data flow (one fire request)
//! ```text
//!  WeaponController::try_fire(now)
//!     │
//!     ├─► WeaponRuntimeState      gate: now > last + fire_rate / max(0.1, mult)
//!     │        (closed → Rejected, nothing changes)
//!     │
//!     ├─► transform               per muzzle: scale → rotate → translate
//!     │
//!     ├─► ProjectileLifecycleManager::spawn
//!     │        Spawner (body) · ResourceRegistry (frame/anim) · TimerService (expiry)
//!     │
//!     ├─► commit last_fired_at = now
//!     │
//!     └─► AudioService            best-effort cue
//! ```
//!
//! Nothing calls back up this chain. Every failure is absorbed locally; the
//! worst a caller sees is a missing projectile, a still sprite, or silence.

pub mod controller;
pub mod definition;
pub mod firing;
pub mod frames;
pub mod lifecycle;
pub mod ports;
pub mod transform;

pub use controller::{FireOutcome, MountPhase, WeaponController};
pub use definition::{MuzzleOffset, WeaponDefinition};
pub use firing::{AnimationMode, WeaponRuntimeState, MIN_FIRE_RATE_MULTIPLIER};
pub use frames::FirstFrameCache;
pub use lifecycle::{ProjectileId, ProjectileInstance, ProjectileLifecycleManager, Retirement, SpawnPorts};
pub use ports::{
    AudioService, BodyHandle, BusEvent, EventBus, FrameId, HostTransformProvider, Renderable2D,
    ResourceRegistry, SoundHandle, Spawner, Subscription, SubscriptionId, TimerService, TimerTask,
    WeaponPorts,
};
pub use transform::HostTransform;

#[cfg(test)]
mod test_doubles;
