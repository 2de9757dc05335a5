//! Projectile lifecycle: spawn, expire, deactivate.
//!
//! # Ownership
//! This manager is the **single writer** of projectile state after spawn.
//! Weapons ask it to spawn; nothing else mutates a live projectile.
//!
//! # Removal is shared, so removal is idempotent
//! Two parties decide when a projectile goes away:
//! - its own one-shot expiry timer (scheduled at spawn, never cancelled),
//! - the outside world (collision) via [`ProjectileLifecycleManager::deactivate`].
//!
//! Whichever comes second finds the slot already released (or reused under a
//! newer generation) and does nothing.
//!
//! ```text
//!  spawn ──► slot(gen g, active) ──► timer due ──► release ──► slot free, gen g+1
//!                    │                                 ▲
//!                    └──── deactivate (collision) ─────┘
//! ```

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::definition::WeaponDefinition;
use super::frames::{resolve_projectile_animation, FirstFrameCache};
use super::ports::{BodyHandle, ResourceRegistry, Spawner, TimerService, TimerTask};
use super::transform::{velocity_along, visual_rotation};

/// Generational id of a projectile slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileId {
    index: u32,
    generation: u32,
}

impl ProjectileId {
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileInstance {
    /// Spawn point. The body owns the live position from then on.
    pub origin: Vec2,
    /// Sprite rotation (host rotation at fire time).
    pub rotation: f32,
    pub velocity: Vec2,
    pub spawned_at_ms: f64,
    pub ttl_ms: f64,
    pub body: BodyHandle,
    pub resource_key: String,
}

impl ProjectileInstance {
    #[inline]
    pub fn expires_at_ms(&self) -> f64 {
        self.spawned_at_ms + self.ttl_ms
    }

    #[inline]
    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms - self.spawned_at_ms >= self.ttl_ms
    }
}

/// Ports the manager needs to spawn.
pub struct SpawnPorts<'a> {
    pub spawner: &'a mut dyn Spawner,
    pub registry: &'a dyn ResourceRegistry,
    pub timers: &'a mut dyn TimerService,
}

/// Why a projectile left the live set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retirement {
    Expired,
    Deactivated,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    projectile: Option<ProjectileInstance>,
}

#[derive(Debug, Default)]
pub struct ProjectileLifecycleManager {
    slots: Vec<Slot>,
    free: Vec<u32>,
    by_body: HashMap<BodyHandle, ProjectileId>,
    frames: FirstFrameCache,
    retired: Vec<(ProjectileId, Retirement)>,
}

impl ProjectileLifecycleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn one projectile at `origin` travelling along `heading`.
    ///
    /// Returns `None` when the spawner cannot produce a body. That is a soft
    /// failure: it is logged and the caller carries on.
    pub fn spawn(
        &mut self,
        origin: Vec2,
        heading: f32,
        definition: &WeaponDefinition,
        now_ms: f64,
        ports: &mut SpawnPorts<'_>,
    ) -> Option<ProjectileId> {
        let key = definition.projectile_key.as_str();

        let Some(body) = ports.spawner.create_physics_object(origin, key) else {
            warn!("projectile spawn abandoned: no physics body available for '{key}'");
            return None;
        };

        let rotation = visual_rotation(heading);
        let velocity = velocity_along(heading, definition.projectile_speed);

        ports.spawner.set_rotation(body, rotation);
        ports.spawner.set_velocity(body, velocity);
        if let Some(scale) = definition.projectile_scale {
            ports.spawner.set_scale(body, scale);
        }
        if let Some(tint) = definition.tint_color() {
            ports.spawner.set_tint(body, tint);
        }

        // Still frame first; an animation (if any) takes over from it.
        let frame = self.frames.resolve(ports.registry, key);
        ports.spawner.set_frame(body, &frame);
        if let Some(animation) = resolve_projectile_animation(ports.registry, key) {
            ports.spawner.play_animation(body, &animation);
        }

        let id = self.insert(ProjectileInstance {
            origin,
            rotation,
            velocity,
            spawned_at_ms: now_ms,
            ttl_ms: definition.projectile_lifetime_ms,
            body,
            resource_key: key.to_owned(),
        });
        self.by_body.insert(body, id);

        ports
            .timers
            .schedule_once(definition.projectile_lifetime_ms, TimerTask::ExpireProjectile(id));

        Some(id)
    }

    /// Timer callback entry point.
    pub fn run_timer(&mut self, task: TimerTask, spawner: &mut dyn Spawner) {
        match task {
            TimerTask::ExpireProjectile(id) => {
                self.expire(id, spawner);
            }
        }
    }

    /// Retire a projectile whose lifetime ran out. No-op if it is already gone.
    pub fn expire(&mut self, id: ProjectileId, spawner: &mut dyn Spawner) -> bool {
        self.release(id, Retirement::Expired, spawner)
    }

    /// Retire a projectile on behalf of the outside world (e.g. it hit something).
    /// No-op if it is already gone.
    pub fn deactivate(&mut self, id: ProjectileId, spawner: &mut dyn Spawner) -> bool {
        self.release(id, Retirement::Deactivated, spawner)
    }

    fn release(&mut self, id: ProjectileId, why: Retirement, spawner: &mut dyn Spawner) -> bool {
        let Some(slot) = self.slots.get_mut(id.index as usize) else {
            return false;
        };
        if slot.generation != id.generation {
            debug!("stale projectile {id:?} ({why:?}): slot already reused");
            return false;
        }
        // A stored projectile is live by construction; taking it is the release.
        let Some(projectile) = slot.projectile.take() else {
            debug!("projectile {id:?} ({why:?}) already released");
            return false;
        };
        spawner.destroy(projectile.body);

        self.by_body.remove(&projectile.body);
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.retired.push((id, why));
        true
    }

    fn insert(&mut self, projectile: ProjectileInstance) -> ProjectileId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.projectile = Some(projectile);
                ProjectileId { index, generation: slot.generation }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, projectile: Some(projectile) });
                ProjectileId { index, generation: 0 }
            }
        }
    }

    pub fn get(&self, id: ProjectileId) -> Option<&ProjectileInstance> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.projectile.as_ref())
    }

    #[inline]
    pub fn is_active(&self, id: ProjectileId) -> bool {
        self.get(id).is_some()
    }

    #[inline]
    pub fn by_body(&self, body: BodyHandle) -> Option<ProjectileId> {
        self.by_body.get(&body).copied()
    }

    pub fn active_count(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProjectileId, &ProjectileInstance)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.projectile.as_ref().map(|p| {
                (ProjectileId { index: index as u32, generation: slot.generation }, p)
            })
        })
    }

    #[inline]
    pub fn frame_cache_mut(&mut self) -> &mut FirstFrameCache {
        &mut self.frames
    }

    /// Retirements since the last drain, in order.
    pub fn drain_retired(&mut self) -> impl Iterator<Item = (ProjectileId, Retirement)> + '_ {
        self.retired.drain(..)
    }
}
