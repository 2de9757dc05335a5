//! Weapon controller: one mounted weapon on one host.
//!
//! ```text
//! Mounted ──destroy()──► Destroyed (terminal)
//!    │
//!    └─ animation sub-state (Idle / Firing), only while Mounted
//! ```
//!
//! Per fire request the controller walks one direction:
//! gate check → muzzle transforms → projectile spawns → sound cue.

use bevy::prelude::*;

use super::definition::WeaponDefinition;
use super::firing::{AnimationMode, WeaponRuntimeState};
use super::frames::FirstFrameCache;
use super::lifecycle::{ProjectileLifecycleManager, SpawnPorts};
use super::ports::{
    EventBus, FrameId, HostTransformProvider, Renderable2D, ResourceRegistry, Subscription,
    SubscriptionId, WeaponPorts,
};
use super::transform::{firing_heading, muzzle_world_position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountPhase {
    Mounted,
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// Gate closed, host inactive, or weapon destroyed. Nothing changed.
    Rejected,
    /// Gate committed. `spawned` may be lower than the muzzle count when bodies
    /// were unavailable.
    Fired { spawned: usize },
}

impl FireOutcome {
    #[inline]
    pub fn fired(self) -> bool {
        matches!(self, Self::Fired { .. })
    }
}

#[derive(Debug)]
pub struct WeaponController<V: Renderable2D> {
    definition: WeaponDefinition,
    state: WeaponRuntimeState,
    overlay: Option<V>,
    /// Overlay texture's first usable frame, resolved at mount.
    idle_frame: FrameId,
    subscription: Option<Subscription>,
    phase: MountPhase,
}

impl<V: Renderable2D> WeaponController<V> {
    /// Mount a weapon.
    ///
    /// With an overlay, the overlay is put on its idle frame and a post-step
    /// subscription is registered; without one, no subscription is taken.
    pub fn mount(
        definition: WeaponDefinition,
        overlay: Option<V>,
        frames: &mut FirstFrameCache,
        registry: &dyn ResourceRegistry,
        bus: &mut dyn EventBus,
    ) -> Self {
        let idle_frame = definition
            .weapon_sprite_key
            .as_deref()
            .map(|key| frames.resolve(registry, key))
            .unwrap_or_default();

        let mut overlay = overlay;
        let subscription = overlay.as_mut().map(|visual| {
            visual.set_frame(&idle_frame);
            Subscription::register(bus)
        });

        Self {
            definition,
            state: WeaponRuntimeState::default(),
            overlay,
            idle_frame,
            subscription,
            phase: MountPhase::Mounted,
        }
    }

    pub fn set_fire_rate_multiplier(&mut self, multiplier: f64) {
        self.state.set_fire_rate_multiplier(multiplier);
    }

    /// Fire every muzzle if the rate gate allows it.
    ///
    /// Muzzles spawn in authored order; the gate timestamp is committed after
    /// all of them were attempted. Sound is best-effort and never affects the
    /// outcome.
    pub fn try_fire(
        &mut self,
        now_ms: f64,
        host: &impl HostTransformProvider,
        projectiles: &mut ProjectileLifecycleManager,
        ports: &mut WeaponPorts<'_>,
    ) -> FireOutcome {
        if self.phase == MountPhase::Destroyed {
            return FireOutcome::Rejected;
        }

        let host = host.sample();
        if !host.active {
            return FireOutcome::Rejected;
        }

        let definition = &self.definition;
        let heading = firing_heading(host.rotation);
        let mut spawned = 0;

        let fired = self.state.try_fire(now_ms, definition.fire_rate_ms, || {
            let mut spawn_ports = SpawnPorts {
                spawner: &mut *ports.spawner,
                registry: ports.registry,
                timers: &mut *ports.timers,
            };
            for muzzle in &definition.muzzle_offsets {
                let origin = muzzle_world_position(&host, muzzle.as_vec2());
                if projectiles
                    .spawn(origin, heading, definition, now_ms, &mut spawn_ports)
                    .is_some()
                {
                    spawned += 1;
                }
            }
        });

        if !fired {
            return FireOutcome::Rejected;
        }

        self.play_fire_cue(ports);
        FireOutcome::Fired { spawned }
    }

    fn play_fire_cue(&self, ports: &mut WeaponPorts<'_>) {
        let Some(key) = self.definition.sfx_key.as_deref() else {
            return;
        };
        match ports.audio.get_or_create(key) {
            Some(handle) => ports.audio.play(handle),
            None => debug!("sound cue '{key}' unavailable; firing silently"),
        }
    }

    /// Continuous per-tick effects. Nothing yet; must never touch the gate.
    pub fn update(&mut self, _now_ms: f64) {}

    /// Hold-to-fire began. Plays the overlay's firing animation if it exists.
    pub fn start_firing(&mut self, registry: &dyn ResourceRegistry) {
        if self.phase == MountPhase::Destroyed {
            return;
        }
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        let Some(animation) = self.definition.firing_animation() else {
            return;
        };

        if self.state.start_firing(registry.exists(&animation)) {
            overlay.play(&animation);
        }
    }

    /// Hold-to-fire ended. Always lands the overlay back on its idle frame.
    pub fn stop_firing(&mut self) {
        if self.phase == MountPhase::Destroyed {
            return;
        }
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };

        self.state.stop_firing();
        overlay.stop();
        overlay.set_frame(&self.idle_frame);
    }

    /// Post-step callback: keep the overlay on the host.
    pub fn on_post_step(&mut self, host: &impl HostTransformProvider) {
        if self.phase == MountPhase::Destroyed {
            return;
        }
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        let host = host.sample();
        if host.active {
            overlay.set_pose(host.position, host.rotation);
        }
    }

    /// Release the overlay and subscriptions. Safe to call repeatedly.
    ///
    /// Projectiles already in flight are not touched.
    pub fn destroy(&mut self, bus: &mut dyn EventBus) {
        if self.phase == MountPhase::Destroyed {
            return;
        }
        self.phase = MountPhase::Destroyed;
        self.state.stop_firing();

        if let Some(subscription) = self.subscription.take() {
            subscription.dispose(bus);
        }
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.stop();
            overlay.release();
        }
    }

    #[inline]
    pub fn definition(&self) -> &WeaponDefinition {
        &self.definition
    }

    #[inline]
    pub fn state(&self) -> &WeaponRuntimeState {
        &self.state
    }

    #[inline]
    pub fn animation_mode(&self) -> AnimationMode {
        self.state.animation_mode()
    }

    #[inline]
    pub fn phase(&self) -> MountPhase {
        self.phase
    }

    #[inline]
    pub fn overlay(&self) -> Option<&V> {
        self.overlay.as_ref()
    }

    #[inline]
    pub fn idle_frame(&self) -> &FrameId {
        &self.idle_frame
    }

    #[inline]
    pub fn post_step_subscription(&self) -> Option<SubscriptionId> {
        self.subscription.as_ref().map(|s| s.post_step)
    }

    #[inline]
    pub fn shutdown_subscription(&self) -> Option<SubscriptionId> {
        self.subscription.as_ref().map(|s| s.shutdown)
    }
}
