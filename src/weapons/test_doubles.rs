//! In-memory ports for exercising the core without an ECS world.

use std::cell::Cell;

use bevy::platform::collections::{HashMap, HashSet};
use bevy::prelude::*;

use super::controller::{FireOutcome, WeaponController};
use super::definition::WeaponDefinition;
use super::lifecycle::ProjectileLifecycleManager;
use super::ports::*;
use super::transform::HostTransform;

// -----------------------------------------------------------------------------
// Registry
// -----------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeRegistry {
    pub frames: HashMap<String, Vec<String>>,
    pub animations: Vec<String>,
    pub frame_queries: Cell<usize>,
}

impl FakeRegistry {
    pub fn with_texture(mut self, key: &str, frames: &[&str]) -> Self {
        self.frames
            .insert(key.to_owned(), frames.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn with_animations(mut self, names: &[&str]) -> Self {
        self.animations.extend(names.iter().map(|n| n.to_string()));
        self
    }
}

impl ResourceRegistry for FakeRegistry {
    fn exists(&self, name: &str) -> bool {
        self.frames.contains_key(name) || self.animations.iter().any(|a| a == name)
    }

    fn list_frame_names(&self, resource_key: &str) -> Vec<String> {
        self.frame_queries.set(self.frame_queries.get() + 1);
        self.frames.get(resource_key).cloned().unwrap_or_default()
    }

    fn list_animation_names(&self) -> Vec<String> {
        self.animations.clone()
    }
}

// -----------------------------------------------------------------------------
// Spawner
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FakeBody {
    pub key: String,
    pub position: Vec2,
    pub rotation: f32,
    pub scale: f32,
    pub tint: Option<Color>,
    pub velocity: Vec2,
    pub frame: Option<FrameId>,
    pub animation: Option<String>,
}

#[derive(Default)]
pub struct FakeSpawner {
    next: u64,
    /// `Some(n)`: at most `n` bodies alive at once.
    pub capacity: Option<usize>,
    pub bodies: HashMap<BodyHandle, FakeBody>,
    pub destroyed: Vec<BodyHandle>,
    /// Positions of every successful create, in call order.
    pub created_at: Vec<Vec2>,
}

impl FakeSpawner {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity: Some(capacity), ..default() }
    }

    pub fn body(&self, handle: BodyHandle) -> &FakeBody {
        self.bodies.get(&handle).expect("unknown body")
    }

    fn with_body(&mut self, handle: BodyHandle, f: impl FnOnce(&mut FakeBody)) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            f(body);
        }
    }
}

impl Spawner for FakeSpawner {
    fn create_physics_object(&mut self, position: Vec2, resource_key: &str) -> Option<BodyHandle> {
        if self.capacity.is_some_and(|cap| self.bodies.len() >= cap) {
            return None;
        }
        self.next += 1;
        let handle = BodyHandle(self.next);
        self.bodies.insert(
            handle,
            FakeBody { key: resource_key.to_owned(), position, scale: 1.0, ..default() },
        );
        self.created_at.push(position);
        Some(handle)
    }

    fn set_position(&mut self, body: BodyHandle, position: Vec2) {
        self.with_body(body, |b| b.position = position);
    }

    fn set_rotation(&mut self, body: BodyHandle, rotation: f32) {
        self.with_body(body, |b| b.rotation = rotation);
    }

    fn set_scale(&mut self, body: BodyHandle, scale: f32) {
        self.with_body(body, |b| b.scale = scale);
    }

    fn set_tint(&mut self, body: BodyHandle, tint: Color) {
        self.with_body(body, |b| b.tint = Some(tint));
    }

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        self.with_body(body, |b| b.velocity = velocity);
    }

    fn set_frame(&mut self, body: BodyHandle, frame: &FrameId) {
        self.with_body(body, |b| b.frame = Some(frame.clone()));
    }

    fn play_animation(&mut self, body: BodyHandle, animation: &str) {
        self.with_body(body, |b| b.animation = Some(animation.to_owned()));
    }

    fn destroy(&mut self, body: BodyHandle) {
        if self.bodies.remove(&body).is_some() {
            self.destroyed.push(body);
        }
    }
}

// -----------------------------------------------------------------------------
// Timers
// -----------------------------------------------------------------------------

#[derive(Default)]
pub struct ManualTimers {
    pub now_ms: f64,
    pub pending: Vec<(f64, TimerTask)>,
}

impl ManualTimers {
    /// Move the clock and hand back every task now due, earliest first.
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<TimerTask> {
        self.now_ms = now_ms;
        self.pending.sort_by(|a, b| a.0.total_cmp(&b.0));
        let split = self.pending.partition_point(|(due, _)| *due <= now_ms);
        self.pending.drain(..split).map(|(_, task)| task).collect()
    }
}

impl TimerService for ManualTimers {
    fn schedule_once(&mut self, delay_ms: f64, task: TimerTask) {
        self.pending.push((self.now_ms + delay_ms, task));
    }
}

// -----------------------------------------------------------------------------
// Audio
// -----------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeAudio {
    pub known: HashSet<String>,
    pub handles: HashMap<String, SoundHandle>,
    pub played: Vec<SoundHandle>,
}

impl FakeAudio {
    pub fn with_sound(mut self, key: &str) -> Self {
        self.known.insert(key.to_owned());
        self
    }
}

impl AudioService for FakeAudio {
    fn get_or_create(&mut self, key: &str) -> Option<SoundHandle> {
        if let Some(handle) = self.handles.get(key) {
            return Some(*handle);
        }
        if !self.known.contains(key) {
            return None;
        }
        let handle = SoundHandle(self.handles.len() as u32);
        self.handles.insert(key.to_owned(), handle);
        Some(handle)
    }

    fn play(&mut self, handle: SoundHandle) {
        self.played.push(handle);
    }
}

// -----------------------------------------------------------------------------
// Event bus
// -----------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingBus {
    next: u64,
    pub live: HashMap<SubscriptionId, BusEvent>,
}

impl RecordingBus {
    pub fn is_live(&self, id: SubscriptionId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn live_count(&self, event: BusEvent) -> usize {
        self.live.values().filter(|e| **e == event).count()
    }

    /// Deliver a post-step tick the way a real bus would: only to live listeners.
    pub fn post_step(&self, controller: &mut WeaponController<RecordingVisual>, host: &HostTransform) {
        if controller.post_step_subscription().is_some_and(|id| self.is_live(id)) {
            controller.on_post_step(host);
        }
    }
}

impl EventBus for RecordingBus {
    fn subscribe(&mut self, event: BusEvent) -> SubscriptionId {
        self.next += 1;
        let id = SubscriptionId(self.next);
        self.live.insert(id, event);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.live.remove(&id);
    }
}

// -----------------------------------------------------------------------------
// Overlay visual
// -----------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RecordingVisual {
    pub frame: Option<FrameId>,
    pub playing: Option<String>,
    pub pose: Option<(Vec2, f32)>,
    pub pose_updates: usize,
    pub released: usize,
}

impl Renderable2D for RecordingVisual {
    fn set_frame(&mut self, frame: &FrameId) {
        self.frame = Some(frame.clone());
    }

    fn play(&mut self, animation: &str) {
        self.playing = Some(animation.to_owned());
    }

    fn stop(&mut self) {
        self.playing = None;
    }

    fn set_pose(&mut self, position: Vec2, rotation: f32) {
        self.pose = Some((position, rotation));
        self.pose_updates += 1;
    }

    fn release(&mut self) {
        self.released += 1;
    }
}

// -----------------------------------------------------------------------------
// Rig: every port wired together
// -----------------------------------------------------------------------------

#[derive(Default)]
pub struct Rig {
    pub registry: FakeRegistry,
    pub spawner: FakeSpawner,
    pub timers: ManualTimers,
    pub audio: FakeAudio,
    pub bus: RecordingBus,
    pub projectiles: ProjectileLifecycleManager,
}

impl Rig {
    pub fn mount(
        &mut self,
        definition: WeaponDefinition,
        overlay: Option<RecordingVisual>,
    ) -> WeaponController<RecordingVisual> {
        WeaponController::mount(
            definition,
            overlay,
            self.projectiles.frame_cache_mut(),
            &self.registry,
            &mut self.bus,
        )
    }

    pub fn fire(
        &mut self,
        controller: &mut WeaponController<RecordingVisual>,
        now_ms: f64,
        host: &HostTransform,
    ) -> FireOutcome {
        self.advance_to(now_ms);
        let mut ports = WeaponPorts {
            spawner: &mut self.spawner,
            registry: &self.registry,
            timers: &mut self.timers,
            audio: &mut self.audio,
        };
        controller.try_fire(now_ms, host, &mut self.projectiles, &mut ports)
    }

    /// Advance time and run every timer that came due.
    pub fn advance_to(&mut self, now_ms: f64) {
        for task in self.timers.advance_to(now_ms) {
            self.projectiles.run_timer(task, &mut self.spawner);
        }
    }
}
