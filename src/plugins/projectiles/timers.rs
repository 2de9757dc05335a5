//! One-shot expiry timers on the simulation clock.
//!
//! Tasks are never cancelled. A task whose projectile is already gone is a
//! no-op in the lifecycle manager.

use bevy::prelude::*;

use super::components::Projectiles;
use super::pool::BulletBodies;
use crate::common::clock::elapsed_ms;
use crate::weapons::{TimerService, TimerTask};

#[derive(Resource, Debug, Default)]
pub struct ExpiryTimers {
    now_ms: f64,
    pending: Vec<(f64, TimerTask)>,
}

impl ExpiryTimers {
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock to `now_ms` and take every task due by then, earliest
    /// first. Ties keep scheduling order.
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<TimerTask> {
        self.now_ms = self.now_ms.max(now_ms);
        self.pending.sort_by(|a, b| a.0.total_cmp(&b.0));
        let split = self.pending.partition_point(|(due, _)| *due <= self.now_ms);
        self.pending.drain(..split).map(|(_, task)| task).collect()
    }
}

impl TimerService for ExpiryTimers {
    fn schedule_once(&mut self, delay_ms: f64, task: TimerTask) {
        self.pending.push((self.now_ms + delay_ms.max(0.0), task));
    }
}

pub fn run_expiry_timers(
    time: Res<Time>,
    mut timers: ResMut<ExpiryTimers>,
    mut projectiles: ResMut<Projectiles>,
    mut bodies: BulletBodies,
) {
    for task in timers.advance_to(elapsed_ms(&time)) {
        projectiles.run_timer(task, &mut bodies);
    }
}
