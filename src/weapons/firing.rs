//! Per-weapon firing state: the rate gate and the hold-to-fire animation mode.
//!
//! The gate and the animation mode are independent. Holding the trigger changes
//! how the weapon *looks*; only elapsed time decides whether it *fires*.

/// Lower bound for the fire-rate multiplier. Stored values never go below it.
pub const MIN_FIRE_RATE_MULTIPLIER: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationMode {
    #[default]
    Idle,
    Firing,
}

#[derive(Debug, Clone)]
pub struct WeaponRuntimeState {
    last_fired_at_ms: Option<f64>,
    fire_rate_multiplier: f64,
    animation_mode: AnimationMode,
}

impl Default for WeaponRuntimeState {
    fn default() -> Self {
        Self {
            last_fired_at_ms: None,
            fire_rate_multiplier: 1.0,
            animation_mode: AnimationMode::Idle,
        }
    }
}

impl WeaponRuntimeState {
    /// `None` until the first successful shot.
    #[inline]
    pub fn last_fired_at_ms(&self) -> Option<f64> {
        self.last_fired_at_ms
    }

    #[inline]
    pub fn fire_rate_multiplier(&self) -> f64 {
        self.fire_rate_multiplier
    }

    #[inline]
    pub fn animation_mode(&self) -> AnimationMode {
        self.animation_mode
    }

    /// Clamp on write. `f64::max` discards NaN, so NaN also lands on the floor.
    pub fn set_fire_rate_multiplier(&mut self, multiplier: f64) {
        self.fire_rate_multiplier = multiplier.max(MIN_FIRE_RATE_MULTIPLIER);
    }

    #[inline]
    pub fn effective_interval_ms(&self, fire_rate_ms: f64) -> f64 {
        fire_rate_ms / self.fire_rate_multiplier.max(MIN_FIRE_RATE_MULTIPLIER)
    }

    /// Pure check; calling it any number of times changes nothing.
    pub fn can_fire(&self, now_ms: f64, fire_rate_ms: f64) -> bool {
        match self.last_fired_at_ms {
            None => true,
            Some(last) => now_ms > last + self.effective_interval_ms(fire_rate_ms),
        }
    }

    /// Run `fire` and commit `now_ms` if the gate is open.
    ///
    /// The timestamp is written after `fire` returns, whatever `fire` managed to
    /// spawn. A closed gate leaves the state untouched and never calls `fire`.
    pub fn try_fire(&mut self, now_ms: f64, fire_rate_ms: f64, fire: impl FnOnce()) -> bool {
        if !self.can_fire(now_ms, fire_rate_ms) {
            return false;
        }
        fire();
        self.last_fired_at_ms = Some(now_ms);
        true
    }

    /// Idle -> Firing, only when a firing animation is available.
    pub fn start_firing(&mut self, firing_animation_available: bool) -> bool {
        if firing_animation_available {
            self.animation_mode = AnimationMode::Firing;
        }
        self.animation_mode == AnimationMode::Firing
    }

    pub fn stop_firing(&mut self) {
        self.animation_mode = AnimationMode::Idle;
    }
}
