//! Sound bank: "play sound by key".
//!
//! The bank hands out stable handles per key and turns plays into `SfxCue`
//! messages at the end of the frame. `SfxCue` is the hand-off point: this
//! crate ships no audio assets and installs no playback backend, so the only
//! reader here is `log_sfx_cues`. An app with a mixer adds its own reader.

use bevy::platform::collections::{HashMap, HashSet};
use bevy::prelude::*;

use crate::common::config::Arsenal;
use crate::weapons::{AudioService, SoundHandle};

/// A sound cue to be played this frame.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct SfxCue {
    pub key: String,
}

#[derive(Resource, Debug, Default)]
pub struct SoundBank {
    known: HashSet<String>,
    handles: HashMap<String, SoundHandle>,
    keys: Vec<String>,
    queued: Vec<SoundHandle>,
}

impl SoundBank {
    pub fn from_arsenal(arsenal: &Arsenal) -> Self {
        let mut bank = Self::default();
        for key in &arsenal.sounds {
            bank.register(key);
        }
        bank
    }

    pub fn register(&mut self, key: &str) {
        self.known.insert(key.to_owned());
    }

    /// Number of handles created so far.
    #[inline]
    pub fn handle_count(&self) -> usize {
        self.keys.len()
    }

    fn drain_queued(&mut self) -> Vec<String> {
        let keys = &self.keys;
        self.queued
            .drain(..)
            .filter_map(|handle| keys.get(handle.0 as usize).cloned())
            .collect()
    }
}

impl AudioService for SoundBank {
    fn get_or_create(&mut self, key: &str) -> Option<SoundHandle> {
        if let Some(handle) = self.handles.get(key) {
            return Some(*handle);
        }
        if !self.known.contains(key) {
            return None;
        }

        let handle = SoundHandle(self.keys.len() as u32);
        self.keys.push(key.to_owned());
        self.handles.insert(key.to_owned(), handle);
        Some(handle)
    }

    fn play(&mut self, handle: SoundHandle) {
        self.queued.push(handle);
    }
}

/// Flush queued plays as `SfxCue` messages.
pub fn emit_sfx_cues(mut bank: ResMut<SoundBank>, mut writer: MessageWriter<SfxCue>) {
    for key in bank.drain_queued() {
        writer.write(SfxCue { key });
    }
}

/// Default cue reader. Records each cue in the log.
pub fn log_sfx_cues(mut cues: MessageReader<SfxCue>) {
    for cue in cues.read() {
        debug!("sfx cue '{}'", cue.key);
    }
}
