//! Visual + audio resources the weapon core looks things up in.
//!
//! Both are built once from the `Arsenal` config when the plugin is added, so
//! the core plugin must be registered first.

use bevy::prelude::*;

use crate::common::config::Arsenal;

pub mod audio;
pub mod catalog;
pub mod overlay;

pub use audio::{SfxCue, SoundBank};
pub use catalog::SpriteCatalog;
pub use overlay::{OverlaySprite, SpriteVisual, WeaponOverlay};

pub fn plugin(app: &mut App) {
    let arsenal = app.world().resource::<Arsenal>().clone();
    app.insert_resource(SpriteCatalog::from_arsenal(&arsenal))
        .insert_resource(SoundBank::from_arsenal(&arsenal))
        .add_message::<SfxCue>()
        .add_systems(Last, (audio::emit_sfx_cues, audio::log_sfx_cues).chain());
}
