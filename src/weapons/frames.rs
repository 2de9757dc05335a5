//! Frame and animation resolution against the resource registry.

use bevy::platform::collections::HashMap;

use super::ports::{FrameId, ResourceRegistry};

/// Name registries use for a texture's whole-image frame. Never a usable frame.
pub const BASE_FRAME_NAME: &str = "__BASE";

/// First usable frame per resource key, resolved once per key.
#[derive(Debug, Default)]
pub struct FirstFrameCache {
    resolved: HashMap<String, FrameId>,
}

impl FirstFrameCache {
    pub fn resolve(&mut self, registry: &dyn ResourceRegistry, resource_key: &str) -> FrameId {
        if let Some(frame) = self.resolved.get(resource_key) {
            return frame.clone();
        }

        let frame = registry
            .list_frame_names(resource_key)
            .into_iter()
            .find(|name| name != BASE_FRAME_NAME)
            .map(FrameId::Named)
            .unwrap_or_default();

        self.resolved.insert(resource_key.to_owned(), frame.clone());
        frame
    }

    #[inline]
    pub fn get(&self, resource_key: &str) -> Option<&FrameId> {
        self.resolved.get(resource_key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// Conventional animation names for a projectile key, highest priority first.
pub fn animation_candidates(resource_key: &str) -> [String; 3] {
    [
        format!("{resource_key}_idle"),
        format!("{resource_key}_loop"),
        format!("{resource_key}_anim"),
    ]
}

/// Pick the animation a projectile should loop.
///
/// Conventional candidates win in order; otherwise the first registered
/// animation whose name contains the key. `None` means "show a still frame".
pub fn resolve_projectile_animation(
    registry: &dyn ResourceRegistry,
    resource_key: &str,
) -> Option<String> {
    // An empty key would substring-match every animation.
    if resource_key.is_empty() {
        return None;
    }

    animation_candidates(resource_key)
        .into_iter()
        .find(|name| registry.exists(name))
        .or_else(|| {
            registry
                .list_animation_names()
                .into_iter()
                .find(|name| name.contains(resource_key))
        })
}
