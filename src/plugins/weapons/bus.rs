//! Weapon event hub.
//!
//! Subscriptions are just ids in a table; the dispatching systems check the
//! table before calling into a controller.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::weapons::{BusEvent, EventBus, SubscriptionId};

#[derive(Resource, Debug, Default)]
pub struct WeaponEvents {
    next: u64,
    live: HashMap<SubscriptionId, BusEvent>,
}

impl WeaponEvents {
    #[inline]
    pub fn is_live(&self, id: SubscriptionId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn live_count(&self, event: BusEvent) -> usize {
        self.live.values().filter(|e| **e == event).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl EventBus for WeaponEvents {
    fn subscribe(&mut self, event: BusEvent) -> SubscriptionId {
        self.next += 1;
        let id = SubscriptionId(self.next);
        self.live.insert(id, event);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        if self.live.remove(&id).is_none() {
            debug!("unsubscribe of unknown {id:?}");
        }
    }
}
