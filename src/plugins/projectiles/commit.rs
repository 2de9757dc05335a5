//! Return commit: bodies marked `PendingReturn` are deactivated through the
//! lifecycle manager, which in turn destroys (recycles) the body.
//!
//! The projectile's own expiry timer is still scheduled and will find the
//! slot already released.

use bevy::prelude::*;

use super::components::Projectiles;
use super::pool::{handle_of, BulletBodies};
use crate::weapons::Spawner;

pub fn commit_external_deactivations(mut projectiles: ResMut<Projectiles>, mut bodies: BulletBodies) {
    for e in bodies.pending_returns() {
        let body = handle_of(e);
        match projectiles.by_body(body) {
            Some(id) => {
                projectiles.deactivate(id, &mut bodies);
            }
            None => {
                debug!("pending body {e:?} has no live projectile; recycling directly");
                bodies.destroy(body);
            }
        }
    }
}
