//! Projectiles plugin: the ECS side of the projectile lifecycle.
//!
//! # Data flow
//! ```text
//!   Update
//!┌──────────────────────────────────────────────────────────────────────┐
//!│ (A) run_expiry_timers                                                │
//!│     - ExpiryTimers hands back due tasks                              │
//!│     - Projectiles (manager) expires ids → BulletBodies::destroy      │
//!│                                                                      │
//!│ (B) weapons plugin fires                                             │
//!│     - Projectiles::spawn → BulletBodies::create_physics_object       │
//!│     - ExpiryTimers::schedule_once(ttl)                               │
//!└──────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate
//!┌──────────────────────────────────────────────────────────────────────┐
//!│ (C) Avian emits CollisionStart                                       │
//!│ (D) mark_projectile_hits: wall/target → BulletState::PendingReturn   │
//!│ (E) commit_external_deactivations: body → id → manager.deactivate    │
//!└──────────────────────────────────────────────────────────────────────┘
//!
//!   PostUpdate: publish_retirements (ProjectileRetired messages)
//! ```
//!
//! `BulletBodies` is the only writer of pooled body components and the
//! manager is the only caller of it, so a body is always in step with its
//! projectile record.
//!
//! Timers keep running outside `InGame`: projectiles outlive their weapons.

pub mod collision;
pub mod commit;
pub mod components;
pub mod messages;
pub mod pool;
pub mod timers;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub use components::{BulletState, PooledBullet, Projectiles};
pub use messages::{ProjectileImpact, ProjectileRetired};
pub use pool::{BulletBodies, BulletPool};
pub use timers::ExpiryTimers;

/// Projectile work that must see a settled clock before weapons fire.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectileTimers;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        let capacity = app.world().resource::<Tunables>().projectile_pool_capacity;

        app.insert_resource(pool::BulletPool::new(capacity))
            .init_resource::<Projectiles>()
            .init_resource::<ExpiryTimers>()
            .add_message::<ProjectileRetired>()
            .add_message::<ProjectileImpact>()
            .add_systems(Startup, pool::init_bullet_pool);

        app.add_systems(Update, timers::run_expiry_timers.in_set(ProjectileTimers))
            .add_systems(PostUpdate, messages::publish_retirements);

        app.add_systems(
            FixedPostUpdate,
            (
                collision::mark_projectile_hits,
                commit::commit_external_deactivations,
            )
                .chain()
                .after(CollisionEventSystems),
        );
    }
}
