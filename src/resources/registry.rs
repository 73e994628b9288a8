//! Registry of live effect instances.
//!
//! Every playing effect is registered here from construction until it is
//! disposed. The driver takes a [`snapshot`](AnimationRegistry::snapshot)
//! each frame and updates/draws the instances outside the registry lock, so
//! the lock is only ever held for an insert, a removal or the copy itself.
//!
//! Lock order: the registry lock is never held while locking an instance.
//! Instances lock the registry (through [`unregister`](AnimationRegistry::unregister))
//! while their own lock is held, which is therefore safe.

use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bevy_ecs::prelude::Resource;
use log::trace;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::components::animationinstance::AnimationInstance;
use crate::resources::audio::MapSound;

pub type AnimationId = u64;

/// Handle to a live instance, shared between the registry and its owner.
pub type SharedAnimation = Arc<Mutex<AnimationInstance>>;

#[derive(Debug, Default)]
pub struct AnimationRegistry {
    live: Mutex<FxHashMap<AnimationId, SharedAnimation>>,
    next_id: AtomicU64,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an id for an instance about to be registered.
    pub fn next_id(&self) -> AnimationId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn register(&self, id: AnimationId, instance: SharedAnimation) {
        self.live.lock().insert(id, instance);
        trace!("registered animation {}", id);
    }

    /// Remove `id` and release `sound`, both under the registry lock.
    ///
    /// Returns whether `id` was registered. The sound is stopped either way.
    pub fn unregister(&self, id: AnimationId, sound: Option<Box<dyn MapSound>>) -> bool {
        let removed = {
            let mut live = self.live.lock();
            if let Some(mut sound) = sound {
                sound.stop();
            }
            live.remove(&id)
        };
        // the removed handle may be the last one; drop it outside the lock
        let was_live = removed.is_some();
        drop(removed);
        if was_live {
            trace!("unregistered animation {}", id);
        }
        was_live
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        self.live.lock().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.live.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.lock().is_empty()
    }

    /// Copy of the live set, in creation order.
    pub fn snapshot(&self) -> Vec<SharedAnimation> {
        let mut entries: Vec<(AnimationId, SharedAnimation)> = {
            let live = self.live.lock();
            live.iter().map(|(id, a)| (*id, Arc::clone(a))).collect()
        };
        entries.sort_unstable_by_key(|(id, _)| *id);
        entries.into_iter().map(|(_, a)| a).collect()
    }

    /// Dispose every live instance. Returns how many were disposed.
    pub fn dispose_all(&self) -> usize {
        let all = self.snapshot();
        for animation in &all {
            animation.lock().dispose();
        }
        all.len()
    }
}

/// ECS resource giving systems access to the shared registry.
#[derive(Resource, Clone, Debug, Default)]
pub struct LiveAnimations(pub Arc<AnimationRegistry>);

impl LiveAnimations {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deref for LiveAnimations {
    type Target = Arc<AnimationRegistry>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
