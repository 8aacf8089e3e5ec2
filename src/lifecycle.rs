//! Insertion-effect scheduling.
//!
//! Rendering a styled component does not touch the registry. It schedules
//! effects keyed by component instance; a [`Lifecycle`] runs them at commit
//! time, skips effects whose dependencies are unchanged, and runs each
//! cleanup exactly once, either before the effect is replaced or when the
//! instance unmounts.

use std::collections::BTreeMap;

/// Teardown returned by an effect.
pub type Cleanup = Box<dyn FnOnce()>;

/// Deferred side effect.
pub type Effect = Box<dyn FnOnce() -> Option<Cleanup>>;

/// A mounted component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

/// Identifies one effect of one component within one instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectKey {
    pub instance: InstanceId,
    pub component: String,
    pub slot: u8,
}

impl EffectKey {
    pub fn new(instance: InstanceId, component: impl Into<String>, slot: u8) -> Self {
        Self {
            instance,
            component: component.into(),
            slot,
        }
    }
}

/// Receives effects during render.
pub trait EffectScheduler {
    /// Schedule `effect` to run at commit unless `deps` match the mounted
    /// effect under `key`.
    fn insertion_effect(&mut self, key: EffectKey, deps: String, effect: Effect);
}

struct MountedEffect {
    deps: String,
    cleanup: Option<Cleanup>,
}

/// Explicit lifecycle manager for rendering outside a UI framework.
#[derive(Default)]
pub struct Lifecycle {
    next_instance: u64,
    mounted: BTreeMap<EffectKey, MountedEffect>,
    pending: Vec<(EffectKey, String, Effect)>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new instance id.
    pub fn create_instance(&mut self) -> InstanceId {
        self.next_instance += 1;
        InstanceId(self.next_instance)
    }

    /// Run pending effects in scheduling order.
    pub fn commit(&mut self) {
        for (key, deps, effect) in std::mem::take(&mut self.pending) {
            if let Some(mounted) = self.mounted.get(&key)
                && mounted.deps == deps
            {
                continue;
            }

            if let Some(cleanup) = self.mounted.remove(&key).and_then(|m| m.cleanup) {
                cleanup();
            }

            let cleanup = effect();
            self.mounted.insert(key, MountedEffect { deps, cleanup });
        }
    }

    /// Run the cleanups of every effect owned by `instance`.
    pub fn unmount(&mut self, instance: InstanceId) {
        self.pending.retain(|(key, _, _)| key.instance != instance);

        let keys: Vec<EffectKey> = self
            .mounted
            .keys()
            .filter(|key| key.instance == instance)
            .cloned()
            .collect();

        for key in keys {
            if let Some(cleanup) = self.mounted.remove(&key).and_then(|m| m.cleanup) {
                cleanup();
            }
        }
    }

    /// Unmount everything.
    pub fn unmount_all(&mut self) {
        self.pending.clear();
        for (_, mounted) in std::mem::take(&mut self.mounted) {
            if let Some(cleanup) = mounted.cleanup {
                cleanup();
            }
        }
    }

    pub fn mounted_effects(&self) -> usize {
        self.mounted.len()
    }

    pub fn pending_effects(&self) -> usize {
        self.pending.len()
    }
}

impl EffectScheduler for Lifecycle {
    fn insertion_effect(&mut self, key: EffectKey, deps: String, effect: Effect) {
        self.pending.push((key, deps, effect));
    }
}

impl std::fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lifecycle")
            .field("mounted", &self.mounted.keys().collect::<Vec<_>>())
            .field("pending", &self.pending.len())
            .finish()
    }
}
