//! Model lookup. Loading and GPU upload live behind [`ModelProvider`].

use rustc_hash::FxHashMap;

/// Opaque reference to a loaded model.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct ModelHandle(pub u32);

/// Resolves logical model names to handles.
pub trait ModelProvider {
    /// Handle for `name`, or `None` when no such model is known.
    fn resolve(&mut self, name: &str) -> Option<ModelHandle>;
    /// Gives back a handle obtained from [`resolve`](ModelProvider::resolve).
    fn release(&mut self, handle: ModelHandle);
}

#[derive(Debug, Clone)]
struct Slot {
    name: String,
    users: u32,
}

/// In-memory provider with per-model use counts.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    by_name: FxHashMap<String, ModelHandle>,
    slots: Vec<Slot>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry knowing the given model names.
    pub fn with_models<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut registry = Self::new();
        for name in names {
            registry.register(name);
        }
        registry
    }

    /// Makes `name` resolvable. Registering twice returns the same handle.
    pub fn register(&mut self, name: &str) -> ModelHandle {
        if let Some(&handle) = self.by_name.get(name) {
            return handle;
        }
        let handle = ModelHandle(self.slots.len() as u32);
        self.slots.push(Slot {
            name: name.to_string(),
            users: 0,
        });
        self.by_name.insert(name.to_string(), handle);
        handle
    }

    pub fn name(&self, handle: ModelHandle) -> Option<&str> {
        self.slots.get(handle.0 as usize).map(|s| s.name.as_str())
    }

    /// Outstanding resolves of `handle`.
    pub fn users(&self, handle: ModelHandle) -> u32 {
        self.slots.get(handle.0 as usize).map_or(0, |s| s.users)
    }
}

impl ModelProvider for ModelRegistry {
    fn resolve(&mut self, name: &str) -> Option<ModelHandle> {
        let handle = *self.by_name.get(name)?;
        if let Some(slot) = self.slots.get_mut(handle.0 as usize) {
            slot.users += 1;
        }
        Some(handle)
    }

    fn release(&mut self, handle: ModelHandle) {
        match self.slots.get_mut(handle.0 as usize) {
            Some(slot) if slot.users > 0 => slot.users -= 1,
            _ => tracing::warn!(?handle, "release of a model that is not in use"),
        }
    }
}
