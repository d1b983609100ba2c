//! Material registry for deduplicating shading handles
//!
//! Every descriptor resolves to exactly one handle for the lifetime of the
//! registry. The registry is owned by the compiler run and passed by reference
//! to whatever needs materials; there is no global cache.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::descriptor::DescriptorKey;
use super::{Material, MaterialDescriptor, MaterialError, MaterialHandle, MaterialId};

/// Thread-safe, memoizing map from descriptor to shading handle
pub struct MaterialRegistry {
    /// Cache storage and id allocation, guarded together so get-or-insert is atomic
    inner: RwLock<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    cache: HashMap<DescriptorKey, MaterialHandle>,
    /// Handles in resolve order
    ordered: Vec<MaterialHandle>,
}

impl MaterialRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryState::default()),
        }
    }

    /// Resolve a descriptor to its shared handle, building it on first use
    ///
    /// # Errors
    /// Returns a `MaterialError` when the descriptor is outside the legal
    /// parameter space; nothing is cached in that case.
    pub fn resolve(&self, descriptor: &MaterialDescriptor) -> Result<MaterialHandle, MaterialError> {
        descriptor.validate()?;
        let key = descriptor.key();

        {
            let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(handle) = state.cache.get(&key) {
                log::trace!("Material cache hit: {} -> {:?}", descriptor.kind, handle.id());
                return Ok(handle.clone());
            }
        }

        // Another thread may have inserted between the read and write lock;
        // re-check under the write lock so each key is built once.
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = state.cache.get(&key) {
            return Ok(handle.clone());
        }

        let id = MaterialId(u32::try_from(state.ordered.len()).unwrap_or(u32::MAX));
        let handle = MaterialHandle::new(Material::build(id, *descriptor));
        state.cache.insert(key, handle.clone());
        state.ordered.push(handle.clone());
        log::trace!("Material cache miss: built {} material {:?}", descriptor.kind, id);

        Ok(handle)
    }

    /// Get a cached handle without building
    pub fn get_cached(&self, descriptor: &MaterialDescriptor) -> Option<MaterialHandle> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        state.cache.get(&descriptor.key()).cloned()
    }

    /// Check if a descriptor is cached
    pub fn is_cached(&self, descriptor: &MaterialDescriptor) -> bool {
        self.get_cached(descriptor).is_some()
    }

    /// All handles in the order they were first resolved
    pub fn materials(&self) -> Vec<MaterialHandle> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        state.ordered.clone()
    }

    /// Get the number of cached materials
    pub fn len(&self) -> usize {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        state.ordered.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}
