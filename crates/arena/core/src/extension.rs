//! Typed per-champion extension state.
//!
//! Champion-specific runtime counters (hits landed, stacks built, passive
//! thresholds crossed) live here as content-declared types keyed by
//! champion id, one slot per type. Content defines a struct per champion
//! schema instead of hanging dynamic properties off the entity.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::types::ChampionId;

/// One typed slot per `(champion, type)` pair.
#[derive(Default)]
pub struct ExtensionStore {
    slots: HashMap<(ChampionId, TypeId), Box<dyn Any + Send + Sync>>,
}

impl ExtensionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the slot of type `T` for `id`, if one was ever written.
    pub fn get<T: Any + Send + Sync>(&self, id: ChampionId) -> Option<&T> {
        self.slots
            .get(&(id, TypeId::of::<T>()))
            .and_then(|slot| slot.downcast_ref())
    }

    /// Mutable access to the slot of type `T` for `id`, created from
    /// `Default` on first touch.
    pub fn entry<T: Any + Default + Send + Sync>(&mut self, id: ChampionId) -> &mut T {
        self.slots
            .entry((id, TypeId::of::<T>()))
            .or_insert_with(|| Box::new(T::default()))
            .downcast_mut()
            .unwrap_or_else(|| unreachable!("slot keyed by TypeId holds that type"))
    }

    /// Drop the slot of type `T` for `id`.
    pub fn remove<T: Any + Send + Sync>(&mut self, id: ChampionId) {
        self.slots.remove(&(id, TypeId::of::<T>()));
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl std::fmt::Debug for ExtensionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionStore")
            .field("slots", &self.slots.len())
            .finish()
    }
}
