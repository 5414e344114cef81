//! The generational arena.

use std::marker::PhantomData;

use patchwork_core::EntityKey;

use crate::error::ArenaError;

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot storage addressed by generation-checked keys.
///
/// Keys are issued by [`insert`](Self::insert). After
/// [`remove`](Self::remove) or [`clear`](Self::clear), every key issued
/// for the vacated slots is stale and all lookups through it return
/// `None`, even once the slot is reused.
#[derive(Clone, Debug)]
pub struct Arena<K, T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
    _key: PhantomData<fn() -> K>,
}

impl<K: EntityKey, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EntityKey, T> Arena<K, T> {
    /// An empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            _key: PhantomData,
        }
    }

    /// An empty arena with room for `capacity` entities before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
            _key: PhantomData,
        }
    }

    /// Store `value` and return its key.
    ///
    /// Vacant slots are reused most-recently-freed first.
    pub fn insert(&mut self, value: T) -> Result<K, ArenaError> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            self.len += 1;
            return Ok(K::from_raw(index, slot.generation));
        }
        let index = u32::try_from(self.slots.len()).map_err(|_| ArenaError::CapacityExceeded {
            capacity: self.slots.len(),
        })?;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        self.len += 1;
        Ok(K::from_raw(index, 0))
    }

    /// Remove and return the entity behind `key`.
    ///
    /// Returns `None` for a stale or unknown key.
    pub fn remove(&mut self, key: K) -> Option<T> {
        let slot = self.slots.get_mut(key.index() as usize)?;
        if slot.generation != key.generation() {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(key.index());
        self.len -= 1;
        Some(value)
    }

    /// Shared access to a live entity.
    pub fn get(&self, key: K) -> Option<&T> {
        let slot = self.slots.get(key.index() as usize)?;
        if slot.generation != key.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    /// Exclusive access to a live entity.
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        let slot = self.slots.get_mut(key.index() as usize)?;
        if slot.generation != key.generation() {
            return None;
        }
        slot.value.as_mut()
    }

    /// Whether `key` refers to a live entity.
    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the arena holds no live entities.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live entities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.value
                .as_ref()
                .map(|v| (K::from_raw(i as u32, slot.generation), v))
        })
    }

    /// Live entities in slot order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut T)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(i, slot)| {
            let generation = slot.generation;
            slot.value
                .as_mut()
                .map(|v| (K::from_raw(i as u32, generation), v))
        })
    }

    /// Keys of live entities in slot order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Remove every entity, invalidating all outstanding keys.
    pub fn clear(&mut self) {
        self.free.clear();
        for (i, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(i as u32);
        }
        self.len = 0;
    }
}
