//! Fixed-capacity entity pool.
//!
//! Slots are reused in place: `acquire` takes the first inactive slot,
//! grows the storage while below capacity, and otherwise reports the pool
//! as full. A full pool drops the spawn; nothing is queued.

use danmaku_core::components::{Bullet, Item, Particle};

/// An element that can live in an `EntityPool`.
pub trait Poolable: Default {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

impl Poolable for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Poolable for Item {
    fn is_active(&self) -> bool {
        self.active
    }
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Poolable for Particle {
    fn is_active(&self) -> bool {
        self.active
    }
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    slots: Vec<T>,
    capacity: usize,
}

impl<T: Poolable> EntityPool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Index of a slot free for writing, or None when every slot up to
    /// capacity is active. The slot is not activated.
    pub fn acquire(&mut self) -> Option<usize> {
        if let Some(index) = self.slots.iter().position(|slot| !slot.is_active()) {
            return Some(index);
        }
        if self.slots.len() < self.capacity {
            self.slots.push(T::default());
            return Some(self.slots.len() - 1);
        }
        None
    }

    /// Write `value` into a free slot and activate it.
    pub fn spawn(&mut self, mut value: T) -> Option<usize> {
        let index = self.acquire()?;
        value.set_active(true);
        self.slots[index] = value;
        Some(index)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Active slots in storage order, with their indices.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| slot.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_active()).count()
    }

    /// Number of slots allocated so far (active or not).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Deactivate every slot. Safe to call repeatedly.
    pub fn deactivate_all(&mut self) {
        for slot in &mut self.slots {
            slot.set_active(false);
        }
    }
}
