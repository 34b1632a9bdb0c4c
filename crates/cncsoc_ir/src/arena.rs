//! Dense, ID-indexed storage for graph entities.
//!
//! Entities are only ever appended, so an ID handed out by [`Arena::alloc`]
//! stays valid for the lifetime of the arena.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Opaque ID types usable as arena keys.
pub trait ArenaId: Copy {
    /// Creates an ID from a raw index.
    fn from_raw(index: u32) -> Self;

    /// Returns the raw index.
    fn as_raw(self) -> u32;
}

/// An append-only vector addressed by typed IDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arena<I: ArenaId, T> {
    items: Vec<T>,
    #[serde(skip)]
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Returns the ID the next [`alloc`](Self::alloc) will hand out.
    pub fn next_id(&self) -> I {
        I::from_raw(self.items.len() as u32)
    }

    /// Appends an item and returns its ID.
    pub fn alloc(&mut self, item: T) -> I {
        let id = self.next_id();
        self.items.push(item);
        id
    }

    /// Returns the item with the given ID, or `None` for a foreign ID.
    pub fn try_get(&self, id: I) -> Option<&T> {
        self.items.get(id.as_raw() as usize)
    }

    /// Returns the item with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID was not allocated by this arena.
    pub fn get(&self, id: I) -> &T {
        &self.items[id.as_raw() as usize]
    }

    /// Returns the item with the given ID mutably.
    ///
    /// # Panics
    ///
    /// Panics if the ID was not allocated by this arena.
    pub fn get_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.as_raw() as usize]
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been allocated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over `(ID, &T)` in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }

    /// Iterates over items in allocation order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Returns the ID of the first item matching `pred`.
    pub fn position(&self, mut pred: impl FnMut(&T) -> bool) -> Option<I> {
        self.items
            .iter()
            .position(|item| pred(item))
            .map(|i| I::from_raw(i as u32))
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        self.get(id)
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        self.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{PadId, SignalId};

    #[test]
    fn alloc_hands_out_sequential_ids() {
        let mut arena: Arena<SignalId, &str> = Arena::new();
        assert_eq!(arena.next_id(), SignalId::from_raw(0));
        let a = arena.alloc("sys_clk");
        let b = arena.alloc("sys_rst");
        assert_eq!(a.as_raw(), 0);
        assert_eq!(b.as_raw(), 1);
        assert_eq!(arena[b], "sys_rst");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn get_mut_modifies() {
        let mut arena: Arena<PadId, u32> = Arena::new();
        let id = arena.alloc(1);
        arena[id] += 1;
        assert_eq!(*arena.get(id), 2);
    }

    #[test]
    fn try_get_foreign_id() {
        let arena: Arena<PadId, u32> = Arena::new();
        assert!(arena.is_empty());
        assert!(arena.try_get(PadId::from_raw(3)).is_none());
    }

    #[test]
    fn position_finds_first_match() {
        let mut arena: Arena<SignalId, &str> = Arena::new();
        arena.alloc("a");
        arena.alloc("b");
        arena.alloc("b");
        assert_eq!(arena.position(|s| *s == "b"), Some(SignalId::from_raw(1)));
        assert_eq!(arena.position(|s| *s == "c"), None);
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut arena: Arena<SignalId, u32> = Arena::new();
        arena.alloc(7);
        arena.alloc(9);
        assert_eq!(serde_json::to_string(&arena).unwrap(), "[7,9]");
    }
}
