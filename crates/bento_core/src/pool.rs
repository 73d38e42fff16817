//! # Slot Pool
//!
//! Slot storage for objects that are created and retired constantly.
//!
//! Every slot carries a generation counter. Retiring an object bumps the
//! generation, so a handle that outlived its object can never reach the
//! object that later reuses the slot.

/// Handle to an object stored in a [`SlotPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotHandle {
    /// Index into the pool.
    index: u32,
    /// Generation of the slot when the handle was issued.
    generation: u32,
}

impl SlotHandle {
    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns the slot generation this handle refers to.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Packs the handle into a single `u64` (generation high, index low).
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// A pool of generational slots.
///
/// Capacity is reserved up front; inserting past it grows the pool instead
/// of failing, because a burst of overlapping sessions must never drop a
/// visual entity on the floor.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. It lives on the host's main thread.
///
/// # Example
///
/// ```rust
/// use bento_core::SlotPool;
///
/// let mut pool = SlotPool::with_capacity(4);
/// let handle = pool.insert("particle");
/// assert_eq!(pool.get(handle), Some(&"particle"));
///
/// pool.remove(handle);
/// let reused = pool.insert("another");
/// assert_eq!(pool.get(handle), None);
/// assert_eq!(pool.get(reused), Some(&"another"));
/// ```
#[derive(Debug)]
pub struct SlotPool<T> {
    /// The storage array.
    slots: Vec<Slot<T>>,
    /// Free list - indices of available slots.
    free_list: Vec<u32>,
    /// Number of occupied slots.
    len: usize,
}

impl<T> SlotPool<T> {
    /// Creates an empty pool with room for `capacity` objects.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut pool = Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::with_capacity(capacity),
            len: 0,
        };
        pool.reserve_slots(capacity);
        pool
    }

    fn reserve_slots(&mut self, additional: usize) {
        let start = self.slots.len();
        self.slots.extend((0..additional).map(|_| Slot {
            generation: 0,
            value: None,
        }));
        // Reverse so the lowest index is handed out first.
        let end = self.slots.len();
        self.free_list
            .extend((start..end).rev().filter_map(|i| u32::try_from(i).ok()));
    }

    /// Returns the number of slots currently reserved.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of stored objects.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing is stored.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores an object and returns its handle.
    pub fn insert(&mut self, value: T) -> SlotHandle {
        if self.free_list.is_empty() {
            let grow = self.slots.len().max(8);
            self.reserve_slots(grow);
        }

        let index = self
            .free_list
            .pop()
            .unwrap_or_else(|| unreachable_index(self.slots.len()));
        let slot = &mut self.slots[index as usize];
        slot.value = Some(value);
        self.len += 1;

        SlotHandle {
            index,
            generation: slot.generation,
        }
    }

    /// Removes and returns the object behind `handle`.
    ///
    /// Returns `None` if the handle is stale or was never issued.
    pub fn remove(&mut self, handle: SlotHandle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }

        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index);
        self.len -= 1;

        Some(value)
    }

    /// Returns true if `handle` still addresses a stored object.
    #[inline]
    #[must_use]
    pub fn contains(&self, handle: SlotHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Gets a reference to a stored object.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation == handle.generation {
            slot.value.as_ref()
        } else {
            None
        }
    }

    /// Gets a mutable reference to a stored object.
    #[inline]
    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation == handle.generation {
            slot.value.as_mut()
        } else {
            None
        }
    }

    /// Removes every object, retiring all outstanding handles.
    ///
    /// Reserved slots are kept.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            if let Ok(index) = u32::try_from(index) {
                self.free_list.push(index);
            }
        }
        self.len = 0;
    }

    /// Returns the handles of every stored object.
    #[must_use]
    pub fn handles(&self) -> Vec<SlotHandle> {
        self.iter().map(|(handle, _)| handle).collect()
    }

    /// Iterates over all stored objects.
    pub fn iter(&self) -> impl Iterator<Item = (SlotHandle, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let value = slot.value.as_ref()?;
            let index = u32::try_from(index).ok()?;
            Some((
                SlotHandle {
                    index,
                    generation: slot.generation,
                },
                value,
            ))
        })
    }

    /// Iterates mutably over all stored objects.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotHandle, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            let value = slot.value.as_mut()?;
            let index = u32::try_from(index).ok()?;
            Some((SlotHandle { index, generation }, value))
        })
    }
}

impl<T> Default for SlotPool<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

/// The free list is refilled right before popping, so this only runs if the
/// pool outgrew `u32` indices.
#[cold]
fn unreachable_index(len: usize) -> u32 {
    panic!("slot pool exceeded u32 index space ({len} slots)")
}
