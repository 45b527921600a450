//! Generation-checked handle table for objects owned across the C boundary.
//!
//! A handle packs a slot index (upper 32 bits) and the slot's generation
//! (lower 32 bits). Removing an object bumps the generation, so a handle
//! kept by the host after destroy resolves to nothing instead of to
//! whatever later reuses the slot.

fn pack(slot: u32, generation: u32) -> u64 {
    (u64::from(slot) << 32) | u64::from(generation)
}

fn unpack(handle: u64) -> (usize, u32) {
    ((handle >> 32) as usize, handle as u32)
}

enum Entry<T> {
    Live { generation: u32, value: T },
    Free { generation: u32 },
    /// Generation space exhausted; never handed out again.
    Retired,
}

/// Objects addressed by `u64` handles.
pub(crate) struct HandleTable<T> {
    entries: Vec<Entry<T>>,
    vacant: Vec<u32>,
}

impl<T> HandleTable<T> {
    /// An empty table, usable in a `static`.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            vacant: Vec::new(),
        }
    }

    /// Store `value` and return its handle.
    pub fn insert(&mut self, value: T) -> u64 {
        while let Some(slot) = self.vacant.pop() {
            if let Some(entry) = self.entries.get_mut(slot as usize) {
                if let Entry::Free { generation } = *entry {
                    *entry = Entry::Live { generation, value };
                    return pack(slot, generation);
                }
            }
        }
        let slot = self.entries.len() as u32;
        self.entries.push(Entry::Live {
            generation: 0,
            value,
        });
        pack(slot, 0)
    }

    /// The object behind `handle`, if it is still live.
    pub fn get(&self, handle: u64) -> Option<&T> {
        let (slot, expected) = unpack(handle);
        match self.entries.get(slot)? {
            Entry::Live { generation, value } if *generation == expected => Some(value),
            _ => None,
        }
    }

    /// Remove and return the object behind `handle`.
    ///
    /// Returns `None` for stale or unknown handles, so a double destroy
    /// is harmless.
    pub fn remove(&mut self, handle: u64) -> Option<T> {
        let (slot, expected) = unpack(handle);
        let entry = self.entries.get_mut(slot)?;
        match entry {
            Entry::Live { generation, .. } if *generation == expected => {}
            _ => return None,
        }
        let next = match expected.checked_add(1) {
            Some(generation) => Entry::Free { generation },
            None => Entry::Retired,
        };
        let reusable = matches!(next, Entry::Free { .. });
        match std::mem::replace(entry, next) {
            Entry::Live { value, .. } => {
                if reusable {
                    self.vacant.push(slot as u32);
                }
                Some(value)
            }
            _ => None,
        }
    }

    /// Number of live objects.
    #[cfg(test)]
    pub fn live(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::Live { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get() {
        let mut table = HandleTable::new();
        let h = table.insert("bridge");
        assert_eq!(table.get(h), Some(&"bridge"));
        assert_eq!(table.live(), 1);
    }

    #[test]
    fn removed_handle_goes_stale() {
        let mut table = HandleTable::new();
        let h = table.insert(7u8);
        assert_eq!(table.remove(h), Some(7));
        assert_eq!(table.get(h), None);
        assert_eq!(table.remove(h), None);
        assert_eq!(table.live(), 0);
    }

    #[test]
    fn reused_slot_gets_new_generation() {
        let mut table = HandleTable::new();
        let old = table.insert(1);
        table.remove(old);
        let new = table.insert(2);
        assert_eq!(unpack(old).0, unpack(new).0);
        assert_ne!(old, new);
        assert_eq!(table.get(old), None);
        assert_eq!(table.get(new), Some(&2));
    }

    #[test]
    fn unknown_slot_is_none() {
        let table: HandleTable<u8> = HandleTable::new();
        assert_eq!(table.get(pack(12, 0)), None);
    }

    #[test]
    fn exhausted_slot_is_retired() {
        let mut table = HandleTable::new();
        let h = table.insert(1);
        table.remove(h);
        table.entries[0] = Entry::Free {
            generation: u32::MAX,
        };
        let last = table.insert(2);
        assert_eq!(unpack(last), (0, u32::MAX));
        assert_eq!(table.remove(last), Some(2));
        assert!(matches!(table.entries[0], Entry::Retired));
        assert!(!table.vacant.contains(&0));

        let fresh = table.insert(3);
        assert_eq!(unpack(fresh).0, 1);
        assert_eq!(table.get(pack(0, 0)), None);
    }
}
