use crate::error::Error;
use crate::table::Table;
use parking_lot::{RwLock, RwLockReadGuard, RwLockUpgradableReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// A swappable reference to a shared table.
///
/// Loads clone the `Arc` and drop the lock straight away, so a snapshot
/// keeps its table alive without holding the lock. A load still waits for a
/// fast-path insert in progress, which includes the full copy made when the
/// table being written is shared.
pub(crate) struct Slot<T> {
    table: RwLock<Arc<T>>,
}

impl<T> Slot<T> {
    pub fn new(table: T) -> Self {
        Self {
            table: RwLock::new(Arc::new(table)),
        }
    }

    /// Take a shared handle to whatever the slot currently holds.
    #[inline]
    pub fn load(&self) -> Arc<T> {
        self.table.read().clone()
    }

    /// Borrow the table without taking a handle on it, so a following write
    /// does not have to copy.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, Arc<T>> {
        self.table.read()
    }

    /// Exclusive access for a single in-place write.
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, Arc<T>> {
        self.table.write()
    }

    /// Shared access that excludes writers and can later be upgraded for a swap.
    #[inline]
    pub fn upgradable_read(&self) -> RwLockUpgradableReadGuard<'_, Arc<T>> {
        self.table.upgradable_read()
    }
}

/// Get a mutable table out of `slot`, copying it first if a snapshot still
/// shares it.
pub(crate) fn make_unique<K, V, T>(slot: &mut Arc<T>) -> Result<&mut T, Error>
where
    T: Table<K, V>,
{
    if Arc::get_mut(slot).is_none() {
        let shared: &T = slot;
        let mut copy = T::default();
        copy.try_refill(shared, shared.bucket_count())?;
        *slot = Arc::new(copy);
    }
    // Unique at this point, so no clone happens.
    Ok(Arc::make_mut(slot))
}

/// Get the scratch table out of `slot` for a refill. Contents are not kept,
/// so a shared table is replaced by an empty one instead of copied.
pub(crate) fn make_scratch<K, V, T>(slot: &mut Arc<T>) -> &mut T
where
    T: Table<K, V>,
{
    if Arc::get_mut(slot).is_none() {
        *slot = Arc::new(T::default());
    }
    Arc::make_mut(slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::DefaultTable;

    #[test]
    fn test_load_shares_the_same_table() {
        let slot = Slot::new(DefaultTable::<u32, u32>::default());
        let a = slot.load();
        let b = slot.load();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_make_unique_copies_shared_table() {
        let slot = Slot::new(DefaultTable::<u32, u32>::try_with_buckets(16).unwrap());
        let held = slot.load();

        {
            let mut guard = slot.write();
            let table = make_unique::<u32, u32, _>(&mut guard).unwrap();
            Table::insert(table, 1, 10);
        }

        assert!(Table::is_empty(&*held));
        let current = slot.load();
        assert!(!Arc::ptr_eq(&held, &current));
        assert_eq!(Table::get(&*current, &1), Some(&10));
        assert_eq!(Table::bucket_count(&*current), 16);
    }

    #[test]
    fn test_make_unique_writes_in_place_when_unshared() {
        let slot = Slot::new(DefaultTable::<u32, u32>::default());
        let before = Arc::as_ptr(&slot.load());

        {
            let mut guard = slot.write();
            Table::insert(make_unique::<u32, u32, _>(&mut guard).unwrap(), 1, 10);
        }

        assert_eq!(Arc::as_ptr(&slot.load()), before);
    }

    #[test]
    fn test_make_scratch_drops_shared_contents() {
        let mut table = DefaultTable::<u32, u32>::default();
        Table::insert(&mut table, 1, 1);
        let mut slot = Arc::new(table);
        let held = Arc::clone(&slot);

        let scratch = make_scratch::<u32, u32, _>(&mut slot);
        assert!(Table::is_empty(scratch));
        assert_eq!(Table::len(&*held), 1);
    }
}
