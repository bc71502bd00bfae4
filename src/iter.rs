use crate::table::Table;

/// Iterator over the entries of a [`Snapshot`](crate::Snapshot).
///
/// The snapshot's table never changes, so the iterator knows exactly how
/// many entries remain.
pub struct SnapshotIter<'a, K: 'a, V: 'a, T: Table<K, V> + 'a> {
    inner: T::Iter<'a>,
    remaining: usize,
}

impl<'a, K: 'a, V: 'a, T> SnapshotIter<'a, K, V, T>
where
    T: Table<K, V> + 'a,
{
    pub(crate) fn new(table: &'a T) -> Self {
        Self {
            inner: table.iter(),
            remaining: table.len(),
        }
    }
}

impl<'a, K: 'a, V: 'a, T> Iterator for SnapshotIter<'a, K, V, T>
where
    T: Table<K, V> + 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a, T> ExactSizeIterator for SnapshotIter<'a, K, V, T> where
    T: Table<K, V> + 'a
{
}
