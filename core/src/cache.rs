use std::sync::{
    atomic::{AtomicUsize, Ordering},
    OnceLock,
};

pub const DEFAULT_CHUNK_CAPACITY: usize = 16;

/// An append-only, indexable buffer that readers can use without locking.
///
/// Storage is a list of buckets whose capacities double: bucket `b` holds
/// `first << b` slots. A bucket is never moved or freed once allocated, so a
/// reference handed out by [`get`](Self::get) stays valid while the cache grows.
///
/// Each slot is written once. `len` is stored with release ordering after the
/// slot is written, so any index below an acquired `len` is fully initialized.
///
/// Appends must be serialized by the caller. The memoizing source does this with
/// its writer lock; a racing second appender would lose its value.
pub struct GrowOnlyCache<T> {
    first: usize,
    buckets: Box<[OnceLock<Box<[OnceLock<T>]>>]>,
    len: AtomicUsize,
}

impl<T> GrowOnlyCache<T> {
    pub fn new() -> Self {
        Self::with_chunk_capacity(DEFAULT_CHUNK_CAPACITY)
    }

    /// `chunk_capacity` is the size of the first bucket, rounded up to a power of two.
    pub fn with_chunk_capacity(chunk_capacity: usize) -> Self {
        let first = chunk_capacity.max(1).next_power_of_two();
        let buckets = (usize::BITS - first.trailing_zeros()) as usize;
        Self {
            first,
            buckets: (0..buckets).map(|_| OnceLock::new()).collect(),
            len: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        let (bucket, offset) = self.locate(index);
        self.buckets.get(bucket)?.get()?.get(offset)?.get()
    }

    /// Stores `value` at the next index and returns that index.
    pub fn append(&self, value: T) -> usize {
        let index = self.len.load(Ordering::Relaxed);
        let (bucket, offset) = self.locate(index);
        let slots = self.buckets[bucket].get_or_init(|| {
            (0..self.first << bucket)
                .map(|_| OnceLock::new())
                .collect()
        });
        let stored = slots[offset].set(value).is_ok();
        debug_assert!(stored, "concurrent append at index {index}");
        self.len.store(index + 1, Ordering::Release);
        index
    }

    /// Copies the written prefix.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        let len = self.len();
        (0..len).filter_map(|i| self.get(i).cloned()).collect()
    }

    #[inline]
    fn locate(&self, index: usize) -> (usize, usize) {
        let chunk = index / self.first + 1;
        let bucket = (usize::BITS - 1 - chunk.leading_zeros()) as usize;
        let start = self.first * ((1 << bucket) - 1);
        (bucket, index - start)
    }
}

impl<T> Default for GrowOnlyCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
