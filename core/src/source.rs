use std::{
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use parking_lot::Mutex;
use tracing::{debug, error, trace, warn};

use crate::{
    cache::GrowOnlyCache,
    config::SourceConfig,
    cursor::{Cursor, IndexCursor},
    element::Element,
    error::{Result, SeqError},
    node::{Indexed, Node},
    producer::Producer,
};

/// Observable state of a memoizing source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceState {
    /// More elements may follow.
    Ready,
    /// Another caller is pulling from the producer right now.
    Producing,
    /// The producer has ended; the cache holds everything.
    Exhausted,
    /// The producer failed; the cached prefix stays readable.
    Errored,
}

enum Upstream<T> {
    Active(Box<dyn Producer<Item = T>>),
    Exhausted,
    Failed(SeqError),
}

/// Wraps a single-pass producer with a grow-only cache so that any number of
/// cursors, on any number of threads, can read it while each element is pulled
/// from the producer at most once.
///
/// Reads of produced indices take no lock. Producing new indices happens under
/// one writer lock per source; the producer is never touched outside it.
pub struct Memo<T> {
    cache: GrowOnlyCache<T>,
    upstream: Mutex<Upstream<T>>,
    exhausted: AtomicBool,
    config: SourceConfig,
}

impl<T: Element> Memo<T> {
    pub fn new<P>(producer: P, config: SourceConfig) -> Self
    where
        P: Producer<Item = T> + 'static,
    {
        Self {
            cache: GrowOnlyCache::with_chunk_capacity(config.chunk_capacity),
            upstream: Mutex::new(Upstream::Active(Box::new(producer))),
            exhausted: AtomicBool::new(false),
            config,
        }
    }

    /// The element at `index`, pulling from the producer if nobody has yet.
    /// `Ok(None)` when the producer ends before `index`.
    pub fn value_at(&self, index: usize) -> Result<Option<T>> {
        if let Some(value) = self.cache.get(index) {
            return Ok(Some(value.clone()));
        }
        if self.is_exhausted() {
            return Ok(None);
        }

        let mut upstream = self.upstream.lock();
        if self.cache.len() > index {
            trace!(label = self.config.label(), index, "produced by a racing writer");
        }
        while self.cache.len() <= index {
            let producer = match &mut *upstream {
                Upstream::Active(producer) => producer,
                Upstream::Exhausted => return Ok(None),
                Upstream::Failed(err) => return Err(err.clone()),
            };
            let produced = self.cache.len();
            match panic::catch_unwind(AssertUnwindSafe(|| producer.produce())) {
                Ok(Ok(Some(value))) => {
                    self.cache.append(value);
                }
                Ok(Ok(None)) => {
                    *upstream = Upstream::Exhausted;
                    self.exhausted.store(true, Ordering::Release);
                    debug!(label = self.config.label(), produced, "source exhausted");
                    return Ok(None);
                }
                Ok(Err(err)) => {
                    let err = err.with_produced(produced);
                    warn!(label = self.config.label(), produced, error = %err, "source failed");
                    *upstream = Upstream::Failed(err.clone());
                    return Err(err);
                }
                Err(payload) => {
                    error!(label = self.config.label(), produced, "source panicked");
                    *upstream = Upstream::Failed(SeqError::Panicked { produced });
                    drop(upstream);
                    panic::resume_unwind(payload);
                }
            }
        }
        Ok(self.cache.get(index).cloned())
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted.load(Ordering::Acquire)
    }

    #[inline]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Copies whatever has been produced so far.
    pub fn cached(&self) -> Vec<T> {
        self.cache.snapshot()
    }

    pub fn state(&self) -> SourceState {
        if self.is_exhausted() {
            return SourceState::Exhausted;
        }
        match self.upstream.try_lock() {
            None => SourceState::Producing,
            Some(upstream) => match &*upstream {
                Upstream::Active(_) => SourceState::Ready,
                Upstream::Exhausted => SourceState::Exhausted,
                Upstream::Failed(_) => SourceState::Errored,
            },
        }
    }
}

impl<T: Element> Indexed for Memo<T> {
    type Item = T;

    #[inline]
    fn value_at(&self, index: usize) -> Result<Option<T>> {
        Memo::value_at(self, index)
    }
}

impl<T: Element> Node for Memo<T> {
    type Item = T;

    fn cursor(self: Arc<Self>) -> Cursor<T> {
        Cursor::new(IndexCursor::new(self))
    }

    fn as_indexed(&self) -> Option<&dyn Indexed<Item = T>> {
        Some(self)
    }

    fn is_memoized(&self) -> bool {
        true
    }

    fn cached_len(&self) -> usize {
        Memo::cached_len(self)
    }

    fn state(&self) -> Option<SourceState> {
        Some(Memo::state(self))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        panic::{self, AssertUnwindSafe},
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc, Barrier,
        },
        thread,
    };

    use super::{Memo, SourceState};
    use crate::{
        config::SourceConfig,
        error::SeqError,
        producer::{from_fn, IteratorProducer, TryIteratorProducer},
    };

    fn counting(limit: usize, pulls: Arc<AtomicUsize>) -> Memo<usize> {
        let mut next = 0;
        Memo::new(
            from_fn(move || {
                pulls.fetch_add(1, Ordering::SeqCst);
                (next < limit).then(|| {
                    next += 1;
                    next - 1
                })
            }),
            SourceConfig::default(),
        )
    }

    #[test]
    fn pulls_only_up_to_the_requested_index() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let memo = counting(10, pulls.clone());

        assert_eq!(memo.value_at(3).unwrap(), Some(3));
        assert_eq!(pulls.load(Ordering::SeqCst), 4);
        assert_eq!(memo.cached_len(), 4);

        assert_eq!(memo.value_at(1).unwrap(), Some(1));
        assert_eq!(pulls.load(Ordering::SeqCst), 4);
        assert_eq!(memo.state(), SourceState::Ready);
    }

    #[test]
    fn exhaustion_is_sticky() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let memo = counting(2, pulls.clone());

        assert_eq!(memo.value_at(5).unwrap(), None);
        assert!(memo.is_exhausted());
        assert_eq!(memo.state(), SourceState::Exhausted);
        assert_eq!(pulls.load(Ordering::SeqCst), 3);

        assert_eq!(memo.value_at(9).unwrap(), None);
        assert_eq!(pulls.load(Ordering::SeqCst), 3);
        assert_eq!(memo.cached(), vec![0, 1]);
    }

    #[test]
    fn failure_keeps_the_prefix_and_repeats_the_error() {
        let rows = vec![
            Ok(1),
            Ok(2),
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated")),
            Ok(4),
        ];
        let memo = Memo::new(TryIteratorProducer::from(rows.into_iter()), SourceConfig::default());

        let err = memo.value_at(3).unwrap_err();
        assert_eq!(err.produced(), Some(2));
        assert_eq!(memo.state(), SourceState::Errored);

        assert_eq!(memo.value_at(0).unwrap(), Some(1));
        assert_eq!(memo.value_at(1).unwrap(), Some(2));
        let again = memo.value_at(2).unwrap_err();
        assert_eq!(again.to_string(), err.to_string());
    }

    #[test]
    fn panic_terminates_the_source() {
        let mut n = 0;
        let memo = Memo::new(
            from_fn(move || {
                n += 1;
                if n == 2 {
                    panic!("producer bug");
                }
                Some(n)
            }),
            SourceConfig::default(),
        );

        let result = panic::catch_unwind(AssertUnwindSafe(|| memo.value_at(1)));
        assert!(result.is_err());
        assert!(matches!(
            memo.value_at(1),
            Err(SeqError::Panicked { produced: 1 })
        ));
        assert_eq!(memo.value_at(0).unwrap(), Some(1));
    }

    #[test]
    fn concurrent_readers_share_every_pull() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let memo = Arc::new(counting(5_000, pulls.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let memo = memo.clone();
                thread::spawn(move || {
                    let mut i = 0;
                    while let Some(v) = memo.value_at(i).unwrap() {
                        assert_eq!(v, i);
                        i += 1;
                    }
                    i
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 5_000);
        }
        // one extra pull observed the end
        assert_eq!(pulls.load(Ordering::SeqCst), 5_001);
    }

    #[test]
    fn state_is_producing_while_the_writer_lock_is_held() {
        let entered = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));
        let (inside, resume) = (entered.clone(), release.clone());
        let mut n = 0;
        let memo = Arc::new(Memo::new(
            from_fn(move || {
                n += 1;
                if n == 2 {
                    inside.wait();
                    resume.wait();
                }
                (n <= 3).then_some(n)
            }),
            SourceConfig::default(),
        ));

        assert_eq!(memo.value_at(0).unwrap(), Some(1));
        assert_eq!(memo.state(), SourceState::Ready);

        let puller = {
            let memo = memo.clone();
            thread::spawn(move || memo.value_at(1).unwrap())
        };
        entered.wait();
        assert_eq!(memo.state(), SourceState::Producing);
        assert_eq!(memo.value_at(0).unwrap(), Some(1));
        release.wait();

        assert_eq!(puller.join().unwrap(), Some(2));
        assert_eq!(memo.state(), SourceState::Ready);
        assert_eq!(memo.value_at(5).unwrap(), None);
        assert_eq!(memo.state(), SourceState::Exhausted);
    }

    #[test]
    fn iterator_sources_work_with_small_chunks() {
        let config = SourceConfig {
            chunk_capacity: 1,
            label: Some("tiny".into()),
        };
        let memo = Memo::new(IteratorProducer::from(0..100), config);
        assert_eq!(memo.value_at(99).unwrap(), Some(99));
        assert_eq!(memo.value_at(100).unwrap(), None);
    }
}
