//! The sequence value.
//!
//! A [`Seq`] is a cheap, cloneable handle. In [`Mode::Lazy`] it computes and
//! caches elements on demand; every clone and every sequence derived from it
//! shares the same caches, so each element is produced at most once however many
//! cursors or threads read it. In [`Mode::Eager`] it owns an immutable array.

mod builder;
mod ext;
mod numeric;

use core::{
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
};
use std::{error::Error, sync::Arc};

use tracing::{debug, warn};

pub use self::builder::SeqBuilder;
use crate::{
    config::SourceConfig,
    cursor::{Cursor, CursorProducer},
    element::Element,
    error::{Result, SeqError},
    node::{walk_to, Array, Node},
    producer::{from_fn, IteratorProducer, Producer, TryIteratorProducer},
    source::{Memo, SourceState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Elements are produced on demand and memoized.
    #[default]
    Lazy,
    /// Elements are materialized in an immutable array.
    Eager,
}

pub struct Seq<T> {
    node: Arc<dyn Node<Item = T>>,
    mode: Mode,
}

pub type IntSeq = Seq<i32>;
pub type LongSeq = Seq<i64>;
pub type DoubleSeq = Seq<f64>;

impl<T> Clone for Seq<T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            mode: self.mode,
        }
    }
}

impl<T: Element> Seq<T> {
    pub(crate) fn from_node<N>(node: N) -> Self
    where
        N: Node<Item = T> + 'static,
    {
        Self {
            node: Arc::new(node),
            mode: Mode::Lazy,
        }
    }

    pub(crate) fn memoized<P>(producer: P) -> Self
    where
        P: Producer<Item = T> + 'static,
    {
        Self::memoized_with(producer, SourceConfig::default())
    }

    pub(crate) fn memoized_with<P>(producer: P, config: SourceConfig) -> Self
    where
        P: Producer<Item = T> + 'static,
    {
        Self::from_node(Memo::new(producer, config))
    }

    pub(crate) fn array(items: Vec<T>, mode: Mode) -> Self {
        Self {
            node: Arc::new(Array::new(items)),
            mode,
        }
    }

    #[inline]
    pub(crate) fn node(&self) -> &Arc<dyn Node<Item = T>> {
        &self.node
    }

    pub fn empty() -> Self {
        Self::array(Vec::new(), Mode::Eager)
    }

    /// An eager sequence of the given elements.
    pub fn of<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::array(items.into_iter().collect(), Mode::Eager)
    }

    /// A lazy sequence over `iter`, pulled at most once per element.
    pub fn from_iterator<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Self::memoized(IteratorProducer::from(iter.into_iter()))
    }

    /// A lazy sequence over fallible items; the first `Err` fails the source.
    pub fn try_from_iterator<I, E>(iter: I) -> Self
    where
        I: IntoIterator<Item = std::result::Result<T, E>>,
        I::IntoIter: Send + 'static,
        E: Error + Send + Sync + 'static,
    {
        Self::memoized(TryIteratorProducer::from(iter.into_iter()))
    }

    pub fn from_producer<P>(producer: P) -> Self
    where
        P: Producer<Item = T> + 'static,
    {
        Self::memoized(producer)
    }

    /// A lazy sequence calling `f` until it returns `None`.
    pub fn generate<F>(f: F) -> Self
    where
        F: FnMut() -> Option<T> + Send + 'static,
    {
        Self::memoized(from_fn(f))
    }

    /// The infinite sequence `seed, f(seed), f(f(seed)), ...`.
    pub fn iterate<F>(seed: T, mut f: F) -> Self
    where
        F: FnMut(&T) -> T + Send + 'static,
    {
        let mut seed = Some(seed);
        let mut previous: Option<T> = None;
        Self::generate(move || {
            let next = match previous.take() {
                Some(previous) => f(&previous),
                None => seed.take()?,
            };
            previous = Some(next.clone());
            Some(next)
        })
    }

    pub fn repeat(value: T) -> Self {
        Self::generate(move || Some(value.clone()))
    }

    #[cfg(feature = "stream")]
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: futures_core::Stream<Item = T> + Send + 'static,
    {
        Self::memoized(crate::producer::StreamProducer::from(stream))
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn is_lazy(&self) -> bool {
        self.mode == Mode::Lazy
    }

    #[inline]
    pub fn is_eager(&self) -> bool {
        self.mode == Mode::Eager
    }

    /// A fresh cursor at the first element. Touches nothing upstream.
    pub fn cursor(&self) -> Cursor<T> {
        self.node.clone().cursor()
    }

    /// A memoized lazy view of this sequence.
    ///
    /// Sequences that already read from a cache are returned as is, sharing it.
    /// Views that recompute on every traversal (`filter`, `flat_map`, `chain`,
    /// `take_while`, `skip_while`) get a cache of their own.
    pub fn lazy(&self) -> Self {
        if self.node.is_memoized() {
            Self {
                node: self.node.clone(),
                mode: Mode::Lazy,
            }
        } else {
            Self::memoized(CursorProducer::from(self.cursor()))
        }
    }

    /// Materializes every element into an immutable array.
    ///
    /// The receiver and its caches are untouched. Never returns for an infinite
    /// sequence.
    pub fn eager(&self) -> Result<Self> {
        if self.node.as_slice().is_some() {
            return Ok(Self {
                node: self.node.clone(),
                mode: Mode::Eager,
            });
        }
        match self.to_vec() {
            Ok(items) => {
                debug!(len = items.len(), "materialized sequence");
                Ok(Self::array(items, Mode::Eager))
            }
            Err(err) => {
                warn!(produced = ?err.produced(), error = %err, "materialization failed");
                Err(err)
            }
        }
    }

    pub fn to_vec(&self) -> Result<Vec<T>> {
        if let Some(items) = self.node.as_slice() {
            return Ok(items.to_vec());
        }
        self.cursor().collect()
    }

    /// The element at `index`, `Ok(None)` past the end.
    pub fn get(&self, index: usize) -> Result<Option<T>> {
        match self.node.as_indexed() {
            Some(indexed) => indexed.value_at(index),
            None => walk_to(self.cursor(), index),
        }
    }

    /// The element at `index`. Negative indices fail without touching the source.
    pub fn at(&self, index: isize) -> Result<T> {
        let Ok(position) = usize::try_from(index) else {
            return Err(SeqError::Index { index, len: None });
        };
        match self.get(position)? {
            Some(item) => Ok(item),
            None => Err(SeqError::Index {
                index,
                len: self.known_len(),
            }),
        }
    }

    pub fn first(&self) -> Result<Option<T>> {
        self.get(0)
    }

    pub fn last(&self) -> Result<Option<T>> {
        if let Some(items) = self.node.as_slice() {
            return Ok(items.last().cloned());
        }
        self.fold(None, |_, item| Some(item))
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.first()?.is_none())
    }

    /// Elements produced so far by this sequence's own cache.
    pub fn cached_len(&self) -> usize {
        self.node.cached_len()
    }

    /// State of this sequence's own source, `None` for views.
    pub fn state(&self) -> Option<SourceState> {
        self.node.state()
    }

    fn known_len(&self) -> Option<usize> {
        match self.node.state() {
            Some(SourceState::Exhausted) => Some(self.node.cached_len()),
            _ => None,
        }
    }

    /// Compares element by element, stopping at the first difference.
    pub fn try_eq(&self, other: &Seq<T>) -> Result<bool>
    where
        T: PartialEq,
    {
        let mut differences = self.differences(other);
        while let Some(difference) = differences.produce()? {
            if difference != 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Seq<()> {
    /// Starts a [`SeqBuilder`] for a lazy source with its own [`SourceConfig`].
    pub fn builder() -> SeqBuilder {
        SeqBuilder::default()
    }
}

impl<T: Element + PartialEq> PartialEq for Seq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.try_eq(other).unwrap_or_else(|err| {
            warn!(error = %err, "comparison failed, treating sequences as unequal");
            false
        })
    }
}

impl<T: Element + Eq> Eq for Seq<T> {}

impl<T: Element + Hash> Hash for Seq<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0usize;
        for item in self.cursor() {
            match item {
                Ok(item) => {
                    item.hash(state);
                    len += 1;
                }
                Err(err) => {
                    warn!(error = %err, hashed = len, "hashing stopped at a failed element");
                    break;
                }
            }
        }
        len.hash(state);
    }
}

impl<T: Element + Display> Display for Seq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.cursor().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match item {
                Ok(item) => Display::fmt(&item, f)?,
                Err(err) => {
                    warn!(error = %err, rendered = i, "rendering stopped at a failed element");
                    write!(f, "<error: {err}>")?;
                    break;
                }
            }
        }
        f.write_str("]")
    }
}

impl<T> Debug for Seq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seq")
            .field("mode", &self.mode)
            .field("cached", &self.node.cached_len())
            .finish()
    }
}

impl<T: Element> From<Vec<T>> for Seq<T> {
    fn from(items: Vec<T>) -> Self {
        Self::array(items, Mode::Eager)
    }
}

impl<T: Element> FromIterator<T> for Seq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl<'a, T: Element> IntoIterator for &'a Seq<T> {
    type Item = Result<T>;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Cursor<T> {
        self.cursor()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash, Hasher},
        io,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };

    use super::{Mode, Seq};
    use crate::{error::SeqError, source::SourceState};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn cursors_are_independent() {
        let seq = Seq::from_iterator(0..5);
        let mut a = seq.cursor();
        let mut b = seq.cursor();
        assert_eq!(a.try_next().unwrap(), Some(0));
        assert_eq!(a.try_next().unwrap(), Some(1));
        assert_eq!(b.try_next().unwrap(), Some(0));
        assert_eq!(a.position(), 2);
        assert_eq!(b.position(), 1);
        assert_eq!(seq.cached_len(), 2);
    }

    #[test]
    fn cursor_stays_finished() {
        let seq = Seq::of([1]);
        let mut cursor = seq.cursor();
        assert_eq!(cursor.try_next().unwrap(), Some(1));
        assert_eq!(cursor.try_next().unwrap(), None);
        assert!(cursor.is_done());
        assert_eq!(cursor.try_next().unwrap(), None);
    }

    #[test]
    fn eager_is_idempotent_and_independent() {
        let lazy = Seq::from_iterator(vec![3, 1, 2]);
        let eager = lazy.eager().unwrap();
        assert!(eager.is_eager());
        assert!(lazy.is_lazy());
        assert_eq!(eager.eager().unwrap(), eager);
        assert_eq!(eager.lazy().mode(), Mode::Lazy);
        assert_eq!(eager.lazy(), lazy);
    }

    #[test]
    fn display_and_debug() {
        let seq = Seq::of(["a", "b"]);
        assert_eq!(seq.to_string(), "[a, b]");
        assert_eq!(Seq::<i32>::empty().to_string(), "[]");

        let lazy = Seq::from_iterator(0..10);
        lazy.get(2).unwrap();
        assert_eq!(format!("{lazy:?}"), "Seq { mode: Lazy, cached: 3 }");
    }

    #[test]
    fn display_marks_a_failed_source() {
        let rows = vec![
            Ok(1),
            Ok(2),
            Err(io::Error::new(io::ErrorKind::Other, "bad row")),
        ];
        let seq = Seq::try_from_iterator(rows);
        assert_eq!(
            seq.to_string(),
            "[1, 2, <error: source failed after producing 2 elements: bad row>]"
        );
        assert_eq!(format!("{}", seq.limit(2)), "[1, 2]");

        let gone = io::Error::new(io::ErrorKind::Other, "gone");
        let empty_failure = Seq::<i32>::try_from_iterator(vec![Err(gone)]);
        assert_eq!(
            empty_failure.to_string(),
            "[<error: source failed after producing 0 elements: gone>]"
        );
    }

    #[test]
    fn equality_and_hash_follow_elements() {
        let a = Seq::from_iterator(vec![1, 2, 3]);
        let b = Seq::of([1, 2, 3]);
        let c = Seq::of([1, 2]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(c, a);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(hash_of(&a), hash_of(&c));
    }

    #[test]
    fn equality_short_circuits() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let counter = pulls.clone();
        let infinite = Seq::from_iterator(0..).peek(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let other = Seq::of([0, 1, 7, 3]);
        assert!(!infinite.try_eq(&other).unwrap());
        assert_eq!(pulls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn negative_index_never_touches_the_source() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let counter = pulls.clone();
        let seq = Seq::generate(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(1)
        });
        assert!(matches!(
            seq.at(-1),
            Err(SeqError::Index { index: -1, len: None })
        ));
        assert_eq!(pulls.load(Ordering::SeqCst), 0);
        assert_eq!(seq.at(3).unwrap(), 1);
    }

    #[test]
    fn index_past_the_end_reports_length() {
        let seq = Seq::from_iterator(0..3);
        assert!(matches!(
            seq.at(5),
            Err(SeqError::Index { index: 5, len: Some(3) })
        ));
        assert_eq!(seq.state(), Some(SourceState::Exhausted));
        assert_eq!(seq.last().unwrap(), Some(2));
        assert_eq!(seq.first().unwrap(), Some(0));
    }

    #[test]
    fn failed_materialization_reports_the_prefix() {
        let rows = vec![
            Ok("a"),
            Ok("b"),
            Ok("c"),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad row")),
        ];
        let seq = Seq::try_from_iterator(rows);
        let err = seq.eager().unwrap_err();
        assert_eq!(err.produced(), Some(3));
        assert_eq!(seq.cached_len(), 3);
        assert_eq!(seq.get(2).unwrap(), Some("c"));
        assert_eq!(seq.state(), Some(SourceState::Errored));
        assert!(seq.to_vec().is_err());
        assert_ne!(seq, Seq::of(["a", "b", "c"]));
    }

    #[test]
    fn generators() {
        let powers = Seq::iterate(1u64, |i| i * 2);
        assert_eq!(powers.limit(5).to_vec().unwrap(), vec![1, 2, 4, 8, 16]);
        assert_eq!(Seq::repeat('x').limit(3).to_string(), "[x, x, x]");
        let collected: Seq<i32> = (0..3).collect();
        assert!(collected.is_eager());
        assert_eq!(Seq::from(vec![0, 1, 2]), collected);
    }

    #[test]
    fn iterate_does_not_run_ahead() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let seq = Seq::iterate(0, move |i| {
            counter.fetch_add(1, Ordering::SeqCst);
            i + 1
        });
        assert_eq!(seq.get(0).unwrap(), Some(0));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(seq.get(3).unwrap(), Some(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn iterates_by_reference() {
        let seq = Seq::of([1, 2, 3]);
        let mut total = 0;
        for item in &seq {
            total += item.unwrap();
        }
        assert_eq!(total, 6);
    }
}
