use std::borrow::Cow;

use super::Seq;
use crate::{
    config::SourceConfig,
    element::Element,
    producer::{from_fn, IteratorProducer, Producer},
};

/// Builds lazy sequences with a non-default [`SourceConfig`].
///
/// ```
/// use funclist_core::seq::Seq;
///
/// let rows = Seq::builder()
///     .label("rows")
///     .chunk_capacity(64)
///     .from_iterator(0..1_000);
/// assert_eq!(rows.get(999).unwrap(), Some(999));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SeqBuilder {
    config: SourceConfig,
}

impl SeqBuilder {
    /// Size of the cache's first bucket; later buckets double.
    pub fn chunk_capacity(mut self, capacity: usize) -> Self {
        self.config.chunk_capacity = capacity;
        self
    }

    pub fn label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.config.label = Some(label.into());
        self
    }

    pub fn from_iterator<I>(self, iter: I) -> Seq<I::Item>
    where
        I: IntoIterator,
        I::Item: Element,
        I::IntoIter: Send + 'static,
    {
        self.from_producer(IteratorProducer::from(iter.into_iter()))
    }

    pub fn from_producer<P>(self, producer: P) -> Seq<P::Item>
    where
        P: Producer + 'static,
        P::Item: Element,
    {
        Seq::memoized_with(producer, self.config)
    }

    pub fn generate<T, F>(self, f: F) -> Seq<T>
    where
        T: Element,
        F: FnMut() -> Option<T> + Send + 'static,
    {
        self.from_producer(from_fn(f))
    }
}
