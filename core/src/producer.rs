use std::error::Error;

use crate::error::{Result, SeqError};

/// A single-pass, pull-based source of elements.
///
/// `produce` is only ever called by one thread at a time and never again after
/// it returned `Ok(None)` or an error.
pub trait Producer: Send {
    type Item;

    fn produce(&mut self) -> Result<Option<Self::Item>>;
}

impl<P: Producer + ?Sized> Producer for Box<P> {
    type Item = P::Item;

    #[inline]
    fn produce(&mut self) -> Result<Option<Self::Item>> {
        (**self).produce()
    }
}

#[derive(Debug)]
pub struct IteratorProducer<I> {
    iterator: I,
}

impl<I: Iterator> From<I> for IteratorProducer<I> {
    fn from(value: I) -> Self {
        Self { iterator: value }
    }
}

impl<I> Producer for IteratorProducer<I>
where
    I: Iterator + Send,
{
    type Item = I::Item;

    #[inline]
    fn produce(&mut self) -> Result<Option<Self::Item>> {
        Ok(self.iterator.next())
    }
}

/// Produces from an iterator of `Result`s; the first `Err` fails the source.
#[derive(Debug)]
pub struct TryIteratorProducer<I> {
    iterator: I,
}

impl<I> From<I> for TryIteratorProducer<I> {
    fn from(value: I) -> Self {
        Self { iterator: value }
    }
}

impl<I, T, E> Producer for TryIteratorProducer<I>
where
    I: Iterator<Item = std::result::Result<T, E>> + Send,
    E: Error + Send + Sync + 'static,
{
    type Item = T;

    fn produce(&mut self) -> Result<Option<Self::Item>> {
        self.iterator.next().transpose().map_err(SeqError::source)
    }
}

pub struct FromFn<F> {
    f: F,
}

/// A producer that calls `f` until it returns `None`.
pub fn from_fn<T, F>(f: F) -> FromFn<F>
where
    F: FnMut() -> Option<T> + Send,
{
    FromFn { f }
}

impl<T, F> Producer for FromFn<F>
where
    F: FnMut() -> Option<T> + Send,
{
    type Item = T;

    #[inline]
    fn produce(&mut self) -> Result<Option<Self::Item>> {
        Ok((self.f)())
    }
}

#[cfg(feature = "stream")]
pub use self::stream::StreamProducer;

#[cfg(feature = "stream")]
mod stream {
    use core::pin::Pin;

    use futures_lite::{future, StreamExt};

    use super::Producer;
    use crate::error::Result;

    /// Produces from a `futures_core::Stream`, blocking the pulling thread until
    /// the stream yields.
    pub struct StreamProducer<S> {
        stream: Pin<Box<S>>,
    }

    impl<S> From<S> for StreamProducer<S> {
        fn from(value: S) -> Self {
            Self {
                stream: Box::pin(value),
            }
        }
    }

    impl<S> Producer for StreamProducer<S>
    where
        S: futures_core::Stream + Send,
    {
        type Item = S::Item;

        fn produce(&mut self) -> Result<Option<Self::Item>> {
            Ok(future::block_on(self.stream.next()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn iterator_producer_ends() {
        let mut p = IteratorProducer::from(0..2);
        assert_eq!(p.produce().unwrap(), Some(0));
        assert_eq!(p.produce().unwrap(), Some(1));
        assert_eq!(p.produce().unwrap(), None);
    }

    #[test]
    fn try_iterator_producer_fails() {
        let items = vec![Ok(1), Err(io::Error::new(io::ErrorKind::Other, "bad row"))];
        let mut p = TryIteratorProducer::from(items.into_iter());
        assert_eq!(p.produce().unwrap(), Some(1));
        let err = p.produce().unwrap_err();
        assert!(err.is_source());
    }

    #[test]
    fn from_fn_counts_down() {
        let mut n = 3;
        let mut p = from_fn(move || {
            n -= 1;
            (n > 0).then_some(n)
        });
        assert_eq!(p.produce().unwrap(), Some(2));
        assert_eq!(p.produce().unwrap(), Some(1));
        assert_eq!(p.produce().unwrap(), None);
    }

    #[cfg(feature = "stream")]
    #[test]
    fn stream_producer_blocks_until_ready() {
        let mut p = StreamProducer::from(futures_lite::stream::iter(vec!["a", "b"]));
        assert_eq!(p.produce().unwrap(), Some("a"));
        assert_eq!(p.produce().unwrap(), Some("b"));
        assert_eq!(p.produce().unwrap(), None);
    }
}
