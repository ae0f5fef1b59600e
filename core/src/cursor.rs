use std::sync::Arc;

use crate::{
    error::Result,
    node::Indexed,
    producer::Producer,
    step::Step,
};

/// The stepping half of a cursor. Adapters implement this; callers hold a [`Cursor`].
pub(crate) trait RawCursor: Send {
    type Item;

    fn step(&mut self) -> Result<Step<Self::Item>>;
}

/// An independent traversal position over a sequence.
///
/// Opening a cursor never touches the upstream. Once a cursor has reported the
/// end, or an error, it stays finished.
#[must_use = "cursors do nothing unless advanced"]
pub struct Cursor<T> {
    raw: Box<dyn RawCursor<Item = T>>,
    position: usize,
    done: bool,
}

impl<T> Cursor<T> {
    pub(crate) fn new<C>(raw: C) -> Self
    where
        C: RawCursor<Item = T> + 'static,
    {
        Self {
            raw: Box::new(raw),
            position: 0,
            done: false,
        }
    }

    /// Advances to the next element, `Ok(None)` at the end.
    pub fn try_next(&mut self) -> Result<Option<T>> {
        while !self.done {
            match self.raw.step() {
                Ok(Step::NotYet) => continue,
                Ok(Step::Ready(item)) => {
                    self.position += 1;
                    return Ok(Some(item));
                }
                Ok(Step::Done) => self.done = true,
                Err(err) => {
                    self.done = true;
                    return Err(err);
                }
            }
        }
        Ok(None)
    }

    /// Number of elements this cursor has handed out.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl<T> Iterator for Cursor<T> {
    type Item = Result<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().transpose()
    }
}

impl<T> std::fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("done", &self.done)
            .finish()
    }
}

#[cfg(feature = "stream")]
impl<T> futures_core::Stream for Cursor<T> {
    type Item = Result<T>;

    fn poll_next(
        self: std::pin::Pin<&mut Self>,
        _: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        std::task::Poll::Ready(self.get_mut().next())
    }
}

/// Reads an indexed node one position at a time.
pub(crate) struct IndexCursor<N: ?Sized> {
    node: Arc<N>,
    index: usize,
}

impl<N: ?Sized> IndexCursor<N> {
    pub(crate) fn new(node: Arc<N>) -> Self {
        Self { node, index: 0 }
    }
}

impl<N> RawCursor for IndexCursor<N>
where
    N: Indexed + ?Sized,
{
    type Item = N::Item;

    #[inline]
    fn step(&mut self) -> Result<Step<Self::Item>> {
        let next = self.node.value_at(self.index)?;
        if next.is_some() {
            self.index += 1;
        }
        Ok(next.into())
    }
}

/// Feeds a cursor into a memoizing source, e.g. when `lazy()` memoizes a view.
pub(crate) struct CursorProducer<T> {
    cursor: Cursor<T>,
}

impl<T> From<Cursor<T>> for CursorProducer<T> {
    fn from(cursor: Cursor<T>) -> Self {
        Self { cursor }
    }
}

impl<T> Producer for CursorProducer<T> {
    type Item = T;

    #[inline]
    fn produce(&mut self) -> Result<Option<T>> {
        self.cursor.try_next()
    }
}
