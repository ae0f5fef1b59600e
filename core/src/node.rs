use std::sync::Arc;

use crate::{
    cursor::{Cursor, IndexCursor},
    element::Element,
    error::Result,
    source::SourceState,
};

/// Random access to an index-aligned node.
pub(crate) trait Indexed: Send + Sync {
    type Item;

    fn value_at(&self, index: usize) -> Result<Option<Self::Item>>;
}

/// What a sequence is built from: a memoizing source, an array, or a view
/// deriving from a parent node.
pub(crate) trait Node: Send + Sync {
    type Item;

    fn cursor(self: Arc<Self>) -> Cursor<Self::Item>;

    /// `Some` when `value_at(i)` is the `i`-th element of every traversal.
    fn as_indexed(&self) -> Option<&dyn Indexed<Item = Self::Item>> {
        None
    }

    /// `Some` when the node is a fully materialized array.
    fn as_slice(&self) -> Option<&[Self::Item]> {
        None
    }

    /// True when re-traversal reruns nothing: every element comes out of a cache.
    fn is_memoized(&self) -> bool {
        false
    }

    fn cached_len(&self) -> usize {
        0
    }

    fn state(&self) -> Option<SourceState> {
        None
    }
}

/// Steps a fresh cursor up to `index`. The fallback for nodes without random access.
pub(crate) fn walk_to<T>(mut cursor: Cursor<T>, index: usize) -> Result<Option<T>> {
    let mut position = 0;
    while let Some(item) = cursor.try_next()? {
        if position == index {
            return Ok(Some(item));
        }
        position += 1;
    }
    Ok(None)
}

/// A fully materialized, immutable node.
pub(crate) struct Array<T> {
    items: Arc<[T]>,
}

impl<T> Array<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::from(items),
        }
    }
}

impl<T: Element> Indexed for Array<T> {
    type Item = T;

    #[inline]
    fn value_at(&self, index: usize) -> Result<Option<T>> {
        Ok(self.items.get(index).cloned())
    }
}

impl<T: Element> Node for Array<T> {
    type Item = T;

    fn cursor(self: Arc<Self>) -> Cursor<T> {
        Cursor::new(IndexCursor::new(self))
    }

    fn as_indexed(&self) -> Option<&dyn Indexed<Item = T>> {
        Some(self)
    }

    fn as_slice(&self) -> Option<&[T]> {
        Some(&self.items[..])
    }

    fn is_memoized(&self) -> bool {
        true
    }

    fn cached_len(&self) -> usize {
        self.items.len()
    }

    fn state(&self) -> Option<SourceState> {
        Some(SourceState::Exhausted)
    }
}
