use std::sync::Arc;

use crate::{
    cursor::{Cursor, IndexCursor, RawCursor},
    element::Element,
    error::Result,
    node::{walk_to, Indexed, Node},
    step::Step,
};

/// `limit(n)`: indices at or past `n` are absent without asking the parent.
pub(crate) struct Limit<T> {
    pub(crate) parent: Arc<dyn Node<Item = T>>,
    pub(crate) n: usize,
}

impl<T: Element> Indexed for Limit<T> {
    type Item = T;

    fn value_at(&self, index: usize) -> Result<Option<T>> {
        if index >= self.n {
            return Ok(None);
        }
        match self.parent.as_indexed() {
            Some(parent) => parent.value_at(index),
            None => walk_to(self.parent.clone().cursor(), index),
        }
    }
}

impl<T: Element> Node for Limit<T> {
    type Item = T;

    fn cursor(self: Arc<Self>) -> Cursor<T> {
        if self.parent.as_indexed().is_some() {
            Cursor::new(IndexCursor::new(self))
        } else {
            Cursor::new(Take {
                inner: self.parent.clone().cursor(),
                n: self.n,
            })
        }
    }

    fn as_indexed(&self) -> Option<&dyn Indexed<Item = T>> {
        if self.parent.as_indexed().is_some() {
            Some(self)
        } else {
            None
        }
    }

    fn is_memoized(&self) -> bool {
        self.parent.is_memoized()
    }
}

struct Take<T> {
    inner: Cursor<T>,
    n: usize,
}

impl<T> RawCursor for Take<T> {
    type Item = T;

    fn step(&mut self) -> Result<Step<T>> {
        if self.n == 0 {
            return Ok(Step::Done);
        }
        let next = self.inner.try_next()?;
        if next.is_some() {
            self.n -= 1;
        }
        Ok(next.into())
    }
}
