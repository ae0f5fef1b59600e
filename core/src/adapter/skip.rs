use std::sync::Arc;

use crate::{
    cursor::{Cursor, IndexCursor, RawCursor},
    element::Element,
    error::Result,
    node::{walk_to, Indexed, Node},
    step::Step,
};

/// `skip(n)`: index `i` reads the parent at `i + n`.
pub(crate) struct Skip<T> {
    pub(crate) parent: Arc<dyn Node<Item = T>>,
    pub(crate) n: usize,
}

impl<T: Element> Indexed for Skip<T> {
    type Item = T;

    fn value_at(&self, index: usize) -> Result<Option<T>> {
        let Some(index) = index.checked_add(self.n) else {
            return Ok(None);
        };
        match self.parent.as_indexed() {
            Some(parent) => parent.value_at(index),
            None => walk_to(self.parent.clone().cursor(), index),
        }
    }
}

impl<T: Element> Node for Skip<T> {
    type Item = T;

    fn cursor(self: Arc<Self>) -> Cursor<T> {
        if self.parent.as_indexed().is_some() {
            Cursor::new(IndexCursor::new(self))
        } else {
            Cursor::new(SkipCursor {
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

struct SkipCursor<T> {
    inner: Cursor<T>,
    n: usize,
}

impl<T> RawCursor for SkipCursor<T> {
    type Item = T;

    fn step(&mut self) -> Result<Step<T>> {
        let n = &mut self.n;
        Ok(Step::from(self.inner.try_next()?).and_then(|item| match *n {
            0 => Step::Ready(item),
            _ => {
                *n -= 1;
                Step::NotYet
            }
        }))
    }
}
