use std::sync::Arc;

use crate::{
    cursor::{Cursor, RawCursor},
    element::Element,
    error::Result,
    node::Node,
    step::Step,
};

pub(crate) struct Chain<T> {
    pub(crate) first: Arc<dyn Node<Item = T>>,
    pub(crate) second: Arc<dyn Node<Item = T>>,
}

impl<T: Element> Node for Chain<T> {
    type Item = T;

    fn cursor(self: Arc<Self>) -> Cursor<T> {
        Cursor::new(ChainCursor {
            first: self.first.clone().cursor(),
            second: self.second.clone().cursor(),
        })
    }

    fn is_memoized(&self) -> bool {
        self.first.is_memoized() && self.second.is_memoized()
    }
}

struct ChainCursor<T> {
    first: Cursor<T>,
    second: Cursor<T>,
}

impl<T> RawCursor for ChainCursor<T> {
    type Item = T;

    fn step(&mut self) -> Result<Step<T>> {
        if !self.first.is_done() {
            if let Some(item) = self.first.try_next()? {
                return Ok(Step::Ready(item));
            }
        }
        Ok(self.second.try_next()?.into())
    }
}
