use std::sync::Arc;

use crate::{
    cursor::{Cursor, RawCursor},
    element::Element,
    error::Result,
    node::Node,
    step::Step,
};

pub(crate) struct TakeWhile<T, P> {
    pub(crate) parent: Arc<dyn Node<Item = T>>,
    pub(crate) predicate: P,
}

impl<T, P> Node for TakeWhile<T, P>
where
    T: Element,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    type Item = T;

    fn cursor(self: Arc<Self>) -> Cursor<T> {
        let inner = self.parent.clone().cursor();
        Cursor::new(TakeWhileCursor { node: self, inner })
    }
}

struct TakeWhileCursor<T, P> {
    node: Arc<TakeWhile<T, P>>,
    inner: Cursor<T>,
}

impl<T, P> RawCursor for TakeWhileCursor<T, P>
where
    T: Element,
    P: Fn(&T) -> bool + Send + Sync,
{
    type Item = T;

    fn step(&mut self) -> Result<Step<T>> {
        Ok(match self.inner.try_next()? {
            Some(item) if (self.node.predicate)(&item) => Step::Ready(item),
            _ => Step::Done,
        })
    }
}
