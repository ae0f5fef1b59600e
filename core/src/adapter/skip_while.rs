use std::sync::Arc;

use crate::{
    cursor::{Cursor, RawCursor},
    element::Element,
    error::Result,
    node::Node,
    step::Step,
};

pub(crate) struct SkipWhile<T, P> {
    pub(crate) parent: Arc<dyn Node<Item = T>>,
    pub(crate) predicate: P,
}

impl<T, P> Node for SkipWhile<T, P>
where
    T: Element,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    type Item = T;

    fn cursor(self: Arc<Self>) -> Cursor<T> {
        let inner = self.parent.clone().cursor();
        Cursor::new(SkipWhileCursor {
            node: self,
            inner,
            skipping: true,
        })
    }
}

struct SkipWhileCursor<T, P> {
    node: Arc<SkipWhile<T, P>>,
    inner: Cursor<T>,
    skipping: bool,
}

impl<T, P> RawCursor for SkipWhileCursor<T, P>
where
    T: Element,
    P: Fn(&T) -> bool + Send + Sync,
{
    type Item = T;

    fn step(&mut self) -> Result<Step<T>> {
        let (node, skipping) = (&self.node, &mut self.skipping);
        Ok(Step::from(self.inner.try_next()?).and_then(|item| {
            if *skipping && (node.predicate)(&item) {
                Step::NotYet
            } else {
                *skipping = false;
                Step::Ready(item)
            }
        }))
    }
}
