use std::sync::Arc;

use crate::{
    cursor::{Cursor, RawCursor},
    element::Element,
    error::Result,
    node::Node,
    step::Step,
};

pub(crate) struct Filter<T, P> {
    pub(crate) parent: Arc<dyn Node<Item = T>>,
    pub(crate) predicate: P,
}

impl<T, P> Node for Filter<T, P>
where
    T: Element,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    type Item = T;

    fn cursor(self: Arc<Self>) -> Cursor<T> {
        let inner = self.parent.clone().cursor();
        Cursor::new(FilterCursor { node: self, inner })
    }
}

struct FilterCursor<T, P> {
    node: Arc<Filter<T, P>>,
    inner: Cursor<T>,
}

impl<T, P> RawCursor for FilterCursor<T, P>
where
    T: Element,
    P: Fn(&T) -> bool + Send + Sync,
{
    type Item = T;

    fn step(&mut self) -> Result<Step<T>> {
        let predicate = &self.node.predicate;
        Ok(Step::from(self.inner.try_next()?).and_then(|item| {
            if predicate(&item) {
                Step::Ready(item)
            } else {
                Step::NotYet
            }
        }))
    }
}
