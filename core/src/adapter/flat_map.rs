use std::sync::Arc;

use crate::{
    cursor::{Cursor, RawCursor},
    element::Element,
    error::Result,
    node::Node,
    seq::Seq,
    step::Step,
};

pub(crate) struct FlatMap<T, F> {
    pub(crate) parent: Arc<dyn Node<Item = T>>,
    pub(crate) f: F,
}

impl<T, U, F> Node for FlatMap<T, F>
where
    T: Element,
    U: Element,
    F: Fn(T) -> Seq<U> + Send + Sync + 'static,
{
    type Item = U;

    fn cursor(self: Arc<Self>) -> Cursor<U> {
        let outer = self.parent.clone().cursor();
        Cursor::new(FlatMapCursor {
            node: self,
            outer,
            inner: None,
        })
    }
}

struct FlatMapCursor<T, U, F> {
    node: Arc<FlatMap<T, F>>,
    outer: Cursor<T>,
    inner: Option<Cursor<U>>,
}

impl<T, U, F> RawCursor for FlatMapCursor<T, U, F>
where
    T: Element,
    U: Element,
    F: Fn(T) -> Seq<U> + Send + Sync,
{
    type Item = U;

    fn step(&mut self) -> Result<Step<U>> {
        loop {
            if let Some(inner) = self.inner.as_mut() {
                match inner.try_next()? {
                    Some(item) => return Ok(Step::Ready(item)),
                    None => self.inner = None,
                }
            }

            match self.outer.try_next()? {
                Some(item) => self.inner = Some((self.node.f)(item).cursor()),
                None => return Ok(Step::Done),
            }
        }
    }
}
