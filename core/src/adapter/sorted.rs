use std::{cmp::Ordering, vec};

use crate::{cursor::Cursor, error::Result, producer::Producer};

pub(crate) enum Sorted<T, F> {
    Pending { cursor: Cursor<T>, compare: F },
    Ready(vec::IntoIter<T>),
}

impl<T, F> Sorted<T, F> {
    pub(crate) fn new(cursor: Cursor<T>, compare: F) -> Self {
        Sorted::Pending { cursor, compare }
    }
}

impl<T, F> Producer for Sorted<T, F>
where
    T: Send,
    F: FnMut(&T, &T) -> Ordering + Send,
{
    type Item = T;

    fn produce(&mut self) -> Result<Option<T>> {
        if let Sorted::Pending { cursor, compare } = self {
            let mut items = cursor.by_ref().collect::<Result<Vec<T>>>()?;
            items.sort_by(compare);
            *self = Sorted::Ready(items.into_iter());
        }
        Ok(match self {
            Sorted::Ready(items) => items.next(),
            Sorted::Pending { .. } => None,
        })
    }
}
