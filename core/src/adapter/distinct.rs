use std::{collections::HashSet, hash::Hash};

use crate::{cursor::Cursor, error::Result, producer::Producer};

pub(crate) struct Distinct<T> {
    pub(crate) cursor: Cursor<T>,
    pub(crate) seen: HashSet<T>,
}

impl<T> Producer for Distinct<T>
where
    T: Clone + Eq + Hash + Send,
{
    type Item = T;

    fn produce(&mut self) -> Result<Option<T>> {
        while let Some(item) = self.cursor.try_next()? {
            if self.seen.insert(item.clone()) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }
}
