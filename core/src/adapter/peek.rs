use crate::{cursor::Cursor, error::Result, producer::Producer};

pub(crate) struct Peek<T, F> {
    pub(crate) cursor: Cursor<T>,
    pub(crate) f: F,
}

impl<T, F> Producer for Peek<T, F>
where
    F: FnMut(&T) + Send,
{
    type Item = T;

    #[inline]
    fn produce(&mut self) -> Result<Option<T>> {
        let next = self.cursor.try_next()?;
        if let Some(item) = &next {
            (self.f)(item);
        }
        Ok(next)
    }
}
