use crate::{cursor::Cursor, error::Result, producer::Producer};

pub(crate) struct Map<T, F> {
    pub(crate) cursor: Cursor<T>,
    pub(crate) f: F,
}

impl<T, U, F> Producer for Map<T, F>
where
    F: FnMut(T) -> U + Send,
{
    type Item = U;

    #[inline]
    fn produce(&mut self) -> Result<Option<U>> {
        Ok(self.cursor.try_next()?.map(&mut self.f))
    }
}
