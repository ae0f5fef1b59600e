use crate::{
    cursor::Cursor,
    element::Element,
    error::Result,
    producer::Producer,
    seq::{Mode, Seq},
};

/// Splits a sequence into runs. A run ends between `current` and `next` exactly
/// when `boundary(current, next)` holds; `next` then opens the following run.
pub(crate) struct SegmentBetween<T, F> {
    pub(crate) cursor: Cursor<T>,
    pub(crate) boundary: F,
    pub(crate) pending: Option<T>,
    pub(crate) mode: Mode,
}

impl<T, F> Producer for SegmentBetween<T, F>
where
    T: Element,
    F: FnMut(&T, &T) -> bool + Send,
{
    type Item = Seq<T>;

    fn produce(&mut self) -> Result<Option<Seq<T>>> {
        let first = match self.pending.take() {
            Some(first) => first,
            None => match self.cursor.try_next()? {
                Some(first) => first,
                None => return Ok(None),
            },
        };

        let mut segment = vec![first];
        while let Some(next) = self.cursor.try_next()? {
            let split = segment
                .last()
                .map_or(false, |current| (self.boundary)(current, &next));
            if split {
                self.pending = Some(next);
                break;
            }
            segment.push(next);
        }
        Ok(Some(Seq::array(segment, self.mode)))
    }
}
