use crate::{cursor::Cursor, error::Result, producer::Producer};

/// How `zip_with_option` treats sequences of different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZipWithOption {
    /// Stop at the end of the shorter side.
    #[default]
    RequireBoth,
    /// Continue to the end of the longer side, passing `None` for the exhausted one.
    AllowUnpaired,
}

pub(crate) struct ZipWith<A, B, F> {
    pub(crate) left: Cursor<A>,
    pub(crate) right: Cursor<B>,
    pub(crate) f: F,
}

impl<A, B, R, F> Producer for ZipWith<A, B, F>
where
    F: FnMut(A, B) -> R + Send,
{
    type Item = R;

    fn produce(&mut self) -> Result<Option<R>> {
        let Some(left) = self.left.try_next()? else {
            return Ok(None);
        };
        let Some(right) = self.right.try_next()? else {
            return Ok(None);
        };
        Ok(Some((self.f)(left, right)))
    }
}

pub(crate) struct ZipWithOptional<A, B, F> {
    pub(crate) left: Cursor<A>,
    pub(crate) right: Cursor<B>,
    pub(crate) option: ZipWithOption,
    pub(crate) f: F,
}

impl<A, B, R, F> Producer for ZipWithOptional<A, B, F>
where
    F: FnMut(Option<A>, Option<B>) -> R + Send,
{
    type Item = R;

    fn produce(&mut self) -> Result<Option<R>> {
        let left = self.left.try_next()?;
        if left.is_none() && self.option == ZipWithOption::RequireBoth {
            return Ok(None);
        }
        let right = self.right.try_next()?;
        match (&left, &right) {
            (None, None) => Ok(None),
            (_, None) if self.option == ZipWithOption::RequireBoth => Ok(None),
            _ => Ok(Some((self.f)(left, right))),
        }
    }
}
