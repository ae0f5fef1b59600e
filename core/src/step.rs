/// One step of a cursor.
///
/// `NotYet` means the cursor did work but has nothing to hand out yet, e.g. a
/// filter that rejected an element. Callers keep stepping until `Ready` or `Done`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    NotYet,
    Ready(T),
    Done,
}

impl<T> Step<T> {
    /// Feeds a ready item to `f`, which may still reject it with `NotYet`.
    #[inline]
    pub fn and_then<G, F>(self, f: F) -> Step<G>
    where
        F: FnOnce(T) -> Step<G>,
    {
        match self {
            Step::NotYet => Step::NotYet,
            Step::Ready(ready) => f(ready),
            Step::Done => Step::Done,
        }
    }
}

impl<T> From<Option<T>> for Step<T> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Step::Ready(value),
            None => Step::Done,
        }
    }
}
