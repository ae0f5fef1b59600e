use std::{error::Error, sync::Arc};

use thiserror::Error;

/// A producer failure, shared so a terminated source can report it again.
pub type Cause = Arc<dyn Error + Send + Sync + 'static>;

pub type Result<T, E = SeqError> = std::result::Result<T, E>;

#[derive(Debug, Clone, Error)]
pub enum SeqError {
    /// The upstream producer failed while being pulled.
    #[error("source failed after producing {produced} elements: {cause}")]
    Source { produced: usize, cause: Cause },

    /// The upstream producer, or a closure run while producing, panicked.
    #[error("source panicked after producing {produced} elements")]
    Panicked { produced: usize },

    /// The requested index can never hold an element.
    #[error("index {index} is out of bounds")]
    Index { index: isize, len: Option<usize> },
}

impl SeqError {
    /// Wraps a producer's own error. The produced count is filled in by the
    /// source that observes the failure.
    pub fn source<E>(cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        SeqError::Source {
            produced: 0,
            cause: Arc::new(cause),
        }
    }

    /// Number of elements produced before the failure, if this is a production error.
    pub fn produced(&self) -> Option<usize> {
        match self {
            SeqError::Source { produced, .. } | SeqError::Panicked { produced } => Some(*produced),
            SeqError::Index { .. } => None,
        }
    }

    pub fn is_source(&self) -> bool {
        matches!(self, SeqError::Source { .. } | SeqError::Panicked { .. })
    }

    pub(crate) fn with_produced(self, produced: usize) -> Self {
        match self {
            SeqError::Source { cause, .. } => SeqError::Source { produced, cause },
            SeqError::Panicked { .. } => SeqError::Panicked { produced },
            index @ SeqError::Index { .. } => index,
        }
    }
}
