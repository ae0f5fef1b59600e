//! Lazy, memoizing, thread-safe sequences.
//!
//! A lazy [`Seq`](seq::Seq) pulls each element from its producer at most once
//! and caches it; any number of cursors, on any number of threads, then read
//! the cache. Derived sequences share their parent's cache and add their own
//! only where recomputation would be observable.
//!
//! ```
//! use funclist_core::prelude::*;
//!
//! let squares = Seq::from_iterator(0..).map(|i: u64| i * i);
//! assert_eq!(squares.limit(4).to_vec().unwrap(), vec![0, 1, 4, 9]);
//!
//! let runs = Seq::of([0, 1, 2, 5, 6, 10]).segment_between(|a, b| b - a > 2);
//! assert_eq!(runs.to_string(), "[[0, 1, 2], [5, 6], [10]]");
//! ```

mod adapter;
mod node;

pub mod cache;
pub mod config;
pub mod consumer;
pub mod cursor;
pub mod element;
pub mod error;
pub mod producer;
pub mod seq;
pub mod source;
mod step;

pub use adapter::zip;

pub mod prelude {
    pub use crate::{
        consumer::{fold, Aggregator, Statistics},
        cursor::Cursor,
        element::{Element, Numeric},
        error::{Result, SeqError},
        producer::Producer,
        seq::{DoubleSeq, IntSeq, LongSeq, Mode, Seq},
        source::SourceState,
        zip::ZipWithOption,
    };
}
