//! Derived operations. Index-aligned views (`limit`, `skip`) keep random access;
//! predicate views (`filter`, `take_while`, `skip_while`) and concatenations
//! (`flat_map`, `chain`) walk a parent cursor and cache nothing; the rest are
//! producers feeding a fresh memoizing source.

pub(crate) mod chain;
pub(crate) mod distinct;
pub(crate) mod filter;
pub(crate) mod flat_map;
pub(crate) mod map;
pub(crate) mod peek;
pub(crate) mod percentile;
pub(crate) mod segment;
pub(crate) mod skip;
pub(crate) mod skip_while;
pub(crate) mod sorted;
pub(crate) mod take;
pub(crate) mod take_while;
pub mod zip;
