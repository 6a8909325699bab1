//! Row matching engines.
//!
//! Two engines classify the rows of a file pair: [`EquivalenceMatcher`]
//! compares trie keys derived from name or coordinate columns, and
//! [`OverlapMatcher`] compares closed numeric intervals. Both route every
//! row of both inputs to exactly one partition.

pub mod equivalence;
pub mod overlap;

pub use equivalence::{EquivalenceMatcher, KeySpec};
pub use overlap::OverlapMatcher;
