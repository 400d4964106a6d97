//! Cross-entity substring search.
//!
//! # Responsibility
//! - Query tasks and notes for a literal substring.
//! - Merge both entity kinds into one [`SearchHit`] sequence.
//!
//! # See also
//! - `crate::present` for rendering and highlighting hits.

pub mod substring;
