//! Fitness oracles for lineups.
//!
//! The optimizers never look at stats themselves; they hand rosters to a
//! [`ScoreComparator`] and get back a number (or a better/worse verdict).
//!
//! ```text
//! candidate roster
//!     ↓ summarized by
//! ScoreComparator (per-category totals)
//!     ↓ standardized by
//! per-category std devs (computed once over an initial population)
//!     ↓ produces
//! fitness value (higher is better)
//! ```
//!
//! [`CategoryScorer`] is a reference comparator that sums projected stats per category.
//! Leagues with ratio categories or schedule-aware projections plug in their own
//! implementation.

pub use self::{category_scorer::*, comparator::*};

mod category_scorer;
mod comparator;
