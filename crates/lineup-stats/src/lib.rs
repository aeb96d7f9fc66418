//! Statistics helpers shared by the scoring and optimizer crates.
//!
//! - [`descriptive`]: mean, spread and range of a set of samples
//!
//! # Example
//!
//! ```
//! use lineup_stats::descriptive::DescriptiveStats;
//!
//! let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 5.0);
//! assert_eq!(stats.std_dev, 2.0);
//! ```

pub mod descriptive;
