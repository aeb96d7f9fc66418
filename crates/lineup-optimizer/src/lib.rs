//! Lineup optimizers built on the roster assignment engine.
//!
//! Two strategies are provided:
//!
//! - [`GeneticOptimizer`] evolves a population of full lineups drawn from a player pool
//!   and returns the best one found. See the [`genetic`] module.
//! - [`optimize_single_player_at_a_time`] greedily tries the best-ranked free agents
//!   against an existing lineup, one at a time.
//!
//! Both are single-threaded and take their fitness from a
//! [`ScoreComparator`](lineup_scoring::ScoreComparator). Both are tuned by
//! [`OptimizerConfig`].
//!
//! # Architecture
//!
//! ```text
//! PlayerSelector (lineup-roster)
//!     ↓ candidate order
//! RosterBuilder (lineup-roster)
//!     ↓ full rosters
//! ScoreComparator (lineup-scoring)
//!     ↓ fitness
//! Tournament, crossover & mutation
//!     ↓
//! Best lineup
//! ```

use lineup_roster::InvalidCategoryError;

pub use self::{config::*, genetic::*, lineup::*, single_pass::*};

mod config;
pub mod genetic;
mod lineup;
mod single_pass;

/// Errors that abort an optimization.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum OptimizeError {
    #[display("invalid optimizer configuration: {_0}")]
    InvalidConfig(#[error(source)] ConfigError),
    #[display("cannot rank players: {_0}")]
    InvalidCategory(#[error(source)] InvalidCategoryError),
    /// The pool ran out before a roster could be filled.
    #[display("player pool exhausted after placing {placed} of {required} players")]
    ConstructionExhausted { placed: usize, required: usize },
    /// Fewer than two distinct lineups could be built.
    #[display("cannot evolve a population of {size} lineups")]
    PopulationTooSmall { size: usize },
}

impl From<ConfigError> for OptimizeError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfig(e)
    }
}

impl From<InvalidCategoryError> for OptimizeError {
    fn from(e: InvalidCategoryError) -> Self {
        Self::InvalidCategory(e)
    }
}
