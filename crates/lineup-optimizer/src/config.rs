use serde::{Deserialize, Serialize};

/// Tunable parameters shared by both optimizers.
///
/// Deserialized from the `optimizer` object of a problem file. Missing keys take their
/// defaults.
///
/// ```
/// # use lineup_optimizer::OptimizerConfig;
/// let config: OptimizerConfig =
///     serde_json::from_str(r#"{"categories":["HR","SB"],"mutationPct":10}"#).unwrap();
/// assert_eq!(config.mutation_pct, 10);
/// assert_eq!(config.tournament_participants, 8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizerConfig {
    /// Categories the single-pass optimizer ranks free agents by.
    pub categories: Vec<String>,
    /// Number of top-ranked free agents the single-pass optimizer tries.
    pub iterations: usize,
    /// Default generation count of a genetic run.
    pub generations: usize,
    pub initial_population_size: usize,
    /// Tournament size. Must be a power of two.
    pub tournament_participants: usize,
    /// Offspring produced per mating.
    pub num_offspring: usize,
    /// Chance, in percent, that a player is dropped from a lineup during mutation.
    pub mutation_pct: u8,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            categories: vec![],
            iterations: 10,
            generations: 100,
            initial_population_size: 100,
            tournament_participants: 8,
            num_offspring: 4,
            mutation_pct: 5,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let participants = self.tournament_participants;
        if participants < 2 || !participants.is_power_of_two() {
            return Err(ConfigError::TournamentSize { participants });
        }
        if self.mutation_pct > 100 {
            return Err(ConfigError::MutationPct {
                pct: self.mutation_pct,
            });
        }
        if self.initial_population_size < 2 {
            return Err(ConfigError::PopulationSize {
                size: self.initial_population_size,
            });
        }
        if self.num_offspring == 0 {
            return Err(ConfigError::NoOffspring);
        }
        Ok(())
    }

    /// Per-player drop probability for mutation.
    #[must_use]
    pub fn mutation_probability(&self) -> f64 {
        f64::from(self.mutation_pct.min(100)) / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("tournament size must be a power of two of at least 2, got {participants}")]
    TournamentSize { participants: usize },
    #[display("mutation percentage must be between 0 and 100, got {pct}")]
    MutationPct { pct: u8 },
    #[display("initial population must hold at least 2 lineups, got {size}")]
    PopulationSize { size: usize },
    #[display("at least one offspring per mating is required")]
    NoOffspring,
}
