use chrono::{DateTime, Utc};
use lineup_optimizer::OptimizerConfig;
use lineup_roster::{Roster, RosterLayout};
use lineup_scoring::ScoringConfig;
use serde::{Deserialize, Serialize};

use crate::command::OptimizeMode;

/// Contents of a problem file: what to build and how to judge it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub layout: RosterLayout,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedLineup {
    pub mode: OptimizeMode,
    pub optimized_at: DateTime<Utc>,
    pub score: Option<f64>,
    pub lineup: Roster,
}

#[cfg(test)]
mod tests {
    use lineup_roster::Position;

    use super::*;

    #[test]
    fn test_problem_deserialize() {
        let json = r#"{
            "layout": {"C": 1, "OF": 3, "SP": 2},
            "optimizer": {"generations": 5, "mutationPct": 10},
            "scoring": {"categories": [{"name": "HR"}, {"name": "ERA", "higherIsBetter": false}]}
        }"#;
        let problem: Problem = serde_json::from_str(json).unwrap();
        assert_eq!(problem.layout.max_players(), 6);
        assert_eq!(problem.layout.capacity(&Position::from("OF")), 3);
        assert_eq!(problem.optimizer.generations, 5);
        assert_eq!(problem.optimizer.tournament_participants, 8);
        assert_eq!(problem.scoring.categories.len(), 2);
        assert!(!problem.scoring.categories[1].higher_is_better);
    }
}
