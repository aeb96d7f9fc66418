use std::collections::BTreeMap;

use lineup_roster::Roster;
use lineup_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

use crate::ScoreComparator;

/// Spreads below this are treated as zero and do not rescale a category.
const STDDEV_EPSILON: f64 = 1e-9;

/// A category the scorer cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringCategory {
    pub name: String,
    #[serde(default = "default_higher_is_better")]
    pub higher_is_better: bool,
}

fn default_higher_is_better() -> bool {
    true
}

impl ScoringCategory {
    #[must_use]
    pub fn higher_is_better(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            higher_is_better: true,
        }
    }

    #[must_use]
    pub fn lower_is_better(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            higher_is_better: false,
        }
    }
}

/// Scoring settings, as found under `scoring` in a problem file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub categories: Vec<ScoringCategory>,
    /// Projected category totals of the opponent. Missing categories count as zero.
    #[serde(default)]
    pub opponent: BTreeMap<String, f64>,
}

/// Scores rosters by the sum of their players' projections in each category.
///
/// ```text
/// score = Σ sign(c) × (total(c) - opponent(c)) / stddev(c)
/// ```
///
/// where `sign(c)` is `-1` for lower-is-better categories and `stddev(c)` is the spread of
/// `total(c)` across the rosters passed to [`ScoreComparator::compute_stddevs`] (1 until
/// computed, or when the spread is zero). Benched players are not counted.
#[derive(Debug, Clone)]
pub struct CategoryScorer {
    categories: Vec<ScoringCategory>,
    opponent: BTreeMap<String, f64>,
    stddevs: BTreeMap<String, f64>,
    baseline: Option<f64>,
}

impl CategoryScorer {
    #[must_use]
    pub fn new(config: ScoringConfig) -> Self {
        let ScoringConfig {
            categories,
            opponent,
        } = config;
        Self {
            categories,
            opponent,
            stddevs: BTreeMap::new(),
            baseline: None,
        }
    }

    /// Per-category totals of the players holding a position.
    #[must_use]
    pub fn summarize(&self, roster: &Roster) -> BTreeMap<String, f64> {
        self.categories
            .iter()
            .map(|c| {
                let total = roster
                    .active_players()
                    .filter_map(|p| p.category_value(&c.name))
                    .filter(|v| !v.is_nan())
                    .sum::<f64>();
                (c.name.clone(), total)
            })
            .collect()
    }

    #[must_use]
    pub fn stddev(&self, category: &str) -> Option<f64> {
        self.stddevs.get(category).copied()
    }
}

impl ScoreComparator for CategoryScorer {
    fn compute_stddevs(&mut self, rosters: &[&Roster]) {
        let summaries = rosters
            .iter()
            .map(|r| self.summarize(r))
            .collect::<Vec<_>>();
        self.stddevs = self
            .categories
            .iter()
            .filter_map(|c| {
                let stats = DescriptiveStats::new(summaries.iter().map(|s| s[&c.name]))?;
                Some((c.name.clone(), stats.std_dev))
            })
            .collect();
    }

    fn score_as_stddev(&self, roster: &Roster) -> f64 {
        let summary = self.summarize(roster);
        self.categories
            .iter()
            .map(|c| {
                let mine = summary[&c.name];
                let theirs = self.opponent.get(&c.name).copied().unwrap_or(0.0);
                let scale = self
                    .stddev(&c.name)
                    .filter(|s| *s > STDDEV_EPSILON)
                    .unwrap_or(1.0);
                let sign = if c.higher_is_better { 1.0 } else { -1.0 };
                sign * (mine - theirs) / scale
            })
            .sum()
    }

    fn update_score(&mut self, roster: &Roster) {
        self.baseline = Some(self.score_as_stddev(roster));
    }

    fn compare_lineup(&self, roster: &Roster) -> bool {
        let baseline = self.baseline.unwrap_or(f64::NEG_INFINITY);
        self.score_as_stddev(roster) > baseline
    }
}
