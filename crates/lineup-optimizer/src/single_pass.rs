use lineup_roster::{PlayerPool, PlayerSelector, Roster, RosterBuilder};
use lineup_scoring::ScoreComparator;
use log::{debug, info};

use crate::{OptimizeError, OptimizerConfig};

/// Improves `lineup` one free agent at a time.
///
/// The top `config.iterations` players of `pool`, ranked by `config.categories`, are each
/// tried against the best lineup so far: every way of swapping the player in for one
/// occupant is scored, and any strict improvement becomes the new best.
///
/// Returns `Ok(None)` if nothing beats `lineup`.
pub fn optimize_single_player_at_a_time<C>(
    config: &OptimizerConfig,
    comparator: &mut C,
    builder: &RosterBuilder,
    pool: &PlayerPool,
    lineup: &Roster,
) -> Result<Option<Roster>, OptimizeError>
where
    C: ScoreComparator + ?Sized,
{
    let mut selector = PlayerSelector::new(pool);
    selector.rank(&config.categories)?;
    comparator.update_score(lineup);

    let mut best = lineup.clone();
    let mut improved = false;
    for player in selector.select().take(config.iterations) {
        if !player.is_available() || best.contains(player.player_id) {
            continue;
        }
        debug!("Trying {} ({})", player.name, player.player_id);
        let current = best.clone();
        for candidate in builder.enumerate_fit(&current, player) {
            if comparator.compare_lineup(&candidate) {
                info!("Found a better lineup by adding {}", player.name);
                comparator.update_score(&candidate);
                best = candidate;
                improved = true;
            }
        }
    }
    Ok(improved.then_some(best))
}

#[cfg(test)]
mod tests {
    use lineup_roster::{Player, PlayerId, Position, RosterLayout};
    use lineup_scoring::{CategoryScorer, ScoringCategory, ScoringConfig};

    use super::*;

    fn hitter(id: u64, name: &str, positions: &[&str], hr: f64) -> Player {
        Player::new(PlayerId::new(id), name, positions.iter().copied()).with_stat("HR", hr)
    }

    fn setup() -> (RosterBuilder, Roster, CategoryScorer) {
        let builder = RosterBuilder::new(RosterLayout::from_iter([("C", 1), ("1B", 1)]));
        let mut lineup = Roster::new();
        builder
            .fit_if_space(&mut lineup, &hitter(1, "Myers", &["C"], 8.0))
            .unwrap();
        builder
            .fit_if_space(&mut lineup, &hitter(2, "Olerud", &["1B"], 14.0))
            .unwrap();
        let scorer = CategoryScorer::new(ScoringConfig {
            categories: vec![ScoringCategory::higher_is_better("HR")],
            ..ScoringConfig::default()
        });
        (builder, lineup, scorer)
    }

    fn config(iterations: usize) -> OptimizerConfig {
        OptimizerConfig {
            categories: vec!["HR".to_owned()],
            iterations,
            ..OptimizerConfig::default()
        }
    }

    #[test]
    fn test_better_free_agent_is_swapped_in() {
        let (builder, lineup, mut scorer) = setup();
        let pool = [
            hitter(10, "Knorr", &["C"], 5.0),
            hitter(11, "McGriff", &["1B"], 35.0),
        ]
        .into_iter()
        .collect::<PlayerPool>();

        let best =
            optimize_single_player_at_a_time(&config(10), &mut scorer, &builder, &pool, &lineup)
                .unwrap()
                .unwrap();
        let mcgriff = best
            .iter()
            .find(|p| p.player_id == PlayerId::new(11))
            .unwrap();
        assert_eq!(mcgriff.selected_position, Some(Position::from("1B")));
        let olerud = best
            .iter()
            .find(|p| p.player_id == PlayerId::new(2))
            .unwrap();
        assert_eq!(olerud.selected_position, None);
        assert!(!best.contains(PlayerId::new(10)));
        assert_eq!(scorer.score_as_stddev(&best), 8.0 + 35.0);
    }

    #[test]
    fn test_no_improvement() {
        let (builder, lineup, mut scorer) = setup();
        let pool = [hitter(10, "Knorr", &["C"], 5.0)]
            .into_iter()
            .collect::<PlayerPool>();
        let result =
            optimize_single_player_at_a_time(&config(10), &mut scorer, &builder, &pool, &lineup)
                .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_iterations_limit_candidates() {
        let (builder, lineup, mut scorer) = setup();
        let pool = [
            hitter(10, "Knorr", &["C"], 5.0),
            hitter(11, "Fielder", &["1B"], 20.0),
            hitter(12, "Borders", &["C"], 15.0),
        ]
        .into_iter()
        .collect::<PlayerPool>();

        // Only the top-ranked free agent, Fielder, is tried.
        let best =
            optimize_single_player_at_a_time(&config(1), &mut scorer, &builder, &pool, &lineup)
                .unwrap()
                .unwrap();
        assert_eq!(best.active_players().count(), 2);
        assert!(best.contains(PlayerId::new(11)));
        assert!(!best.contains(PlayerId::new(12)));
    }

    #[test]
    fn test_unknown_category() {
        let (builder, lineup, mut scorer) = setup();
        let pool = [hitter(10, "Knorr", &["C"], 5.0)]
            .into_iter()
            .collect::<PlayerPool>();
        let config = OptimizerConfig {
            categories: vec!["SB".to_owned()],
            ..OptimizerConfig::default()
        };
        let err = optimize_single_player_at_a_time(&config, &mut scorer, &builder, &pool, &lineup)
            .unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidCategory(e) if e.category == "SB"));
    }
}
