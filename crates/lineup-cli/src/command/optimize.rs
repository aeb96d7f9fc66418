use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use lineup_optimizer::{GeneticOptimizer, optimize_single_player_at_a_time};
use lineup_roster::{PlayerPool, Position, Roster, RosterBuilder};
use lineup_scoring::{CategoryScorer, ScoreComparator as _};
use log::info;
use serde::Serialize;

use crate::{
    schema::{OptimizedLineup, Problem},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizeMode {
    /// Evolve a population of lineups
    #[default]
    Genetic,
    /// Try the best free agents against the current lineup, one at a time
    SinglePlayer,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct OptimizeArg {
    /// Player pool JSON file
    #[arg(long)]
    pool: PathBuf,
    /// Problem JSON file (layout, optimizer and scoring settings)
    #[arg(long)]
    problem: PathBuf,
    /// Current lineup JSON file
    #[arg(long)]
    lineup: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t)]
    mode: OptimizeMode,
    /// Seed for a reproducible genetic run
    #[arg(long)]
    seed: Option<u64>,
    /// Number of generations, overriding the problem file
    #[arg(long)]
    generations: Option<usize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &OptimizeArg) -> anyhow::Result<()> {
    let problem = util::read_problem_file(&arg.problem)?;
    let pool = util::read_pool_file(&arg.pool)?;
    let lineup = arg
        .lineup
        .as_ref()
        .map(util::read_lineup_file)
        .transpose()?;
    info!(
        "Loaded {} players, {} roster slots",
        pool.len(),
        problem.layout.max_players()
    );

    let result = optimize(arg, problem, pool, lineup)?;
    Output::save_json(&result, arg.output.clone())?;

    eprintln!();
    eprintln!("Lineup saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Optimized at: {}", result.optimized_at);
    if let Some(score) = result.score {
        eprintln!("  Score: {score:.3}");
    }
    for player in result.lineup.active_players() {
        let position = player
            .selected_position
            .as_ref()
            .map_or("-", Position::as_str);
        eprintln!("  {position:>4}: {}", player.name);
    }
    Ok(())
}

fn optimize(
    arg: &OptimizeArg,
    problem: Problem,
    pool: PlayerPool,
    lineup: Option<Roster>,
) -> anyhow::Result<OptimizedLineup> {
    let Problem {
        layout,
        optimizer: config,
        scoring,
    } = problem;
    let builder = RosterBuilder::new(layout);
    let mut scorer = CategoryScorer::new(scoring);

    match arg.mode {
        OptimizeMode::Genetic => {
            let generations = arg.generations.unwrap_or(config.generations);
            let mut optimizer = GeneticOptimizer::new(config, builder, scorer, pool)?;
            if let Some(seed) = arg.seed {
                optimizer = optimizer.with_seed(seed);
            }
            if let Some(lineup) = lineup {
                optimizer = optimizer.with_incumbent(lineup);
            }
            let outcome = optimizer.run_with_progress(generations, |report| {
                eprintln!(
                    "Generation #{}/{}: max={:.3}, mean={:.3}, min={:.3} ({} lineups)",
                    report.generation + 1,
                    report.generations,
                    report.fitness.max,
                    report.fitness.mean,
                    report.fitness.min,
                    report.population_size,
                );
            })?;
            Ok(OptimizedLineup {
                mode: arg.mode,
                optimized_at: Utc::now(),
                score: outcome.best.score(),
                lineup: outcome.best.into_roster(),
            })
        }
        OptimizeMode::SinglePlayer => {
            let lineup =
                lineup.context("single-player mode needs the current lineup (--lineup)")?;
            let best =
                optimize_single_player_at_a_time(&config, &mut scorer, &builder, &pool, &lineup)?;
            let lineup = best.unwrap_or_else(|| {
                info!("No free agent improves the current lineup");
                lineup
            });
            Ok(OptimizedLineup {
                mode: arg.mode,
                optimized_at: Utc::now(),
                score: Some(scorer.score_as_stddev(&lineup)),
                lineup,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use lineup_optimizer::OptimizerConfig;
    use lineup_roster::{Player, PlayerId, RosterLayout};
    use lineup_scoring::{ScoringCategory, ScoringConfig};

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[clap(flatten)]
        arg: OptimizeArg,
    }

    fn arg(mode: OptimizeMode) -> OptimizeArg {
        OptimizeArg {
            pool: PathBuf::from("pool.json"),
            problem: PathBuf::from("problem.json"),
            lineup: None,
            mode,
            seed: Some(9),
            generations: Some(5),
            output: None,
        }
    }

    fn problem() -> Problem {
        Problem {
            layout: RosterLayout::from_iter([("C", 1), ("SP", 1)]),
            optimizer: OptimizerConfig {
                categories: vec!["HR".to_owned()],
                initial_population_size: 4,
                tournament_participants: 2,
                ..OptimizerConfig::default()
            },
            scoring: ScoringConfig {
                categories: vec![ScoringCategory::higher_is_better("HR")],
                ..ScoringConfig::default()
            },
        }
    }

    fn pool() -> PlayerPool {
        [
            Player::new(PlayerId::new(1), "Borders", ["C"]).with_stat("HR", 15.0),
            Player::new(PlayerId::new(2), "Myers", ["C"]).with_stat("HR", 8.0),
            Player::new(PlayerId::new(3), "Knorr", ["C"]).with_stat("HR", 5.0),
            Player::new(PlayerId::new(4), "Stieb", ["SP"]).with_stat("HR", 0.0),
            Player::new(PlayerId::new(5), "Key", ["SP"]).with_stat("HR", 0.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "lineup",
            "--pool",
            "players.json",
            "--problem",
            "problem.json",
            "--mode",
            "single-player",
            "--seed",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.arg.mode, OptimizeMode::SinglePlayer);
        assert_eq!(cli.arg.seed, Some(3));
        assert!(cli.arg.lineup.is_none());

        let cli =
            Cli::try_parse_from(["lineup", "--pool", "a.json", "--problem", "b.json"]).unwrap();
        assert_eq!(cli.arg.mode, OptimizeMode::Genetic);
        assert!(Cli::try_parse_from(["lineup", "--pool", "a.json"]).is_err());
    }

    #[test]
    fn test_genetic_mode() {
        let result = optimize(&arg(OptimizeMode::Genetic), problem(), pool(), None).unwrap();
        assert_eq!(result.mode, OptimizeMode::Genetic);
        assert_eq!(result.lineup.len(), 2);
        assert!(result.lineup.contains(PlayerId::new(1)));
        assert!(result.score.is_some());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mode"], "genetic");
        assert!(json["optimizedAt"].is_string());
        assert_eq!(json["lineup"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_single_player_mode() {
        let builder = RosterBuilder::new(problem().layout);
        let mut current = Roster::new();
        for id in [2, 4] {
            builder
                .fit_if_space(&mut current, pool().get(PlayerId::new(id)).unwrap())
                .unwrap();
        }
        let free_agents = [
            Player::new(PlayerId::new(1), "Borders", ["C"]).with_stat("HR", 15.0),
            Player::new(PlayerId::new(3), "Knorr", ["C"]).with_stat("HR", 5.0),
        ]
        .into_iter()
        .collect();

        let result = optimize(
            &arg(OptimizeMode::SinglePlayer),
            problem(),
            free_agents,
            Some(current),
        )
        .unwrap();
        assert_eq!(result.score, Some(15.0));
        let active = result
            .lineup
            .active_players()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(active, ["Stieb", "Borders"]);
        assert_eq!(
            serde_json::to_value(&result).unwrap()["mode"],
            "single-player"
        );
    }

    #[test]
    fn test_single_player_mode_needs_lineup() {
        let err = optimize(&arg(OptimizeMode::SinglePlayer), problem(), pool(), None).unwrap_err();
        assert!(err.to_string().contains("--lineup"));
    }
}
