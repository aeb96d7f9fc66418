//! Genetic search over complete lineups.
//!
//! # Algorithm Overview
//!
//! 1. **Initialize** - Pack the pool into full rosters, first in ownership order, then in
//!    shuffled orders until the population reaches its configured size
//! 2. **Score** - Compute category spreads across the initial population once and score
//!    every lineup in standard-deviation units
//! 3. **Mate** - Pick two parents by tournament, breed offspring from their combined
//!    players and return the two best distinct lineups of the family to the population
//! 4. **Mutate** - Drop random players from every lineup, refill from the whole pool and
//!    keep the result only if it scores strictly higher
//! 5. **Repeat** steps 3 and 4 for the requested number of generations
//!
//! The population never holds two lineups with the same players (see [`Population`]), and
//! every lineup it holds is full.
//!
//! # Example
//!
//! ```
//! use lineup_optimizer::{GeneticOptimizer, OptimizerConfig};
//! use lineup_roster::{Player, PlayerId, PlayerPool, RosterBuilder, RosterLayout};
//! use lineup_scoring::{CategoryScorer, ScoringCategory, ScoringConfig};
//!
//! let layout = RosterLayout::from_iter([("C", 1), ("SP", 1)]);
//! let pool = (1..=6)
//!     .map(|id| {
//!         let pos = if id % 2 == 0 { "C" } else { "SP" };
//!         Player::new(PlayerId::new(id), format!("P{id}"), [pos]).with_stat("V", id as f64)
//!     })
//!     .collect::<PlayerPool>();
//! let scorer = CategoryScorer::new(ScoringConfig {
//!     categories: vec![ScoringCategory::higher_is_better("V")],
//!     ..ScoringConfig::default()
//! });
//! let config = OptimizerConfig {
//!     initial_population_size: 4,
//!     tournament_participants: 2,
//!     ..OptimizerConfig::default()
//! };
//!
//! let mut optimizer = GeneticOptimizer::new(config, RosterBuilder::new(layout), scorer, pool)
//!     .unwrap()
//!     .with_seed(1);
//! let outcome = optimizer.run(20).unwrap();
//! assert_eq!(outcome.best.roster().len(), 2);
//! ```

use lineup_roster::{Player, PlayerPool, PlayerSelector, Roster, RosterBuilder};
use lineup_scoring::ScoreComparator;
use lineup_stats::descriptive::DescriptiveStats;
use log::{debug, info, trace, warn};
use rand::{Rng, SeedableRng as _, seq::IndexedRandom};
use rand_pcg::Pcg32;

use crate::{
    OptimizeError, OptimizerConfig,
    lineup::{Lineup, LineupId, LineupIds, Population, Signature},
};

/// Consecutive shuffled packing passes without a new lineup before initialization gives
/// up on reaching the configured population size.
const MAX_IDLE_RANDOM_PASSES: usize = 64;

/// Progress of a run, passed to the callback of [`GeneticOptimizer::run_with_progress`].
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Zero-based index of the generation just completed.
    pub generation: usize,
    pub generations: usize,
    pub population_size: usize,
    pub fitness: DescriptiveStats,
}

/// Result of a run.
#[derive(Debug, Clone)]
pub struct OptimizeOutcome {
    pub best: Lineup,
    pub generations: usize,
    pub population_size: usize,
}

/// Evolves a population of full lineups drawn from a player pool.
///
/// The optimizer owns its random source. It is seeded from the OS unless
/// [`Self::with_seed`] is used, in which case runs are reproducible.
#[derive(Debug)]
pub struct GeneticOptimizer<C> {
    config: OptimizerConfig,
    builder: RosterBuilder,
    comparator: C,
    pool: PlayerPool,
    rng: Pcg32,
    ids: LineupIds,
    population: Population,
    incumbent: Option<Lineup>,
}

impl<C> GeneticOptimizer<C>
where
    C: ScoreComparator,
{
    /// Creates an optimizer after validating `config`.
    pub fn new(
        config: OptimizerConfig,
        builder: RosterBuilder,
        comparator: C,
        pool: PlayerPool,
    ) -> Result<Self, OptimizeError> {
        config.validate()?;
        Ok(Self {
            config,
            builder,
            comparator,
            pool,
            rng: Pcg32::from_rng(&mut rand::rng()),
            ids: LineupIds::default(),
            population: Population::new(),
            incumbent: None,
        })
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Pcg32::seed_from_u64(seed);
        self
    }

    /// Sets the team's current lineup.
    ///
    /// Its healthy players join the pool. A run returns it unless some lineup scores
    /// strictly higher.
    #[must_use]
    pub fn with_incumbent(mut self, roster: Roster) -> Self {
        for player in roster.iter().filter(|p| p.is_available()) {
            let mut player = player.clone();
            player.selected_position = None;
            self.pool.insert(player);
        }
        self.incumbent = Some(Lineup::new(self.ids.next_id(), roster));
        self
    }

    #[must_use]
    pub fn pool(&self) -> &PlayerPool {
        &self.pool
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[must_use]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Runs `generations` generations and returns the best lineup found.
    pub fn run(&mut self, generations: usize) -> Result<OptimizeOutcome, OptimizeError> {
        self.run_with_progress(generations, |_| {})
    }

    /// Like [`Self::run`], calling `on_generation` after every generation.
    pub fn run_with_progress<F>(
        &mut self,
        generations: usize,
        mut on_generation: F,
    ) -> Result<OptimizeOutcome, OptimizeError>
    where
        F: FnMut(&GenerationReport),
    {
        info!(
            "Evolving lineups for {generations} generations from a pool of {} players",
            self.pool.len()
        );
        self.init_population()?;

        for generation in 0..generations {
            self.mate()?;
            self.mutate()?;

            if let Some(fitness) = self.population.fitness_stats() {
                debug!(
                    "Generation #{generation}: max={:.3}, mean={:.3}, min={:.3}",
                    fitness.max, fitness.mean, fitness.min
                );
                on_generation(&GenerationReport {
                    generation,
                    generations,
                    population_size: self.population.len(),
                    fitness,
                });
            }
        }

        let best = self.best_lineup().ok_or(OptimizeError::PopulationTooSmall {
            size: self.population.len(),
        })?;
        info!(
            "Best lineup #{} scores {:.3}",
            best.id(),
            best.score().unwrap_or(f64::NAN)
        );
        Ok(OptimizeOutcome {
            best,
            generations,
            population_size: self.population.len(),
        })
    }

    /// The incumbent, unless a population member strictly beats it.
    fn best_lineup(&self) -> Option<Lineup> {
        let best = self.population.best();
        match (&self.incumbent, best) {
            (Some(incumbent), Some(best)) if best.fitness() > incumbent.fitness() => {
                Some(best.clone())
            }
            (Some(incumbent), _) => Some(incumbent.clone()),
            (None, best) => best.cloned(),
        }
    }

    fn init_population(&mut self) -> Result<(), OptimizeError> {
        self.population = Population::new();
        let target = self.config.initial_population_size;

        let mut selector = PlayerSelector::new(&self.pool);
        if !self.pool.is_empty() {
            selector.set_descending_categories(Vec::<String>::new());
            selector.rank(&[Player::PERCENT_OWNED])?;
        }
        let mut added = 0;
        for roster in pack_full_rosters(&self.builder, selector.select()) {
            if self.population.len() >= target {
                break;
            }
            added += usize::from(self.population.insert(Lineup::new(self.ids.next_id(), roster)));
        }
        debug!("{added} lineups packed in ownership order");

        let mut idle_passes = 0;
        while self.population.len() < target && idle_passes < MAX_IDLE_RANDOM_PASSES {
            selector.shuffle(&mut self.rng);
            let mut added = 0;
            for roster in pack_full_rosters(&self.builder, selector.select()) {
                if self.population.len() >= target {
                    break;
                }
                if !self.population.contains(&Signature::of(&roster)) {
                    self.population.insert(Lineup::new(self.ids.next_id(), roster));
                    added += 1;
                }
            }
            idle_passes = if added == 0 { idle_passes + 1 } else { 0 };
        }

        let size = self.population.len();
        if size < 2 {
            return Err(OptimizeError::PopulationTooSmall { size });
        }
        if size < target {
            warn!("Only {size} distinct lineups could be built, {target} requested");
        }

        let rosters = self.population.iter().map(Lineup::roster).collect::<Vec<_>>();
        self.comparator.compute_stddevs(&rosters);
        let comparator = &self.comparator;
        self.population.score_unscored(|roster| comparator.score_as_stddev(roster));
        if let Some(incumbent) = self.incumbent.take() {
            let score = self.comparator.score_as_stddev(incumbent.roster());
            self.incumbent = Some(incumbent.with_score(score));
        }
        info!("Initial population holds {size} lineups");
        Ok(())
    }

    /// Replaces two tournament winners by the best two distinct lineups of their family.
    fn mate(&mut self) -> Result<(), OptimizeError> {
        let Some([first, second]) = tournament(
            &self.population,
            self.config.tournament_participants,
            &mut self.rng,
        ) else {
            return Ok(());
        };
        let (Some(mother), Some(father)) = (
            self.population.remove(&first),
            self.population.remove(&second),
        ) else {
            return Ok(());
        };
        debug!("Mating lineups #{} and #{}", mother.id(), father.id());
        self.produce_offspring([mother, father])
    }

    fn produce_offspring(&mut self, parents: [Lineup; 2]) -> Result<(), OptimizeError> {
        let pool = PlayerPool::from_rosters(parents.iter().map(Lineup::roster));
        let mut family = Vec::from(parents);
        for _ in 0..self.config.num_offspring {
            let roster = complete_lineup(&self.builder, &pool, Roster::new(), &mut self.rng)?;
            let score = self.comparator.score_as_stddev(&roster);
            let child = Lineup::new(self.ids.next_id(), roster).with_score(score);
            debug!("Offspring #{} scores {score:.3}", child.id());
            family.push(child);
        }

        for id in admit_family(&mut self.population, family) {
            trace!("Lineup #{id} joins the population");
        }
        Ok(())
    }

    fn mutate(&mut self) -> Result<(), OptimizeError> {
        let probability = self.config.mutation_probability();
        for sids in self.population.signatures() {
            let Some(original) = self.population.get(&sids) else {
                continue;
            };
            let dropped = original
                .roster()
                .iter()
                .filter(|_| self.rng.random_bool(probability))
                .map(|p| p.player_id)
                .collect::<Vec<_>>();
            if dropped.is_empty() {
                continue;
            }

            let original_id = original.id();
            let original_score = original.fitness();
            let mut roster = original.roster().clone();
            roster.remove_where(|p| dropped.contains(&p.player_id));
            let roster = complete_lineup(&self.builder, &self.pool, roster, &mut self.rng)?;
            let score = self.comparator.score_as_stddev(&roster);

            let mutated_sids = Signature::of(&roster);
            let is_new = mutated_sids == sids || !self.population.contains(&mutated_sids);
            if score > original_score && is_new {
                let mutated = Lineup::new(self.ids.next_id(), roster).with_score(score);
                debug!(
                    "Lineup #{original_id} mutated into #{} ({original_score:.3} -> {score:.3})",
                    mutated.id()
                );
                self.population.remove(&sids);
                self.population.insert(mutated);
            }
        }
        Ok(())
    }
}

/// Greedily packs `candidates` into parallel partial rosters.
///
/// Each candidate goes into the first non-full roster that has room for it, or starts a
/// new one. Unavailable players are skipped. Returns the rosters that became full, in the
/// order they did.
fn pack_full_rosters<'a, I>(builder: &RosterBuilder, candidates: I) -> Vec<Roster>
where
    I: IntoIterator<Item = &'a Player>,
{
    let mut partials: Vec<Roster> = vec![];
    let mut full = vec![];
    for player in candidates.into_iter().filter(|p| p.is_available()) {
        let placed = partials
            .iter_mut()
            .position(|r| !builder.is_full(r) && builder.fit_if_space(r, player).is_ok());
        let index = match placed {
            Some(index) => index,
            None => {
                let mut roster = Roster::new();
                if let Err(e) = builder.fit_if_space(&mut roster, player) {
                    trace!("{e}");
                    continue;
                }
                partials.push(roster);
                partials.len() - 1
            }
        };
        if builder.is_full(&partials[index]) {
            full.push(partials[index].clone());
        }
    }
    full
}

/// Fills `roster` from a shuffled `pool`, skipping unavailable players and those it
/// already holds.
fn complete_lineup<R>(
    builder: &RosterBuilder,
    pool: &PlayerPool,
    mut roster: Roster,
    rng: &mut R,
) -> Result<Roster, OptimizeError>
where
    R: Rng + ?Sized,
{
    if builder.is_full(&roster) {
        return Ok(roster);
    }
    let mut selector = PlayerSelector::new(pool);
    selector.shuffle(rng);
    for player in selector.select() {
        if !player.is_available() || roster.contains(player.player_id) {
            continue;
        }
        if let Err(e) = builder.fit_if_space(&mut roster, player) {
            trace!("{e}");
            continue;
        }
        if builder.is_full(&roster) {
            return Ok(roster);
        }
    }
    Err(OptimizeError::ConstructionExhausted {
        placed: roster.len(),
        required: builder.max_players(),
    })
}

/// Picks two parents by single-elimination tournament.
///
/// Returns `None` when the population holds fewer than two lineups.
fn tournament<R>(
    population: &Population,
    participants: usize,
    rng: &mut R,
) -> Option<[Signature; 2]>
where
    R: Rng + ?Sized,
{
    if population.len() < 2 {
        return None;
    }
    let members = population.iter().collect::<Vec<_>>();
    let round = members
        .choose_multiple(rng, tournament_size(participants, members.len()))
        .copied()
        .collect::<Vec<_>>();
    let [a, b] = final_pair(round)?;
    Some([a.sids().clone(), b.sids().clone()])
}

/// Plays pairwise rounds until two lineups remain. The higher score wins a pair; a tie
/// goes to the second lineup.
fn final_pair(mut round: Vec<&Lineup>) -> Option<[&Lineup; 2]> {
    while round.len() > 2 {
        round = round
            .chunks_exact(2)
            .map(|pair| {
                if pair[0].fitness() > pair[1].fitness() {
                    pair[0]
                } else {
                    pair[1]
                }
            })
            .collect();
    }
    match round.as_slice() {
        [a, b] => Some([*a, *b]),
        _ => None,
    }
}

/// Adds the two best lineups of `family` that are not yet in `population`.
///
/// The family is sorted by score, highest first, and adjacent lineups with the same
/// players are collapsed to the first of them. Returns the ids of the admitted lineups.
fn admit_family(population: &mut Population, mut family: Vec<Lineup>) -> Vec<LineupId> {
    family.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
    family.dedup_by(|later, earlier| later.sids() == earlier.sids());

    let mut admitted = vec![];
    for lineup in family {
        if admitted.len() == 2 {
            break;
        }
        let id = lineup.id();
        if population.insert(lineup) {
            admitted.push(id);
        }
    }
    admitted
}

/// `participants`, shrunk to the largest power of two that fits in the population.
fn tournament_size(participants: usize, population: usize) -> usize {
    if participants <= population {
        participants
    } else {
        1 << population.ilog2()
    }
}
