use std::collections::{BTreeMap, btree_map::Entry};

use lineup_roster::{PlayerId, Roster};
use lineup_stats::descriptive::DescriptiveStats;
use serde::Serialize;

/// Identifier of a lineup, unique within one optimizer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct LineupId(u64);

impl LineupId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Hands out increasing [`LineupId`]s.
#[derive(Debug, Default)]
pub(crate) struct LineupIds {
    next: u64,
}

impl LineupIds {
    pub(crate) fn next_id(&mut self) -> LineupId {
        let id = LineupId(self.next);
        self.next += 1;
        id
    }
}

/// Sorted player ids of a roster.
///
/// Two lineups with the same signature hold the same players, whatever positions they
/// play.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Signature(Vec<PlayerId>);

impl Signature {
    #[must_use]
    pub fn of(roster: &Roster) -> Self {
        Self(roster.sorted_ids())
    }

    #[must_use]
    pub fn ids(&self) -> &[PlayerId] {
        &self.0
    }
}

/// A complete roster considered as one member of a population.
#[derive(Debug, Clone, Serialize)]
pub struct Lineup {
    id: LineupId,
    roster: Roster,
    score: Option<f64>,
    sids: Signature,
}

impl Lineup {
    pub(crate) fn new(id: LineupId, roster: Roster) -> Self {
        let sids = Signature::of(&roster);
        Self {
            id,
            roster,
            score: None,
            sids,
        }
    }

    pub(crate) fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    #[must_use]
    pub fn id(&self) -> LineupId {
        self.id
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Score for comparisons. Unscored lineups lose to everything.
    pub(crate) fn fitness(&self) -> f64 {
        self.score.unwrap_or(f64::NEG_INFINITY)
    }

    #[must_use]
    pub fn sids(&self) -> &Signature {
        &self.sids
    }

    #[must_use]
    pub fn into_roster(self) -> Roster {
        self.roster
    }
}

/// Lineups keyed by signature. No two members share a signature.
#[derive(Debug, Clone, Default)]
pub struct Population {
    lineups: BTreeMap<Signature, Lineup>,
}

impl Population {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lineups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lineups.is_empty()
    }

    #[must_use]
    pub fn contains(&self, sids: &Signature) -> bool {
        self.lineups.contains_key(sids)
    }

    #[must_use]
    pub fn get(&self, sids: &Signature) -> Option<&Lineup> {
        self.lineups.get(sids)
    }

    /// Adds a lineup unless one with the same signature is already present.
    ///
    /// Returns `false` (dropping `lineup`) on a duplicate.
    pub fn insert(&mut self, lineup: Lineup) -> bool {
        match self.lineups.entry(lineup.sids.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(lineup);
                true
            }
        }
    }

    pub fn remove(&mut self, sids: &Signature) -> Option<Lineup> {
        self.lineups.remove(sids)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lineup> + '_ {
        self.lineups.values()
    }

    /// Signatures of the current members, in key order.
    #[must_use]
    pub fn signatures(&self) -> Vec<Signature> {
        self.lineups.keys().cloned().collect()
    }

    /// Scores every lineup that has no score yet.
    pub fn score_unscored<F>(&mut self, mut score: F)
    where
        F: FnMut(&Roster) -> f64,
    {
        for lineup in self.lineups.values_mut().filter(|l| l.score.is_none()) {
            lineup.score = Some(score(&lineup.roster));
        }
    }

    /// Highest-scored member. The first in key order wins ties.
    #[must_use]
    pub fn best(&self) -> Option<&Lineup> {
        self.iter()
            .reduce(|best, l| if l.fitness() > best.fitness() { l } else { best })
    }

    #[must_use]
    pub fn fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.iter().filter_map(Lineup::score))
    }
}
