//! The roster assignment engine.
//!
//! Placing a player is a depth-first search over displacement chains. For the player being
//! placed, every eligible position is first checked for an open slot (in listed order). If
//! none is open, each eligible position is tried again in order, and for each occupant of
//! that position (in roster order) the search recurses to re-home the occupant elsewhere.
//! The same two passes are applied at every depth of the chain.
//!
//! A position is entered at most once per top-level placement attempt. This keeps the search
//! finite on cyclic eligibility graphs (three players sharing the same two positions) and
//! sound: a position whose occupants could not be moved earlier cannot become movable later,
//! because the set of usable positions only shrinks.

use std::iter::FusedIterator;

use crate::{NoSpaceError, Player, Position, Roster, RosterLayout};

/// Places players into rosters according to a [`RosterLayout`].
#[derive(Debug, Clone)]
pub struct RosterBuilder {
    layout: RosterLayout,
}

impl RosterBuilder {
    #[must_use]
    pub fn new(layout: RosterLayout) -> Self {
        Self { layout }
    }

    #[must_use]
    pub fn layout(&self) -> &RosterLayout {
        &self.layout
    }

    /// Number of players in a full roster.
    #[must_use]
    pub fn max_players(&self) -> usize {
        self.layout.max_players()
    }

    #[must_use]
    pub fn is_full(&self, roster: &Roster) -> bool {
        roster.len() >= self.max_players()
    }

    /// Appends `candidate` to `roster`, moving existing occupants if that frees a slot.
    ///
    /// The candidate's own `selected_position` is ignored; the appended copy gets the
    /// position it was assigned, which is also returned. Occupants may change position but
    /// are never removed.
    ///
    /// On error the roster is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`NoSpaceError`] if no displacement chain ends in an open slot.
    pub fn fit_if_space(
        &self,
        roster: &mut Roster,
        candidate: &Player,
    ) -> Result<Position, NoSpaceError> {
        let (position, moves) = {
            let mut search = ChainSearch::new(&self.layout, roster.players());
            let Some(position) = search.place(&candidate.eligible_positions) else {
                return Err(NoSpaceError {
                    player: candidate.name.clone(),
                });
            };
            let moves = search
                .moves
                .into_iter()
                .map(|(index, dest)| (index, dest.clone()))
                .collect::<Vec<_>>();
            (position.clone(), moves)
        };

        let players = roster.players_mut();
        for (index, dest) in moves {
            players[index].selected_position = Some(dest);
        }
        let mut placed = candidate.clone();
        placed.selected_position = Some(position.clone());
        roster.push(placed);
        Ok(position)
    }

    /// Enumerates every roster obtained by benching one current occupant and fitting
    /// `candidate` in its place.
    ///
    /// Occupants are tried in roster order and at most one roster is produced per occupant.
    /// The benched occupant stays in the roster with its position unset; other occupants
    /// may be moved exactly as [`Self::fit_if_space`] would move them. Yields nothing if no
    /// single benching makes room, or if the candidate already fits without benching anyone.
    pub fn enumerate_fit<'a>(
        &'a self,
        roster: &'a Roster,
        candidate: &'a Player,
    ) -> EnumerateFit<'a> {
        EnumerateFit {
            builder: self,
            roster,
            candidate,
            next: 0,
            blocked: None,
        }
    }
}

/// Iterator returned by [`RosterBuilder::enumerate_fit`].
#[derive(Debug)]
pub struct EnumerateFit<'a> {
    builder: &'a RosterBuilder,
    roster: &'a Roster,
    candidate: &'a Player,
    next: usize,
    /// Whether the candidate needs a benching at all, checked on the first pull.
    blocked: Option<bool>,
}

impl EnumerateFit<'_> {
    fn is_blocked(&mut self) -> bool {
        *self.blocked.get_or_insert_with(|| {
            let mut roster = self.roster.clone();
            self.builder.fit_if_space(&mut roster, self.candidate).is_err()
        })
    }
}

impl Iterator for EnumerateFit<'_> {
    type Item = Roster;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next < self.roster.len() && !self.is_blocked() {
            self.next = self.roster.len();
        }
        while self.next < self.roster.len() {
            let index = self.next;
            self.next += 1;
            if self.roster.players()[index].selected_position.is_none() {
                continue;
            }
            let mut roster = self.roster.clone();
            roster.bench(index);
            if self.builder.fit_if_space(&mut roster, self.candidate).is_ok() {
                return Some(roster);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.roster.len() - self.next))
    }
}

impl FusedIterator for EnumerateFit<'_> {}

/// State of one top-level placement attempt.
struct ChainSearch<'a> {
    layout: &'a RosterLayout,
    players: &'a [Player],
    visited: Vec<&'a Position>,
    /// Occupant re-homings of the successful chain, deepest first.
    moves: Vec<(usize, &'a Position)>,
}

impl<'a> ChainSearch<'a> {
    fn new(layout: &'a RosterLayout, players: &'a [Player]) -> Self {
        Self {
            layout,
            players,
            visited: vec![],
            moves: vec![],
        }
    }

    fn is_visited(&self, position: &Position) -> bool {
        self.visited.iter().any(|v| *v == position)
    }

    fn has_open_slot(&self, position: &Position) -> bool {
        let occupancy = self
            .players
            .iter()
            .filter(|p| p.selected_position.as_ref() == Some(position))
            .count();
        occupancy < self.layout.capacity(position)
    }

    /// Finds a position for a player with the given eligibility, recording the moves of
    /// any occupants that have to make room.
    fn place(&mut self, eligible: &'a [Position]) -> Option<&'a Position> {
        if let Some(open) = eligible
            .iter()
            .find(|pos| !self.is_visited(pos) && self.has_open_slot(pos))
        {
            return Some(open);
        }

        for position in eligible {
            if self.is_visited(position) {
                continue;
            }
            self.visited.push(position);
            let players = self.players;
            for (index, occupant) in players.iter().enumerate() {
                if occupant.selected_position.as_ref() != Some(position) {
                    continue;
                }
                if let Some(dest) = self.place(&occupant.eligible_positions) {
                    self.moves.push((index, dest));
                    return Some(position);
                }
            }
        }
        None
    }
}
