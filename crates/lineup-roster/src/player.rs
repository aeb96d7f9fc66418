use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::Roster;

/// Stable unique identifier of a player.
///
/// Names are not unique; every deduplication and lineup-signature comparison goes through
/// this id.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PlayerId(u64);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A roster position label such as `C`, `1B`, `SP` or `Util`.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct Position(String);

impl Position {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Position {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Position {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// One candidate for a roster slot.
///
/// Everything except `selected_position` is treated as read-only while a lineup is being
/// built. `selected_position` is written by [`RosterBuilder`](crate::RosterBuilder) only;
/// `None` means the player is unset (not yet placed, or benched).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub player_id: PlayerId,
    /// Positions the player may occupy, in priority order.
    pub eligible_positions: Vec<Position>,
    #[serde(default)]
    pub selected_position: Option<Position>,
    /// Injury/availability tag. Empty means available.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub percent_owned: f64,
    /// Projected value of each stat category, keyed by category name.
    #[serde(default)]
    pub stats: BTreeMap<String, f64>,
}

impl Player {
    /// Category name that resolves to [`Player::percent_owned`] instead of a stat column.
    pub const PERCENT_OWNED: &'static str = "percent_owned";

    /// Creates an available player with no stats.
    #[must_use]
    pub fn new<I, P>(player_id: PlayerId, name: impl Into<String>, eligible_positions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        Self {
            name: name.into(),
            player_id,
            eligible_positions: eligible_positions.into_iter().map(Into::into).collect(),
            selected_position: None,
            status: String::new(),
            percent_owned: 0.0,
            stats: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_stat(mut self, category: impl Into<String>, value: f64) -> Self {
        self.stats.insert(category.into(), value);
        self
    }

    #[must_use]
    pub fn with_percent_owned(mut self, percent_owned: f64) -> Self {
        self.percent_owned = percent_owned;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Returns `true` if the player has no injury/availability tag.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status.is_empty()
    }

    #[must_use]
    pub fn is_eligible_for(&self, position: &Position) -> bool {
        self.eligible_positions.contains(position)
    }

    /// Looks up the value of a ranking/scoring category.
    ///
    /// Returns `None` when the player has no projection for it.
    #[must_use]
    pub fn category_value(&self, category: &str) -> Option<f64> {
        if category == Self::PERCENT_OWNED {
            return Some(self.percent_owned);
        }
        self.stats.get(category).copied()
    }
}

/// The universe of candidates, deduplicated by [`PlayerId`].
///
/// Iteration follows insertion order so that rankings with equal scores and seeded shuffles
/// are reproducible.
#[derive(Debug, Clone, Default)]
pub struct PlayerPool {
    players: Vec<Player>,
    index: HashMap<PlayerId, usize>,
}

impl PlayerPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a player unless one with the same id is already present.
    ///
    /// Returns `true` if the player was added.
    pub fn insert(&mut self, player: Player) -> bool {
        if self.index.contains_key(&player.player_id) {
            return false;
        }
        self.index.insert(player.player_id, self.players.len());
        self.players.push(player);
        true
    }

    /// Builds the union of the players of several rosters, with every
    /// `selected_position` reset.
    #[must_use]
    pub fn from_rosters<'a, I>(rosters: I) -> Self
    where
        I: IntoIterator<Item = &'a Roster>,
    {
        let mut pool = Self::new();
        for roster in rosters {
            for player in roster.players() {
                let mut player = player.clone();
                player.selected_position = None;
                pool.insert(player);
            }
        }
        pool
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.index.get(&id).map(|&i| &self.players[i])
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Returns `true` if any player in the pool has a value for `category`.
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.players
            .iter()
            .any(|p| p.category_value(category).is_some())
    }
}

impl FromIterator<Player> for PlayerPool {
    fn from_iter<T: IntoIterator<Item = Player>>(iter: T) -> Self {
        let mut pool = Self::new();
        for player in iter {
            pool.insert(player);
        }
        pool
    }
}

impl Extend<Player> for PlayerPool {
    fn extend<T: IntoIterator<Item = Player>>(&mut self, iter: T) {
        for player in iter {
            self.insert(player);
        }
    }
}
