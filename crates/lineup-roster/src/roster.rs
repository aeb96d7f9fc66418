use serde::{Deserialize, Serialize};

use crate::{Player, PlayerId, Position};

/// An ordered sequence of players.
///
/// Order is significant: among occupants of the same position the earliest-added one is
/// tried first when the assignment engine looks for someone to displace.
///
/// A player whose `selected_position` is `None` is benched. Benched players stay in the
/// roster but occupy no slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.players.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Appends a player as-is. Slot capacities are not checked.
    pub fn push(&mut self, player: Player) {
        self.players.push(player);
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.iter().any(|p| p.player_id == id)
    }

    /// Number of players currently holding `position`.
    #[must_use]
    pub fn occupancy(&self, position: &Position) -> usize {
        self.players
            .iter()
            .filter(|p| p.selected_position.as_ref() == Some(position))
            .count()
    }

    /// Players that hold a position, skipping the benched ones.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.players
            .iter()
            .filter(|p| p.selected_position.is_some())
    }

    /// Player ids in ascending order.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<PlayerId> {
        let mut ids = self.players.iter().map(|p| p.player_id).collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }

    /// Removes every player for which `remove` returns `true`, keeping the order of the rest.
    pub fn remove_where<F>(&mut self, mut remove: F)
    where
        F: FnMut(&Player) -> bool,
    {
        self.players.retain(|p| !remove(p));
    }

    /// Unsets the position of the player at `index`, leaving them in the roster.
    ///
    /// Returns `false` if there is no player at `index`.
    pub fn bench(&mut self, index: usize) -> bool {
        let Some(player) = self.players.get_mut(index) else {
            return false;
        };
        player.selected_position = None;
        true
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }
}

impl From<Vec<Player>> for Roster {
    fn from(players: Vec<Player>) -> Self {
        Self { players }
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(id: u64, name: &str, pos: &str) -> Player {
        let mut p = Player::new(PlayerId::new(id), name, [pos]);
        p.selected_position = Some(Position::from(pos));
        p
    }

    #[test]
    fn test_occupancy_ignores_benched() {
        let mut roster = Roster::from(vec![
            placed(1, "Henke", "RP"),
            placed(2, "Ward", "RP"),
            placed(3, "Stieb", "SP"),
        ]);
        assert_eq!(roster.occupancy(&Position::from("RP")), 2);
        assert!(roster.bench(0));
        assert_eq!(roster.occupancy(&Position::from("RP")), 1);
        assert_eq!(roster.active_players().count(), 2);
        assert_eq!(roster.len(), 3);

        let before = roster.clone();
        assert!(!roster.bench(3));
        assert_eq!(roster, before);
    }

    #[test]
    fn test_sorted_ids_and_remove() {
        let mut roster = Roster::from(vec![
            placed(30, "Bell", "LF"),
            placed(10, "Borders", "C"),
            placed(20, "Olerud", "1B"),
        ]);
        assert_eq!(
            roster.sorted_ids(),
            vec![PlayerId::new(10), PlayerId::new(20), PlayerId::new(30)]
        );
        roster.remove_where(|p| p.player_id == PlayerId::new(10));
        assert!(!roster.contains(PlayerId::new(10)));
        assert_eq!(roster.players()[0].name, "Bell");
        assert_eq!(roster.players()[1].name, "Olerud");
    }
}
