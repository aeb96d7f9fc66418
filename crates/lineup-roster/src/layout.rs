use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Position;

/// Slot capacities of a league's roster.
///
/// Maps each position label to the number of players that may hold it at once. Positions
/// that are not listed have no capacity. The layout is fixed for the duration of an
/// optimization run.
///
/// Deserializes from a plain JSON object such as `{"C": 1, "SP": 5, "Util": 2}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RosterLayout {
    capacities: BTreeMap<Position, usize>,
}

impl RosterLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the capacity of `position`, replacing any previous value.
    #[must_use]
    pub fn with_slot(mut self, position: impl Into<Position>, capacity: usize) -> Self {
        self.capacities.insert(position.into(), capacity);
        self
    }

    #[must_use]
    pub fn capacity(&self, position: &Position) -> usize {
        self.capacities.get(position).copied().unwrap_or(0)
    }

    /// Total number of players in a full roster.
    #[must_use]
    pub fn max_players(&self) -> usize {
        self.capacities.values().sum()
    }

    pub fn slots(&self) -> impl Iterator<Item = (&Position, usize)> + '_ {
        self.capacities.iter().map(|(p, c)| (p, *c))
    }
}

impl<P> FromIterator<(P, usize)> for RosterLayout
where
    P: Into<Position>,
{
    fn from_iter<T: IntoIterator<Item = (P, usize)>>(iter: T) -> Self {
        Self {
            capacities: iter.into_iter().map(|(p, c)| (p.into(), c)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_players_sums_capacities() {
        let layout = RosterLayout::from_iter([("C", 1), ("SP", 5), ("RP", 3)]);
        assert_eq!(layout.max_players(), 9);
        assert_eq!(layout.capacity(&Position::from("SP")), 5);
        assert_eq!(layout.capacity(&Position::from("BN")), 0);
    }

    #[test]
    fn test_deserialize_from_object() {
        let layout: RosterLayout = serde_json::from_str(r#"{"C": 1, "Util": 2}"#).unwrap();
        assert_eq!(layout, RosterLayout::new().with_slot("C", 1).with_slot("Util", 2));
    }
}
