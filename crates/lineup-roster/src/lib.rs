//! Players, rosters and the placement engine that fills roster slots.
//!
//! This crate is the foundation of the lineup optimizer. It knows nothing about scoring or
//! evolution; it only answers "where can this player go?".
//!
//! - [`Player`] / [`PlayerPool`] - candidate records and the table they are drawn from
//! - [`RosterLayout`] - how many players each position label may hold
//! - [`Roster`] - an ordered sequence of placed players
//! - [`RosterBuilder`] - the assignment engine ([`RosterBuilder::fit_if_space`],
//!   [`RosterBuilder::enumerate_fit`])
//! - [`PlayerSelector`] - ranks a pool by stat categories and hands out candidates in order
//!
//! # Example
//!
//! ```
//! use lineup_roster::{Player, PlayerId, Roster, RosterBuilder, RosterLayout};
//!
//! let layout = RosterLayout::from_iter([("C", 1), ("1B", 1)]);
//! let builder = RosterBuilder::new(layout);
//!
//! let mut roster = Roster::new();
//! let cecil = Player::new(PlayerId::new(1), "Cecil", ["C", "1B"]);
//! let ernie = Player::new(PlayerId::new(2), "Ernie", ["C"]);
//! builder.fit_if_space(&mut roster, &cecil).unwrap();
//! builder.fit_if_space(&mut roster, &ernie).unwrap();
//!
//! // Cecil was moved over to first base to make room.
//! assert_eq!(roster.players()[0].selected_position.as_ref().unwrap().as_str(), "1B");
//! assert!(builder.is_full(&roster));
//! ```

pub use self::{builder::*, layout::*, player::*, roster::*, selector::*};

mod builder;
mod layout;
mod player;
mod roster;
mod selector;

/// No displacement chain frees a slot for the candidate.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no space in roster for player '{player}'")]
pub struct NoSpaceError {
    #[error(not(source))]
    pub player: String,
}

/// A ranking category that no player in the pool carries.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown stat category '{category}'")]
pub struct InvalidCategoryError {
    #[error(not(source))]
    pub category: String,
}
