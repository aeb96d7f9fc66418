use rand::{Rng, seq::SliceRandom};

use crate::{InvalidCategoryError, Player, PlayerId, PlayerPool};

/// Categories where a lower value is better, unless overridden.
const DEFAULT_DESCENDING_CATEGORIES: [&str; 2] = ["ERA", "WHIP"];

/// Hands out players of a pool in a chosen order.
///
/// The order is either a ranking by stat categories ([`Self::rank`]) or a random
/// permutation ([`Self::shuffle`]). Until either is called, players come out in pool order.
///
/// # Ranking
///
/// For each category, every player with a value gets its 1-based rank among those values,
/// with the best value earning the largest rank and tied values sharing the average rank.
/// A player's rank score is the sum of its per-category ranks; players lacking a category
/// get nothing for it. Higher values are better unless the category is one of the
/// descending categories (`ERA` and `WHIP` by default).
#[derive(Debug, Clone)]
pub struct PlayerSelector<'a> {
    pool: &'a PlayerPool,
    descending_categories: Vec<String>,
    order: Vec<usize>,
    scores: Vec<f64>,
}

impl<'a> PlayerSelector<'a> {
    #[must_use]
    pub fn new(pool: &'a PlayerPool) -> Self {
        Self {
            pool,
            descending_categories: DEFAULT_DESCENDING_CATEGORIES
                .iter()
                .map(|&c| c.to_owned())
                .collect(),
            order: (0..pool.len()).collect(),
            scores: vec![0.0; pool.len()],
        }
    }

    /// Replaces the set of categories in which a lower value ranks higher.
    pub fn set_descending_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.descending_categories = categories.into_iter().map(Into::into).collect();
    }

    /// Orders the pool by composite rank over `categories`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCategoryError`] if no player in the pool carries one of the
    /// categories. The previous order is kept in that case.
    pub fn rank<S>(&mut self, categories: &[S]) -> Result<(), InvalidCategoryError>
    where
        S: AsRef<str>,
    {
        if let Some(missing) = categories
            .iter()
            .map(AsRef::as_ref)
            .find(|c| !self.pool.has_category(c))
        {
            return Err(InvalidCategoryError {
                category: missing.to_owned(),
            });
        }

        let players = self.pool.players();
        let mut scores = vec![0.0; players.len()];
        for category in categories.iter().map(AsRef::as_ref) {
            let lower_is_better = self.descending_categories.iter().any(|c| c == category);
            for (index, rank) in category_ranks(players, category, lower_is_better) {
                scores[index] += rank;
            }
        }

        let mut order = (0..players.len()).collect::<Vec<_>>();
        // stable: ties keep pool order
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        self.order = order;
        self.scores = scores;
        Ok(())
    }

    /// Replaces the order with a uniformly random permutation of the pool.
    pub fn shuffle<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.order.shuffle(rng);
        self.scores.fill(0.0);
    }

    /// Players in the current order. Each call starts from the top.
    pub fn select(&self) -> impl Iterator<Item = &'a Player> + '_ {
        let players = self.pool.players();
        self.order.iter().map(move |&i| &players[i])
    }

    /// Rank score of a player from the last [`Self::rank`] call.
    #[must_use]
    pub fn rank_score(&self, id: PlayerId) -> Option<f64> {
        let players = self.pool.players();
        players
            .iter()
            .position(|p| p.player_id == id)
            .map(|i| self.scores[i])
    }
}

/// Per-player ranks for one category, as `(pool index, rank)` pairs.
fn category_ranks(players: &[Player], category: &str, lower_is_better: bool) -> Vec<(usize, f64)> {
    let mut values = players
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.category_value(category).map(|v| (i, v)))
        .filter(|(_, v)| !v.is_nan())
        .collect::<Vec<_>>();
    // worst first, so the best value ends up with the largest rank
    if lower_is_better {
        values.sort_by(|a, b| b.1.total_cmp(&a.1));
    } else {
        values.sort_by(|a, b| a.1.total_cmp(&b.1));
    }

    let mut ranks = Vec::with_capacity(values.len());
    let mut start = 0;
    while start < values.len() {
        let mut end = start + 1;
        while end < values.len() && values[end].1 == values[start].1 {
            end += 1;
        }
        #[expect(clippy::cast_precision_loss)]
        let rank = (start + 1 + end) as f64 / 2.0;
        ranks.extend(values[start..end].iter().map(|&(i, _)| (i, rank)));
        start = end;
    }
    ranks
}
