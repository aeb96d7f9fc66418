use lineup_roster::Roster;

/// Converts rosters into comparable fitness values.
///
/// Implementations decide which categories matter and how they are weighed. The genetic
/// optimizer calls [`Self::compute_stddevs`] once with its initial population and then
/// scores every lineup with [`Self::score_as_stddev`]. The single-pass optimizer keeps a
/// baseline with [`Self::update_score`] and asks [`Self::compare_lineup`] for each
/// alternative.
pub trait ScoreComparator {
    /// Computes the per-category spread used to standardize scores.
    fn compute_stddevs(&mut self, rosters: &[&Roster]);

    /// Scores a roster in standard-deviation units. Higher is better.
    fn score_as_stddev(&self, roster: &Roster) -> f64;

    /// Makes `roster` the baseline for [`Self::compare_lineup`].
    fn update_score(&mut self, roster: &Roster);

    /// Returns `true` if `roster` is strictly better than the baseline.
    fn compare_lineup(&self, roster: &Roster) -> bool;
}

impl<C> ScoreComparator for &mut C
where
    C: ScoreComparator + ?Sized,
{
    fn compute_stddevs(&mut self, rosters: &[&Roster]) {
        (**self).compute_stddevs(rosters);
    }

    fn score_as_stddev(&self, roster: &Roster) -> f64 {
        (**self).score_as_stddev(roster)
    }

    fn update_score(&mut self, roster: &Roster) {
        (**self).update_score(roster);
    }

    fn compare_lineup(&self, roster: &Roster) -> bool {
        (**self).compare_lineup(roster)
    }
}
