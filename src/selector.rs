use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::core::{Game, SearchRequest};

/// Constraints applied after normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCriteria {
    /// Seat this many people
    pub desired_players: Option<u32>,
    /// Playing time ceiling in minutes
    pub max_playing_time: Option<u32>,
    /// Random subset size; `None` keeps every match
    pub sample: Option<usize>,
}

impl From<&SearchRequest> for SelectionCriteria {
    fn from(req: &SearchRequest) -> Self {
        Self {
            desired_players: req.desired_players,
            max_playing_time: req.max_desired_time,
            sample: req.sample,
        }
    }
}

impl SelectionCriteria {
    /// Whether `game` may be shown at all
    pub fn accepts(&self, game: &Game) -> bool {
        if !game.has_thumbnail() {
            return false;
        }
        if let Some(players) = self.desired_players {
            if !game.seats(players) {
                return false;
            }
        }
        if let Some(max_time) = self.max_playing_time {
            if game.playing_time > max_time {
                return false;
            }
        }
        true
    }
}

/// Filters and samples the final candidates.
///
/// Owns its random source; build one per request.
pub struct ResultSelector<R: Rng = StdRng> {
    rng: R,
}

impl ResultSelector<StdRng> {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible selector
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ResultSelector<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Drop image-less and non-fitting games, then sample if asked
    pub fn select(&mut self, games: Vec<Game>, criteria: &SelectionCriteria) -> Vec<Game> {
        let total = games.len();
        let filtered = filter(games, criteria);
        tracing::debug!("{} of {} game(s) pass the filters", filtered.len(), total);

        match criteria.sample {
            Some(size) => self.sample(filtered, size),
            None => filtered,
        }
    }

    /// Shuffle and keep at most `size` games
    pub fn sample(&mut self, mut games: Vec<Game>, size: usize) -> Vec<Game> {
        games.shuffle(&mut self.rng);
        games.truncate(size);
        games
    }
}

/// Keep the games `criteria` accepts, in input order
pub fn filter(games: Vec<Game>, criteria: &SelectionCriteria) -> Vec<Game> {
    games.into_iter().filter(|g| criteria.accepts(g)).collect()
}
