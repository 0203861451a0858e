use crate::board::{Board, Route};
use crate::config::GameConfig;
use crate::error::ScoreLookupError;
use crate::player::{Player, PlayerId};
use crate::ticket::Ticket;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Points granted for claiming a route, by route length.
const ROUTE_POINTS: [(u8, u32); 6] = [(1, 1), (2, 2), (3, 4), (4, 7), (5, 10), (6, 15)];

/// Points granted to every player holding the longest continuous route.
pub const LONGEST_ROUTE_BONUS: u32 = 10;

/// What a player needs to be scored: the routes they claimed and the tickets they hold.
pub trait Scorer {
    fn train_lines(&self) -> &[Route];
    fn tickets(&self) -> &[Ticket];
}

/// Maps a route length to the points it is worth.
///
/// Lengths missing from the table are treated as malformed board data, never as zero points.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreTable {
    points_by_distance: BTreeMap<u8, u32>,
}

impl ScoreTable {
    pub fn new(points_by_distance: impl IntoIterator<Item = (u8, u32)>) -> Self {
        Self {
            points_by_distance: points_by_distance.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points_by_distance.is_empty()
    }

    /// The distances this table knows about, in increasing order.
    pub fn distances(&self) -> impl Iterator<Item = u8> + '_ {
        self.points_by_distance.keys().copied()
    }

    /// Points granted for claiming `route`.
    pub fn route_points(&self, route: &Route) -> Result<u32, ScoreLookupError> {
        let distance = route.weight();

        self.points_by_distance
            .get(&distance)
            .copied()
            .ok_or_else(|| {
                warn!("No score for route {} ({}).", route.id, route);
                ScoreLookupError::UnknownDistance {
                    route: route.id,
                    distance,
                }
            })
    }

    /// Total points: every claimed route by its length, plus the value of every completed ticket.
    ///
    /// # Example
    /// ```
    /// use route_board::board::Board;
    /// use route_board::card::TrainColor;
    /// use route_board::score::ScoreTable;
    /// use route_board::ticket::Ticket;
    ///
    /// let mut board = Board::new();
    /// let route_id = board.add_route("Atlanta", "Miami", TrainColor::Blue, 5).unwrap();
    /// board.occupy(route_id, "alice").unwrap();
    ///
    /// let mut ticket = Ticket::new("Atlanta", "Miami", 6);
    /// ticket.done = true;
    ///
    /// let score = ScoreTable::default().score(&board.routes_claimed_by("alice"), &[ticket]);
    /// assert_eq!(score, Ok(16));
    /// ```
    pub fn score(
        &self,
        train_lines: &[Route],
        tickets: &[Ticket],
    ) -> Result<u32, ScoreLookupError> {
        let mut score: u32 = 0;

        for route in train_lines {
            score = score
                .checked_add(self.route_points(route)?)
                .ok_or(ScoreLookupError::Overflow)?;
        }

        for ticket in tickets {
            score = score
                .checked_add(ticket.points())
                .ok_or(ScoreLookupError::Overflow)?;
        }

        Ok(score)
    }

    pub fn score_player<S>(&self, scorer: &S) -> Result<u32, ScoreLookupError>
    where
        S: Scorer + ?Sized,
    {
        self.score(scorer.train_lines(), scorer.tickets())
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self::new(ROUTE_POINTS)
    }
}

/// Scores with the standard table. See [`ScoreTable::score`].
pub fn score(train_lines: &[Route], tickets: &[Ticket]) -> Result<u32, ScoreLookupError> {
    ScoreTable::default().score(train_lines, tickets)
}

/// Players holding the longest continuous route on `board`, in the order given.
///
/// Ties all win. Nobody wins when none of `players` holds a route.
///
/// # Example
/// ```
/// use route_board::board::Board;
/// use route_board::card::TrainColor;
/// use route_board::player::Player;
/// use route_board::score::longest_route_winners;
///
/// let mut board = Board::new();
/// let short = board.add_route("Nashville", "Atlanta", TrainColor::Wild, 1).unwrap();
/// let long = board.add_route("Miami", "New Orleans", TrainColor::Red, 6).unwrap();
/// let (alice, bob) = (Player::new("alice"), Player::new("bob"));
///
/// alice.claim_route(&mut board, short).unwrap();
/// bob.claim_route(&mut board, long).unwrap();
///
/// assert_eq!(longest_route_winners(&board, &[alice, bob]), vec![String::from("bob")]);
/// ```
pub fn longest_route_winners(board: &Board, players: &[Player]) -> Vec<PlayerId> {
    let longest_routes: Vec<(&str, u16)> = players
        .iter()
        .map(|player| (player.id(), player.longest_route(board)))
        .collect();

    let longest = longest_routes
        .iter()
        .map(|(_, length)| *length)
        .max()
        .unwrap_or(0);
    if longest == 0 {
        return Vec::new();
    }

    longest_routes
        .into_iter()
        .filter(|(_, length)| *length == longest)
        .map(|(id, _)| PlayerId::from(id))
        .collect()
}

/// End-of-game totals: each player's routes and completed tickets, scored with `config.scoring`,
/// plus `config.longest_route_bonus` for every holder of the longest continuous route.
pub fn final_scores(
    board: &Board,
    players: &[Player],
    config: &GameConfig,
) -> Result<BTreeMap<PlayerId, u32>, ScoreLookupError> {
    let winners = longest_route_winners(board, players);
    debug!("Longest route bonus goes to {:?}.", winners);

    players
        .iter()
        .map(|player| -> Result<(PlayerId, u32), ScoreLookupError> {
            let mut score = player.score(board, &config.scoring)?;
            if winners.iter().any(|winner| winner == player.id()) {
                score = score
                    .checked_add(config.longest_route_bonus)
                    .ok_or(ScoreLookupError::Overflow)?;
            }

            Ok((PlayerId::from(player.id()), score))
        })
        .collect()
}
