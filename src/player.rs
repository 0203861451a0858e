use crate::board::{Board, Route, RouteId};
use crate::error::{BoardError, ScoreLookupError};
use crate::score::ScoreTable;
use crate::ticket::Ticket;

use log::debug;
use serde::Serialize;

/// Identifies the player owning a route.
pub type PlayerId = String;

/// Everything that is scored for one player: the tickets they kept, and the routes they hold on a board.
///
/// Route ownership lives on the [`Board`] only, so releasing a route there is seen by its
/// former owner right away.
///
/// A [`Player`] does not know whose turn it is, nor whether they can afford a route:
/// those checks belong to whoever drives the game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Player {
    id: PlayerId,
    tickets: Vec<Ticket>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            tickets: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Copies of the routes this player currently holds on `board`.
    pub fn claimed_routes(&self, board: &Board) -> Vec<Route> {
        board.routes_claimed_by(&self.id)
    }

    /// Claims a route on the board for this player.
    ///
    /// # Example
    /// ```
    /// use route_board::board::Board;
    /// use route_board::card::TrainColor;
    /// use route_board::player::Player;
    ///
    /// let mut board = Board::new();
    /// let route_id = board.add_route("Boston", "New York", TrainColor::Red, 2).unwrap();
    /// let alice = Player::new("alice");
    /// let bob = Player::new("bob");
    ///
    /// assert!(alice.claim_route(&mut board, route_id).is_ok());
    /// assert!(bob.claim_route(&mut board, route_id).is_err());
    /// assert_eq!(alice.claimed_routes(&board).len(), 1);
    /// assert!(bob.claimed_routes(&board).is_empty());
    /// ```
    pub fn claim_route<'b>(
        &self,
        board: &'b mut Board,
        route_id: RouteId,
    ) -> Result<&'b Route, BoardError> {
        board.occupy(route_id, self.id.clone())?;

        board
            .route(route_id)
            .ok_or(BoardError::UnknownRoute(route_id))
    }

    /// Adds the tickets this player chose to keep to their hand.
    pub fn keep_tickets(&mut self, tickets: impl IntoIterator<Item = Ticket>) {
        self.tickets.extend(tickets);
    }

    /// Marks as done every ticket whose cities this player has connected on `board`.
    ///
    /// Returns how many tickets were newly completed.
    pub fn refresh_completed_tickets(&mut self, board: &Board) -> usize {
        let mut num_newly_completed = 0;

        for ticket in self.tickets.iter_mut().filter(|ticket| !ticket.done) {
            let (origin, destination) = (ticket.origin.name(), ticket.destination.name());
            if board.has_player_connected(origin, destination, &self.id) {
                debug!("{} completed ticket {}", self.id, ticket);
                ticket.done = true;
                num_newly_completed += 1;
            }
        }

        num_newly_completed
    }

    /// Longest continuous path through the routes this player holds on `board`.
    pub fn longest_route(&self, board: &Board) -> u16 {
        Board::longest_route(&self.claimed_routes(board))
    }

    /// Points for the routes held on `board` and the completed tickets, without any bonus.
    pub fn score(
        &self,
        board: &Board,
        score_table: &ScoreTable,
    ) -> Result<u32, ScoreLookupError> {
        score_table.score(&self.claimed_routes(board), &self.tickets)
    }
}
