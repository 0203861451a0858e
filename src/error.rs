//! Errors reported by the board, the ticket pool, scoring and configuration.

use crate::board::RouteId;
use crate::card::TrainColor;
use crate::city::City;
use crate::player::PlayerId;

use thiserror::Error;

/// Failures when building or mutating a [`crate::board::Board`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("No route exists with id {0}.")]
    UnknownRoute(RouteId),

    #[error("The route between {start} and {end} is already claimed by {claimer}.")]
    AlreadyOccupied {
        start: City,
        end: City,
        claimer: PlayerId,
    },

    #[error("A {color} route between {start} and {end} already exists.")]
    DuplicateRoute {
        start: City,
        end: City,
        color: TrainColor,
    },

    #[error("A route between {start} and {end} cannot have a distance of {distance}.")]
    InvalidDistance { start: City, end: City, distance: u8 },

    #[error("A route cannot connect {0} to itself.")]
    SelfLoop(City),
}

/// Failures when drawing from a ticket pool.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TicketError {
    #[error("Cannot draw {requested} tickets, as only {available} are left.")]
    OutOfRange { requested: usize, available: usize },
}

/// Failures when scoring: a route's distance has no entry in the scoring table, which means the
/// board data is malformed, or the total does not fit.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScoreLookupError {
    #[error("Route {route} has a distance of {distance}, which has no score.")]
    UnknownDistance { route: RouteId, distance: u8 },

    #[error("The score does not fit in {} bits.", u32::BITS)]
    Overflow,
}

/// Failures when loading a [`crate::config::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not parse the configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
