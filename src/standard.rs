//! The stock content of the US map: its routes and its destination tickets.

use crate::board::Board;
use crate::card::TrainColor;
use crate::card::TrainColor::*;
use crate::error::BoardError;
use crate::ticket::{Ticket, TicketPool};

/// One entry per pair of adjacent cities: both cities, the route length, and the color of each parallel route.
/// Double gray routes are listed once, as a board holds a single route per color between two cities.
type CityPairRoutes = (&'static str, &'static str, u8, &'static [TrainColor]);

const US_ROUTES: [CityPairRoutes; 78] = [
    // Atlanta.
    ("Atlanta", "Charleston", 2, &[Wild]),
    ("Atlanta", "Miami", 5, &[Blue]),
    ("Atlanta", "Nashville", 1, &[Wild]),
    ("Atlanta", "New Orleans", 5, &[Orange, Yellow]),
    ("Atlanta", "Raleigh", 2, &[Wild]),
    // Boston.
    ("Boston", "Montréal", 2, &[Wild]),
    ("Boston", "New York", 2, &[Yellow, Red]),
    // Calgary.
    ("Calgary", "Helena", 4, &[Wild]),
    ("Calgary", "Seattle", 4, &[Wild]),
    ("Calgary", "Vancouver", 3, &[Wild]),
    ("Calgary", "Winnipeg", 6, &[White]),
    // Charleston.
    ("Charleston", "Miami", 4, &[Pink]),
    ("Charleston", "Raleigh", 2, &[Wild]),
    // Chicago.
    ("Chicago", "Duluth", 3, &[Red]),
    ("Chicago", "Omaha", 4, &[Blue]),
    ("Chicago", "Pittsburgh", 3, &[Black, Orange]),
    ("Chicago", "Saint Louis", 2, &[Green, White]),
    ("Chicago", "Toronto", 4, &[White]),
    // Dallas.
    ("Dallas", "El Paso", 4, &[Red]),
    ("Dallas", "Houston", 1, &[Wild]),
    ("Dallas", "Little Rock", 2, &[Wild]),
    ("Dallas", "Oklahoma City", 2, &[Wild]),
    // Denver.
    ("Denver", "Helena", 4, &[Green]),
    ("Denver", "Kansas City", 4, &[Black, Orange]),
    ("Denver", "Oklahoma City", 4, &[Red]),
    ("Denver", "Omaha", 4, &[Pink]),
    ("Denver", "Phoenix", 5, &[White]),
    ("Denver", "Salt Lake City", 3, &[Red, Yellow]),
    ("Denver", "Santa Fe", 2, &[Wild]),
    // Duluth.
    ("Duluth", "Helena", 6, &[Orange]),
    ("Duluth", "Omaha", 2, &[Wild]),
    ("Duluth", "Sault St. Marie", 3, &[Wild]),
    ("Duluth", "Toronto", 6, &[Pink]),
    ("Duluth", "Winnipeg", 4, &[Black]),
    // El Paso.
    ("El Paso", "Houston", 6, &[Green]),
    ("El Paso", "Los Angeles", 6, &[Black]),
    ("El Paso", "Oklahoma City", 5, &[Yellow]),
    ("El Paso", "Phoenix", 3, &[Wild]),
    ("El Paso", "Santa Fe", 2, &[Wild]),
    // Helena.
    ("Helena", "Omaha", 5, &[Red]),
    ("Helena", "Salt Lake City", 3, &[Pink]),
    ("Helena", "Seattle", 6, &[Yellow]),
    ("Helena", "Winnipeg", 4, &[Blue]),
    // Houston.
    ("Houston", "New Orleans", 2, &[Wild]),
    // Kansas City.
    ("Kansas City", "Saint Louis", 2, &[Blue, Pink]),
    ("Kansas City", "Oklahoma City", 2, &[Wild]),
    ("Kansas City", "Omaha", 1, &[Wild]),
    // Las Vegas.
    ("Las Vegas", "Los Angeles", 2, &[Wild]),
    ("Las Vegas", "Salt Lake City", 3, &[Orange]),
    // Little Rock.
    ("Little Rock", "Nashville", 3, &[White]),
    ("Little Rock", "New Orleans", 3, &[Wild]),
    ("Little Rock", "Oklahoma City", 2, &[Wild]),
    ("Little Rock", "Saint Louis", 2, &[Wild]),
    // Los Angeles.
    ("Los Angeles", "Phoenix", 3, &[Wild]),
    ("Los Angeles", "San Francisco", 3, &[Pink, Yellow]),
    // Miami.
    ("Miami", "New Orleans", 6, &[Red]),
    // Montréal.
    ("Montréal", "New York", 3, &[Blue]),
    ("Montréal", "Sault St. Marie", 5, &[Black]),
    ("Montréal", "Toronto", 3, &[Wild]),
    // Nashville.
    ("Nashville", "Pittsburgh", 4, &[Yellow]),
    ("Nashville", "Raleigh", 3, &[Black]),
    ("Nashville", "Saint Louis", 2, &[Wild]),
    // New York.
    ("New York", "Pittsburgh", 2, &[Green, White]),
    ("New York", "Washington", 2, &[Black, Orange]),
    // Oklahoma City.
    ("Oklahoma City", "Santa Fe", 3, &[Blue]),
    // Phoenix.
    ("Phoenix", "Santa Fe", 3, &[Wild]),
    // Pittsburgh.
    ("Pittsburgh", "Raleigh", 2, &[Wild]),
    ("Pittsburgh", "Saint Louis", 5, &[Green]),
    ("Pittsburgh", "Toronto", 2, &[Wild]),
    ("Pittsburgh", "Washington", 2, &[Wild]),
    // Portland.
    ("Portland", "Salt Lake City", 6, &[Blue]),
    ("Portland", "San Francisco", 5, &[Green, Pink]),
    // Raleigh.
    ("Raleigh", "Washington", 2, &[Wild]),
    // Salt Lake City.
    ("Salt Lake City", "San Francisco", 5, &[Orange, White]),
    // Sault St. Marie.
    ("Sault St. Marie", "Toronto", 2, &[Wild]),
    ("Sault St. Marie", "Winnipeg", 6, &[Wild]),
    // Seattle.
    ("Seattle", "Portland", 1, &[Wild]),
    ("Seattle", "Vancouver", 1, &[Wild]),
];

const US_TICKETS: [(&str, &str, u32); 30] = [
    ("Boston", "Miami", 12),
    ("Calgary", "Phoenix", 13),
    ("Calgary", "Salt Lake City", 7),
    ("Chicago", "New Orleans", 7),
    ("Chicago", "Santa Fe", 9),
    ("Dallas", "New York", 11),
    ("Denver", "El Paso", 4),
    ("Denver", "Pittsburgh", 11),
    ("Duluth", "El Paso", 10),
    ("Duluth", "Houston", 8),
    ("Helena", "Los Angeles", 8),
    ("Kansas City", "Houston", 5),
    ("Los Angeles", "Chicago", 16),
    ("Los Angeles", "Miami", 20),
    ("Los Angeles", "New York", 21),
    ("Montréal", "Atlanta", 9),
    ("Montréal", "New Orleans", 13),
    ("New York", "Atlanta", 6),
    ("Portland", "Nashville", 17),
    ("Portland", "Phoenix", 11),
    ("San Francisco", "Atlanta", 17),
    ("Sault St. Marie", "Nashville", 8),
    ("Sault St. Marie", "Oklahoma City", 9),
    ("Seattle", "Los Angeles", 9),
    ("Seattle", "New York", 22),
    ("Toronto", "Miami", 10),
    ("Vancouver", "Montréal", 20),
    ("Vancouver", "Santa Fe", 13),
    ("Winnipeg", "Houston", 12),
    ("Winnipeg", "Little Rock", 11),
];

/// Builds the US board, with every route free.
///
/// # Example
/// ```
/// use route_board::standard;
///
/// let board = standard::us_board().unwrap();
/// assert_eq!(board.num_cities(), 36);
/// assert!(board.free_routes_available());
/// ```
pub fn us_board() -> Result<Board, BoardError> {
    let mut board = Board::new();

    for (start, end, distance, colors) in US_ROUTES {
        for color in colors {
            board.add_route(start, end, *color, distance)?;
        }
    }

    Ok(board)
}

/// The destination tickets of the US map, in no particular order.
pub fn us_tickets() -> Vec<Ticket> {
    US_TICKETS
        .iter()
        .map(|(origin, destination, value)| Ticket::new(*origin, *destination, *value))
        .collect()
}

/// A pool holding every US destination ticket.
pub fn us_ticket_pool() -> TicketPool {
    TicketPool::new(us_tickets())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::ScoreTable;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn us_board_size() {
        let board = us_board().unwrap();

        assert_eq!(board.num_cities(), 36);
        assert_eq!(board.num_routes(), 90);
    }

    #[test]
    fn us_board_parallel_routes() {
        let board = us_board().unwrap();

        let colors: Vec<TrainColor> = board
            .routes_between("Saint Louis", "Kansas City")
            .map(|route| route.color())
            .collect();
        assert_eq!(colors, vec![Blue, Pink]);
        assert_eq!(board.routes_between("Seattle", "Portland").count(), 1);
        assert_eq!(board.routes_between("Houston", "New York").count(), 0);
    }

    #[test]
    fn us_board_is_connected() {
        let board = us_board().unwrap();

        for city in board.cities() {
            assert!(
                board.shortest_distance("Atlanta", city.name()).is_some(),
                "Fails with city={city}"
            );
        }
        assert_eq!(board.adjacent_cities("Helena").len(), 7);
    }

    #[test]
    fn us_board_distances_are_scorable() {
        let board = us_board().unwrap();
        let table = ScoreTable::default();

        assert!(board.routes().all(|route| table.route_points(route).is_ok()));
    }

    #[test]
    fn us_tickets_reference_board_cities() {
        let board = us_board().unwrap();
        let tickets = us_tickets();

        assert_eq!(tickets.len(), 30);
        assert_eq!(tickets.iter().collect::<HashSet<_>>().len(), 30);
        for ticket in &tickets {
            assert!(board.find_city(ticket.origin.name()).is_some(), "{ticket}");
            assert!(board.find_city(ticket.destination.name()).is_some(), "{ticket}");
        }
    }

    #[test]
    fn us_ticket_pool_initial_deal() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool = us_ticket_pool();

        let hands: Vec<Vec<Ticket>> = (0..5).map(|_| pool.draw(3, &mut rng).unwrap()).collect();

        assert_eq!(pool.len(), 15);
        let dealt: HashSet<&Ticket> = hands.iter().flatten().collect();
        assert_eq!(dealt.len(), 15);
    }
}
