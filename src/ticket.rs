use crate::city::{City, CityToCity};
use crate::error::TicketError;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A destination objective: connect two cities to earn its value.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Ticket {
    pub origin: City,
    pub destination: City,
    /// How many points are granted once this ticket is completed.
    pub value: u32,
    /// Whether the ticket can still be claimed. Reserved for engine use.
    pub ok: bool,
    /// Whether the owning player has connected both cities.
    pub done: bool,
}

impl Ticket {
    /// Creates a valid, not yet completed ticket.
    pub fn new(origin: impl Into<City>, destination: impl Into<City>, value: u32) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            value,
            ok: true,
            done: false,
        }
    }

    pub fn cities(&self) -> CityToCity {
        (self.origin.clone(), self.destination.clone())
    }

    /// Points this ticket currently grants.
    #[inline]
    pub fn points(&self) -> u32 {
        if self.done {
            self.value
        } else {
            0
        }
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} : {}.", self.origin, self.destination, self.value)
    }
}

/// Draws `n` tickets at random from `pool`, removing them from it.
///
/// Every size-`n` subset of the pool is equally likely, and no ticket is drawn twice.
/// The order of the tickets left in `pool` afterwards is unspecified.
///
/// Drawing more tickets than the pool holds is an error; the pool is then left untouched.
///
/// # Example
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use route_board::ticket::{draw_tickets, Ticket};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut pool = vec![
///     Ticket::new("Boston", "Miami", 12),
///     Ticket::new("Denver", "El Paso", 4),
///     Ticket::new("Seattle", "New York", 22),
/// ];
///
/// let drawn = draw_tickets(2, &mut pool, &mut rng).unwrap();
/// assert_eq!(drawn.len(), 2);
/// assert_eq!(pool.len(), 1);
///
/// assert!(draw_tickets(2, &mut pool, &mut rng).is_err());
/// ```
pub fn draw_tickets<R>(
    n: usize,
    pool: &mut Vec<Ticket>,
    rng: &mut R,
) -> Result<Vec<Ticket>, TicketError>
where
    R: Rng + ?Sized,
{
    let available = pool.len();
    if n > available {
        return Err(TicketError::OutOfRange {
            requested: n,
            available,
        });
    }

    // Partial Fisher-Yates: position `i` receives a uniform pick amongst the tickets not drawn yet.
    for i in 0..n {
        let j = rng.gen_range(i..available);
        pool.swap(i, j);
    }

    let drawn: Vec<Ticket> = pool.drain(..n).collect();
    debug!("Drew {} tickets, {} left in the pool.", drawn.len(), pool.len());

    Ok(drawn)
}

/// The destination tickets not yet dealt in a game.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TicketPool {
    tickets: Vec<Ticket>,
}

impl TicketPool {
    pub fn new(tickets: impl IntoIterator<Item = Ticket>) -> Self {
        Self {
            tickets: tickets.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// The tickets left, in no particular order.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// See [`draw_tickets`].
    pub fn draw<R>(&mut self, n: usize, rng: &mut R) -> Result<Vec<Ticket>, TicketError>
    where
        R: Rng + ?Sized,
    {
        draw_tickets(n, &mut self.tickets, rng)
    }

    /// Puts back tickets a player chose not to keep, so they can be drawn again later.
    pub fn return_tickets(&mut self, tickets: impl IntoIterator<Item = Ticket>) {
        let num_tickets_before = self.tickets.len();
        self.tickets.extend(tickets);
        debug!(
            "Returned {} tickets to the pool.",
            self.tickets.len() - num_tickets_before
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn five_tickets() -> Vec<Ticket> {
        vec![
            Ticket::new("Boston", "Miami", 12),
            Ticket::new("Calgary", "Phoenix", 13),
            Ticket::new("Chicago", "Santa Fe", 9),
            Ticket::new("Denver", "El Paso", 4),
            Ticket::new("Duluth", "Houston", 8),
        ]
    }

    fn numbered_tickets(len: usize) -> Vec<Ticket> {
        (0..len)
            .map(|i| Ticket::new(format!("Origin {i}"), format!("Destination {i}"), i as u32))
            .collect()
    }

    #[test]
    fn new_ticket() {
        let ticket = Ticket::new("A", "C", 9);

        assert!(ticket.ok);
        assert!(!ticket.done);
        assert_eq!(ticket.points(), 0);
        assert_eq!(ticket.cities(), (City::from("A"), City::from("C")));
    }

    #[test]
    fn ticket_to_string() {
        assert_eq!(Ticket::new("Boston", "Miami", 12).to_string(), "Boston -> Miami : 12.");
    }

    #[test]
    fn json_to_ticket() -> serde_json::Result<()> {
        let ticket: Ticket = serde_json::from_str(
            r#"{"origin": "A", "destination": "D", "value": 5, "ok": true, "done": true}"#,
        )?;

        assert_eq!(ticket.points(), 5);
        assert_eq!(ticket.destination, City::from("D"));
        Ok(())
    }

    #[test]
    fn draw_two_out_of_five() {
        let mut rng = StdRng::seed_from_u64(0);
        let original = five_tickets();
        let mut pool = original.clone();

        let drawn = draw_tickets(2, &mut pool, &mut rng).unwrap();

        assert_eq!(drawn.len(), 2);
        assert_eq!(pool.len(), 3);
        assert_ne!(drawn[0], drawn[1]);
        assert!(drawn.iter().all(|ticket| original.contains(ticket)));
        assert!(drawn.iter().all(|ticket| !pool.contains(ticket)));
        assert!(pool.iter().all(|ticket| original.contains(ticket)));
    }

    #[test]
    fn draw_nothing() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut pool = five_tickets();

        assert_eq!(draw_tickets(0, &mut pool, &mut rng), Ok(Vec::new()));
        assert_eq!(pool, five_tickets());
    }

    #[test]
    fn draw_everything() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut pool = five_tickets();

        let drawn = draw_tickets(5, &mut pool, &mut rng).unwrap();

        assert!(pool.is_empty());
        let drawn: HashSet<Ticket> = drawn.into_iter().collect();
        assert_eq!(drawn, five_tickets().into_iter().collect::<HashSet<_>>());
    }

    #[test]
    fn draw_out_of_range() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut pool = five_tickets();

        assert_eq!(
            draw_tickets(6, &mut pool, &mut rng),
            Err(TicketError::OutOfRange {
                requested: 6,
                available: 5
            })
        );
        assert_eq!(pool, five_tickets());

        let mut empty_pool = Vec::new();
        assert!(draw_tickets(1, &mut empty_pool, &mut rng).is_err());
        assert_eq!(draw_tickets(0, &mut empty_pool, &mut rng), Ok(Vec::new()));
    }

    #[test]
    fn draw_is_reproducible_with_same_seed() {
        let mut first_pool = five_tickets();
        let mut second_pool = five_tickets();

        let first = draw_tickets(3, &mut first_pool, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = draw_tickets(3, &mut second_pool, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_pool, second_pool);
    }

    #[test]
    fn draw_reaches_every_ticket() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = HashSet::new();

        for _ in 0..200 {
            let mut pool = five_tickets();
            seen.extend(draw_tickets(1, &mut pool, &mut rng).unwrap());
        }

        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn pool_never_deals_a_ticket_twice() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut pool = TicketPool::new(numbered_tickets(10));
        let mut dealt = Vec::new();

        while pool.len() >= 3 {
            dealt.extend(pool.draw(3, &mut rng).unwrap());
        }
        dealt.extend(pool.draw(pool.len(), &mut rng).unwrap());

        assert!(pool.is_empty());
        assert_eq!(dealt.len(), 10);
        assert_eq!(dealt.iter().collect::<HashSet<_>>().len(), 10);
    }

    #[test]
    fn pool_return_tickets() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut pool = TicketPool::new(five_tickets());

        let mut drawn = pool.draw(3, &mut rng).unwrap();
        let unkept = drawn.split_off(1);
        pool.return_tickets(unkept.clone());

        assert_eq!(pool.len(), 4);
        assert!(unkept.iter().all(|ticket| pool.tickets().contains(ticket)));
        assert!(!pool.tickets().contains(&drawn[0]));
    }

    proptest! {
        #[test]
        fn draw_without_replacement(len in 0usize..30, n in 0usize..30, seed in any::<u64>()) {
            let original = numbered_tickets(len);
            let mut pool = original.clone();
            let mut rng = StdRng::seed_from_u64(seed);

            match draw_tickets(n, &mut pool, &mut rng) {
                Ok(drawn) => {
                    prop_assert!(n <= len);
                    prop_assert_eq!(drawn.len(), n);
                    prop_assert_eq!(pool.len(), len - n);

                    let drawn_set: HashSet<&Ticket> = drawn.iter().collect();
                    let pool_set: HashSet<&Ticket> = pool.iter().collect();
                    prop_assert_eq!(drawn_set.len(), n);
                    prop_assert!(drawn_set.is_disjoint(&pool_set));

                    let all: HashSet<&Ticket> = drawn_set.union(&pool_set).copied().collect();
                    prop_assert_eq!(all, original.iter().collect::<HashSet<_>>());
                }
                Err(_) => {
                    prop_assert!(n > len);
                    prop_assert_eq!(pool, original);
                }
            }
        }
    }
}
