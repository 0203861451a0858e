use crate::card::TrainColor;
use crate::city::{City, CityToCity};
use crate::error::BoardError;
use crate::player::PlayerId;

use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::{max, Reverse};
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, VecDeque};
use std::fmt;

// Denver and Pittsburgh have the most routes on the US map, 9 each once parallel routes are counted.
// Busier stations spill to the heap.
const MAX_ROUTES_PER_CITY: usize = 9;

/// Stable handle to a route of a [`Board`].
/// Ids survive [`Board::free_routes_board`], so a projection can be mapped back to its source.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RouteId(usize);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything a route carries besides its two cities.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RouteProperty {
    /// The distance between two cities. This is analogous to the number of train cards needed to claim the route.
    pub distance: u8,
    /// The color of this specific route.
    /// The `Wild` color means that any color matches.
    pub color: TrainColor,
    /// By whom this route is claimed, if any.
    /// Being occupied and having an owner are the same fact, so they share this one field.
    occupied_by: Option<PlayerId>,
}

impl RouteProperty {
    /// Returns a `RouteProperty` with the given color and distance.
    /// By default, a route is not claimed.
    pub fn new(color: TrainColor, distance: u8) -> Self {
        Self {
            distance,
            color,
            occupied_by: None,
        }
    }

    /// Cost of travelling the route, used by every path computation.
    #[inline]
    pub fn weight(&self) -> u8 {
        self.distance
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupied_by.is_some()
    }

    /// The player claiming this route, if any.
    pub fn occupied_by(&self) -> Option<&str> {
        self.occupied_by.as_deref()
    }

    fn occupy(&mut self, player: PlayerId) {
        self.occupied_by = Some(player);
    }

    fn free(&mut self) -> Option<PlayerId> {
        self.occupied_by.take()
    }
}

/// A claimable connection between two cities.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Route {
    pub id: RouteId,
    pub cities: CityToCity,
    pub property: RouteProperty,
}

impl Route {
    #[inline]
    pub fn weight(&self) -> u8 {
        self.property.weight()
    }

    #[inline]
    pub fn color(&self) -> TrainColor {
        self.property.color
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.property.is_occupied()
    }

    #[inline]
    pub fn occupied_by(&self) -> Option<&str> {
        self.property.occupied_by()
    }

    /// Whether this route links `start` and `end`, in either direction.
    pub fn connects(&self, start: &str, end: &str) -> bool {
        let (a, b) = &self.cities;
        (a.name() == start && b.name() == end) || (a.name() == end && b.name() == start)
    }

    /// The city at the other end of the route, if `city` is one of its ends.
    pub fn other_end(&self, city: &str) -> Option<&City> {
        let (a, b) = &self.cities;
        if a.name() == city {
            Some(b)
        } else if b.name() == city {
            Some(a)
        } else {
            None
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} -> {}", self.cities.0, self.weight(), self.cities.1)
    }
}

/// The vertex record of a city: the city itself and the routes touching it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Station {
    city: City,
    routes: SmallVec<[RouteId; MAX_ROUTES_PER_CITY]>,
}

impl Station {
    fn new(city: City) -> Self {
        Self {
            city,
            routes: SmallVec::new(),
        }
    }

    pub fn city(&self) -> &City {
        &self.city
    }

    pub fn routes(&self) -> &[RouteId] {
        &self.routes
    }
}

/// Adjacency used when walking claimed routes: each city maps to its neighbors,
/// with the route leading there and that route's length.
type AdjacentRoutes<'a> =
    HashMap<&'a City, SmallVec<[(&'a City, RouteId, u8); MAX_ROUTES_PER_CITY]>>;

/// Undirected graph of cities and routes, per game.
/// This can be mutated as players claim routes throughout the game.
/// Not thread-safe! Callers serialize mutations themselves.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Board {
    stations: BTreeMap<City, Station>,
    routes: BTreeMap<RouteId, Route>,
    next_route_id: usize,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route between two cities, registering both cities on the board if needed.
    ///
    /// Two routes between the same cities must have different colors.
    /// Routes must have a positive distance and connect two distinct cities.
    ///
    /// # Example
    /// ```
    /// use route_board::board::Board;
    /// use route_board::card::TrainColor;
    ///
    /// let mut board = Board::new();
    ///
    /// assert!(board.add_route("Raleigh", "Washington", TrainColor::Wild, 2).is_ok());
    /// // Parallel routes of another color are fine.
    /// assert!(board.add_route("Washington", "Raleigh", TrainColor::Blue, 2).is_ok());
    /// // But not a second one of the same color.
    /// assert!(board.add_route("Washington", "Raleigh", TrainColor::Wild, 2).is_err());
    /// ```
    pub fn add_route(
        &mut self,
        start: impl Into<City>,
        end: impl Into<City>,
        color: TrainColor,
        distance: u8,
    ) -> Result<RouteId, BoardError> {
        let (start, end) = (start.into(), end.into());

        if start == end {
            return Err(BoardError::SelfLoop(start));
        }

        if distance == 0 {
            return Err(BoardError::InvalidDistance {
                start,
                end,
                distance,
            });
        }

        if self
            .routes_between(start.name(), end.name())
            .any(|route| route.color() == color)
        {
            return Err(BoardError::DuplicateRoute { start, end, color });
        }

        let id = RouteId(self.next_route_id);
        self.next_route_id += 1;

        for city in [&start, &end] {
            self.stations
                .entry(city.clone())
                .or_insert_with(|| Station::new(city.clone()))
                .routes
                .push(id);
        }

        self.routes.insert(
            id,
            Route {
                id,
                cities: (start, end),
                property: RouteProperty::new(color, distance),
            },
        );

        Ok(id)
    }

    /// Looks up the vertex record of a city by name.
    ///
    /// # Example
    /// ```
    /// use route_board::board::Board;
    /// use route_board::card::TrainColor;
    ///
    /// let mut board = Board::new();
    /// board.add_route("Denver", "Omaha", TrainColor::Pink, 4).unwrap();
    ///
    /// assert_eq!(board.find_city("Omaha").unwrap().routes().len(), 1);
    /// assert!(board.find_city("Miami").is_none());
    /// ```
    pub fn find_city(&self, name: &str) -> Option<&Station> {
        self.stations.get(name)
    }

    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.stations.keys()
    }

    /// All routes, ordered by id.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn route(&self, route_id: RouteId) -> Option<&Route> {
        self.routes.get(&route_id)
    }

    pub fn num_cities(&self) -> usize {
        self.stations.len()
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    fn routes_from<'a>(&'a self, city: &str) -> impl Iterator<Item = &'a Route> + 'a {
        self.stations
            .get(city)
            .into_iter()
            .flat_map(|station| station.routes.iter())
            .filter_map(move |route_id| self.routes.get(route_id))
    }

    /// The "parallel" routes connecting two cities.
    pub fn routes_between<'a>(
        &'a self,
        start: &'a str,
        end: &'a str,
    ) -> impl Iterator<Item = &'a Route> + 'a {
        self.routes_from(start)
            .filter(move |route| route.connects(start, end))
    }

    /// Cities reachable from `city` through a single route, claimed or not.
    pub fn adjacent_cities(&self, city: &str) -> Vec<&City> {
        self.routes_from(city)
            .filter_map(|route| route.other_end(city))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Whether at least one route is still unclaimed.
    /// This stops at the first free route found; it does not count them.
    pub fn free_routes_available(&self) -> bool {
        self.routes().any(|route| !route.is_occupied())
    }

    /// Builds a new board with every city of this one, but only the unclaimed routes.
    ///
    /// This board is left untouched, and later claims on it do not affect the returned board.
    ///
    /// # Example
    /// ```
    /// use route_board::board::Board;
    /// use route_board::card::TrainColor;
    ///
    /// let mut board = Board::new();
    /// let claimed = board.add_route("Atlanta", "Miami", TrainColor::Blue, 5).unwrap();
    /// board.add_route("Atlanta", "Nashville", TrainColor::Wild, 1).unwrap();
    /// board.occupy(claimed, "alice").unwrap();
    ///
    /// let free_board = board.free_routes_board();
    /// assert_eq!(free_board.num_cities(), 3);
    /// assert_eq!(free_board.num_routes(), 1);
    /// assert!(free_board.route(claimed).is_none());
    /// ```
    pub fn free_routes_board(&self) -> Board {
        let routes: BTreeMap<RouteId, Route> = self
            .routes
            .iter()
            .filter(|(_, route)| !route.is_occupied())
            .map(|(route_id, route)| (*route_id, route.clone()))
            .collect();

        let stations = self
            .stations
            .iter()
            .map(|(city, station)| {
                (
                    city.clone(),
                    Station {
                        city: station.city.clone(),
                        routes: station
                            .routes
                            .iter()
                            .copied()
                            .filter(|route_id| routes.contains_key(route_id))
                            .collect(),
                    },
                )
            })
            .collect();

        Board {
            stations,
            routes,
            next_route_id: self.next_route_id,
        }
    }

    /// Returns a copy of the first route, in id order, for which `predicate` holds.
    ///
    /// This is an existence query: it never enumerates every match.
    /// Mutating the returned route has no effect on the board.
    pub fn find_route<P>(&self, mut predicate: P) -> Option<Route>
    where
        P: FnMut(&Route) -> bool,
    {
        self.routes().find(|route| predicate(*route)).cloned()
    }

    /// Marks a route as claimed by `player`.
    ///
    /// Legality of the move (cards spent, whose turn it is) is checked by the caller beforehand.
    /// A claimed route cannot be claimed again.
    ///
    /// # Example
    /// ```
    /// use route_board::board::Board;
    /// use route_board::card::TrainColor;
    ///
    /// let mut board = Board::new();
    /// let route_id = board.add_route("Seattle", "Portland", TrainColor::Wild, 1).unwrap();
    ///
    /// assert!(board.occupy(route_id, "alice").is_ok());
    /// assert_eq!(board.route(route_id).unwrap().occupied_by(), Some("alice"));
    /// assert!(board.occupy(route_id, "bob").is_err());
    /// ```
    pub fn occupy(
        &mut self,
        route_id: RouteId,
        player: impl Into<PlayerId>,
    ) -> Result<(), BoardError> {
        let route = self
            .routes
            .get_mut(&route_id)
            .ok_or(BoardError::UnknownRoute(route_id))?;

        if let Some(claimer) = route.occupied_by() {
            return Err(BoardError::AlreadyOccupied {
                start: route.cities.0.clone(),
                end: route.cities.1.clone(),
                claimer: claimer.to_owned(),
            });
        }

        let player = player.into();
        debug!("Route {} ({}) claimed by {}.", route_id, route, player);
        route.property.occupy(player);

        Ok(())
    }

    /// Releases a route, returning who held it.
    /// Releasing a route nobody holds is a no-op.
    pub fn free(&mut self, route_id: RouteId) -> Result<Option<PlayerId>, BoardError> {
        let route = self
            .routes
            .get_mut(&route_id)
            .ok_or(BoardError::UnknownRoute(route_id))?;

        let previous_claimer = route.property.free();
        if let Some(claimer) = &previous_claimer {
            debug!("Route {} ({}) released by {}.", route_id, route, claimer);
        }

        Ok(previous_claimer)
    }

    /// Copies of all the routes claimed by `player`.
    pub fn routes_claimed_by(&self, player: &str) -> Vec<Route> {
        self.routes()
            .filter(|route| route.occupied_by() == Some(player))
            .cloned()
            .collect()
    }

    /// Predicate that assesses whether a given player has connected two cities on the board, based on their claimed routes.
    ///
    /// # Example
    /// ```
    /// use route_board::board::Board;
    /// use route_board::card::TrainColor;
    ///
    /// let mut board = Board::new();
    /// let first = board.add_route("Raleigh", "Washington", TrainColor::Wild, 2).unwrap();
    /// let second = board.add_route("Washington", "New York", TrainColor::Black, 2).unwrap();
    ///
    /// board.occupy(first, "alice").unwrap();
    /// assert!(!board.has_player_connected("Raleigh", "New York", "alice"));
    ///
    /// board.occupy(second, "alice").unwrap();
    /// assert!(board.has_player_connected("Raleigh", "New York", "alice"));
    /// ```
    pub fn has_player_connected(&self, start: &str, end: &str, player: &str) -> bool {
        let Some(station) = self.find_city(start) else {
            return false;
        };
        let start = station.city().name();

        let mut cities_visited = HashSet::from([start]);
        let mut cities_to_visit = VecDeque::from([start]);

        while let Some(city) = cities_to_visit.pop_front() {
            if city == end {
                return true;
            }

            for route in self.routes_from(city) {
                if route.occupied_by() != Some(player) {
                    continue;
                }

                if let Some(neighbor) = route.other_end(city) {
                    if cities_visited.insert(neighbor.name()) {
                        cities_to_visit.push_back(neighbor.name());
                    }
                }
            }
        }

        false
    }

    /// Total weight of the lightest path between two cities, claimed routes included.
    /// Call it on [`Board::free_routes_board`] to only consider routes still up for grabs.
    ///
    /// Returns `None` if either city is unknown or if they are not connected.
    ///
    /// # Example
    /// ```
    /// use route_board::board::Board;
    /// use route_board::card::TrainColor;
    ///
    /// let mut board = Board::new();
    /// board.add_route("Dallas", "Houston", TrainColor::Wild, 1).unwrap();
    /// board.add_route("Houston", "New Orleans", TrainColor::Wild, 2).unwrap();
    /// board.add_route("Dallas", "New Orleans", TrainColor::Red, 5).unwrap();
    ///
    /// assert_eq!(board.shortest_distance("Dallas", "New Orleans"), Some(3));
    /// ```
    pub fn shortest_distance(&self, start: &str, end: &str) -> Option<u32> {
        let start = self.find_city(start)?.city().name();
        self.find_city(end)?;

        let mut distances = HashMap::from([(start, 0u32)]);
        let mut cities_to_visit = BinaryHeap::from([Reverse((0u32, start))]);

        while let Some(Reverse((distance, city))) = cities_to_visit.pop() {
            if city == end {
                return Some(distance);
            }

            // Stale entry, a shorter path to this city was already expanded.
            if distances.get(city).map_or(false, |best| distance > *best) {
                continue;
            }

            for route in self.routes_from(city) {
                let Some(neighbor) = route.other_end(city) else {
                    continue;
                };

                let neighbor = neighbor.name();
                let candidate = distance + u32::from(route.weight());
                if distances.get(neighbor).map_or(true, |best| candidate < *best) {
                    distances.insert(neighbor, candidate);
                    cities_to_visit.push(Reverse((candidate, neighbor)));
                }
            }
        }

        None
    }

    /// Returns the longest continuous path spanned by the given routes.
    ///
    /// Note that a continuous path may visit a city multiple times, but may not go through
    /// the same route twice.
    ///
    /// # Example
    /// ```
    /// use route_board::board::Board;
    /// use route_board::card::TrainColor;
    ///
    /// let mut board = Board::new();
    /// let first = board.add_route("El Paso", "Phoenix", TrainColor::Wild, 3).unwrap();
    /// let second = board.add_route("Denver", "Phoenix", TrainColor::White, 5).unwrap();
    /// board.occupy(first, "alice").unwrap();
    /// board.occupy(second, "alice").unwrap();
    ///
    /// // Route El Paso -> Phoenix is of length 3.
    /// // Route Phoenix -> Denver is of length 5.
    /// assert_eq!(Board::longest_route(&board.routes_claimed_by("alice")), 8);
    /// ```
    pub fn longest_route(routes: &[Route]) -> u16 {
        let mut all_routes: AdjacentRoutes = HashMap::new();

        for route in routes {
            let (start, end) = &route.cities;

            all_routes
                .entry(start)
                .or_default()
                .push((end, route.id, route.weight()));
            all_routes
                .entry(end)
                .or_default()
                .push((start, route.id, route.weight()));
        }

        all_routes
            .keys()
            .map(|city| Self::longest_route_from_city(city, &all_routes, &mut HashSet::new(), 0))
            .max()
            .unwrap_or(0)
    }

    fn longest_route_from_city(
        start: &City,
        all_routes: &AdjacentRoutes,
        routes_visited: &mut HashSet<RouteId>,
        current_length: u16,
    ) -> u16 {
        let mut longest_route_from_city = current_length;

        for (end, route_id, length) in all_routes.get(start).into_iter().flatten() {
            if !routes_visited.insert(*route_id) {
                continue;
            }

            longest_route_from_city = max(
                longest_route_from_city,
                Self::longest_route_from_city(
                    end,
                    all_routes,
                    routes_visited,
                    current_length + u16::from(*length),
                ),
            );

            routes_visited.remove(route_id);
        }

        longest_route_from_city
    }
}
