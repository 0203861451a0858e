use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::iter::repeat;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

const NUM_WILD_CARDS: usize = 14;
const NUM_NON_WILD_CARDS: usize = 12;

/// Represents the different variants of train cards, and the color of a route.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumIter,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrainColor {
    /// Also known as the *Hopper train*.
    Black,
    /// Also known as the *Tanker train*.
    Blue,
    /// Also known as the *Caboose train*.
    Green,
    /// Also known as the *Freight train*.
    Orange,
    /// Also known as the *Box train*.
    Pink,
    /// Also known as the *Coal train*.
    Red,
    /// Also known as the *Passenger train*.
    White,
    /// Also known as the *Locomotive*.
    /// This is a special color that matches with any color.
    /// On a route, it denotes a gray route that any color can claim.
    #[serde(alias = "all")]
    Wild,
    /// Also known as the *Reefer train*.
    Yellow,
}

/// A drawn card carries no identity other than its color.
pub type Card = TrainColor;

impl TrainColor {
    /// Whether the current color is wild, i.e. matches with any color.
    ///
    /// # Examples:
    /// ```
    /// use route_board::card::TrainColor;
    ///
    /// assert!(!TrainColor::Black.is_wild());
    /// assert!(TrainColor::Wild.is_wild());
    /// ```
    #[inline]
    pub fn is_wild(&self) -> bool {
        *self == TrainColor::Wild
    }

    /// The opposite of `is_wild`.
    #[inline]
    pub fn is_not_wild(&self) -> bool {
        !self.is_wild()
    }
}

/// How many cards of each color a fresh deck holds.
///
/// Built once per process or session, then only ever read.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DeckConfig {
    total_cards: BTreeMap<TrainColor, usize>,
}

impl DeckConfig {
    /// Builds a configuration from explicit per-color counts.
    /// Colors not mentioned have no cards.
    pub fn new(total_cards: impl IntoIterator<Item = (TrainColor, usize)>) -> Self {
        Self {
            total_cards: total_cards.into_iter().collect(),
        }
    }

    /// How many cards of `color` the deck starts with.
    ///
    /// # Example
    /// ```
    /// use route_board::card::{DeckConfig, TrainColor};
    ///
    /// let deck_config = DeckConfig::default();
    /// assert_eq!(deck_config.total_cards(TrainColor::Wild), 14);
    /// assert_eq!(deck_config.total_cards(TrainColor::Pink), 12);
    /// ```
    pub fn total_cards(&self, color: TrainColor) -> usize {
        self.total_cards.get(&color).copied().unwrap_or(0)
    }

    /// Size of the whole deck.
    pub fn total(&self) -> usize {
        self.total_cards.values().sum()
    }

    /// Every card of the deck, grouped by color. Shuffling is left to the caller.
    pub fn build_deck(&self) -> Vec<Card> {
        let mut all_train_cards = Vec::with_capacity(self.total());

        for (color, num_of_train_cards) in &self.total_cards {
            all_train_cards.extend(repeat(*color).take(*num_of_train_cards));
        }

        all_train_cards
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self::new(TrainColor::iter().map(|color| {
            let num_of_train_cards_per_color = if color.is_wild() {
                NUM_WILD_CARDS
            } else {
                NUM_NON_WILD_CARDS
            };
            (color, num_of_train_cards_per_color)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_color_to_string() {
        assert_eq!(TrainColor::Orange.to_string(), "orange");
        assert_eq!(TrainColor::Wild.to_string(), "wild");
    }

    #[test]
    fn train_color_to_json() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&TrainColor::Blue)?, r#""blue""#);
        assert_eq!(serde_json::to_string(&TrainColor::Wild)?, r#""wild""#);
        Ok(())
    }

    #[test]
    fn json_to_train_color() -> serde_json::Result<()> {
        assert_eq!(
            serde_json::from_str::<TrainColor>(r#""green""#)?,
            TrainColor::Green
        );
        assert_eq!(
            serde_json::from_str::<TrainColor>(r#""all""#)?,
            TrainColor::Wild
        );
        Ok(())
    }

    #[test]
    fn invalid_json_to_train_color() {
        assert!(serde_json::from_str::<TrainColor>(r#""turquoise""#).is_err());
    }

    #[test]
    fn eight_colors_and_a_wildcard() {
        assert_eq!(TrainColor::iter().count(), 9);
        assert_eq!(TrainColor::iter().filter(TrainColor::is_wild).count(), 1);
    }

    #[test]
    fn default_deck_has_110_cards() {
        let deck_config = DeckConfig::default();

        assert_eq!(
            TrainColor::iter()
                .map(|color| deck_config.total_cards(color))
                .sum::<usize>(),
            110
        );
        assert_eq!(deck_config.total(), 110);
    }

    #[test]
    fn default_deck_counts() {
        let deck_config = DeckConfig::default();

        for color in TrainColor::iter() {
            let expected = if color.is_wild() { 14 } else { 12 };
            assert_eq!(deck_config.total_cards(color), expected, "color={color}");
        }
    }

    #[test]
    fn build_deck() {
        let deck_config = DeckConfig::new([(TrainColor::Red, 2), (TrainColor::Wild, 1)]);

        assert_eq!(
            deck_config.build_deck(),
            vec![TrainColor::Red, TrainColor::Red, TrainColor::Wild]
        );
        assert_eq!(deck_config.total_cards(TrainColor::Blue), 0);
    }

    #[test]
    fn deck_config_from_json() -> serde_json::Result<()> {
        let deck_config: DeckConfig = serde_json::from_str(r#"{"wild": 2, "black": 3}"#)?;

        assert_eq!(deck_config.total_cards(TrainColor::Wild), 2);
        assert_eq!(deck_config.total_cards(TrainColor::Black), 3);
        assert_eq!(deck_config.total(), 5);
        Ok(())
    }
}
