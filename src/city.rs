use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Names a city on the board.
///
/// # JSON
/// Cities are serialized as their name.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct City(String);

impl City {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for City {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for City {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// Allows looking up city-keyed maps with a plain `&str`.
impl Borrow<str> for City {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Top-level representation of a connection between two cities.
pub type CityToCity = (City, City);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_to_string() {
        assert_eq!(City::from("Atlanta").to_string(), "Atlanta");
        assert_eq!(City::new("Sault St. Marie").to_string(), "Sault St. Marie");
    }

    #[test]
    fn city_to_json() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&City::from("Duluth"))?, r#""Duluth""#);
        Ok(())
    }

    #[test]
    fn json_to_city() -> serde_json::Result<()> {
        assert_eq!(
            serde_json::from_str::<City>(r#""Montréal""#)?,
            City::from("Montréal")
        );
        Ok(())
    }

    #[test]
    fn invalid_json_to_city() {
        assert!(serde_json::from_str::<City>("36").is_err());
    }

    #[test]
    fn cities_compare_by_name() {
        assert!(City::from("Boston") < City::from("Calgary"));
        assert_eq!(City::from(String::from("Miami")), City::from("Miami"));
    }
}
