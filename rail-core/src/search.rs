use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_SEARCH_PASSENGERS: u8 = 6;

/// Fare/service tier of a coach
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TrainClass {
    #[serde(rename = "1A")]
    FirstAc,
    #[serde(rename = "2A")]
    SecondAc,
    #[serde(rename = "3A")]
    ThirdAc,
    #[serde(rename = "SL")]
    Sleeper,
    #[serde(rename = "2S")]
    SecondSitting,
}

impl TrainClass {
    pub fn code(&self) -> &'static str {
        match self {
            TrainClass::FirstAc => "1A",
            TrainClass::SecondAc => "2A",
            TrainClass::ThirdAc => "3A",
            TrainClass::Sleeper => "SL",
            TrainClass::SecondSitting => "2S",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TrainClass::FirstAc => "First AC",
            TrainClass::SecondAc => "Second AC",
            TrainClass::ThirdAc => "Third AC",
            TrainClass::Sleeper => "Sleeper",
            TrainClass::SecondSitting => "Second Sitting",
        }
    }
}

impl Default for TrainClass {
    fn default() -> Self {
        TrainClass::ThirdAc
    }
}

impl fmt::Display for TrainClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TrainClass {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1A" => Ok(TrainClass::FirstAc),
            "2A" => Ok(TrainClass::SecondAc),
            "3A" => Ok(TrainClass::ThirdAc),
            "SL" => Ok(TrainClass::Sleeper),
            "2S" => Ok(TrainClass::SecondSitting),
            other => Err(SearchError::UnknownClass(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid journey date: {0}")]
    InvalidDate(String),
    #[error("Passenger count must be between 1 and {max}, got {value}")]
    InvalidPassengerCount { value: String, max: u8 },
    #[error("Unknown travel class: {0}")]
    UnknownClass(String),
}

/// Journey search parameters as carried in the navigation query string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    pub from: String,
    pub to: String,
    pub date: NaiveDate,
    /// `None` means all classes
    pub class: Option<TrainClass>,
    pub passengers: u8,
}

impl SearchQuery {
    /// Build a query from key/value parameters. Journeys dated before
    /// `today` are rejected.
    pub fn from_params<'a, I>(params: I, today: NaiveDate) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut from = None;
        let mut to = None;
        let mut date = None;
        let mut class = None;
        let mut passengers = None;

        for (key, value) in params {
            match key {
                "from" => from = Some(value.trim()),
                "to" => to = Some(value.trim()),
                "date" => date = Some(value.trim()),
                "class" => class = Some(value.trim()),
                "passengers" => passengers = Some(value.trim()),
                _ => {}
            }
        }

        let from = from
            .filter(|v| !v.is_empty())
            .ok_or(SearchError::MissingField("from"))?;
        let to = to
            .filter(|v| !v.is_empty())
            .ok_or(SearchError::MissingField("to"))?;
        let date_raw = date
            .filter(|v| !v.is_empty())
            .ok_or(SearchError::MissingField("date"))?;

        let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
            .map_err(|_| SearchError::InvalidDate(date_raw.to_string()))?;
        if date < today {
            return Err(SearchError::InvalidDate(format!("{} is in the past", date_raw)));
        }

        let class = match class {
            None | Some("") => None,
            Some(v) if v.eq_ignore_ascii_case("all") => None,
            Some(v) => Some(v.parse::<TrainClass>()?),
        };

        let passengers = match passengers {
            None | Some("") => 1,
            Some(v) => v
                .parse::<u8>()
                .ok()
                .filter(|n| (1..=MAX_SEARCH_PASSENGERS).contains(n))
                .ok_or_else(|| SearchError::InvalidPassengerCount {
                    value: v.to_string(),
                    max: MAX_SEARCH_PASSENGERS,
                })?,
        };

        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            date,
            class,
            passengers,
        })
    }

    /// Parse `from=Mumbai&to=Delhi&date=...`. No percent-decoding is done.
    pub fn parse(query: &str, today: NaiveDate) -> Result<Self, SearchError> {
        let pairs = query
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")));
        Self::from_params(pairs, today)
    }

    pub fn swap_stations(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    pub fn to_query_string(&self) -> String {
        format!(
            "from={}&to={}&date={}&class={}&passengers={}",
            self.from,
            self.to,
            self.date.format("%Y-%m-%d"),
            self.class.map(|c| c.code()).unwrap_or(""),
            self.passengers
        )
    }
}
