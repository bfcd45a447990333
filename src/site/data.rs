//! Store and opening-hours data embedded at build time.

use serde::Deserialize;

use crate::error::Result;

const STORES: &str = include_str!("../../data/stores.toml");
const TIMINGS: &str = include_str!("../../data/timings.toml");

/// One physical store, rendered as a grid card
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StoreRecord {
    /// Full name, `"<brand> | <location>"`
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Directions link
    pub map_link: String,
    /// Image path relative to the asset root
    pub image: String,
}

impl StoreRecord {
    /// The location part of the name, or the whole name if it has none
    pub fn short_name(&self) -> &str {
        self.name
            .split_once('|')
            .map(|(_, location)| location.trim())
            .filter(|location| !location.is_empty())
            .unwrap_or(self.name.as_str())
    }

    /// `tel:` link for the store's phone, if it has one
    pub fn call_link(&self) -> Option<String> {
        self.phone.as_ref().map(|phone| format!("tel:{phone}"))
    }
}

/// Opening hours for one day of the week
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Timing {
    pub day: String,
    pub hours: String,
}

#[derive(Deserialize)]
struct StoreFile {
    #[serde(rename = "store", default)]
    stores: Vec<StoreRecord>,
}

#[derive(Deserialize)]
struct TimingFile {
    #[serde(rename = "day", default)]
    days: Vec<Timing>,
}

/// Parse store records from TOML (`[[store]]` tables)
pub fn parse_stores(source: &str) -> Result<Vec<StoreRecord>> {
    Ok(toml::from_str::<StoreFile>(source)?.stores)
}

/// Parse opening hours from TOML (`[[day]]` tables)
pub fn parse_timings(source: &str) -> Result<Vec<Timing>> {
    Ok(toml::from_str::<TimingFile>(source)?.days)
}

/// The embedded store list
pub fn stores() -> Result<Vec<StoreRecord>> {
    parse_stores(STORES)
}

/// The embedded weekly opening hours
pub fn timings() -> Result<Vec<Timing>> {
    parse_timings(TIMINGS)
}
