use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use super::stats::{interquartile_range, median};
use crate::data::clean::PricedListing;
use crate::data::columns::ResolvedColumns;
use crate::data::model::CellValue;

/// Spread value per neighbourhood, keyed (and therefore ordered) by name.
pub type SpreadByNeighbourhood = BTreeMap<String, f64>;

// ---------------------------------------------------------------------------
// Spread strategies
// ---------------------------------------------------------------------------

/// How price spread within a neighbourhood is measured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpreadStrategy {
    /// Max minus min of the per-room-type median prices.
    RoomType(String),
    /// Max minus min of the per-property-type median prices.
    PropertyType(String),
    /// Interquartile range of all prices in the neighbourhood.
    QuantileSpread,
}

impl SpreadStrategy {
    /// Pick the first applicable strategy for the resolved columns.
    pub fn select(columns: &ResolvedColumns) -> Self {
        if let Some(col) = &columns.room_type {
            SpreadStrategy::RoomType(col.clone())
        } else if let Some(col) = &columns.property_type {
            SpreadStrategy::PropertyType(col.clone())
        } else {
            SpreadStrategy::QuantileSpread
        }
    }

    /// Compute the spread of every neighbourhood that has one.
    pub fn compute_spread(&self, listings: &[PricedListing<'_>]) -> SpreadByNeighbourhood {
        match self {
            SpreadStrategy::RoomType(col) | SpreadStrategy::PropertyType(col) => {
                median_range_by_category(listings, col)
            }
            SpreadStrategy::QuantileSpread => iqr_by_neighbourhood(listings),
        }
    }
}

impl fmt::Display for SpreadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpreadStrategy::RoomType(col) => write!(f, "median range across room types ('{col}')"),
            SpreadStrategy::PropertyType(col) => {
                write!(f, "median range across property types ('{col}')")
            }
            SpreadStrategy::QuantileSpread => write!(f, "interquartile range of prices"),
        }
    }
}

/// Median price per (neighbourhood, category), then max − min per neighbourhood.
/// Listings without a category value take no part.
fn median_range_by_category(
    listings: &[PricedListing<'_>],
    category_col: &str,
) -> SpreadByNeighbourhood {
    let mut groups: BTreeMap<(&str, &CellValue), Vec<f64>> = BTreeMap::new();
    for listing in listings {
        let category = listing.row.get(category_col);
        if category.is_null() {
            continue;
        }
        groups
            .entry((listing.neighbourhood.as_str(), category))
            .or_default()
            .push(listing.price);
    }
    debug!("{} (neighbourhood, {category_col}) groups", groups.len());

    let mut bounds: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for ((neighbourhood, _), prices) in &groups {
        let Some(m) = median(prices) else {
            continue;
        };
        bounds
            .entry(*neighbourhood)
            .and_modify(|(lo, hi)| {
                *lo = lo.min(m);
                *hi = hi.max(m);
            })
            .or_insert((m, m));
    }

    bounds
        .into_iter()
        .map(|(neighbourhood, (lo, hi))| (neighbourhood.to_string(), hi - lo))
        .collect()
}

/// `Q75 − Q25` of the raw prices in each neighbourhood.
fn iqr_by_neighbourhood(listings: &[PricedListing<'_>]) -> SpreadByNeighbourhood {
    let mut prices: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for listing in listings {
        prices
            .entry(listing.neighbourhood.as_str())
            .or_default()
            .push(listing.price);
    }

    prices
        .into_iter()
        .filter_map(|(neighbourhood, p)| Some((neighbourhood.to_string(), interquartile_range(&p)?)))
        .collect()
}

// ---------------------------------------------------------------------------
// Result selection
// ---------------------------------------------------------------------------

/// Neighbourhood with the largest spread.
///
/// Ties go to the lexicographically smallest name: the map iterates in name
/// order and only a strictly larger spread replaces the current best.
pub fn widest_spread(spreads: &SpreadByNeighbourhood) -> Option<(&str, f64)> {
    let mut best: Option<(&str, f64)> = None;
    for (neighbourhood, &spread) in spreads {
        match best {
            Some((_, current)) if spread <= current => {}
            _ => best = Some((neighbourhood.as_str(), spread)),
        }
    }
    best
}
