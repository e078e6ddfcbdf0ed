pub mod spread;
pub mod stats;

use log::{debug, info};

use crate::data::clean::clean_listings;
use crate::data::columns::resolve_columns;
use crate::data::model::Table;
use crate::error::AnalysisError;
use spread::{SpreadStrategy, widest_spread};

/// Find the neighbourhood whose prices vary the most.
///
/// Spread is the gap between the highest and lowest median price across
/// room types, or across property types when the listings carry no room
/// type, or the interquartile range of prices when they carry neither.
/// Ties go to the lexicographically smallest neighbourhood name.
///
/// `_reviews` is accepted alongside the listings but not consulted.
pub fn highest_price_spread_neighbourhood(
    listings: &Table,
    _reviews: &Table,
) -> Result<String, AnalysisError> {
    let columns = resolve_columns(&listings.columns)?;
    debug!("resolved listing columns: {columns:?}");

    let cleaned = clean_listings(&listings.rows, &columns.price, &columns.neighbourhood);
    if cleaned.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let strategy = SpreadStrategy::select(&columns);
    info!("measuring spread by {strategy} over {} listings", cleaned.len());

    let spreads = strategy.compute_spread(&cleaned);
    let (neighbourhood, spread) = widest_spread(&spreads).ok_or(AnalysisError::EmptyInput)?;
    info!(
        "{neighbourhood} has the widest spread ({spread:.2}) of {} neighbourhoods",
        spreads.len()
    );

    Ok(neighbourhood.to_string())
}
