use log::debug;

use super::model::{CellValue, Row};

// ---------------------------------------------------------------------------
// Price normalization
// ---------------------------------------------------------------------------

/// A listing that survived cleaning: numeric price, non-empty neighbourhood.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedListing<'a> {
    pub neighbourhood: String,
    pub price: f64,
    /// The source row, for reading sub-category columns.
    pub row: &'a Row,
}

/// Parse a price cell such as `"$1,200.00"` into a number.
///
/// Numeric cells pass through. Text has `$` and `,` stripped before parsing.
/// Unparsable text, nulls and non-finite values yield `None`.
pub fn parse_price(cell: &CellValue) -> Option<f64> {
    let value = match cell.as_f64() {
        Some(v) => v,
        None => {
            let text = cell.to_text()?;
            let cleaned: String = text.chars().filter(|c| *c != '$' && *c != ',').collect();
            cleaned.trim().parse::<f64>().ok()?
        }
    };
    value.is_finite().then_some(value)
}

/// Neighbourhood label of a cell; blank labels and NaN floats count as missing.
pub fn parse_neighbourhood(cell: &CellValue) -> Option<String> {
    if let CellValue::Float(v) = cell {
        if !v.is_finite() {
            return None;
        }
    }
    cell.to_text().filter(|s| !s.trim().is_empty())
}

/// Drop rows whose price or neighbourhood is missing, keeping source order.
pub fn clean_listings<'a>(
    rows: &'a [Row],
    price_col: &str,
    neighbourhood_col: &str,
) -> Vec<PricedListing<'a>> {
    let cleaned: Vec<PricedListing<'a>> = rows
        .iter()
        .filter_map(|row| {
            let price = parse_price(row.get(price_col))?;
            let neighbourhood = parse_neighbourhood(row.get(neighbourhood_col))?;
            Some(PricedListing {
                neighbourhood,
                price,
                row,
            })
        })
        .collect();

    debug!(
        "price cleaning kept {} of {} rows ({} dropped)",
        cleaned.len(),
        rows.len(),
        rows.len() - cleaned.len()
    );
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    #[test]
    fn strips_currency_formatting() {
        assert_eq!(parse_price(&text("$1,200.00")), Some(1200.0));
        assert_eq!(parse_price(&text(" $85 ")), Some(85.0));
    }

    #[test]
    fn numeric_cells_pass_through() {
        assert_eq!(parse_price(&CellValue::Integer(150)), Some(150.0));
        assert_eq!(parse_price(&CellValue::Float(72.5)), Some(72.5));
    }

    #[test]
    fn garbage_prices_are_missing() {
        assert_eq!(parse_price(&text("N/A")), None);
        assert_eq!(parse_price(&text("")), None);
        assert_eq!(parse_price(&text("NaN")), None);
        assert_eq!(parse_price(&CellValue::Float(f64::NAN)), None);
        assert_eq!(parse_price(&CellValue::Null), None);
        assert_eq!(parse_price(&CellValue::Bool(true)), None);
    }

    #[test]
    fn non_finite_neighbourhood_is_missing() {
        assert_eq!(parse_neighbourhood(&CellValue::Float(f64::NAN)), None);
        assert_eq!(parse_neighbourhood(&CellValue::Float(f64::INFINITY)), None);
        assert_eq!(parse_neighbourhood(&CellValue::Null), None);
        assert_eq!(parse_neighbourhood(&text("02134")).as_deref(), Some("02134"));
        assert_eq!(parse_neighbourhood(&CellValue::Integer(7)).as_deref(), Some("7"));
    }

    #[test]
    fn drops_rows_without_price_or_neighbourhood() {
        let rows: Vec<Row> = vec![
            [("price", text("$10")), ("hood", text("A"))].into_iter().collect(),
            [("price", text("N/A")), ("hood", text("A"))].into_iter().collect(),
            [("price", text("$20")), ("hood", text("  "))].into_iter().collect(),
            [("price", text("$30"))].into_iter().collect(),
            [("price", CellValue::Integer(40)), ("hood", text("B"))]
                .into_iter()
                .collect(),
        ];
        let cleaned = clean_listings(&rows, "price", "hood");
        let summary: Vec<(&str, f64)> = cleaned
            .iter()
            .map(|l| (l.neighbourhood.as_str(), l.price))
            .collect();
        assert_eq!(summary, vec![("A", 10.0), ("B", 40.0)]);
    }
}
