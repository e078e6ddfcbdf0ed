use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Column resolution: map logical fields onto whatever the header calls them
// ---------------------------------------------------------------------------

const PRICE_PATTERNS: &[&str] = &["price"];
const NEIGHBOURHOOD_PATTERNS: &[&str] = &["neighbourhood", "neighborhood"];
const ROOM_TYPE_PATTERNS: &[&str] = &["room_type"];
const PROPERTY_TYPE_PATTERNS: &[&str] = &["property_type"];

/// Header columns backing each logical listing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub price: String,
    pub neighbourhood: String,
    pub room_type: Option<String>,
    /// Only looked up when there is no room-type column.
    pub property_type: Option<String>,
}

/// First column (in header order) whose lowercased name contains any pattern.
pub fn find_column(columns: &[String], patterns: &[&str]) -> Option<String> {
    columns
        .iter()
        .find(|col| {
            let lower = col.to_lowercase();
            patterns.iter().any(|p| lower.contains(p))
        })
        .cloned()
}

/// Resolve the listing columns the analysis needs.
///
/// Fails with [`AnalysisError::MissingColumn`] when no price or no
/// neighbourhood column exists; price is checked first.
pub fn resolve_columns(columns: &[String]) -> Result<ResolvedColumns, AnalysisError> {
    let price = find_column(columns, PRICE_PATTERNS)
        .ok_or(AnalysisError::MissingColumn { column: "price" })?;
    let neighbourhood = find_column(columns, NEIGHBOURHOOD_PATTERNS).ok_or(
        AnalysisError::MissingColumn {
            column: "neighbourhood",
        },
    )?;

    let room_type = find_column(columns, ROOM_TYPE_PATTERNS);
    let property_type = match room_type {
        Some(_) => None,
        None => find_column(columns, PROPERTY_TYPE_PATTERNS),
    };

    Ok(ResolvedColumns {
        price,
        neighbourhood,
        room_type,
        property_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_inside_airbnb_header() {
        let cols = header(&[
            "id",
            "neighbourhood_cleansed",
            "neighbourhood_group_cleansed",
            "property_type",
            "room_type",
            "price",
        ]);
        let resolved = resolve_columns(&cols).unwrap();
        assert_eq!(resolved.price, "price");
        assert_eq!(resolved.neighbourhood, "neighbourhood_cleansed");
        assert_eq!(resolved.room_type.as_deref(), Some("room_type"));
        assert_eq!(resolved.property_type, None);
    }

    #[test]
    fn matching_is_case_insensitive_and_takes_first() {
        let cols = header(&["Weekly_Price", "PRICE", "Neighborhood", "neighbourhood"]);
        let resolved = resolve_columns(&cols).unwrap();
        assert_eq!(resolved.price, "Weekly_Price");
        assert_eq!(resolved.neighbourhood, "Neighborhood");
    }

    #[test]
    fn property_type_used_only_without_room_type() {
        let cols = header(&["price", "neighbourhood", "Property_Type"]);
        let resolved = resolve_columns(&cols).unwrap();
        assert_eq!(resolved.room_type, None);
        assert_eq!(resolved.property_type.as_deref(), Some("Property_Type"));
    }

    #[test]
    fn missing_price_reported_first() {
        let err = resolve_columns(&header(&["id", "name"])).unwrap_err();
        assert_eq!(err, AnalysisError::MissingColumn { column: "price" });
    }

    #[test]
    fn missing_neighbourhood() {
        let err = resolve_columns(&header(&["price", "room_type"])).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MissingColumn {
                column: "neighbourhood"
            }
        );
    }
}
