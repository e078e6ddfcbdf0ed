pub mod analysis;
pub mod data;
pub mod error;

pub use analysis::highest_price_spread_neighbourhood;
pub use error::AnalysisError;
