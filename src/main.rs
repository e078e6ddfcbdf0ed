use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use neighbourhood_spread::data::loader::load_data;
use neighbourhood_spread::highest_price_spread_neighbourhood;

/// Print the neighbourhood with the widest spread in median listing price.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listings table (.csv, .json or .parquet)
    #[arg(env = "LISTINGS_PATH", default_value = "data/listings.csv")]
    listings: PathBuf,

    /// Reviews table (.csv, .json or .parquet)
    #[arg(env = "REVIEWS_PATH", default_value = "data/reviews.csv")]
    reviews: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("Loading data...");
    let (listings, reviews) = load_data(&args.listings, &args.reviews)?;

    info!("Analyzing neighbourhoods...");
    let neighbourhood = highest_price_spread_neighbourhood(&listings, &reviews)?;

    println!("{neighbourhood}");
    Ok(())
}
