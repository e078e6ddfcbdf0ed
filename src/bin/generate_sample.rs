use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a deterministic sample listings/reviews dataset.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output directory
    #[arg(default_value = "data")]
    out_dir: PathBuf,

    /// Listings generated per neighbourhood
    #[arg(short, long, default_value_t = 40)]
    per_neighbourhood: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Render a price the way listing exports do: `$1,234.00`.
fn format_price(value: f64) -> String {
    let cents = (value * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.{:02}", cents % 100)
}

#[derive(Debug, Serialize)]
struct ListingRecord {
    id: i64,
    neighbourhood_cleansed: String,
    room_type: String,
    price: String,
}

#[derive(Debug, Serialize)]
struct ReviewRecord {
    listing_id: i64,
    reviewer: String,
    comments: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    // (name, price multiplier)
    let neighbourhoods = [
        ("Mission", 1.1),
        ("Nob Hill", 1.6),
        ("Outer Sunset", 0.8),
        ("SoMa", 1.3),
        ("Tenderloin", 0.7),
    ];
    // (room type, base nightly price)
    let room_types = [
        ("Entire home/apt", 220.0),
        ("Private room", 95.0),
        ("Shared room", 45.0),
        ("Hotel room", 180.0),
    ];
    let reviewers = ["Ana", "Ben", "Chen", "Dara", "Eli"];
    let comments = ["Great stay", "Noisy street", "Would book again", "Clean and quiet"];

    let mut listings = Vec::new();
    let mut reviews = Vec::new();
    let mut listing_id: i64 = 0;

    for &(hood, multiplier) in &neighbourhoods {
        for _ in 0..args.per_neighbourhood {
            let &(room, base) = rng.pick(&room_types);
            let noise = 0.75 + rng.next_f64() * 0.5;
            listings.push(ListingRecord {
                id: listing_id,
                neighbourhood_cleansed: hood.to_string(),
                room_type: room.to_string(),
                price: format_price(base * multiplier * noise),
            });

            for _ in 0..(rng.next_u64() % 3) {
                reviews.push(ReviewRecord {
                    listing_id,
                    reviewer: rng.pick(&reviewers).to_string(),
                    comments: rng.pick(&comments).to_string(),
                });
            }
            listing_id += 1;
        }
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    // CSV outputs
    let listings_csv = args.out_dir.join("listings.csv");
    let mut writer = csv::Writer::from_path(&listings_csv).context("creating listings CSV")?;
    for rec in &listings {
        writer.serialize(rec).context("writing listing")?;
    }
    writer.flush().context("flushing listings CSV")?;

    let reviews_csv = args.out_dir.join("reviews.csv");
    let mut writer = csv::Writer::from_path(&reviews_csv).context("creating reviews CSV")?;
    for rec in &reviews {
        writer.serialize(rec).context("writing review")?;
    }
    writer.flush().context("flushing reviews CSV")?;

    // Parquet copy of the listings
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("neighbourhood_cleansed", DataType::Utf8, false),
        Field::new("room_type", DataType::Utf8, false),
        Field::new("price", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(listings.iter().map(|l| l.id))),
            Arc::new(StringArray::from_iter_values(
                listings.iter().map(|l| l.neighbourhood_cleansed.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                listings.iter().map(|l| l.room_type.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                listings.iter().map(|l| l.price.as_str()),
            )),
        ],
    )
    .context("building record batch")?;

    let listings_parquet = args.out_dir.join("listings.parquet");
    let file = std::fs::File::create(&listings_parquet).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    println!(
        "Wrote {} listings and {} reviews to {}",
        listings.len(),
        reviews.len(),
        args.out_dir.display()
    );
    Ok(())
}
