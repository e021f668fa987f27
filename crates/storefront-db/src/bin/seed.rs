//! # Seed Data Generator
//!
//! Populates the database with test products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 500 products (default) into STOREFRONT_DB_PATH
//! cargo run -p storefront-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p storefront-db --bin seed -- --count 2000
//!
//! # Specify database path
//! cargo run -p storefront-db --bin seed -- --db ./data/storefront.db
//! ```
//!
//! Log output is controlled with `RUST_LOG` (default: `info`).
//!
//! ## Generated Products
//! Names are `{item} {size}` across five categories. Prices run from $1.99
//! to $9.99 plus a size addon; stock runs from 0 to 100.

use std::env;
use std::time::Instant;

use storefront_core::{CreateProductRequest, Money};
use storefront_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Product categories for realistic test data
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "BEV",
        &[
            "Cola", "Lemon Soda", "Sparkling Water", "Orange Juice", "Apple Juice",
            "Iced Tea", "Cold Brew", "Energy Drink", "Lemonade", "Ginger Ale",
        ],
    ),
    (
        "SNK",
        &[
            "Potato Chips", "Tortilla Chips", "Pretzels", "Popcorn", "Trail Mix",
            "Chocolate Bar", "Gummy Bears", "Granola Bar", "Crackers", "Cookies",
        ],
    ),
    (
        "DRY",
        &[
            "Whole Milk", "Oat Milk", "Cheddar", "Mozzarella", "Butter",
            "Greek Yogurt", "Cream Cheese", "Sour Cream", "Eggs", "Feta",
        ],
    ),
    (
        "FRZ",
        &[
            "Vanilla Ice Cream", "Frozen Pizza", "Frozen Burrito", "Waffles", "Sorbet",
            "Fish Sticks", "Frozen Peas", "Frozen Berries", "Ice Pops", "Dumplings",
        ],
    ),
    (
        "GRO",
        &[
            "Spaghetti", "Penne", "White Rice", "Brown Rice", "Canned Beans",
            "Canned Tomatoes", "Oatmeal", "Peanut Butter", "Honey", "Flour",
        ],
    ),
];

/// Size variants with their price addon in cents
const SIZES: &[(&str, i64)] = &[
    ("Small", 0),
    ("Medium", 100),
    ("Large", 200),
    ("XL", 350),
    ("Family", 500),
];

const DEFAULT_COUNT: usize = 500;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(SeedArgs { count, db_path }) = parse_args(&args)? else {
        print_help();
        return Ok(());
    };

    let mut config = DbConfig::from_env()?;
    if let Some(path) = db_path {
        config.database_path = path.into();
    }

    info!(database = %config.database_path.display(), count, "Seeding products");

    let db = Database::new(config).await?;
    let products = db.products();

    let existing = products.count().await?;
    if existing > 0 {
        warn!(existing, "Database already has products, skipping seed");
        return Ok(());
    }

    let start = Instant::now();
    let mut generated = 0;

    'outer: for (category_idx, (_, items)) in CATEGORIES.iter().enumerate() {
        for (item_idx, item) in items.iter().enumerate() {
            for (size_idx, (size, price_addon)) in SIZES.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }

                let seed = category_idx * 1000 + item_idx * 20 + size_idx;
                let request = generate_product(item, size, *price_addon, seed);

                if let Err(err) = products.create(request).await {
                    warn!(item = %item, size = %size, error = %err, "Failed to insert product");
                    continue;
                }

                generated += 1;
                if generated % 100 == 0 {
                    info!(generated, "Progress");
                }
            }
        }
    }

    let elapsed = start.elapsed();
    info!(
        generated,
        elapsed_ms = elapsed.as_millis() as u64,
        "Seed complete"
    );

    if let Some(sample) = products.find_by_name("Cola Small").await? {
        info!(id = %sample.id, price = %sample.price(), quantity = sample.quantity, "Sample product");
    }

    db.close().await;
    Ok(())
}

/// Options accepted on the command line.
#[derive(Debug, PartialEq)]
struct SeedArgs {
    count: usize,
    db_path: Option<String>,
}

/// Parses `--count` / `--db`. Returns `Ok(None)` when help was requested.
fn parse_args(args: &[String]) -> Result<Option<SeedArgs>, String> {
    let mut parsed = SeedArgs {
        count: DEFAULT_COUNT,
        db_path: None,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--count" | "-c" => {
                let raw = iter.next().ok_or("--count needs a value")?;
                parsed.count = raw
                    .parse()
                    .map_err(|_| format!("--count={raw:?} is not a valid number"))?;
            }
            "--db" | "-d" => {
                let path = iter.next().ok_or("--db needs a path")?;
                parsed.db_path = Some(path.clone());
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument {other:?}")),
        }
    }

    Ok(Some(parsed))
}

fn print_help() {
    println!("Storefront Seed Data Generator");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --count <N>    Number of products to generate (default: {DEFAULT_COUNT})");
    println!("  -d, --db <PATH>    Database file path (default: $STOREFRONT_DB_PATH)");
    println!("  -h, --help         Show this help message");
}

/// Builds one deterministic product request.
fn generate_product(item: &str, size: &str, price_addon: i64, seed: usize) -> CreateProductRequest {
    // Base $1.99 - $9.99 plus the size addon
    let base_price = 199 + ((seed * 17) % 800) as i64;
    let price = Money::from_cents(base_price + price_addon);

    let quantity = (seed % 101) as i64;

    CreateProductRequest::new(format!("{item} {size}"), price, quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_without_arguments() {
        let parsed = parse_args(&[]).unwrap().unwrap();
        assert_eq!(parsed.count, DEFAULT_COUNT);
        assert_eq!(parsed.db_path, None);
    }

    #[test]
    fn test_count_and_path() {
        let parsed = parse_args(&args(&["--count", "42", "-d", "./x.db"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            parsed,
            SeedArgs {
                count: 42,
                db_path: Some("./x.db".to_string()),
            }
        );
    }

    #[test]
    fn test_bad_count_is_an_error() {
        assert!(parse_args(&args(&["--count", "lots"])).is_err());
        assert!(parse_args(&args(&["--count", "-5"])).is_err());
        assert!(parse_args(&args(&["--count"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
    }

    #[test]
    fn test_help_short_circuits() {
        assert_eq!(parse_args(&args(&["--count", "1", "--help"])).unwrap(), None);
    }
}
