//! # Seed Data Generator
//!
//! Populates the database with test products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 500 products (default)
//! cargo run -p minimart-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p minimart-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p minimart-db --bin seed -- --db ./data/minimart.db
//! ```
//!
//! Products are generated per category, one import batch per category, so the
//! dashboard batch history has something to show. Prices, costs and stock
//! levels are deterministic functions of the product index.

use std::env;

use minimart_core::IdGenerator;
use minimart_db::{Database, DbConfig, ImportLine};

/// Product categories for realistic test data
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Beverages",
        &[
            "Coca-Cola",
            "Pepsi",
            "Sprite",
            "Fanta",
            "7-Up",
            "Red Bull",
            "Gatorade",
            "Dasani Water",
            "Orange Juice",
            "Apple Juice",
            "Lemonade",
            "Iced Tea",
        ],
    ),
    (
        "Snacks",
        &[
            "Lays Classic",
            "Doritos Nacho",
            "Cheetos",
            "Pringles",
            "Snickers",
            "Kit Kat",
            "Twix",
            "Skittles",
            "Oreos",
            "Chips Ahoy",
            "Goldfish",
            "Pretzels",
        ],
    ),
    (
        "Dairy",
        &[
            "Whole Milk",
            "2% Milk",
            "Almond Milk",
            "Cheddar Cheese",
            "Mozzarella",
            "Butter",
            "Greek Yogurt",
            "Sour Cream",
            "Eggs Dozen",
            "Cream Cheese",
        ],
    ),
    (
        "Grocery",
        &[
            "White Bread",
            "Wheat Bread",
            "Pasta Spaghetti",
            "Rice White",
            "Canned Beans",
            "Canned Soup",
            "Cereal Cheerios",
            "Oatmeal",
            "Peanut Butter",
            "Honey",
            "Flour",
            "Sugar",
        ],
    ),
];

/// Size variants appended to the base name, with a price addon in cents.
const SIZES: &[(&str, i64)] = &[
    ("Small", 0),
    ("Medium", 100),
    ("Large", 200),
    ("12oz", 0),
    ("20oz", 100),
    ("2L", 150),
    ("6-Pack", 300),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 500;
    let mut db_path = String::from("./minimart_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(500);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Minimart Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 500)");
                println!("  -d, --db <PATH>    Database file path (default: ./minimart_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Minimart Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let ids = IdGenerator::new();
    let mut generated = 0;
    let start = std::time::Instant::now();

    for (category_idx, (category_name, names)) in CATEGORIES.iter().enumerate() {
        if generated >= count {
            break;
        }

        // One import batch per category.
        let mut lines = Vec::new();
        for (product_idx, name) in names.iter().enumerate() {
            for (size_idx, (size, price_addon)) in SIZES.iter().enumerate() {
                if generated + lines.len() >= count {
                    break;
                }
                let seed = category_idx * 1000 + product_idx * 20 + size_idx;
                lines.push(generate_line(name, size, *price_addon, seed));
            }
            if generated + lines.len() >= count {
                break;
            }
        }

        let batch_code = ids.batch_code();
        let outcome = db.products().import(&lines, &batch_code).await?;
        generated += outcome.imported;

        println!(
            "  {} — {} products under batch {}",
            category_name, outcome.imported, outcome.batch_code
        );
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates one import line with deterministic pseudo-random fields.
fn generate_line(name: &str, size: &str, price_addon: i64, seed: usize) -> ImportLine {
    // Base price $1.99 - $9.99 plus the size addon.
    let price_cents = 199 + ((seed * 17) % 800) as i64 + price_addon;

    // Cost is 60-80% of price.
    let cost_pct = 60 + (seed % 20) as i64;
    let cost_cents = price_cents * cost_pct / 100;

    ImportLine {
        name: format!("{} {}", name, size),
        barcode: format!("590{:010}", seed),
        price_cents,
        cost_cents,
        quantity: (seed % 101) as i64,
    }
}
