//! # Seed Data Generator
//!
//! Resets the catalog to the reference beauty products for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p storefront-db --bin seed
//!
//! # Specify database path
//! cargo run -p storefront-db --bin seed -- --db ./data/storefront.db
//! ```
//!
//! Existing products are deleted first, so running the seed twice leaves
//! exactly the five reference products.

use anyhow::Context;
use std::env;
use storefront_core::{NewProduct, ProductQuery};
use storefront_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CDN: &str = "https://cdn.dummyjson.com/product-images/beauty";

/// (title, slug, price_cents, discount %, rating, stock, brand, description)
const PRODUCTS: &[(&str, &str, i64, f64, f64, i64, &str, &str)] = &[
    (
        "Essence Mascara Lash Princess",
        "essence-mascara-lash-princess",
        999,
        10.48,
        2.56,
        99,
        "Essence",
        "The Essence Mascara Lash Princess is a popular mascara known for its volumizing and \
         lengthening effects. Achieve dramatic lashes with this long-lasting and cruelty-free formula.",
    ),
    (
        "Eyeshadow Palette with Mirror",
        "eyeshadow-palette-with-mirror",
        1999,
        18.19,
        2.86,
        34,
        "Glamour Beauty",
        "The Eyeshadow Palette with Mirror offers a versatile range of eyeshadow shades for \
         creating stunning eye looks. With a built-in mirror, it's convenient for on-the-go \
         makeup application.",
    ),
    (
        "Powder Canister",
        "powder-canister",
        1499,
        9.84,
        4.64,
        89,
        "Velvet Touch",
        "The Powder Canister is a finely milled setting powder designed to set makeup and \
         control shine. With a lightweight and translucent formula, it provides a smooth and \
         matte finish.",
    ),
    (
        "Red Lipstick",
        "red-lipstick",
        1299,
        12.16,
        4.36,
        91,
        "Chic Cosmetics",
        "The Red Lipstick is a classic and bold choice for adding a pop of color to your lips. \
         With a creamy and pigmented formula, it provides a vibrant and long-lasting finish.",
    ),
    (
        "Red Nail Polish",
        "red-nail-polish",
        899,
        11.44,
        4.32,
        79,
        "Nail Couture",
        "The Red Nail Polish offers a rich and glossy red hue for vibrant and polished nails. \
         With a quick-drying formula, it provides a salon-quality finish at home.",
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./storefront_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./storefront_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(path = %db_path, "Seeding catalog");

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening database at {db_path}"))?;
    let products = db.products();

    let removed = products.delete_all().await.context("clearing catalog")?;
    if removed > 0 {
        info!(removed, "Cleared existing products");
    }

    for (title, slug, price_cents, discount, rating, stock, brand, description) in PRODUCTS {
        let new = NewProduct {
            title: title.to_string(),
            price_cents: *price_cents,
            description: description.to_string(),
            category: "beauty".to_string(),
            brand: brand.to_string(),
            stock: Some(*stock),
            thumbnail: Some(format!("{CDN}/{slug}/thumbnail.webp")),
            images: vec![format!("{CDN}/{slug}/1.webp")],
            discount_percentage: Some(*discount),
            rating: Some(*rating),
        };

        let inserted = products
            .insert(&new)
            .await
            .with_context(|| format!("inserting {title}"))?;
        info!(id = %inserted.id, title = %inserted.title, price = %inserted.price(), "Inserted product");
    }

    let count = products.count().await?;
    info!(count, "Catalog seeded");

    // Spot-check the full-text index.
    let hits = products.search(&ProductQuery::new().search("red")).await?;
    info!(hits = hits.len(), "Search 'red'");

    db.close().await;
    Ok(())
}
