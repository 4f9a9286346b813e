//! # Seed Data Generator
//!
//! Populates a local cache database with fixture data for development,
//! standing in for a first pull against a real remote source.
//!
//! ## Usage
//! ```bash
//! cargo run -p caravan-db --bin seed
//!
//! # Specify database path
//! cargo run -p caravan-db --bin seed -- --db ./data/caravan.db
//! ```
//!
//! ## Generated Data
//! - A three-level category tree (root → departments → leaf ranges)
//! - A handful of products per leaf category
//! - Customer accounts and leads, with open and closed orders

use chrono::{Duration, Utc};
use std::env;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use caravan_core::{Account, Category, Order, Product};
use caravan_db::{Database, DbConfig};

/// Departments under the root, each with its leaf ranges.
const DEPARTMENTS: &[(&str, &[&str])] = &[
    ("Power Tools", &["Drills", "Saws", "Sanders"]),
    ("Hand Tools", &["Hammers", "Wrenches"]),
    ("Fasteners", &["Screws", "Bolts", "Anchors"]),
];

/// Product names seeded into every leaf range.
const PRODUCT_LINES: &[(&str, &str)] = &[
    ("Standard", "Entry-level line for light duty work"),
    ("Pro", "Heavy duty line for daily site use"),
    ("Compact", "Space-saving variant of the standard line"),
];

/// Company names for fixture accounts; leads get the second half.
const COMPANIES: &[&str] = &[
    "Anders Construction",
    "Brightside Builders",
    "Cornerstone Contracting",
    "Delta Renovations",
    "Eastfield Developments",
    "Foundry Works",
];

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./caravan_dev.db");

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
                println!("Caravan Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./caravan_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Caravan Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("Connected, migrations applied");

    if db.categories().count().await? > 0 {
        println!("Database already has catalog data, skipping seed.");
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    // Build the category tree: one root, departments, leaf ranges.
    let root = Category {
        id: new_id(),
        parent_id: None,
        name: "Catalog".to_string(),
        sequence: 0,
        has_sub_categories: true,
    };

    let mut categories = vec![root.clone()];
    let mut products = Vec::new();

    for (dept_seq, (dept_name, ranges)) in DEPARTMENTS.iter().enumerate() {
        let dept = Category {
            id: new_id(),
            parent_id: Some(root.id.clone()),
            name: dept_name.to_string(),
            sequence: dept_seq as i64 + 1,
            has_sub_categories: true,
        };

        for (range_seq, range_name) in ranges.iter().enumerate() {
            let range = Category {
                id: new_id(),
                parent_id: Some(dept.id.clone()),
                name: range_name.to_string(),
                sequence: range_seq as i64 + 1,
                has_sub_categories: false,
            };

            for (line, blurb) in PRODUCT_LINES {
                products.push(Product {
                    id: new_id(),
                    category_id: range.id.clone(),
                    name: format!("{} {}", range_name.trim_end_matches('s'), line),
                    description: blurb.to_string(),
                });
            }

            categories.push(range);
        }

        categories.push(dept);
    }

    db.categories().upsert_all(&categories).await?;
    db.products().upsert_all(&products).await?;

    println!(
        "Seeded {} categories and {} products",
        categories.len(),
        products.len()
    );

    // Accounts: first half customers, second half leads.
    let mut accounts = Vec::new();
    for (idx, company) in COMPANIES.iter().enumerate() {
        accounts.push(Account {
            id: new_id(),
            company_name: company.to_string(),
            is_lead: idx >= COMPANIES.len() / 2,
        });
    }
    db.accounts().upsert_all(&accounts).await?;

    // Orders: one open and one closed per customer account.
    let now = Utc::now();
    let mut orders = Vec::new();
    for (idx, account) in accounts.iter().filter(|a| !a.is_lead).enumerate() {
        orders.push(Order {
            id: new_id(),
            account_id: account.id.clone(),
            is_open: true,
            due_date: now + Duration::days(7 + idx as i64),
            closed_at: None,
        });
        orders.push(Order {
            id: new_id(),
            account_id: account.id.clone(),
            is_open: false,
            due_date: now - Duration::days(30 - idx as i64),
            closed_at: Some(now - Duration::days(21 - idx as i64)),
        });
    }
    db.orders().upsert_all(&orders).await?;

    println!("Seeded {} accounts and {} orders", accounts.len(), orders.len());
    println!();
    println!("Seed complete!");

    Ok(())
}
