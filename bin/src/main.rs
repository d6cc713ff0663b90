//! CLI for the rotation inventory analytics library.
//!
//! Runs the library's analyses over a deterministic synthetic dataset, the
//! way the reporting layer would over real feeds. The same seed always
//! produces the same rows, so output is reproducible.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rotation::{
    InventorySnapshot, Result, RotationAnalyzer, RotationError, SalesFact, VelocityThresholds,
    band_counts, daily_series, rank_products, reorder_plan, sales_totals, summarize, trend,
};

#[derive(Parser)]
#[command(name = "rotation")]
#[command(about = "Inventory rotation analytics over a synthetic dataset", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full rotation table
    Rotate {
        #[command(flatten)]
        data: DataOpts,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the reorder plan for depleted lines
    Reorder {
        #[command(flatten)]
        data: DataOpts,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print sales totals, inventory summary, rankings and trend
    Summary {
        #[command(flatten)]
        data: DataOpts,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct DataOpts {
    /// Seed for the synthetic dataset
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Reporting period length in days
    #[arg(long, default_value_t = 10)]
    days: u16,
    /// Number of stores
    #[arg(long, default_value_t = 3)]
    stores: usize,
    /// Number of products
    #[arg(long, default_value_t = 5)]
    products: usize,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Rotate { data, json } => run_rotate(&data, json),
        Commands::Reorder { data, json } => run_reorder(&data, json),
        Commands::Summary { data, json } => run_summary(&data, json),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run_rotate(opts: &DataOpts, json: bool) -> Result<()> {
    let (sales, inventory) = generate_dataset(opts);
    let records = RotationAnalyzer::new().analyze(&sales, &inventory, i64::from(opts.days))?;

    if json {
        println!("{}", to_json(&records)?);
        return Ok(());
    }

    println!(
        "{:<26} {:<10} {:>6} {:>6} {:>8} {:>8} {:>9}  {}",
        "Product", "Store", "Stock", "Sold", "Avg/Day", "Cover", "Turnover", "Level"
    );
    for rec in &records {
        println!(
            "{:<26} {:<10} {:>6} {:>6} {:>8.2} {:>8.1} {:>9.2}  {}",
            rec.product_key,
            rec.store_key,
            rec.stock_on_hand,
            rec.units_sold_period,
            rec.avg_daily_sales,
            rec.days_of_cover,
            rec.turnover_index,
            rec.stock_level,
        );
    }
    println!("\n{} lines over {} days", records.len(), opts.days);
    Ok(())
}

fn run_reorder(opts: &DataOpts, json: bool) -> Result<()> {
    let (sales, inventory) = generate_dataset(opts);
    let records = RotationAnalyzer::new().analyze(&sales, &inventory, i64::from(opts.days))?;
    let plan = reorder_plan(&records);

    if json {
        println!("{}", to_json(&plan)?);
        return Ok(());
    }

    if plan.is_empty() {
        println!("No lines need reordering");
        return Ok(());
    }

    println!(
        "{:<26} {:<10} {:>6} {:>6} {:>8} {:>12}",
        "Product", "Store", "Stock", "Min", "Reorder", "Cost"
    );
    for line in &plan.lines {
        println!(
            "{:<26} {:<10} {:>6} {:>6} {:>8} {:>12.2}",
            line.product_key,
            line.store_key,
            line.stock_on_hand,
            line.stock_min,
            line.reorder_qty,
            line.reorder_cost,
        );
    }
    println!(
        "\n{} lines, {} units to reorder, total cost {:.2}",
        plan.lines.len(),
        plan.total_units,
        plan.total_cost
    );
    Ok(())
}

fn run_summary(opts: &DataOpts, json: bool) -> Result<()> {
    let (sales, inventory) = generate_dataset(opts);
    let records = RotationAnalyzer::new().analyze(&sales, &inventory, i64::from(opts.days))?;

    let totals = sales_totals(&sales);
    let stock = summarize(&records);
    let bands = band_counts(&records, &VelocityThresholds::default());
    let sales_trend = trend(&daily_series(&sales));
    let top = rank_products(&sales, Some(5));

    if json {
        let doc = serde_json::json!({
            "sales": totals,
            "inventory": stock,
            "velocity": bands,
            "trend": sales_trend,
            "top_products": top,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&doc)
                .map_err(|e| RotationError::Computation(e.to_string()))?
        );
        return Ok(());
    }

    println!("Sales");
    println!("  revenue:     {:.2}", totals.revenue);
    println!("  units:       {}", totals.units);
    println!("  avg ticket:  {:.2}", totals.avg_ticket);
    println!("  trend:       {} ({:+.1}%)", sales_trend.direction, sales_trend.change_pct);

    println!("\nInventory");
    println!("  total stock: {} units", stock.total_stock);
    println!("  value:       {:.2}", stock.inventory_value);
    println!(
        "  levels:      {} out of stock, {} critical, {} excess, {} normal",
        stock.out_of_stock, stock.critical, stock.excess, stock.normal
    );

    println!("\nVelocity");
    println!(
        "  {} fast, {} normal, {} slow, {} stalled",
        bands.fast, bands.normal, bands.slow, bands.stalled
    );

    println!("\nTop products");
    for entry in &top {
        println!(
            "  #{} {:<26} {:>10.2} ({:.1}%)",
            entry.rank, entry.key, entry.revenue, entry.share_pct
        );
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| RotationError::Computation(e.to_string()))
}

/// Product catalog for the synthetic dataset.
const CATALOG: &[&str] = &[
    "EPONA TOTE - NAVY/PURPLE",
    "EPONA TOTE - BLACK/GOLD",
    "MINIMAL WALLET - BLACK - S",
    "MINIMAL WALLET - BLACK - M",
    "URBAN BACKPACK - GREY",
    "URBAN BACKPACK - OLIVE",
    "CITY SATCHEL - TAN",
    "CITY SATCHEL - BLACK",
    "WEEKENDER DUFFEL - NAVY",
    "WEEKENDER DUFFEL - BROWN",
];

/// Builds a seeded dataset shaped like the real feeds: per-day sales facts
/// with quiet days mixed in, and one inventory line per (product, store).
fn generate_dataset(opts: &DataOpts) -> (Vec<SalesFact>, Vec<InventorySnapshot>) {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let start = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap_or_default();

    let products: Vec<String> = (0..opts.products)
        .map(|i| {
            CATALOG
                .get(i)
                .map_or_else(|| format!("PRODUCT {}", i + 1), |name| (*name).to_string())
        })
        .collect();
    let stores: Vec<String> = (0..opts.stores)
        .map(|i| format!("Store {}", 101 + 100 * i))
        .collect();

    let mut sales = Vec::new();
    let mut inventory = Vec::new();

    for product in &products {
        let unit_price = f64::from(rng.gen_range(30..150));
        for store in &stores {
            for day in 0..opts.days {
                // Roughly a quarter of days see no sales for a line
                if rng.gen_bool(0.75) {
                    let units = rng.gen_range(1..=30);
                    sales.push(SalesFact {
                        date: start + chrono::Duration::days(i64::from(day)),
                        product_key: product.clone(),
                        store_key: store.clone(),
                        units_sold: units,
                        revenue: units as f64 * unit_price,
                    });
                }
            }

            inventory.push(InventorySnapshot {
                product_key: product.clone(),
                store_key: store.clone(),
                stock_on_hand: rng.gen_range(0..50),
                stock_min: rng.gen_range(10..20),
                stock_max: rng.gen_range(40..80),
                unit_cost: f64::from(rng.gen_range(50..200)),
            });
        }
    }

    (sales, inventory)
}
