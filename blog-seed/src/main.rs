use anyhow::{Context, Result};
use blog_server::config::Settings;
use blog_server::db::seed::{sample_insert_count, seed_sample_data, SeedReport};
use blog_server::db::{DataManager, DatabaseManager, DbResult};
use clap::Parser;
use std::fmt::Debug;

/// Blogging Platform Seeder
///
/// Inserts sample users, posts, follower relationships and comments, then
/// reads every table back and logs the rows.
#[derive(Parser, Debug)]
#[command(name = "blog-seed")]
#[command(about = "Seed the blogging platform database with sample data", long_about = None)]
struct Args {
    /// Database name, overriding settings and DATABASE_NAME
    #[arg(short, long)]
    database: Option<String>,

    /// Do not create missing tables before seeding
    #[arg(long)]
    skip_schema: bool,

    /// Skip logging the rows read back after seeding
    #[arg(short, long)]
    quiet: bool,
}

/// Log every row of a read, or nothing if the read failed (the executor has
/// already logged the error)
fn log_rows<T: Debug>(heading: &str, rows: DbResult<Vec<T>>) {
    if let Ok(rows) = rows {
        tracing::info!("{} ({})", heading, rows.len());
        for row in rows {
            tracing::info!("  {:?}", row);
        }
    }
}

fn log_tables(data: &DataManager<'_>) {
    log_rows("Users", data.get_all_users());
    log_rows("Posts", data.get_all_posts());
    log_rows("Followers", data.get_all_followers());
    log_rows("Comments", data.get_all_comments());
    log_rows("Posts with Authors", data.get_posts_with_authors());
    log_rows(
        "Comments with Post and Author Details",
        data.get_comments_with_posts_and_authors(),
    );
}

/// Display seeding results in a formatted way
fn display_report(report: &SeedReport) {
    println!();
    println!("Seed Summary");
    println!("============");
    println!();
    println!("Inserts attempted: {}", sample_insert_count());
    println!("Inserts succeeded: {}", report.succeeded().len());

    if !report.is_complete() {
        println!();
        println!("Failures: {}", report.failed().len());
        for (i, (label, reason)) in report.failed().iter().enumerate() {
            println!("  {}. {}: {}", i + 1, label, reason);
        }
    }
    println!();
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_seed=info,blog_server=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut settings = Settings::new().context("Failed to load settings")?;
    if let Some(name) = args.database {
        settings.database.name = name;
    }
    let init_schema = settings.database.init_schema && !args.skip_schema;

    let db = DatabaseManager::open(settings.database)
        .context("Failed to connect to database")?;

    if init_schema {
        db.initialize_schema()
            .context("Failed to initialize database schema")?;
    }

    let data = DataManager::new(&db);
    let report = seed_sample_data(&data);

    if !args.quiet {
        log_tables(&data);
    }

    display_report(&report);

    if !report.is_complete() {
        anyhow::bail!(
            "{} of {} inserts failed",
            report.failed().len(),
            sample_insert_count()
        );
    }

    println!("Seeding completed successfully!");
    Ok(())
}
