//! Import a JSON export into the videos table. Accepts either an array of
//! records or a single record object.
//!
//! Usage: import_json <file.json>

use sqlx::postgres::PgPoolOptions;

use blueprint::ingest::ImportSummary;
use blueprint::ingest::normalize::RawRecord;

#[tokio::main]
async fn main() {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: import_json <file.json>");
        std::process::exit(1);
    };

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to open {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Failed to parse {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let records = match value {
        serde_json::Value::Array(items) => items,
        single => vec![single],
    };

    println!("[import] reading {} ({} records)", path, records.len());
    let mut summary = ImportSummary::default();
    for (index, item) in records.iter().enumerate() {
        let record = RawRecord::from_json(item);
        summary.upsert_record(&pool, &record, index + 1).await;
    }

    summary.print();
}
