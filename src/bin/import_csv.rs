//! Import a CSV export into the videos table.
//!
//! Usage: import_csv <file.csv>

use sqlx::postgres::PgPoolOptions;

use blueprint::ingest::ImportSummary;
use blueprint::ingest::normalize::RawRecord;

#[tokio::main]
async fn main() {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: import_csv <file.csv>");
        std::process::exit(1);
    };

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let mut reader = match csv::Reader::from_path(&path) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("Failed to open {}: {}", path, e);
            std::process::exit(1);
        }
    };

    println!("[import] reading {}", path);
    let mut summary = ImportSummary::default();
    for (index, result) in reader.deserialize::<RawRecord>().enumerate() {
        // +2: one for the header line, one for zero-based indexing
        let row = index + 2;
        match result {
            Ok(record) => summary.upsert_record(&pool, &record, row).await,
            Err(e) => {
                eprintln!("[import] row {row} unreadable: {e}");
                summary.record_skipped();
            }
        }
    }

    summary.print();
}
