//! Export the full videos table to CSV, newest first. The output uses the
//! same headers the import job reads, so an export can be re-imported.
//!
//! Usage: export_csv [file.csv]   (default: exported-videos.csv)

use std::collections::BTreeMap;

use sqlx::postgres::PgPoolOptions;

use blueprint::domain::videos;

const HEADERS: [&str; 13] = [
    "platform",
    "title",
    "user",
    "views",
    "likes",
    "category",
    "focus",
    "mood",
    "sponsoredContent",
    "rating",
    "url",
    "instaEmbed",
    "tiktokEmbed",
];

#[tokio::main]
async fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "exported-videos.csv".to_string());

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let all = videos::list_all_newest(&pool)
        .await
        .expect("Failed to fetch videos");

    let mut writer = match csv::Writer::from_path(&path) {
        Ok(writer) => writer,
        Err(e) => {
            eprintln!("Failed to create {}: {}", path, e);
            std::process::exit(1);
        }
    };

    writer.write_record(HEADERS).expect("Failed to write header");

    let mut by_platform: BTreeMap<&'static str, usize> = BTreeMap::new();
    for video in &all {
        let views = video.views.to_string();
        let likes = video.likes.map(|l| l.to_string()).unwrap_or_default();
        let rating = video.rating.to_string();
        let sponsored = video
            .sponsored_content
            .map(|s| s.as_str())
            .unwrap_or("None");

        writer
            .write_record([
                video.platform.as_str(),
                &video.title,
                &video.user,
                &views,
                &likes,
                video.category.as_str(),
                video.focus.as_str(),
                video.mood.as_str(),
                sponsored,
                &rating,
                &video.url,
                &video.insta_embed,
                &video.tiktok_embed,
            ])
            .expect("Failed to write record");

        *by_platform.entry(video.platform.as_str()).or_default() += 1;
    }

    writer.flush().expect("Failed to flush output");

    println!("[export] wrote {} videos to {}", all.len(), path);
    for (platform, count) in &by_platform {
        println!("[export]   {platform}: {count}");
    }
}
