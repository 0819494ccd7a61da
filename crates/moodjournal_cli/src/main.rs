//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `moodjournal_core` linkage.
//! - With `--db <path>`, open a journal store, seed it and print its stats.

use moodjournal_core::db::open_db;
use moodjournal_core::{EntryService, SqliteEntryRepository, SqliteTagRepository, TagService};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("moodjournal_core ping={}", moodjournal_core::ping());
    println!("moodjournal_core version={}", moodjournal_core::core_version());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let db_path = match parse_db_arg(&args) {
        Ok(Some(path)) => path,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("usage: moodjournal_cli [--db <path>]");
            return ExitCode::from(2);
        }
    };

    match print_store_summary(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_db_arg(args: &[String]) -> Result<Option<String>, String> {
    match args {
        [] => Ok(None),
        [flag, path] if flag == "--db" && !path.trim().is_empty() => Ok(Some(path.clone())),
        [flag] if flag == "--db" => Err("--db requires a path".to_string()),
        [other, ..] => Err(format!("unexpected argument `{other}`")),
    }
}

fn print_store_summary(db_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;

    let seed = TagService::new(SqliteTagRepository::try_new(&conn)?).seed_predefined_catalog()?;
    println!(
        "catalog already_seeded={} categories_created={} tags_created={}",
        seed.already_seeded, seed.categories_created, seed.tags_created
    );

    let service = EntryService::new(
        SqliteEntryRepository::try_new(&conn)?,
        SqliteTagRepository::try_new(&conn)?,
    );
    let stats = service.stats(&chrono::Local::now())?;
    println!("entries total={} this_week={}", stats.total_entries, stats.entries_this_week);
    println!("average_mood={}", stats.average_mood_text());
    for share in &stats.distribution {
        println!(
            "{} {:<9} count={} percentage={:.1}",
            share.mood.emoji(),
            share.mood.display_name(),
            share.count,
            share.percentage
        );
    }
    Ok(())
}
