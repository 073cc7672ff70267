//! Command-line host for the résumé core.
//!
//! # Responsibility
//! - Drive `DocumentStore` against a SQLite slot database.
//! - Keep output deterministic so it can be scripted.
//!
//! Usage: `resume_cli [--db <path>] <show|list|export [path]|import <path>|sample|reset|theme [name]>`
//! Database path comes from `--db`, else `RESUME_DB_PATH`, else
//! `resume.sqlite3`; setting `RESUME_LOG_DIR` enables file logging.

use resume_core::db::open_db;
use resume_core::{
    default_log_level, init_logging, render, render_section_list, DocumentStore, SqliteSlotStore,
    StoreConfig, SystemClock,
};
use std::error::Error;
use std::process::ExitCode;

const DEFAULT_DB_PATH: &str = "resume.sqlite3";

fn main() -> ExitCode {
    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("RESUME_LOG_DIR") {
        init_logging(default_log_level(), &log_dir)?;
    }

    let (db_option, args) = split_db_option(args)?;
    let db_path = db_option
        .or_else(|| std::env::var("RESUME_DB_PATH").ok())
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
    let conn = open_db(&db_path)?;
    let mut store = DocumentStore::open(
        &StoreConfig::default(),
        SqliteSlotStore::new(&conn),
        SystemClock::new(),
    );

    let command = args.first().map(String::as_str).unwrap_or("show");
    match command {
        "show" => println!("{}", render(store.document()).to_html()),
        "list" => {
            for item in render_section_list(store.document()) {
                println!(
                    "{} {} | {}",
                    item.label,
                    item.title_html,
                    item.summary.unwrap_or_default()
                );
            }
        }
        "export" => {
            let artifact = store.export_json();
            let path = args.get(1).map(String::as_str).unwrap_or(artifact.file_name);
            std::fs::write(path, &artifact.contents)?;
            println!("exported {} ({})", path, artifact.mime_type);
        }
        "import" => {
            let path = args.get(1).ok_or("import requires a file path")?;
            let raw = std::fs::read_to_string(path)?;
            store
                .import_json(&raw)
                .map_err(|err| format!("import failed: {err}"))?;
            store.save_now()?;
            println!("imported {} sections", store.document().sections.len());
        }
        "sample" => {
            store.load_sample();
            store.save_now()?;
            println!("loaded sample resume");
        }
        "reset" => {
            store.reset_document()?;
            println!("reset to blank resume");
        }
        "theme" => match args.get(1) {
            Some(name) => println!("{}", store.set_theme_preference(name).as_str()),
            None => println!("{}", store.theme_preference().as_str()),
        },
        other => return Err(format!("unknown command `{other}`").into()),
    }
    Ok(())
}

/// Strips a leading `--db <path>` pair from the arguments.
fn split_db_option(mut args: Vec<String>) -> Result<(Option<String>, Vec<String>), String> {
    if args.first().map(String::as_str) != Some("--db") {
        return Ok((None, args));
    }
    if args.len() < 2 {
        return Err("--db requires a path".to_string());
    }
    let rest = args.split_off(2);
    Ok((args.pop(), rest))
}
