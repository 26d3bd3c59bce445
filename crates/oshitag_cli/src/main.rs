//! CLI shell over the oshiTag core.
//!
//! # Responsibility
//! - Offer show/export/import access to a JSON store document from the
//!   terminal, independent of any UI runtime.
//! - Keep output deterministic for quick local sanity checks.

use oshitag_core::{CollectionService, JsonFileStore};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_STORE_FILE: &str = "oshitag.json";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = match args.first().map(String::as_str) {
        None => {
            println!("oshitag_core version={}", oshitag_core::core_version());
            println!("usage: oshitag_cli <show|export|import> [args]");
            Ok(())
        }
        Some("show") => show(store_path(args.get(1))),
        Some("export") => export(store_path(args.get(1))),
        Some("import") => match args.get(1) {
            Some(md_path) => import(PathBuf::from(md_path), store_path(args.get(2))),
            None => Err("usage: oshitag_cli import <file.md> [store.json]".to_string()),
        },
        Some(other) => Err(format!("unknown command `{other}`")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn store_path(arg: Option<&String>) -> PathBuf {
    arg.map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
}

fn open_service(path: PathBuf) -> Result<CollectionService<JsonFileStore>, String> {
    CollectionService::new(JsonFileStore::new(path)).map_err(|err| err.to_string())
}

fn show(path: PathBuf) -> Result<(), String> {
    let service = open_service(path)?;
    let collection = service.collection();
    for group in &collection.groups {
        println!("# {} ({} idols)", group.name, group.idols.len());
        for idol in &group.idols {
            println!("  - {} [{}] {} tags", idol.name, idol.cheer_color, idol.tags.len());
        }
    }
    println!("favorites: {} folders", collection.favorites.len());
    for folder in &collection.favorites {
        println!("  - {} ({} tags)", folder.name, folder.tags.len());
    }
    Ok(())
}

fn export(path: PathBuf) -> Result<(), String> {
    let service = open_service(path)?;
    print!("{}", service.export_markdown());
    Ok(())
}

fn import(md_path: PathBuf, store: PathBuf) -> Result<(), String> {
    let text = std::fs::read_to_string(&md_path)
        .map_err(|err| format!("cannot read `{}`: {err}", md_path.display()))?;
    let mut service = open_service(store)?;
    service
        .import_markdown(&text)
        .map_err(|err| err.to_string())?;
    let collection = service.collection();
    println!(
        "imported {} groups, {} favorite folders",
        collection.groups.len(),
        collection.favorites.len()
    );
    Ok(())
}
