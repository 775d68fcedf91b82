use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use table_cli::config::config::Config;
use table_cli::data::csv_bridge::{CsvBridge, ImportOptions};
use table_cli::state::events::StoreAction;
use table_cli::state::storage::{FileStorage, KeyValueStorage};
use table_cli::state::store::{ActionLogSubscriber, Store};
use table_cli::ui::grid_view::{GridView, NUMERIC_FIELD};
use table_cli::ui::table_app::{run_tui, TableApp};
use table_cli::ui::theme::ThemePreference;
use table_cli::utils::app_paths::AppPaths;

mod table_display;

use table_display::display_rows;

fn print_help() {
    println!("{}", "table-cli - Browse, edit and share a table".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  table-cli [OPTIONS]");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}            - Print the table and exit", "--print".green());
    println!("  {}    - Replace all rows from a CSV file", "--import FILE".green());
    println!("  {}    - Write visible columns to a CSV file", "--export FILE".green());
    println!("  {}            - Forget saved rows and columns", "--reset".green());
    println!(
        "  {}  - Write a commented default config file",
        "--generate-config".green()
    );
    println!("  {}             - Show this help", "--help".green());
    println!();
    println!("Without options the interactive table opens. Press F1 inside for keys.");
}

/// Value following a flag, e.g. the FILE in `--import FILE`
fn flag_value(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .map(PathBuf::from)
}

fn open_storage(config: &Config) -> Result<Rc<dyn KeyValueStorage>> {
    let dir = match &config.behavior.storage_dir {
        Some(dir) => dir.clone(),
        None => AppPaths::storage_dir()?,
    };
    Ok(Rc::new(FileStorage::new(dir)))
}

fn generate_config() -> Result<()> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating config directory {}", parent.display()))?;
    }
    std::fs::write(&path, Config::create_default_with_comments())
        .with_context(|| format!("Error writing config file {}", path.display()))?;
    println!("Configuration file created at: {:?}", path);
    println!("Edit this file to customize table-cli.");
    Ok(())
}

fn import(store: &mut Store, config: &Config, path: &Path) -> Result<()> {
    let options = if config.behavior.strict_import {
        ImportOptions::strict(
            config.behavior.required_columns.clone(),
            vec![NUMERIC_FIELD.to_string()],
        )
    } else {
        ImportOptions::default()
    };
    let rows = CsvBridge::import_file(path, &options)?;
    let count = rows.len();
    store.dispatch(StoreAction::SetRows(rows));
    println!("{}", format!("Imported {} rows from {}", count, path.display()).green());
    Ok(())
}

fn export(store: &Store, path: &Path) -> Result<()> {
    let count = CsvBridge::export_file(store.rows(), store.visible_columns(), path)?;
    println!("{}", format!("Exported {} rows to {}", count, path.display()).green());
    Ok(())
}

fn print_table(store: &Store) {
    let mut grid = GridView::new(store);
    let rows = grid.filtered_rows(store);
    display_rows(&rows, grid.column_order());
}

fn run(args: &[String]) -> Result<()> {
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--generate-config") {
        return generate_config();
    }

    let config = Config::load_or_default();
    let storage = open_storage(&config)?;

    if args.iter().any(|a| a == "--reset") {
        Store::clear_persisted(storage.as_ref())?;
        println!("Saved table cleared; the sample data loads on next start.");
        return Ok(());
    }

    let mut store = Store::load(storage.clone());

    if let Some(path) = flag_value(args, "--import") {
        return import(&mut store, &config, &path);
    }
    if let Some(path) = flag_value(args, "--export") {
        return export(&store, &path);
    }
    if args.iter().any(|a| a == "--print") {
        print_table(&store);
        return Ok(());
    }

    store.subscribe(Box::new(ActionLogSubscriber));
    let theme = ThemePreference::load(storage, config.theme.default_mode);
    let app = TableApp::new(
        store,
        theme,
        config,
        table_cli::utils::logging::get_log_buffer(),
    );
    run_tui(app)
}

fn main() {
    // Initialize unified logging (tracing + dual logging)
    table_cli::utils::logging::init_tracing_with_dual_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}
