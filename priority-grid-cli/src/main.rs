//! Command-line harness for the priority grid.
//!
//! Loads an OData collection payload, replays a sequence of user gestures
//! against the grid, prints what the grid renders and the priority writes it
//! issues, then applies those writes to an in-memory copy of the dataset.

mod gesture;

use std::fs;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::info;
use priority_grid::error::SnapshotError;
use priority_grid::model::Column;
use priority_grid::persist::InMemoryStore;
use priority_grid::source::DatasetSnapshot;
use priority_grid::view::SortIndicator;
use priority_grid::{DragHandler, GridConfig, PriorityControl, RenderOutput};
use simplelog::{Config, LevelFilter, WriteLogger};
use thiserror::Error;

use gesture::Gesture;

#[derive(Debug, Parser)]
#[command(name = "priority-grid", about = "Replay reorder, sort and search gestures on a dataset")]
struct Args {
    /// OData collection response (`{"value": [...]}`) to load.
    dataset: PathBuf,

    /// Entity set the records are written back to.
    #[arg(long, default_value = "tasks")]
    entity_set: String,

    /// Primary key attribute holding each record's id.
    #[arg(long, default_value = "taskid")]
    primary_key: String,

    /// Column to show, as `key` or `key=Display Name`. Repeatable.
    #[arg(long = "column", value_parser = parse_column, required = true)]
    columns: Vec<Column>,

    /// Gesture to replay: `sort:<column>`, `search:<text>` or `move:<from>:<to>`.
    #[arg(long = "gesture", short = 'g')]
    gestures: Vec<Gesture>,

    /// JSON grid configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file.
    #[arg(long, default_value = "priority-grid.log")]
    log_file: PathBuf,

    /// Log level.
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

fn parse_column(raw: &str) -> Result<Column, String> {
    match raw.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("column '{raw}' has an empty key")),
        Some((key, name)) => Ok(Column::new(key, name)),
        None if raw.is_empty() => Err("column key cannot be empty".to_string()),
        None => Ok(Column::new(raw, raw)),
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn format_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn print_grid(output: &RenderOutput) {
    let headers: Vec<String> = output
        .columns
        .iter()
        .map(|column| match column.sort {
            SortIndicator::None => column.display_name.clone(),
            SortIndicator::Ascending => format!("{} ▲", column.display_name),
            SortIndicator::Descending => format!("{} ▼", column.display_name),
        })
        .collect();

    let widths: Vec<usize> = output
        .columns
        .iter()
        .zip(&headers)
        .map(|(column, header)| {
            output
                .rows
                .iter()
                .map(|row| row.field(&column.key).chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let header_cells: Vec<&str> = headers.iter().map(String::as_str).collect();
    println!("   {}", format_line(&header_cells, &widths));
    for (index, row) in output.rows.iter().enumerate() {
        let cells: Vec<&str> = output
            .columns
            .iter()
            .map(|column| row.field(&column.key))
            .collect();
        println!("{index:>2} {}", format_line(&cells, &widths));
    }
    if !output.reorder_enabled {
        println!("   (reordering disabled while filtered)");
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let log_file = File::create(&args.log_file).map_err(|source| CliError::Io {
        path: args.log_file.clone(),
        source,
    })?;
    WriteLogger::init(args.log_level, Config::default(), log_file)?;

    let config = match &args.config {
        Some(path) => serde_json::from_str::<GridConfig>(&read(path)?)?,
        None => GridConfig::default(),
    };
    info!("Using {:?}", config);

    let snapshot = DatasetSnapshot::from_odata(&read(&args.dataset)?, &args.entity_set, &args.primary_key)?
        .with_columns(args.columns)
        .with_version(1);
    let store = Arc::new(InMemoryStore::from_snapshot(&args.entity_set, snapshot));
    let mut control = PriorityControl::new(config, store.clone());

    println!("== initial");
    print_grid(&control.on_init(&store.snapshot()));

    for gesture in args.gestures {
        println!("\n== {gesture}");
        match gesture {
            Gesture::Sort(column) => print_grid(&control.on_column_click(&column)),
            Gesture::Search(text) => print_grid(&control.on_search(&text)),
            Gesture::Move { from, to } => {
                let summary = control.on_drag_end(from, to).settle().await;
                print_grid(&control.render());
                println!("   {} priority writes applied", summary.succeeded);
                for (reference, error) in &summary.failed {
                    println!("   write to {reference} failed: {error}");
                }
            }
        }
    }

    println!("\n== after refresh (version {})", store.version());
    print_grid(&control.on_dataset_updated(&store.snapshot()));
    control.on_destroy();
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column() {
        assert_eq!(parse_column("name").unwrap(), Column::new("name", "name"));
        assert_eq!(
            parse_column("sort_order=Priority Order").unwrap(),
            Column::new("sort_order", "Priority Order")
        );
        assert!(parse_column("=Name").is_err());
        assert!(parse_column("").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "priority-grid",
            "tasks.json",
            "--column",
            "name=Name",
            "-g",
            "sort:name",
            "-g",
            "move:0:2",
        ])
        .unwrap();

        assert_eq!(args.columns.len(), 1);
        assert_eq!(
            args.gestures,
            vec![
                Gesture::Sort("name".to_string()),
                Gesture::Move { from: 0, to: Some(2) }
            ]
        );
        assert_eq!(args.log_level, LevelFilter::Debug);
    }
}
