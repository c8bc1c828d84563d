pub mod classify;
pub mod cli;
pub mod data;
pub mod error;
pub mod export;
pub mod io_utils;
pub mod profile;
pub mod relation;
pub mod reshape;
pub mod schema;
pub mod stats;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands, SchemaArgs},
    relation::{LoadOptions, Relation},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_profile", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Schema(args) => handle_schema(&args),
        Commands::Profile(args) => profile::execute(&args),
    }
}

fn handle_schema(args: &SchemaArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let options = LoadOptions {
        delimiter,
        encoding,
        null_token: args.null_token.clone(),
        limit: args.limit,
    };
    let relation = Relation::load(&args.input, &options)
        .with_context(|| format!("Loading {:?}", args.input))?;
    let schema = relation.describe();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&schema)?);
    } else {
        let headers = vec!["column_name".to_string(), "column_type".to_string()];
        let rows = schema
            .iter()
            .map(|meta| vec![meta.name.clone(), meta.declared_type.clone()])
            .collect::<Vec<_>>();
        table::print_table(&headers, &rows);
    }
    info!(
        "Inferred schema for {} column(s) across {} row(s)",
        schema.len(),
        relation.row_count()
    );
    Ok(())
}
