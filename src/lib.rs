pub mod alias;
pub mod cell;
pub mod cli;
pub mod decode;
pub mod dynamic;
pub mod engine;
pub mod error;
pub mod header;
pub mod schema;
pub mod workbook;

use std::{
    env,
    fs::File,
    io::{self, BufWriter, Write},
    sync::OnceLock,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Commands};
use crate::engine::MappingEngine;
use crate::schema::SchemaDoc;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sheet_mapped", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Map(args) => handle_map(&args),
        Commands::Template(args) => handle_template(&args),
    }
}

fn handle_map(args: &cli::MapArgs) -> Result<()> {
    let doc = SchemaDoc::load(&args.schema)
        .with_context(|| format!("Loading schema from {:?}", args.schema))?;
    let rows = workbook::load_rows(&args.input, args.sheet.as_deref())
        .with_context(|| format!("Decoding workbook {:?}", args.input))?;
    info!(
        "Mapping '{}' against {} schema field(s)",
        args.input.display(),
        doc.fields.len()
    );

    let schema = doc.bind();
    let engine = MappingEngine::new(&schema);
    let (records, report) = engine.run_with_factory(rows, doc.record_factory());

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Creating output file {path:?}"))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    for record in &records {
        serde_json::to_writer(&mut out, record).context("Serializing record to JSON")?;
        writeln!(out)?;
    }
    out.flush()?;

    info!(
        "Kept {} record(s) out of {} row(s) scanned ({} dropped by validation, {} cell coercion failure(s))",
        report.records_kept(),
        report.rows_scanned(),
        report.validation_failures(),
        report.coercion_failures()
    );
    Ok(())
}

fn handle_template(args: &cli::TemplateArgs) -> Result<()> {
    SchemaDoc::template()
        .save(&args.schema)
        .with_context(|| format!("Writing schema template to {:?}", args.schema))?;
    info!("Schema template written to {:?}", args.schema);
    Ok(())
}
