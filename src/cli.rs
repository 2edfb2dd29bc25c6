use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Map spreadsheet rows into validated records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Map a workbook against a schema file and emit records as JSON lines
    Map(MapArgs),
    /// Write a starter schema file to edit by hand
    Template(TemplateArgs),
}

#[derive(Debug, Args)]
pub struct MapArgs {
    /// Input workbook (.xlsx, .xlsb, .xls, .ods)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Schema file describing fields, aliases, datatypes, and required flags
    #[arg(short = 's', long = "schema")]
    pub schema: PathBuf,
    /// Output file for JSON lines (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Worksheet to map (first worksheet if omitted)
    #[arg(long)]
    pub sheet: Option<String>,
}

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Destination schema file path
    #[arg(short = 's', long = "schema")]
    pub schema: PathBuf,
}
