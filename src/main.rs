use std::fs;
use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use costmatch::columns::{RoleMatch, SynonymCatalog, propose_article_column, propose_value_column};
use costmatch::io::{excel_read, excel_write, paste};
use costmatch::model::CostMapping;
use costmatch::pipeline::{self, MatchOptions};
use costmatch::{MatchError, Result};
use tracing_subscriber::EnvFilter;

/// Worksheet name used for Excel output.
const RESULT_SHEET: &str = "Result";

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    match cli.command {
        Command::Match(args) => execute_match(args),
        Command::Columns(args) => execute_columns(args),
    }
}

fn execute_match(args: MatchArgs) -> Result<()> {
    if !args.cost.exists() {
        return Err(MatchError::MissingInput(args.cost));
    }

    let options = args.to_options();
    let result = match (&args.sap, &args.paste) {
        (Some(sap_path), None) => {
            if !sap_path.exists() {
                return Err(MatchError::MissingInput(sap_path.clone()));
            }
            pipeline::match_files(&args.cost, sap_path, &options)?
        }
        (None, Some(paste_path)) => {
            if !paste_path.exists() {
                return Err(MatchError::MissingInput(paste_path.clone()));
            }
            let text = fs::read_to_string(paste_path)?;
            pipeline::match_with_paste(&args.cost, &text, &options)?
        }
        // clap's argument group guarantees exactly one source is present.
        _ => unreachable!("argument group enforces a single SAP source"),
    };

    match args.to {
        OutputFormat::Xlsx => excel_write::write_table(&args.output, RESULT_SHEET, &result)?,
        OutputFormat::Tsv => {
            let text = if args.values_only {
                let value_column = result.columns.last().cloned().unwrap_or_default();
                paste::render_column(&result, &value_column)?
            } else {
                paste::render_table(&result)
            };
            fs::write(&args.output, text)?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            fs::write(&args.output, json)?;
        }
    }

    println!(
        "{} rows written to {}",
        result.rows.len(),
        args.output.display()
    );
    Ok(())
}

fn execute_columns(args: ColumnsArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(MatchError::MissingInput(args.input));
    }

    let headers = excel_read::read_headers(&args.input, args.sheet.as_deref())?;
    let catalog = SynonymCatalog::default();

    println!("headers:");
    for header in &headers {
        println!("  {header}");
    }
    print_proposal("article column", propose_article_column(&headers, &catalog));
    print_proposal("value column", propose_value_column(&headers, &catalog));
    Ok(())
}

fn print_proposal(role: &str, proposal: RoleMatch) {
    match proposal {
        RoleMatch::Resolved(column) => println!("{role}: {column}"),
        RoleMatch::Ambiguous(candidates) => {
            println!("{role}: ambiguous ({})", candidates.join(", "));
        }
        RoleMatch::NoMatch => println!("{role}: no proposal"),
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|error| MatchError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Match SAP article exports against a manufacturing cost reference."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Match a SAP export against a cost workbook and write the result.
    Match(MatchArgs),
    /// Show a workbook's headers and the proposed column mapping.
    Columns(ColumnsArgs),
}

#[derive(clap::Args)]
#[command(group(
    ArgGroup::new("sap_source")
        .required(true)
        .args(["sap", "paste"]),
))]
struct MatchArgs {
    /// Cost reference workbook (.xlsx).
    #[arg(long)]
    cost: PathBuf,

    /// SAP export workbook (.xlsx).
    #[arg(long)]
    sap: Option<PathBuf>,

    /// Tab-separated text file with pasted SAP data.
    #[arg(long)]
    paste: Option<PathBuf>,

    /// Output file path.
    #[arg(long)]
    output: PathBuf,

    /// Output representation.
    #[arg(long, value_enum, default_value_t = OutputFormat::Xlsx)]
    to: OutputFormat,

    /// Worksheet to read from the cost workbook; first sheet when omitted.
    #[arg(long)]
    cost_sheet: Option<String>,

    /// Article-code column in the cost workbook.
    #[arg(long, requires = "cost_value_column")]
    cost_article_column: Option<String>,

    /// Cost-value column in the cost workbook.
    #[arg(long, requires = "cost_article_column")]
    cost_value_column: Option<String>,

    /// Article-code column in the SAP data.
    #[arg(long)]
    sap_article_column: Option<String>,

    /// Value attached to SAP rows without a cost match.
    #[arg(long, default_value_t = 0.0)]
    default_value: f64,

    /// With --to tsv, write only the matched cost values, one per line.
    #[arg(long)]
    values_only: bool,
}

impl MatchArgs {
    fn to_options(&self) -> MatchOptions {
        let cost_mapping = match (&self.cost_article_column, &self.cost_value_column) {
            (Some(article), Some(value)) => Some(CostMapping::new(article, value)),
            _ => None,
        };
        MatchOptions {
            cost_sheet: self.cost_sheet.clone(),
            cost_mapping,
            sap_article_column: self.sap_article_column.clone(),
            default_value: self.default_value,
            catalog: SynonymCatalog::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Xlsx,
    Tsv,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Xlsx => write!(f, "xlsx"),
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(clap::Args)]
struct ColumnsArgs {
    /// Workbook to inspect (.xlsx).
    #[arg(long)]
    input: PathBuf,

    /// Worksheet to read; first sheet when omitted.
    #[arg(long)]
    sheet: Option<String>,
}
