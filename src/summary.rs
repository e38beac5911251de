use log::{debug, info};

use score_voting::*;
use snafu::{prelude::*, Snafu};

use std::path::Path;

use crate::args::Args;

pub mod config_reader;
pub mod io_table;
pub mod render;

use crate::summary::config_reader::SummaryConfig;

#[derive(Debug, Snafu)]
pub enum SummaryError {
    #[snafu(display("Error reading table file {path}: {source}"))]
    OpeningTable {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing table file {path}: {source}"))]
    CsvTable { source: csv::Error, path: String },
    #[snafu(display("Invalid vote table {path}: {source}"))]
    TableFormat {
        source: score_voting::ParseError,
        path: String,
    },
    #[snafu(display("Error listing data directory {path}: {source}"))]
    ListingData {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No vote tables found in {path}"))]
    EmptyDataDir { path: String },
    #[snafu(display("Error opening {path}: {source}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing output {path}: {source}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SummaryResult<T> = Result<T, SummaryError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
    Dot,
}

impl OutputFormat {
    fn from_name(name: &str) -> SummaryResult<OutputFormat> {
        match name {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "dot" => Ok(OutputFormat::Dot),
            _ => whatever!("Unknown output format: {}", name),
        }
    }
}

/// The fully resolved options for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub data_dir: String,
    pub years: Option<Vec<String>>,
    pub rules: ReportRules,
    pub format: OutputFormat,
    pub out: Option<String>,
    pub reference: Option<String>,
    pub title: String,
}

/// Merges the command line flags with the configuration file, flags winning.
/// The data directory of the configuration file is taken relative to the
/// file itself.
fn resolve_settings(args: &Args) -> SummaryResult<RunSettings> {
    let (config, config_dir) = match &args.config {
        Some(path) => {
            let parent = Path::new(path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (config_reader::read_config(path)?, parent)
        }
        None => (SummaryConfig::default(), Default::default()),
    };

    let data_dir = match (&args.data, &config.data_directory) {
        (Some(dir), _) => dir.clone(),
        (None, Some(dir)) => config_dir.join(dir).display().to_string(),
        (None, None) => "data".to_string(),
    };

    let rules = ReportRules {
        min_vote: args
            .min_vote
            .or(config.min_vote)
            .unwrap_or(ReportRules::DEFAULT_RULES.min_vote),
        limit: args.limit.or(config.limit),
        minimum_average: args
            .minimum_average
            .or(config.minimum_average)
            .unwrap_or(ReportRules::DEFAULT_RULES.minimum_average),
    };

    let format = match args.format.as_deref().or(config.output_format.as_deref()) {
        Some(name) => OutputFormat::from_name(name)?,
        None => OutputFormat::Text,
    };

    Ok(RunSettings {
        data_dir,
        years: args.years.clone().or_else(|| config.years.clone()),
        rules,
        format,
        out: args.out.clone(),
        reference: args.reference.clone(),
        title: config
            .title
            .clone()
            .unwrap_or_else(|| "Voting summary".to_string()),
    })
}

pub fn run_summary(args: &Args) -> SummaryResult<()> {
    let settings = resolve_settings(args)?;
    debug!("run_summary: settings: {:?}", settings);

    let mut store = VoteStore::new();
    for path in io_table::list_tables(&settings.data_dir, &settings.years)? {
        let raw = io_table::read_table(&path)?;
        let parsed = parse_table(&raw.header, &raw.rows, settings.rules.min_vote)
            .context(TableFormatSnafu { path: path.clone() })?;
        info!(
            "{}: {} rows, {} voter columns",
            path, parsed.stats.rows, parsed.stats.voter_columns
        );
        store.add_year(&io_table::year_id(&path), parsed.votes, parsed.voters);
    }

    let rows = build_summary(&store, &settings.rules);
    info!("run_summary: {} summary rows", rows.len());

    let summary = render::summary_json(&rows, &settings.rules, &settings.title);
    let report = match settings.format {
        OutputFormat::Text => render::render_text(&rows),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?
        }
        OutputFormat::Dot => render::render_dot(&rows, &settings.title),
    };
    render::write_report(&report, &settings.out)?;

    if let Some(reference) = &settings.reference {
        render::check_reference(reference, &summary)?;
    }
    Ok(())
}
