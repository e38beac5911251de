use clap::Parser;

/// Aggregates per-year score voting tables and reports each voter's
/// favourite contestants.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file describing the corpus and the report
    /// options. Command line flags take precedence over the values found in the file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory path, default 'data') The directory holding one tab-separated table per year.
    /// Setting this option overrides the directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub data: Option<String>,

    /// (list of year identifiers or not specified) If specified, only the tables whose file stem
    /// matches one of the given years are read.
    #[clap(short, long, value_parser)]
    pub years: Option<Vec<String>>,

    /// (default 0) The minimum score for an individual vote to be retained.
    #[clap(long, value_parser)]
    pub min_vote: Option<u32>,

    /// (optional) The maximum number of contestants reported per voter.
    #[clap(short, long, value_parser)]
    pub limit: Option<usize>,

    /// (default 0) The minimum average score for a (voter, contestant) pair to be reported.
    #[clap(long, value_parser)]
    pub minimum_average: Option<f64>,

    /// (text, json or dot, default text) The report format.
    #[clap(short, long, value_parser)]
    pub format: Option<String>,

    /// (file path, 'stdout' or empty) Where the report is written.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, votemap will check that the
    /// computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
