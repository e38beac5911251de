use log::debug;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use std::fs;

use crate::summary::{OpeningJsonSnafu, ParsingJsonSnafu, SummaryResult};

/// The JSON description of a corpus and its report options.
///
/// Every field is optional; command line flags take precedence over the
/// values found here.
#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// The directory holding the per-year tables, relative to this file.
    #[serde(rename = "dataDirectory")]
    pub data_directory: Option<String>,
    #[serde(rename = "years")]
    pub years: Option<Vec<String>>,
    #[serde(rename = "minVote")]
    pub min_vote: Option<u32>,
    #[serde(rename = "limit")]
    pub limit: Option<usize>,
    #[serde(rename = "minimumAverage")]
    pub minimum_average: Option<f64>,
    #[serde(rename = "outputFormat")]
    pub output_format: Option<String>,
    #[serde(rename = "title")]
    pub title: Option<String>,
}

pub fn read_config(path: &str) -> SummaryResult<SummaryConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: SummaryConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}
