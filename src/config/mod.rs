pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::parser::MAX_INPUT_BYTES;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::OutputFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "chat-analyzer")]
#[command(about = "Heuristic analytics for chat transcript CSV exports")]
pub struct CliConfig {
    /// Transcript CSV file, or `-` to read pasted CSV text from stdin
    #[arg(long, short)]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_values = ["json", "csv"])]
    pub formats: Vec<String>,

    /// Bundle the exports into chat-analysis.zip
    #[arg(long)]
    pub zip: bool,

    #[arg(long, default_value_t = MAX_INPUT_BYTES)]
    pub max_input_bytes: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> Vec<OutputFormat> {
        self.formats
            .iter()
            .filter_map(|format| format.parse().ok())
            .collect()
    }

    fn zip_filename(&self) -> Option<&str> {
        self.zip.then_some(crate::core::export::DEFAULT_ZIP_FILENAME)
    }

    fn max_input_bytes(&self) -> usize {
        self.max_input_bytes
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;
        validation::validate_range("max_input_bytes", self.max_input_bytes, 1, MAX_INPUT_BYTES)?;
        Ok(())
    }
}
