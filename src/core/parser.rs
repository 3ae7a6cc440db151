use crate::domain::model::ChatRow;
use crate::utils::error::{AnalyzerError, Result};
use std::path::Path;

/// Upload ceiling for a single transcript: 10MB of source text.
pub const MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Source name used for transcripts pasted in rather than read from a file.
pub const PASTED_SOURCE_NAME: &str = "pasted-data.csv";

const CONVERSATION_ID_HEADER: &str = "ChatLogID";

/// Turns CSV transcript text into rows, mapping fields by header name.
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    max_input_bytes: usize,
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new(MAX_INPUT_BYTES)
    }
}

impl TranscriptParser {
    pub fn new(max_input_bytes: usize) -> Self {
        Self { max_input_bytes }
    }

    pub fn max_input_bytes(&self) -> usize {
        self.max_input_bytes
    }

    pub fn parse_str(&self, text: &str) -> Result<Vec<ChatRow>> {
        self.parse_bytes(text.as_bytes())
    }

    /// Parses the whole transcript or fails; no partial row list is returned.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Vec<ChatRow>> {
        if data.len() > self.max_input_bytes {
            return Err(AnalyzerError::InputTooLarge {
                size: data.len(),
                limit: self.max_input_bytes,
            });
        }

        if data.iter().all(u8::is_ascii_whitespace) {
            tracing::warn!("Transcript is empty, nothing to analyze");
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::None)
            .from_reader(data);

        let headers = reader.headers()?.clone();
        if !headers
            .iter()
            .any(|header| header == CONVERSATION_ID_HEADER)
        {
            return Err(AnalyzerError::ContractViolation {
                message: format!(
                    "header row has no {} column (found: {})",
                    CONVERSATION_ID_HEADER,
                    headers.iter().collect::<Vec<_>>().join(", ")
                ),
            });
        }

        let mut rows = Vec::new();
        for record in reader.deserialize::<ChatRow>() {
            let row = record.map_err(|e| AnalyzerError::ParseError {
                line: e.position().map(|pos| pos.line()).unwrap_or(0),
                message: e.to_string(),
            })?;
            rows.push(row);
        }

        tracing::debug!("Parsed {} transcript rows", rows.len());
        Ok(rows)
    }
}

/// Rejects anything that is not a `.csv` file.
pub fn validate_source_name(path: &str) -> Result<()> {
    let is_csv = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        Ok(())
    } else {
        Err(AnalyzerError::UnsupportedFileType {
            path: path.to_string(),
        })
    }
}
