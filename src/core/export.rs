use crate::domain::model::{AnalysisReport, AnalysisResult, OutputFormat};
use crate::utils::error::{AnalyzerError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const DEFAULT_ZIP_FILENAME: &str = "chat-analysis.zip";

const CHART_LABEL_LIMIT: usize = 30;

/// Full report, raw rows included.
pub fn to_json(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Two-column `Category,Value` summary, one row per metric or ranked entry.
pub fn to_summary_csv(result: &AnalysisResult) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let sentiment = result.sentiment();
    writer.write_record(["Category", "Value"])?;
    let metrics = [
        ("Total Conversations", result.conversation_count()),
        ("Total Messages", result.total_messages()),
        ("Positive Sentiment", sentiment.positive),
        ("Neutral Sentiment", sentiment.neutral),
        ("Negative Sentiment", sentiment.negative),
    ];
    for (label, value) in metrics {
        writer.write_record([label.to_string(), value.to_string()])?;
    }

    for entry in result.top_issues() {
        writer.write_record([format!("Issue: {}", entry.issue), entry.count.to_string()])?;
    }
    for entry in result.feature_requests() {
        writer.write_record([format!("Feature: {}", entry.feature), entry.count.to_string()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AnalyzerError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| AnalyzerError::ProcessingError {
        message: format!("summary CSV is not valid UTF-8: {}", e),
    })
}

/// Renders the report in each requested format as `(file name, contents)`.
pub fn render(report: &AnalysisReport, formats: &[OutputFormat]) -> Result<Vec<(String, Vec<u8>)>> {
    formats
        .iter()
        .map(|format| {
            let body = match format {
                OutputFormat::Json => to_json(report)?,
                OutputFormat::Csv => to_summary_csv(&report.analysis)?,
            };
            Ok((format.file_name().to_string(), body.into_bytes()))
        })
        .collect()
}

pub fn bundle_zip(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in files {
        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
        zip.write_all(data)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Shortens long feature fragments for chart axes.
pub fn chart_label(text: &str) -> String {
    if text.chars().count() > CHART_LABEL_LIMIT {
        let head: String = text.chars().take(CHART_LABEL_LIMIT).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::analyze;
    use crate::domain::model::ChatRow;
    use chrono::Utc;

    fn sample_report() -> AnalysisReport {
        let rows = vec![
            ChatRow::new("1", Some("visitor"), Some("This is broken and wrong")),
            ChatRow::new("1", Some("agent"), Some("Thanks for reporting")),
            ChatRow::new("2", Some("visitor"), Some("Could you add tags, folders?")),
        ];
        AnalysisReport {
            source_name: "chats.csv".to_string(),
            generated_at: Utc::now(),
            analysis: analyze(rows),
        }
    }

    #[test]
    fn test_summary_csv_layout() {
        let report = sample_report();
        let csv_text = to_summary_csv(&report.analysis).unwrap();
        let lines: Vec<&str> = csv_text.lines().collect();

        assert_eq!(lines[0], "Category,Value");
        assert_eq!(lines[1], "Total Conversations,2");
        assert_eq!(lines[2], "Total Messages,3");
        assert_eq!(lines[3], "Positive Sentiment,1");
        assert_eq!(lines[4], "Neutral Sentiment,2");
        assert_eq!(lines[5], "Negative Sentiment,0");
        assert_eq!(lines[6], "Issue: broken,1");
        assert_eq!(lines[7], "Issue: wrong,1");
        // the fragment contains a comma, so the cell is quoted
        assert_eq!(lines[8], "\"Feature: could you add tags, folders\",2");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_json_puts_result_fields_at_top_level() {
        let json = to_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["sourceName"], "chats.csv");
        assert!(value["generatedAt"].is_string());
        assert!(value.get("analysis").is_none());
        assert_eq!(value["conversationCount"], 2);
        assert_eq!(value["totalMessages"], 3);
        assert_eq!(value["messagesByUserType"]["visitor"], 2);
        assert_eq!(value["topIssues"][0]["issue"], "broken");
        assert_eq!(value["featureRequests"][0]["count"], 2);
        assert_eq!(value["sentiment"]["positive"], 1);
        assert_eq!(value["rawData"][1]["UserType"], "agent");
        assert!(json.find("\"visitor\"").unwrap() < json.find("\"agent\"").unwrap());
    }

    #[test]
    fn test_bundle_zip_contains_rendered_files() {
        let files = render(&sample_report(), &OutputFormat::ALL).unwrap();
        let zip_bytes = bundle_zip(&files).unwrap();

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_bytes)).unwrap();
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["chat-analysis.csv", "chat-analysis.json"]);
    }

    #[test]
    fn test_chart_label_truncates() {
        assert_eq!(chart_label("short"), "short");
        let long = "i would like an export feature for reports";
        assert_eq!(chart_label(long), "i would like an export feature...");
    }
}
