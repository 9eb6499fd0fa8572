//! Output formatters: console, JSON, CSV, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::{RelevanceError, Result};
use crate::output::report::{EvaluationReport, ResumeRecord};
use crate::processing::scorer::Verdict;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Column headers of the exported table
pub const CSV_HEADERS: [&str; 5] = ["Resume", "Score (%)", "Verdict", "Matched Skills", "Missing Skills"];

/// Trait for formatting evaluation reports
pub trait OutputFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colored verdicts
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    preview_chars: usize,
}

pub struct JsonFormatter {
    pretty: bool,
}

/// The tabular export, one row per resume in input order
pub struct CsvFormatter;

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
    include_preview: bool,
    preview_chars: usize,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    csv_formatter: CsvFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Relevance Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 1100px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        h1 { border-bottom: 3px solid #007acc; padding-bottom: 10px; }
        h2 { color: #007acc; }
        table { border-collapse: collapse; width: 100%; }
        th, td { border: 1px solid #dee2e6; padding: 8px; text-align: left; vertical-align: top; }
        th { background: #e9ecef; }
        .verdict { font-weight: bold; }
        .keywords { background: #f8f9fa; padding: 10px; border-left: 4px solid #007acc; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 20px; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <h1>Resume Relevance Report</h1>

        <h2>JD Keywords for Evaluation</h2>
        <p class="keywords">{{ keywords }}</p>

        {% if has_preview %}
        <h2>Job Description Preview</h2>
        <blockquote>{{ preview }}</blockquote>
        {% endif %}

        <h2>Summary Table</h2>
        <table>
            <thead>
                <tr><th>Resume</th><th>Score (%)</th><th>Verdict</th><th>Matched Skills</th><th>Missing Skills</th></tr>
            </thead>
            <tbody>
                {% for row in rows %}
                <tr>
                    <td>{{ row.resume }}</td>
                    <td>{{ row.score }}</td>
                    <td class="verdict" style="color: {{ row.verdict_color }}">{{ row.verdict }}</td>
                    <td>{{ row.matched }}</td>
                    <td>{{ row.missing }}</td>
                </tr>
                {% endfor %}
            </tbody>
        </table>

        <div class="metadata">
            <p><strong>High:</strong> {{ high }} | <strong>Medium:</strong> {{ medium }} | <strong>Low:</strong> {{ low }} | <strong>Average score:</strong> {{ average }}%</p>
            <p><strong>Job:</strong> {{ job_name }} | <strong>Generated:</strong> {{ generated_at }} | resume-relevance v{{ version }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    keywords: String,
    has_preview: bool,
    preview: String,
    rows: Vec<HtmlRow>,
    high: usize,
    medium: usize,
    low: usize,
    average: String,
    job_name: String,
    generated_at: String,
    version: String,
}

struct HtmlRow {
    resume: String,
    score: String,
    verdict: String,
    verdict_color: &'static str,
    matched: String,
    missing: String,
}

/// Skills list for display, `None` when empty
fn skills_or_none(skills: &[String]) -> String {
    if skills.is_empty() {
        "None".to_string()
    } else {
        skills.join(", ")
    }
}

/// Terminal colour for `Verdict::color_name`; colored has no named orange
fn verdict_color(verdict: Verdict) -> Color {
    match verdict.color_name() {
        "orange" => Color::TrueColor { r: 255, g: 165, b: 0 },
        name => Color::from(name),
    }
}

/// Scores keep at least one decimal, e.g. `80.0` and `66.67`
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        score.to_string()
    }
}

fn format_timestamp(report: &EvaluationReport) -> String {
    report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool, preview_chars: usize) -> Self {
        Self {
            use_colors,
            detailed,
            preview_chars,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_verdict(&self, verdict: Verdict) -> String {
        if self.use_colors {
            verdict.as_str().color(verdict_color(verdict)).bold().to_string()
        } else {
            verdict.as_str().to_string()
        }
    }

    fn format_record(&self, record: &ResumeRecord) -> String {
        let mut output = format!("📄 {}\n", record.resume);
        output.push_str(&format!(
            "Score: {}%  |  Verdict: {}\n",
            format_score(record.score),
            self.format_verdict(record.verdict)
        ));
        output.push_str(&format!("Matched Skills: {}\n", skills_or_none(&record.matched)));
        output.push_str(&format!("Missing Skills: {}\n", skills_or_none(&record.missing)));
        output
    }

    fn format_table(&self, report: &EvaluationReport) -> String {
        let name_width = report
            .records
            .iter()
            .map(|r| r.resume.chars().count())
            .chain(std::iter::once(CSV_HEADERS[0].len()))
            .max()
            .unwrap_or(0);
        let matched_width = report
            .records
            .iter()
            .map(|r| r.matched_skills().chars().count())
            .chain(std::iter::once(CSV_HEADERS[3].len()))
            .max()
            .unwrap_or(0);

        let mut output = format!(
            "{:<name_width$}  {:>9}  {:<7}  {:<matched_width$}  {}\n",
            CSV_HEADERS[0],
            CSV_HEADERS[1],
            CSV_HEADERS[2],
            CSV_HEADERS[3],
            CSV_HEADERS[4],
            name_width = name_width,
            matched_width = matched_width
        );

        for record in &report.records {
            // Pad before colouring so escape codes do not skew the columns
            let verdict = format!("{:<7}", record.verdict.as_str());
            let verdict = if self.use_colors {
                verdict.color(verdict_color(record.verdict)).to_string()
            } else {
                verdict
            };
            output.push_str(&format!(
                "{:<name_width$}  {:>9}  {}  {:<matched_width$}  {}\n",
                record.resume,
                format_score(record.score),
                verdict,
                record.matched_skills(),
                record.missing_skills(),
                name_width = name_width,
                matched_width = matched_width
            ));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME RELEVANCE REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms | Mode: {:?} (top {})\n",
            format_timestamp(report),
            report.metadata.processing_time_ms,
            report.metadata.extraction_mode,
            report.metadata.top_n
        ));

        output.push_str(&self.format_header("🔑 JD Keywords for Evaluation", 2));
        output.push_str(&format!("{}\n", skills_or_none(&report.job.keywords)));

        if self.detailed {
            output.push_str(&self.format_header("Job Description Preview", 3));
            output.push_str(&format!("{}\n", report.job.preview(self.preview_chars)));
        }

        output.push_str(&self.format_header("Resume Analysis", 2));
        for record in &report.records {
            output.push_str(&self.format_record(record));
            output.push('\n');
        }

        output.push_str(&self.format_header("Summary Table", 2));
        output.push_str(&self.format_table(report));

        let counts = report.verdict_counts();
        output.push_str(&format!(
            "\n{} High | {} Medium | {} Low | Average score: {:.2}%\n",
            self.colorize(&counts.high.to_string(), verdict_color(Verdict::High)),
            self.colorize(&counts.medium.to_string(), verdict_color(Verdict::Medium)),
            self.colorize(&counts.low.to_string(), verdict_color(Verdict::Low)),
            report.average_score()
        ));

        if let Some(best) = report.best_record() {
            output.push_str(&format!(
                "Top resume: {} ({}%)\n",
                self.colorize(&best.resume, Color::Cyan),
                format_score(best.score)
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl CsvFormatter {
    fn write_records<W: std::io::Write>(writer: &mut csv::Writer<W>, report: &EvaluationReport) -> Result<()> {
        writer.write_record(CSV_HEADERS)?;
        for record in &report.records {
            writer.write_record([
                record.resume.clone(),
                format_score(record.score),
                record.verdict.to_string(),
                record.matched_skills(),
                record.missing_skills(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        Self::write_records(&mut writer, report)?;

        let bytes = writer
            .into_inner()
            .map_err(|e| RelevanceError::OutputFormatting(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| RelevanceError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

/// Write the summary table to a CSV file
pub fn export_csv(report: &EvaluationReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    CsvFormatter::write_records(&mut writer, report)
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📊 Resume Relevance Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Job:** `{}` | **Mode:** {:?} (top {})\n\n",
                format_timestamp(report),
                report.job.name,
                report.metadata.extraction_mode,
                report.metadata.top_n
            ));
        }

        output.push_str("## 🔑 JD Keywords for Evaluation\n\n");
        output.push_str(&format!("{}\n\n", skills_or_none(&report.job.keywords)));

        output.push_str("## Summary Table\n\n");
        output.push_str(&format!("| {} |\n", CSV_HEADERS.join(" | ")));
        output.push_str("|--------|-----------|---------|----------------|----------------|\n");
        for record in &report.records {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::escape_cell(&record.resume),
                format_score(record.score),
                record.verdict,
                Self::escape_cell(&skills_or_none(&record.matched)),
                Self::escape_cell(&skills_or_none(&record.missing)),
            ));
        }

        let counts = report.verdict_counts();
        output.push_str(&format!(
            "\n**High:** {} | **Medium:** {} | **Low:** {} | **Average score:** {:.2}%\n",
            counts.high,
            counts.medium,
            counts.low,
            report.average_score()
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool, include_preview: bool, preview_chars: usize) -> Self {
        Self {
            include_styles,
            include_preview,
            preview_chars,
        }
    }

    fn create_template_data(&self, report: &EvaluationReport) -> HtmlTemplate {
        let rows = report
            .records
            .iter()
            .map(|record| HtmlRow {
                resume: record.resume.clone(),
                score: format_score(record.score),
                verdict: record.verdict.to_string(),
                verdict_color: record.verdict.color_name(),
                matched: skills_or_none(&record.matched),
                missing: skills_or_none(&record.missing),
            })
            .collect();

        let counts = report.verdict_counts();
        let preview = if self.include_preview {
            report.job.preview(self.preview_chars)
        } else {
            String::new()
        };

        HtmlTemplate {
            include_styles: self.include_styles,
            keywords: skills_or_none(&report.job.keywords),
            has_preview: !preview.is_empty(),
            preview,
            rows,
            high: counts.high,
            medium: counts.medium,
            low: counts.low,
            average: format!("{:.2}", report.average_score()),
            job_name: report.job.name.clone(),
            generated_at: format_timestamp(report),
            version: report.metadata.tool_version.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| RelevanceError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, 1000, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        preview_chars: usize,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed, preview_chars),
            json_formatter: JsonFormatter::new(pretty_json),
            csv_formatter: CsvFormatter,
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles, detailed, preview_chars),
        }
    }

    pub fn generate_report(&self, report: &EvaluationReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Csv => self.csv_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("resume_scores{}.txt", timestamp_suffix),
        OutputFormat::Json => format!("resume_scores{}.json", timestamp_suffix),
        OutputFormat::Csv => format!("resume_scores{}.csv", timestamp_suffix),
        OutputFormat::Markdown => format!("resume_scores{}.md", timestamp_suffix),
        OutputFormat::Html => format!("resume_scores{}.html", timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::tests::sample_report;

    #[test]
    fn test_csv_layout() {
        let csv = CsvFormatter.format_report(&sample_report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Resume,Score (%),Verdict,Matched Skills,Missing Skills");
        assert_eq!(lines[1], "alice.pdf,80.0,High,\"Python, SQL, Docker, AWS\",Go");
        assert_eq!(lines[2], "bob.pdf,60.0,Medium,\"Python, SQL, Go\",\"Docker, AWS\"");
        assert_eq!(lines[3], "carol.pdf,0.0,Low,,\"Python, SQL, Docker, AWS, Go\"");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_export_csv_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("resume_scores.csv");

        export_csv(&sample_report(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, CSV_HEADERS.to_vec());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][0], "bob.pdf");
        assert_eq!(&rows[1][3], "Python, SQL, Go");
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, true, 10)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("Python, SQL, Docker, AWS, Go"));
        assert!(output.contains("Score: 80.0%  |  Verdict: High"));
        assert!(output.contains("Matched Skills: None"));
        assert!(output.contains("Backend en..."));
        assert!(output.contains("1 High | 1 Medium | 1 Low"));
        assert!(output.contains("Top resume: alice.pdf (80.0%)"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_console_table_has_every_column() {
        let output = ConsoleFormatter::new(false, false, 1000)
            .format_report(&sample_report())
            .unwrap();

        let header = output
            .lines()
            .find(|line| line.starts_with("Resume "))
            .unwrap();
        for column in CSV_HEADERS {
            assert!(header.contains(column), "missing column {}", column);
        }

        let carol = output.lines().find(|line| line.starts_with("carol.pdf")).unwrap();
        assert!(carol.contains("0.0"));
        assert!(carol.ends_with("Python, SQL, Docker, AWS, Go"));
        assert!(!output.contains("Job Description Preview"));
    }

    #[test]
    fn test_format_score_keeps_a_decimal() {
        assert_eq!(format_score(80.0), "80.0");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(66.67), "66.67");
        assert_eq!(format_score(90.5), "90.5");
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let report = sample_report();
        let json = JsonFormatter::new(true).format_report(&report).unwrap();
        let parsed: EvaluationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.records, report.records);
    }

    #[test]
    fn test_markdown_table() {
        let output = MarkdownFormatter::new(false).format_report(&sample_report()).unwrap();
        assert!(output.contains("| Resume | Score (%) | Verdict | Matched Skills | Missing Skills |"));
        assert!(output.contains("| carol.pdf | 0.0 | Low | None | Python, SQL, Docker, AWS, Go |"));
    }

    #[test]
    fn test_html_escapes_content() {
        let mut report = sample_report();
        report.records[0].resume = "<script>.pdf".to_string();

        let html = HtmlFormatter::new(false, false, 1000).format_report(&report).unwrap();
        assert!(html.contains("&lt;script&gt;.pdf"));
        assert!(html.contains("color: orange"));
        assert!(!html.contains("<style>"));
        assert!(!html.contains("Job Description Preview"));
    }

    #[test]
    fn test_html_preview_follows_settings() {
        let html = HtmlFormatter::new(true, true, 10)
            .format_report(&sample_report())
            .unwrap();
        assert!(html.contains("Job Description Preview"));
        assert!(html.contains("Backend en..."));
        assert!(!html.contains("Backend engineer"));
    }

    #[test]
    fn test_verdict_colors_are_consistent() {
        assert_eq!(verdict_color(Verdict::High), Color::Green);
        assert_eq!(verdict_color(Verdict::Medium), Color::TrueColor { r: 255, g: 165, b: 0 });
        assert_eq!(verdict_color(Verdict::Low), Color::Red);
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, 1000, false, false, false);
        let report = sample_report();
        for format in [
            OutputFormat::Console,
            OutputFormat::Json,
            OutputFormat::Csv,
            OutputFormat::Markdown,
            OutputFormat::Html,
        ] {
            assert!(!generator.generate_report(&report, &format).unwrap().is_empty());
        }
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(&OutputFormat::Csv, false), "resume_scores.csv");
        assert!(suggest_filename(&OutputFormat::Html, true).ends_with(".html"));
    }
}
