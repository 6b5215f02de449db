//! Health-summary PDF renderer.
//!
//! A pure function of (profile, reports, logs) producing finished PDF
//! bytes. Section order is fixed: Patient Information, Medical History
//! (only when the profile has conditions or allergies), Health Reports
//! (first 10), Recent Health Logs (first 15), confidentiality footer.
//! Cell formatting is exact: absent optional values render as "N/A",
//! temperature and sleep as one decimal, blood pressure as
//! "systolic/diastolic", dates as ISO YYYY-MM-DD.

use printpdf::*;
use std::io::BufWriter;

use crate::models::{HealthLog, HealthReport, UserProfile};

/// How many stored reports the summary table shows.
pub const MAX_REPORT_ROWS: usize = 10;

/// How many recent logs the summary table shows.
pub const MAX_LOG_ROWS: usize = 15;

const FOOTER_TEXT: &str = "This is a confidential medical document. Handle with care.";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const TOP_Y_MM: f32 = 280.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;

/// PDF generation failures.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("PDF font error: {0}")]
    Font(String),
    #[error("PDF save error: {0}")]
    Save(String),
}

/// Render the health summary. Returns PDF bytes.
pub fn render_health_summary(
    profile: &UserProfile,
    reports: &[HealthReport],
    logs: &[HealthLog],
) -> Result<Vec<u8>, RenderError> {
    let (doc, page1, layer1) =
        PdfDocument::new("Personal Health Record Summary", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Font(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Font(e.to_string()))?;

    let mut cursor = Cursor {
        doc: &doc,
        layer: doc.get_page(page1).get_layer(layer1),
        y: TOP_Y_MM,
    };

    // Title
    cursor.text("Personal Health Record Summary", 16.0, 20.0, &bold);
    cursor.advance(12.0);

    // Patient Information
    cursor.heading("PATIENT INFORMATION", &bold);
    cursor.row("Full Name:", &profile.full_name, &font);
    cursor.row("Email:", &profile.email, &font);
    cursor.row("Phone:", &or_na(profile.phone.as_deref()), &font);
    cursor.row("Blood Group:", &or_na(profile.blood_group.as_deref()), &font);
    cursor.row("Date of Birth:", &fmt_opt_date(profile.date_of_birth), &font);
    cursor.row(
        "Report Generated:",
        &chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        &font,
    );
    cursor.advance(6.0);

    // Medical History - omitted when both lists are empty
    if profile.has_medical_history() {
        cursor.heading("MEDICAL HISTORY", &bold);
        if !profile.chronic_conditions.is_empty() {
            cursor.row("Chronic Conditions:", &profile.chronic_conditions.join(", "), &font);
        }
        if !profile.allergies.is_empty() {
            cursor.row("Allergies:", &profile.allergies.join(", "), &font);
        }
        cursor.advance(6.0);
    }

    // Health Reports table - omitted when empty
    if !reports.is_empty() {
        cursor.heading(&format!("HEALTH REPORTS ({})", reports.len()), &bold);
        cursor.table_header("Date          Type                Title                              Doctor", &bold);
        for report in reports.iter().take(MAX_REPORT_ROWS) {
            let line = format!(
                "{}    {:<18}  {:<33}  {}",
                report.report_date.format("%Y-%m-%d"),
                report.report_type.display_label(),
                truncate(&report.title, 30),
                or_na(report.doctor_name.as_deref()),
            );
            cursor.cell(&line, &font);
        }
        cursor.advance(6.0);
    }

    // Recent Health Logs table - omitted when empty
    if !logs.is_empty() {
        cursor.heading(&format!("RECENT HEALTH LOGS ({})", logs.len()), &bold);
        cursor.table_header("Date          Temp (C)   BP         Mood       Sleep (hrs)", &bold);
        for log in logs.iter().take(MAX_LOG_ROWS) {
            let line = format!(
                "{}    {:<9}  {:<9}  {:<9}  {}",
                log.log_date.format("%Y-%m-%d"),
                fmt_opt_f1(log.temperature),
                fmt_blood_pressure(log),
                log.mood.as_str(),
                fmt_opt_f1(log.sleep_hours),
            );
            cursor.cell(&line, &font);
        }
    }

    // Footer
    cursor.advance(10.0);
    cursor.text(FOOTER_TEXT, 8.0, 20.0, &font);

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf).map_err(|e| RenderError::Save(e.to_string()))?;
    buf.into_inner().map_err(|e| RenderError::Save(e.to_string()))
}

/// Y-cursor over the current page; breaks to a fresh page when a line
/// would fall below the bottom margin.
struct Cursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor<'_> {
    fn ensure_space(&mut self, needed_mm: f32) {
        if self.y - needed_mm < BOTTOM_MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_Y_MM;
        }
    }

    fn text(&mut self, text: &str, size: f32, x_mm: f32, font: &IndirectFontRef) {
        self.ensure_space(5.0);
        self.layer.use_text(text, size, Mm(x_mm), Mm(self.y), font);
        self.y -= 5.0;
    }

    fn heading(&mut self, text: &str, bold: &IndirectFontRef) {
        self.ensure_space(12.0);
        self.layer.use_text(text, 11.0, Mm(20.0), Mm(self.y), bold);
        self.y -= 6.0;
    }

    fn row(&mut self, label: &str, value: &str, font: &IndirectFontRef) {
        self.ensure_space(5.0);
        self.layer.use_text(label, 9.0, Mm(25.0), Mm(self.y), font);
        self.layer.use_text(value, 9.0, Mm(65.0), Mm(self.y), font);
        self.y -= 4.5;
    }

    fn table_header(&mut self, text: &str, bold: &IndirectFontRef) {
        self.ensure_space(5.0);
        self.layer.use_text(text, 8.0, Mm(25.0), Mm(self.y), bold);
        self.y -= 4.5;
    }

    fn cell(&mut self, text: &str, font: &IndirectFontRef) {
        self.ensure_space(5.0);
        self.layer.use_text(text, 8.0, Mm(25.0), Mm(self.y), font);
        self.y -= 4.0;
    }

    fn advance(&mut self, mm: f32) {
        self.y -= mm;
    }
}

// Cell formatting helpers

/// "N/A" for an absent optional string.
fn or_na(value: Option<&str>) -> String {
    value.unwrap_or("N/A").to_string()
}

/// One-decimal formatting, "N/A" when absent.
fn fmt_opt_f1(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => "N/A".to_string(),
    }
}

/// ISO date, "N/A" when absent.
fn fmt_opt_date(value: Option<chrono::NaiveDate>) -> String {
    match value {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => "N/A".to_string(),
    }
}

/// "systolic/diastolic", "N/A" when systolic is absent.
fn fmt_blood_pressure(log: &HealthLog) -> String {
    log.blood_pressure().unwrap_or_else(|| "N/A".to_string())
}

/// Truncate to at most `max_chars` characters.
fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
