//! Fixed-width console rendering of a report.

use cartagena_primitives::DailyReport;

const RULE: &str = "================================================================================";
const THIN_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Render a report as a human-readable console table.
///
/// Returns appear in percent, rows in report order, and a `capped` marker
/// flags rows the cap actually clipped. The caller decides where the string
/// goes; nothing here prints.
#[must_use]
pub fn render_summary(report: &DailyReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("{RULE}\n"));
    out.push_str(&format!(
        "FACTOR ATTRIBUTION: {} on {} ({} horizon)\n",
        report.target,
        report.date,
        report.horizon.label()
    ));
    out.push_str(&format!("{RULE}\n"));
    out.push_str(&format!("Target Return: {:>+8.3}%\n", report.target_return * 100.0));
    out.push_str(&format!("{THIN_RULE}\n"));

    out.push_str("\nFACTOR CONTRIBUTIONS:\n");
    out.push_str(&format!(
        "{:<20} {:>10} {:>10} {:>13} {:>8} {:>7}\n",
        "Factor", "Return", "Beta", "Contribution", "Corr", "Score"
    ));
    out.push_str(&format!(
        "{:-<20} {:-^10} {:-^10} {:-^13} {:-^8} {:-^7}\n",
        "", "", "", "", "", ""
    ));
    for row in &report.rows {
        let marker = if row.is_capped() { "  capped" } else { "" };
        out.push_str(&format!(
            "{:<20} {:>9.3}% {:>10.3} {:>12.3}% {:>8.2} {:>7.1}{}\n",
            row.factor,
            row.raw_return * 100.0,
            row.beta,
            row.capped_contribution * 100.0,
            row.correlation,
            row.score,
            marker,
        ));
    }
    out.push_str(&format!(
        "{:<20} {:>10} {:>10} {:>12.3}% {:>8} {:>7}\n",
        "Unexplained", "-", "-", report.unexplained * 100.0, "-", "-"
    ));
    out.push_str(&format!(
        "{:-<20} {:-^10} {:-^10} {:-^13} {:-^8} {:-^7}\n",
        "", "", "", "", "", ""
    ));
    out.push_str(&format!(
        "{:<20} {:>10} {:>10} {:>12.3}% {:>8} {:>7}\n",
        "TOTAL", "", "", report.target_return * 100.0, "", ""
    ));

    if !report.skipped.is_empty() {
        out.push_str("\nSKIPPED FACTORS:\n");
        for skip in &report.skipped {
            out.push_str(&format!("  {:<20} {}\n", skip.factor, skip.reason));
        }
    }

    out.push_str(&format!("\n{THIN_RULE}\n"));
    out.push_str("SUMMARY:\n");
    out.push_str(&format!("  Explained Return:   {:>+8.3}%\n", report.explained * 100.0));
    out.push_str(&format!("  Unexplained Return: {:>+8.3}%\n", report.unexplained * 100.0));
    out.push_str(&format!(
        "  R-squared:          {:>8.1}%\n",
        report.diagnostics.r_squared * 100.0
    ));
    out.push_str(&format!("  Observations:       {:>8}\n", report.diagnostics.n_obs));
    out.push_str(&format!("{RULE}\n"));

    out
}
