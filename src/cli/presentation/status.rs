//! Status command presentation: vendor table and json.

use crate::status::StatusReport;
use comfy_table::Table;
use serde_json::json;

pub fn format_status_text(report: &StatusReport) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Vendor", "Source", "Variable", "Models", "Flag"]);
    for v in &report.vendors {
        table.add_row(vec![
            v.vendor.clone(),
            v.source.clone(),
            v.variable.clone().unwrap_or_else(|| "-".to_string()),
            v.models.to_string(),
            v.cli_flag.clone().unwrap_or_else(|| "(inherited env)".to_string()),
        ]);
    }

    let keys_file = report
        .keys_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none found)".to_string());
    format!(
        "{}\n\nTool: {}\nKeys file: {}\nVendors with keys: {}/{}",
        table,
        report.program,
        keys_file,
        report.available(),
        report.vendors.len()
    )
}

pub fn format_status_json(report: &StatusReport) -> String {
    let out = json!({
        "program": report.program,
        "keys_file": report.keys_file,
        "vendors": report.vendors,
        "available": report.available(),
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
