use crate::combine::{CombineOptions, Field};
use crate::errors::CostmergeError;
use crate::models::{CombinedReport, Resource};
use crate::utils::formatting::format_cost;
use super::table::{component_value, display_key, skipped_summary};

const STYLE: &str = "body{font-family:-apple-system,Segoe UI,Helvetica,Arial,sans-serif;margin:2em;color:#24292f}\
table{border-collapse:collapse;margin-bottom:1.5em;min-width:60%}\
th,td{border-bottom:1px solid #d0d7de;padding:4px 10px;text-align:right}\
th:first-child,td:first-child{text-align:left}\
tr.resource td{font-weight:600}\
tr.total td{font-weight:700;border-top:2px solid #24292f}\
.group{margin-top:2em}.skipped{white-space:pre-line;color:#57606a}";

pub fn render(report: &CombinedReport, options: &CombineOptions) -> Result<Vec<u8>, CostmergeError> {
    Ok(render_document(report, options).into_bytes())
}

/// Standalone HTML page with one table per project.
pub fn render_document(report: &CombinedReport, options: &CombineOptions) -> String {
    let currency = report.currency.as_str();
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Cost Estimate Report</title>\n");
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str("<h1>Cost Estimate Report</h1>\n");

    if let Some(generated) = report.time_generated {
        html.push_str(&format!(
            "<p>Generated {}</p>\n",
            escape_html(&generated.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        ));
    }

    let mut free_resources = 0usize;
    for group in &report.groups {
        html.push_str(&format!(
            "<div class=\"group\">\n<h2>{}: {}</h2>\n",
            escape_html(&report.group_label),
            escape_html(display_key(&group.key))
        ));

        for entry in &group.projects {
            let project = &entry.project;
            html.push_str(&format!("<h3>Project: {}</h3>\n<table>\n<thead><tr><th>Name</th>", escape_html(&project.name)));
            for field in &options.fields {
                html.push_str(&format!("<th>{}</th>", field.title()));
            }
            html.push_str("</tr></thead>\n<tbody>\n");

            if let Some(breakdown) = &project.breakdown {
                for resource in &breakdown.resources {
                    if resource.is_free() && !options.show_skipped {
                        free_resources += 1;
                        continue;
                    }
                    push_resource(&mut html, resource, 0, &options.fields, currency);
                }
            }

            html.push_str(&format!(
                "<tr class=\"total\"><td>Project total</td>{}</tr>\n</tbody>\n</table>\n",
                total_cells(&options.fields, &format_cost(project.monthly_cost(), currency))
            ));
        }
        html.push_str("</div>\n");
    }

    html.push_str(&format!(
        "<table>\n<tbody><tr class=\"total\"><td>Overall total</td><td>{}</td></tr></tbody>\n</table>\n",
        format_cost(report.total_monthly_cost, currency)
    ));

    let skipped = skipped_summary(&report.summary, free_resources, options.show_skipped);
    if !skipped.is_empty() {
        html.push_str(&format!("<p class=\"skipped\">{}</p>\n", escape_html(skipped.trim_end())));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_resource(html: &mut String, resource: &Resource, depth: usize, fields: &[Field], currency: &str) {
    let indent = "&nbsp;&nbsp;&nbsp;".repeat(depth);
    html.push_str(&format!(
        "<tr class=\"resource\"><td>{}{}</td>{}</tr>\n",
        indent,
        escape_html(&resource.name),
        "<td></td>".repeat(fields.len())
    ));

    for component in &resource.cost_components {
        html.push_str(&format!("<tr><td>{}&nbsp;&nbsp;{}</td>", indent, escape_html(&component.name)));
        for field in fields {
            html.push_str(&format!("<td>{}</td>", escape_html(&component_value(component, *field, currency))));
        }
        html.push_str("</tr>\n");
    }

    for sub in &resource.subresources {
        push_resource(html, sub, depth + 1, fields, currency);
    }
}

// Put the total under the monthly cost column when there is one, otherwise last.
fn total_cells(fields: &[Field], total: &str) -> String {
    let target = fields
        .iter()
        .position(|f| *f == Field::MonthlyCost)
        .unwrap_or(fields.len().saturating_sub(1));
    if fields.is_empty() {
        return format!("<td>{}</td>", escape_html(total));
    }
    (0..fields.len())
        .map(|i| if i == target { format!("<td>{}</td>", escape_html(total)) } else { "<td></td>".to_string() })
        .collect()
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::combine;
    use crate::models::{ReportDocument, ReportInput};

    fn report() -> CombinedReport {
        let doc = ReportDocument::load(
            br#"{
                "version": "0.2",
                "currency": "EUR",
                "projects": [{
                    "name": "<prod>",
                    "breakdown": {"resources": [
                        {"name": "azurerm_firewall.main", "monthlyCost": "912.5", "costComponents": [
                            {"name": "Deployment (Standard)", "unit": "hours", "monthlyQuantity": "730",
                             "price": "1.25", "monthlyCost": "912.5"}
                        ]}
                    ], "totalMonthlyCost": "912.5"}
                }],
                "totalMonthlyCost": "912.5"
            }"#,
        )
        .unwrap();
        combine("EUR", &[ReportInput::with_filename(doc, "fw.json")], &CombineOptions::default())
    }

    #[test]
    fn test_html_document_structure() {
        let html = render_document(&report(), &CombineOptions::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h2>File: fw.json</h2>"));
        assert!(html.contains("<th>Monthly Qty</th><th>Unit</th><th>Monthly Cost</th>"));
        assert!(html.contains("€912.50"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_html_escapes_names() {
        let html = render_document(&report(), &CombineOptions::default());
        assert!(html.contains("Project: &lt;prod&gt;"));
        assert!(!html.contains("<prod>"));
    }

    #[test]
    fn test_html_respects_fields() {
        let options = CombineOptions { fields: vec![Field::Price], ..Default::default() };
        let html = render_document(&report(), &options);
        assert!(html.contains("<th>Price</th>"));
        assert!(!html.contains("<th>Unit</th>"));
        assert!(html.contains("€1.25"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b <c> \"d\" 'e'"), "a &amp; b &lt;c&gt; &quot;d&quot; &#39;e&#39;");
    }
}
