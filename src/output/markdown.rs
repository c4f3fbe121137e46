use rust_decimal::Decimal;

use crate::combine::CombineOptions;
use crate::errors::CostmergeError;
use crate::models::CombinedReport;
use crate::utils::formatting::{format_cost, format_cost_change, format_percent_change};
use super::diff::project_diff;
use super::style::Painter;
use super::table::{display_key, skipped_summary};

pub fn render(report: &CombinedReport, options: &CombineOptions) -> Result<Vec<u8>, CostmergeError> {
    Ok(render_markdown(report, options).into_bytes())
}

/// Pull/merge request comment body. With `include_html` the per-resource
/// breakdown is folded into a `<details>` block.
pub fn render_markdown(report: &CombinedReport, options: &CombineOptions) -> String {
    let currency = report.currency.as_str();
    let mut md = String::new();

    md.push_str(&format!("#### {}\n\n", headline(report)));

    md.push_str(&format!(
        "| {} | Project | Previous | New monthly cost | Diff |\n|---|---|---:|---:|---:|\n",
        escape_cell(&report.group_label)
    ));
    for group in &report.groups {
        for entry in &group.projects {
            let project = &entry.project;
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                escape_cell(display_key(&group.key)),
                escape_cell(&project.name),
                format_cost(project.past_monthly_cost(), currency),
                format_cost(project.monthly_cost(), currency),
                diff_cell(project.past_monthly_cost(), project.monthly_cost(), currency),
            ));
        }
    }
    md.push_str(&format!(
        "| **Total** | | {} | {} | {} |\n\n",
        format_cost(report.past_total_monthly_cost, currency),
        format_cost(report.total_monthly_cost, currency),
        diff_cell(report.past_total_monthly_cost, report.total_monthly_cost, currency),
    ));

    let painter = Painter::new(true);
    let mut details = String::new();
    for entry in report.projects() {
        details.push_str(&project_diff(&entry.project, currency, &painter));
    }
    details.push_str(&skipped_summary(&report.summary, 0, options.show_skipped));

    if options.include_html {
        md.push_str("<details>\n<summary><strong>Cost details</strong></summary>\n\n");
        md.push_str(&format!("```\n{}```\n", details));
        md.push_str("</details>\n");
    } else {
        md.push_str(&format!("```\n{}```\n", details));
    }

    if let Some(url) = &report.share_url {
        md.push_str(&format!("\n[View report]({})\n", url));
    }

    md
}

fn headline(report: &CombinedReport) -> String {
    let currency = report.currency.as_str();
    let past = report.past_total_monthly_cost.unwrap_or(Decimal::ZERO);
    let current = report.total_monthly_cost.unwrap_or(Decimal::ZERO);
    let delta = (current - past).round_dp(2);

    if delta.is_zero() {
        "Monthly cost will not change".to_string()
    } else if delta.is_sign_positive() {
        format!("Monthly cost will increase by {} 📈", format_cost(Some(delta), currency))
    } else {
        format!("Monthly cost will decrease by {} 📉", format_cost(Some(delta.abs()), currency))
    }
}

fn diff_cell(past: Option<Decimal>, current: Option<Decimal>, currency: &str) -> String {
    let delta = current.unwrap_or(Decimal::ZERO) - past.unwrap_or(Decimal::ZERO);
    match format_percent_change(past, current) {
        Some(pct) => format!("{} ({})", format_cost_change(delta, currency), pct),
        None => format_cost_change(delta, currency),
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::combine;
    use crate::models::{ReportDocument, ReportInput};

    fn report(past: &str, current: &str) -> CombinedReport {
        let doc = ReportDocument::load(
            format!(
                r#"{{
                    "version": "0.2",
                    "projects": [{{
                        "name": "infra|app",
                        "pastBreakdown": {{"resources": [], "totalMonthlyCost": "{past}"}},
                        "breakdown": {{"resources": [], "totalMonthlyCost": "{current}"}}
                    }}],
                    "pastTotalMonthlyCost": "{past}",
                    "totalMonthlyCost": "{current}"
                }}"#
            )
            .as_bytes(),
        )
        .unwrap();
        combine("USD", &[ReportInput::with_filename(doc, "app.json")], &CombineOptions::default())
    }

    #[test]
    fn test_increase_headline_and_row() {
        let md = render_markdown(&report("100", "150"), &CombineOptions::default());
        assert!(md.starts_with("#### Monthly cost will increase by $50.00"));
        assert!(md.contains("| app.json | infra\\|app | $100.00 | $150.00 | +$50.00 (+50%) |"));
    }

    #[test]
    fn test_decrease_and_no_change_headlines() {
        let md = render_markdown(&report("100", "40"), &CombineOptions::default());
        assert!(md.contains("Monthly cost will decrease by $60.00"));

        let md = render_markdown(&report("100", "100"), &CombineOptions::default());
        assert!(md.contains("Monthly cost will not change"));
    }

    #[test]
    fn test_include_html_wraps_details() {
        let with_html = render_markdown(
            &report("1", "2"),
            &CombineOptions { include_html: true, ..Default::default() },
        );
        let without_html = render_markdown(&report("1", "2"), &CombineOptions::default());

        assert!(with_html.contains("<details>"));
        assert!(with_html.contains("</details>"));
        assert!(!without_html.contains("<details>"));
    }

    #[test]
    fn test_share_url_link() {
        let mut r = report("1", "2");
        r.share_url = Some("https://dashboard.example/share/xyz".into());
        let md = render_markdown(&r, &CombineOptions::default());
        assert!(md.contains("[View report](https://dashboard.example/share/xyz)"));
    }
}
