use rust_decimal::Decimal;

use crate::combine::CombineOptions;
use crate::errors::CostmergeError;
use crate::models::{Breakdown, CombinedReport, Project, Resource};
use crate::utils::formatting::{format_cost, format_cost_change, format_percent_change};
use super::style::Painter;
use super::table::display_key;

const RULE_WIDTH: usize = 40;

pub fn render(report: &CombinedReport, options: &CombineOptions) -> Result<Vec<u8>, CostmergeError> {
    Ok(render_text(report, options).into_bytes())
}

/// Monthly cost changes per project and overall.
pub fn render_text(report: &CombinedReport, options: &CombineOptions) -> String {
    let painter = Painter::new(options.no_color);
    let currency = report.currency.as_str();
    let mut out = format!(
        "Key: {} changed, {} added, {} removed\n",
        painter.yellow("~"),
        painter.green("+"),
        painter.red("-"),
    );

    for group in &report.groups {
        for entry in &group.projects {
            out.push_str(&"─".repeat(RULE_WIDTH));
            out.push('\n');
            out.push_str(&format!("{}: {}\n", report.group_label, display_key(&group.key)));
            out.push_str(&project_diff(&entry.project, currency, &painter));
        }
    }

    out.push_str(&"─".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&painter.bold("OVERALL TOTAL"));
    out.push('\n');
    out.push_str(&change_lines(
        report.past_total_monthly_cost,
        report.total_monthly_cost,
        currency,
    ));
    out
}

/// Diff section for one project, without the key header.
pub fn project_diff(project: &Project, currency: &str, painter: &Painter) -> String {
    let mut out = format!("Project: {}\n\n", project.name);
    let empty = Breakdown::default();
    let past = project.past_breakdown.as_ref().unwrap_or(&empty);
    let current = project.breakdown.as_ref().unwrap_or(&empty);

    let changed: Vec<&Resource> = project
        .diff
        .as_ref()
        .map(|d| d.resources.iter().filter(|r| !r.is_free()).collect())
        .unwrap_or_default();

    if changed.is_empty() {
        out.push_str("No changes\n\n");
    }

    for resource in changed {
        let before = find_resource(past, &resource.name).and_then(|r| r.monthly_cost);
        let after = find_resource(current, &resource.name).and_then(|r| r.monthly_cost);
        let delta = resource
            .monthly_cost
            .unwrap_or_else(|| after.unwrap_or(Decimal::ZERO) - before.unwrap_or(Decimal::ZERO));

        let (marker, line) = match (before, after) {
            (None, _) => (painter.green("+"), format_cost_change(delta, currency)),
            (Some(_), None) => (painter.red("-"), format_cost_change(delta, currency)),
            (Some(b), Some(a)) => (
                painter.yellow("~"),
                format!(
                    "{} ({} → {})",
                    format_cost_change(delta, currency),
                    format_cost(Some(b), currency),
                    format_cost(Some(a), currency)
                ),
            ),
        };
        out.push_str(&format!("{} {}\n  {}\n\n", marker, resource.name, line));
    }

    out.push_str(&format!("Monthly cost change for {}\n", project.name));
    out.push_str(&change_lines(project.past_monthly_cost(), project.monthly_cost(), currency));
    out.push('\n');
    out
}

fn change_lines(past: Option<Decimal>, current: Option<Decimal>, currency: &str) -> String {
    let delta = current.unwrap_or(Decimal::ZERO) - past.unwrap_or(Decimal::ZERO);
    let mut out = format!(
        "Amount:  {} ({} → {})\n",
        format_cost_change(delta, currency),
        format_cost(Some(past.unwrap_or(Decimal::ZERO)), currency),
        format_cost(Some(current.unwrap_or(Decimal::ZERO)), currency),
    );
    if let Some(pct) = format_percent_change(past, current) {
        out.push_str(&format!("Percent: {}\n", pct));
    }
    out
}

fn find_resource<'a>(breakdown: &'a Breakdown, name: &str) -> Option<&'a Resource> {
    breakdown.resources.iter().find(|r| r.name == name)
}
