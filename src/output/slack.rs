use serde_json::{json, Value};

use crate::combine::CombineOptions;
use crate::errors::CostmergeError;
use crate::models::CombinedReport;
use crate::utils::formatting::{format_cost, format_cost_change};
use rust_decimal::Decimal;
use super::table::display_key;

/// Slack Block Kit message summarising each project's monthly cost.
pub fn render(report: &CombinedReport, _options: &CombineOptions) -> Result<Vec<u8>, CostmergeError> {
    Ok(serde_json::to_vec_pretty(&build_message(report))?)
}

pub fn build_message(report: &CombinedReport) -> Value {
    let currency = report.currency.as_str();
    let mut blocks: Vec<Value> = vec![json!({
        "type": "section",
        "text": {
            "type": "mrkdwn",
            "text": format!(
                "*Monthly cost estimate*: {} ({})",
                format_cost(report.total_monthly_cost, currency),
                change(report.past_total_monthly_cost, report.total_monthly_cost, currency)
            )
        }
    })];

    for group in &report.groups {
        blocks.push(json!({ "type": "divider" }));
        let mut fields = vec![json!({
            "type": "mrkdwn",
            "text": format!("*{}*\n{}", report.group_label, display_key(&group.key))
        })];
        for entry in &group.projects {
            let project = &entry.project;
            fields.push(json!({
                "type": "mrkdwn",
                "text": format!(
                    "*{}*\n{} ({})",
                    project.name,
                    format_cost(project.monthly_cost(), currency),
                    change(project.past_monthly_cost(), project.monthly_cost(), currency)
                )
            }));
        }
        // Slack rejects sections with more than ten fields
        for chunk in fields.chunks(10) {
            blocks.push(json!({ "type": "section", "fields": chunk }));
        }
    }

    if let Some(url) = &report.share_url {
        blocks.push(json!({
            "type": "context",
            "elements": [{ "type": "mrkdwn", "text": format!("<{}|View report>", url) }]
        }));
    }

    json!({ "blocks": blocks })
}

fn change(past: Option<Decimal>, current: Option<Decimal>, currency: &str) -> String {
    let delta = current.unwrap_or(Decimal::ZERO) - past.unwrap_or(Decimal::ZERO);
    format_cost_change(delta, currency)
}
