use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{CombinedProject, CombinedReport, ReportGroup, ReportInput, Summary};
use super::options::CombineOptions;
use super::version::MAX_OUTPUT_VERSION;

/// Merge validated inputs into one report.
///
/// Inputs are grouped by their `group_key` metadata value. Groups keep the
/// order in which their first input appeared and projects keep input order
/// within a group. This never fails; validation happens before combining.
pub fn combine(currency: &str, inputs: &[ReportInput], options: &CombineOptions) -> CombinedReport {
    let mut groups: Vec<ReportGroup> = Vec::new();
    let mut summaries = Vec::with_capacity(inputs.len());

    let mut totals = Totals::default();

    for input in inputs {
        let key = input.metadata_value(&options.group_key);
        let idx = match groups.iter().position(|g| g.key == key) {
            Some(idx) => idx,
            None => {
                groups.push(ReportGroup {
                    key: key.to_string(),
                    projects: Vec::new(),
                });
                groups.len() - 1
            }
        };

        groups[idx].projects.extend(input.root.projects.iter().map(|project| CombinedProject {
            metadata: input.metadata.clone(),
            project: project.clone(),
        }));

        if let Some(summary) = &input.root.summary {
            summaries.push(summary);
        }
        totals.add(input);
    }

    let time_generated = inputs.iter().filter_map(|i| i.root.time_generated).max();

    CombinedReport {
        version: MAX_OUTPUT_VERSION.to_string(),
        currency: currency.to_string(),
        group_label: options.group_label.clone(),
        groups,
        total_hourly_cost: totals.hourly,
        total_monthly_cost: totals.monthly,
        past_total_hourly_cost: totals.past_hourly,
        past_total_monthly_cost: totals.past_monthly,
        diff_total_hourly_cost: totals.diff_hourly,
        diff_total_monthly_cost: totals.diff_monthly,
        time_generated,
        summary: merge_summaries(&summaries),
        run_id: None,
        share_url: None,
    }
}

#[derive(Default)]
struct Totals {
    hourly: Option<Decimal>,
    monthly: Option<Decimal>,
    past_hourly: Option<Decimal>,
    past_monthly: Option<Decimal>,
    diff_hourly: Option<Decimal>,
    diff_monthly: Option<Decimal>,
}

impl Totals {
    fn add(&mut self, input: &ReportInput) {
        let root = &input.root;
        add_cost(&mut self.hourly, root.total_hourly_cost);
        add_cost(&mut self.monthly, root.total_monthly_cost);
        add_cost(&mut self.past_hourly, root.past_total_hourly_cost);
        add_cost(&mut self.past_monthly, root.past_total_monthly_cost);
        add_cost(&mut self.diff_hourly, root.diff_total_hourly_cost);
        add_cost(&mut self.diff_monthly, root.diff_total_monthly_cost);
    }
}

// A total is only known once at least one input reports it.
fn add_cost(total: &mut Option<Decimal>, value: Option<Decimal>) {
    if let Some(v) = value {
        *total = Some(total.unwrap_or(Decimal::ZERO) + v);
    }
}

/// Sum resource counters across summaries.
pub fn merge_summaries(summaries: &[&Summary]) -> Summary {
    let mut merged = Summary::default();
    for s in summaries {
        add_count(&mut merged.total_detected_resources, s.total_detected_resources);
        add_count(&mut merged.total_supported_resources, s.total_supported_resources);
        add_count(&mut merged.total_unsupported_resources, s.total_unsupported_resources);
        add_count(&mut merged.total_usage_based_resources, s.total_usage_based_resources);
        add_count(&mut merged.total_no_price_resources, s.total_no_price_resources);
        merge_counts(&mut merged.unsupported_resource_counts, &s.unsupported_resource_counts);
        merge_counts(&mut merged.no_price_resource_counts, &s.no_price_resource_counts);
    }
    merged
}

fn add_count(total: &mut Option<u64>, value: Option<u64>) {
    if let Some(v) = value {
        *total = Some(total.unwrap_or(0) + v);
    }
}

fn merge_counts(total: &mut Option<BTreeMap<String, u64>>, value: &Option<BTreeMap<String, u64>>) {
    let Some(counts) = value else { return };
    let total = total.get_or_insert_with(BTreeMap::new);
    for (resource_type, count) in counts {
        *total.entry(resource_type.clone()).or_insert(0) += count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportDocument;
    use rust_decimal_macros::dec;

    fn input(filename: &str, project: &str, monthly: &str) -> ReportInput {
        let json = format!(
            r#"{{
                "version": "0.2",
                "currency": "USD",
                "projects": [{{"name": "{project}", "breakdown": {{"resources": [], "totalMonthlyCost": "{monthly}"}}}}],
                "totalMonthlyCost": "{monthly}",
                "summary": {{"totalDetectedResources": 3, "unsupportedResourceCounts": {{"aws_foo": 1}}}}
            }}"#
        );
        ReportInput::with_filename(ReportDocument::load(json.as_bytes()).unwrap(), filename)
    }

    #[test]
    fn test_groups_follow_input_order() {
        let inputs = vec![
            input("c.json", "gamma", "3"),
            input("a.json", "alpha", "1"),
            input("b.json", "beta", "2"),
        ];
        let report = combine("USD", &inputs, &CombineOptions::default());

        let keys: Vec<&str> = report.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["c.json", "a.json", "b.json"]);
        let names: Vec<&str> = report.projects().map(|p| p.project.name.as_str()).collect();
        assert_eq!(names, vec!["gamma", "alpha", "beta"]);
    }

    #[test]
    fn test_same_key_appends_to_first_group() {
        let inputs = vec![
            input("a.json", "one", "1"),
            input("b.json", "two", "2"),
            input("a.json", "three", "3"),
        ];
        let report = combine("USD", &inputs, &CombineOptions::default());

        assert_eq!(report.groups.len(), 2);
        let first: Vec<&str> = report.groups[0]
            .projects
            .iter()
            .map(|p| p.project.name.as_str())
            .collect();
        assert_eq!(first, vec!["one", "three"]);
    }

    #[test]
    fn test_totals_and_summaries_are_summed() {
        let inputs = vec![input("a.json", "one", "10.50"), input("b.json", "two", "4.25")];
        let report = combine("USD", &inputs, &CombineOptions::default());

        assert_eq!(report.total_monthly_cost, Some(dec!(14.75)));
        assert_eq!(report.total_hourly_cost, None);
        assert_eq!(report.summary.total_detected_resources, Some(6));
        assert_eq!(report.summary.unsupported_resource_counts.unwrap()["aws_foo"], 2);
    }

    #[test]
    fn test_empty_inputs_give_empty_report() {
        let report = combine("USD", &[], &CombineOptions::default());
        assert!(report.is_empty());
        assert!(report.groups.is_empty());
        assert_eq!(report.total_monthly_cost, None);
        assert_eq!(report.currency, "USD");
        assert_eq!(report.summary, Summary::default());
    }

    #[test]
    fn test_group_key_missing_uses_empty_value() {
        let inputs = vec![input("a.json", "one", "1")];
        let options = CombineOptions {
            group_key: "workspace".into(),
            group_label: "Workspace".into(),
            ..Default::default()
        };
        let report = combine("USD", &inputs, &options);
        assert_eq!(report.groups[0].key, "");
        assert_eq!(report.group_label, "Workspace");
    }

    #[test]
    fn test_projects_carry_input_metadata() {
        let inputs = vec![input("a.json", "one", "1")];
        let report = combine("USD", &inputs, &CombineOptions::default());
        let project = report.projects().next().unwrap();
        assert_eq!(project.metadata["filename"], "a.json");
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let inputs = vec![input("a.json", "one", "1")];
        let before = inputs.clone();
        let _ = combine("USD", &inputs, &CombineOptions::default());
        assert_eq!(inputs, before);
    }

    #[test]
    fn test_combine_is_deterministic() {
        let inputs = vec![input("a.json", "one", "1"), input("b.json", "two", "2")];
        let options = CombineOptions::default();
        assert_eq!(combine("USD", &inputs, &options), combine("USD", &inputs, &options));
    }
}
