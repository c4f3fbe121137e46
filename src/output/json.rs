use crate::combine::CombineOptions;
use crate::errors::CostmergeError;
use crate::models::CombinedReport;

/// The combined report as a single document in the input schema, so the
/// result can itself be fed back into `output`.
pub fn render(report: &CombinedReport, _options: &CombineOptions) -> Result<Vec<u8>, CostmergeError> {
    Ok(serde_json::to_vec_pretty(&report.to_document())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::{combine, VersionGate};
    use crate::models::{ReportDocument, ReportInput};

    fn doc(name: &str, monthly: &str) -> ReportDocument {
        ReportDocument::load(
            format!(
                r#"{{"version": "0.2", "currency": "GBP", "runId": "r-{name}",
                    "projects": [{{"name": "{name}"}}], "totalMonthlyCost": "{monthly}"}}"#
            )
            .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_json_output_is_loadable_again() {
        let inputs = vec![
            ReportInput::with_filename(doc("a", "1.25"), "a.json"),
            ReportInput::with_filename(doc("b", "2.50"), "b.json"),
        ];
        let report = combine("GBP", &inputs, &CombineOptions::default());
        let bytes = render(&report, &CombineOptions::default()).unwrap();

        let reloaded = ReportDocument::load(&bytes).unwrap();
        assert!(VersionGate::default().accepts(&reloaded.version));
        assert_eq!(reloaded.currency, "GBP");
        assert_eq!(reloaded.projects.len(), 2);
        assert_eq!(reloaded.projects[0].name, "a");
        assert_eq!(reloaded.total_monthly_cost, report.total_monthly_cost);
        assert!(reloaded.run_id.is_none());
    }

    #[test]
    fn test_json_includes_share_url_when_set() {
        let mut report = combine("USD", &[], &CombineOptions::default());
        report.run_id = Some("run-1".into());
        report.share_url = Some("https://dashboard.example/share/abc".into());

        let bytes = render(&report, &CombineOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["runId"], "run-1");
        assert_eq!(value["shareUrl"], "https://dashboard.example/share/abc");
    }
}
