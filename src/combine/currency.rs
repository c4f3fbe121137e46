use crate::errors::CostmergeError;
use crate::models::ReportDocument;

/// Currency assumed for documents that do not declare one.
pub const BASELINE_CURRENCY: &str = "USD";

/// Fold one more document's currency into the running value.
///
/// The first document fixes the currency. Any later document declaring a
/// different one is a hard error; reports in mixed currencies are never combined.
pub fn reconcile(accumulated: &str, next: &str) -> Result<String, CostmergeError> {
    let next = if next.is_empty() { BASELINE_CURRENCY } else { next };
    let accumulated = if accumulated.is_empty() { next } else { accumulated };

    if accumulated != next {
        return Err(CostmergeError::CurrencyMismatch {
            expected: accumulated.to_string(),
            found: next.to_string(),
        });
    }

    Ok(accumulated.to_string())
}

/// Reconcile every document in order, stopping at the first conflict.
///
/// An empty sequence yields an empty string; callers that render a report
/// from it should treat that as the baseline currency.
pub fn reconcile_all<'a, I>(documents: I) -> Result<String, CostmergeError>
where
    I: IntoIterator<Item = &'a ReportDocument>,
{
    documents
        .into_iter()
        .try_fold(String::new(), |acc, doc| reconcile(&acc, &doc.currency))
}
