use crate::search::SearchResult;
use std::collections::HashSet;

/// Precision@k for a single ranked result list.
///
/// Considers the first `k` entries of `retrieved` (all of them when fewer
/// exist) and counts those whose doc id appears in `gold_relevant`. The
/// denominator is always the requested `k`, so a short result list is
/// penalized rather than rewarded.
pub fn precision_at_k(
    gold_relevant: &HashSet<String>,
    retrieved: &[SearchResult],
    k: usize,
) -> f64 {
    if k == 0 {
        return 0.0;
    }
    let hits = retrieved
        .iter()
        .take(k)
        .filter(|r| gold_relevant.contains(&r.doc_id))
        .count();
    hits as f64 / k as f64
}

/// Mean precision@k over a batch of (judgments, ranked results) runs.
/// An empty batch yields 0.0.
pub fn mean_precision_at_k<'a, I>(runs: I, k: usize) -> f64
where
    I: IntoIterator<Item = (&'a HashSet<String>, &'a [SearchResult])>,
{
    let mut total = 0.0;
    let mut count = 0usize;
    for (gold, retrieved) in runs {
        total += precision_at_k(gold, retrieved, k);
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
