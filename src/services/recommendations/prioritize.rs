use std::cmp::Reverse;
use std::collections::HashSet;

use crate::models::CandidateStub;

/// Orders stubs by strategy weight and keeps the first stub per exact title
///
/// The sort is stable, so stubs of equal weight keep their harvest order.
pub fn prioritize(mut stubs: Vec<CandidateStub>, exclude: &HashSet<String>) -> Vec<CandidateStub> {
    stubs.sort_by_key(|stub| Reverse(stub.source.weight()));

    let mut seen = HashSet::new();
    stubs
        .into_iter()
        .filter(|stub| {
            !stub.title.is_empty()
                && !exclude.contains(&stub.title)
                && seen.insert(stub.title.clone())
        })
        .collect()
}
