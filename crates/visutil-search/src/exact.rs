use std::cmp::Ordering;

use tracing::{trace, warn};
use visutil_types::Value;

use crate::outcome::{SearchOutcome, MAX_PROBES};
use crate::path::FieldPath;

/// Exact-match binary search driven by a one-argument probe.
///
/// `probe` sees each candidate and answers relative to the target it has in
/// mind: `Less` when the candidate is too small, `Greater` when too big,
/// `Equal` on a match.
pub fn search_exact_by<T, F>(items: &[T], probe: F) -> SearchOutcome
where
    F: FnMut(&T) -> Ordering,
{
    search_exact_within(items, probe, MAX_PROBES)
}

pub(crate) fn search_exact_within<T, F>(items: &[T], mut probe: F, budget: usize) -> SearchOutcome
where
    F: FnMut(&T) -> Ordering,
{
    let Some(mut high) = items.len().checked_sub(1) else {
        return SearchOutcome::NotFound;
    };
    let mut low = 0;
    let mut probes = 0;

    while low <= high {
        if probes == budget {
            warn!(probes, len = items.len(), "exact search exhausted its probe budget");
            return SearchOutcome::Exhausted { probes };
        }
        let middle = low + (high - low) / 2;
        probes += 1;
        let ordering = probe(&items[middle]);
        trace!(probes, middle, ?ordering, "exact search probe");

        match ordering {
            Ordering::Equal => return SearchOutcome::Found(middle),
            Ordering::Less => low = middle + 1,
            Ordering::Greater => match middle.checked_sub(1) {
                Some(next_high) => high = next_high,
                None => break,
            },
        }
    }
    SearchOutcome::NotFound
}

/// Exact-match search over records, comparing the value `path` selects.
///
/// `comparator` receives only the candidate value and must encode the
/// target itself (see [`search_exact_by`]).
pub fn binary_search_custom<F>(
    items: &[Value],
    mut comparator: F,
    path: &FieldPath,
) -> SearchOutcome
where
    F: FnMut(&Value) -> Ordering,
{
    search_exact_by(items, |item| comparator(&path.resolve(item)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn items() -> Vec<Value> {
        [1, 3, 5, 7]
            .into_iter()
            .map(|v| Value::from(json!({"v": v})))
            .collect()
    }

    fn targeting(target: i32) -> impl FnMut(&Value) -> Ordering {
        move |value| value.natural_cmp(&Value::from(target))
    }

    #[test]
    fn finds_exact_match() {
        let outcome = binary_search_custom(&items(), targeting(5), &FieldPath::new("v"));
        assert_eq!(outcome, SearchOutcome::Found(2));
    }

    #[test]
    fn missing_value_is_not_found() {
        let outcome = binary_search_custom(&items(), targeting(4), &FieldPath::new("v"));
        assert_eq!(outcome, SearchOutcome::NotFound);
        assert_eq!(outcome.legacy_index(), -1);
    }

    #[test]
    fn finds_both_ends() {
        let path = FieldPath::new("v");
        assert_eq!(binary_search_custom(&items(), targeting(1), &path), SearchOutcome::Found(0));
        assert_eq!(binary_search_custom(&items(), targeting(7), &path), SearchOutcome::Found(3));
    }

    #[test]
    fn below_and_above_range() {
        let path = FieldPath::new("v");
        assert_eq!(binary_search_custom(&items(), targeting(0), &path), SearchOutcome::NotFound);
        assert_eq!(binary_search_custom(&items(), targeting(8), &path), SearchOutcome::NotFound);
    }

    #[test]
    fn empty_input() {
        let outcome = binary_search_custom(&[], targeting(1), &FieldPath::new("v"));
        assert_eq!(outcome, SearchOutcome::NotFound);
    }

    #[test]
    fn nested_field() {
        let items: Vec<Value> = [10, 20, 30]
            .into_iter()
            .map(|v| Value::from(json!({"data": {"start": v}})))
            .collect();
        let outcome =
            binary_search_custom(&items, targeting(30), &FieldPath::nested("data", "start"));
        assert_eq!(outcome, SearchOutcome::Found(2));
    }

    #[test]
    fn comparator_sees_only_the_candidate() {
        let mut seen = Vec::new();
        let outcome = binary_search_custom(
            &items(),
            |value| {
                seen.push(value.clone());
                value.natural_cmp(&Value::from(7))
            },
            &FieldPath::new("v"),
        );
        assert_eq!(outcome, SearchOutcome::Found(3));
        assert_eq!(seen, vec![Value::from(3), Value::from(5), Value::from(7)]);
    }

    #[test]
    fn probe_budget_is_reported() {
        let data: Vec<u32> = (0..1024).collect();
        let outcome = search_exact_within(&data, |v| v.cmp(&1000), 3);
        assert_eq!(outcome, SearchOutcome::Exhausted { probes: 3 });
        assert!(!outcome.is_conclusive());
        assert_eq!(outcome.legacy_index(), -1);
    }

    #[test]
    fn generic_search_over_plain_slices() {
        let data = [2, 4, 8, 16, 32];
        assert_eq!(search_exact_by(&data, |v| v.cmp(&16)), SearchOutcome::Found(3));
        assert_eq!(search_exact_by(&data, |v| v.cmp(&5)), SearchOutcome::NotFound);
    }

    proptest! {
        #[test]
        fn agrees_with_std_binary_search(
            set in prop::collection::btree_set(-500i32..500, 0..64),
            target in -520i32..520,
        ) {
            let data: Vec<i32> = set.into_iter().collect();
            let ours = search_exact_by(&data, |v| v.cmp(&target)).index();
            let std = data.binary_search(&target).ok();
            prop_assert_eq!(ours, std);
        }
    }
}
