use std::cmp::Ordering;

use tracing::{trace, warn};
use visutil_types::Value;

use crate::outcome::{SearchOutcome, SidePreference, MAX_PROBES};
use crate::path::FieldPath;

/// Nearest-match binary search with a side preference.
///
/// At each probe the midpoint key and its clamped neighbours are compared
/// with `cmp(key, target)`. An exact match returns the midpoint. When the
/// target falls strictly between two adjacent keys, `side` picks which of
/// the two indices to return. A target outside the range of keys is
/// [`SearchOutcome::NotFound`].
pub fn search_nearest_by<T, K, F, C>(
    items: &[T],
    target: &K,
    side: SidePreference,
    key: F,
    cmp: C,
) -> SearchOutcome
where
    F: FnMut(&T) -> K,
    C: FnMut(&K, &K) -> Ordering,
{
    search_nearest_within(items, target, side, key, cmp, MAX_PROBES)
}

pub(crate) fn search_nearest_within<T, K, F, C>(
    items: &[T],
    target: &K,
    side: SidePreference,
    mut key: F,
    mut cmp: C,
    budget: usize,
) -> SearchOutcome
where
    F: FnMut(&T) -> K,
    C: FnMut(&K, &K) -> Ordering,
{
    let Some(last) = items.len().checked_sub(1) else {
        return SearchOutcome::NotFound;
    };
    let mut low = 0;
    let mut high = last;
    let mut probes = 0;

    while low <= high {
        if probes == budget {
            warn!(probes, len = items.len(), "nearest search exhausted its probe budget");
            return SearchOutcome::Exhausted { probes };
        }
        let middle = low + (high - low) / 2;
        probes += 1;
        trace!(probes, middle, "nearest search probe");

        let prev = key(&items[middle.saturating_sub(1)]);
        let value = key(&items[middle]);
        let next = key(&items[(middle + 1).min(last)]);
        let at_middle = cmp(&value, target);

        if at_middle == Ordering::Equal {
            return SearchOutcome::Found(middle);
        }
        if at_middle == Ordering::Greater && cmp(&prev, target) == Ordering::Less {
            return SearchOutcome::Found(match side {
                SidePreference::Before => middle.saturating_sub(1),
                SidePreference::After => middle,
            });
        }
        if at_middle == Ordering::Less && cmp(&next, target) == Ordering::Greater {
            return SearchOutcome::Found(match side {
                SidePreference::Before => middle,
                SidePreference::After => (middle + 1).min(last),
            });
        }

        if at_middle == Ordering::Less {
            low = middle + 1;
        } else {
            match middle.checked_sub(1) {
                Some(next_high) => high = next_high,
                None => break,
            }
        }
    }
    SearchOutcome::NotFound
}

/// Nearest-match search over records by `item[field]`, using
/// [`Value::natural_cmp`].
pub fn binary_search_value(
    items: &[Value],
    target: &Value,
    field: &str,
    side: SidePreference,
) -> SearchOutcome {
    binary_search_value_by(items, target, field, side, Value::natural_cmp)
}

/// Nearest-match search over records by `item[field]` with a custom
/// three-way comparator called as `comparator(candidate, target)`.
pub fn binary_search_value_by<C>(
    items: &[Value],
    target: &Value,
    field: &str,
    side: SidePreference,
    comparator: C,
) -> SearchOutcome
where
    C: FnMut(&Value, &Value) -> Ordering,
{
    let path = FieldPath::new(field);
    search_nearest_by(items, target, side, |item| path.resolve(item), comparator)
}
