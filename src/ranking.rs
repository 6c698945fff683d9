// Pure ranking and search over a hotel snapshot

use std::cmp::Ordering;

use crate::catalog::Hotel;

/// Hotels ordered by price, cheapest first. Ties keep insertion order.
pub fn sort_by_price(hotels: &[Hotel]) -> Vec<Hotel> {
    let mut sorted = hotels.to_vec();
    merge_sort_by(&mut sorted, &|a, b| a.price.cmp(&b.price));
    sorted
}

/// Hotels ordered by rating, best first. Ties keep insertion order.
pub fn sort_by_rating(hotels: &[Hotel]) -> Vec<Hotel> {
    let mut sorted = hotels.to_vec();
    merge_sort_by(&mut sorted, &|a, b| b.rating.total_cmp(&a.rating));
    sorted
}

/// Hotels ordered by distance from the reference point, nearest first.
pub fn sort_by_distance(hotels: &[Hotel]) -> Vec<Hotel> {
    let mut sorted = hotels.to_vec();
    merge_sort_by(&mut sorted, &|a, b| a.distance.total_cmp(&b.distance));
    sorted
}

/// Case-sensitive exact-name lookup via binary search over a name-sorted
/// copy of the snapshot.
///
/// If the snapshot holds several hotels with the same name the result is
/// whichever of them the search lands on, not necessarily the first
/// inserted.
pub fn find_by_name(hotels: &[Hotel], name: &str) -> Option<Hotel> {
    let mut sorted = hotels.to_vec();
    merge_sort_by(&mut sorted, &|a, b| a.name.cmp(&b.name));
    sorted
        .binary_search_by(|h| h.name.as_str().cmp(name))
        .ok()
        .map(|i| sorted[i].clone())
}

// Stable recursive merge sort over an exclusive slice. Equal keys keep
// their relative order, so repeated sorts produce reproducible output.
fn merge_sort_by<T, F>(items: &mut [T], cmp: &F)
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let len = items.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    merge_sort_by(&mut items[..mid], cmp);
    merge_sort_by(&mut items[mid..], cmp);

    let mut merged = Vec::with_capacity(len);
    {
        let (left, right) = items.split_at(mid);
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            // take from the left on ties to stay stable
            if cmp(&left[i], &right[j]) != Ordering::Greater {
                merged.push(left[i].clone());
                i += 1;
            } else {
                merged.push(right[j].clone());
                j += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
    }
    items.clone_from_slice(&merged);
}
