use core::ops::{Bound, RangeBounds};

use crate::comparator::Comparator;

/// Panics if the range's start key orders after its end key.
///
/// Equal keys with both ends excluded are allowed and give an empty
/// range.
pub(crate) fn invalid_range_panic<K, C, R>(comparator: &C, range: &R)
where
	C: Comparator<K>,
	R: RangeBounds<K>,
{
	if let (
		Bound::Included(start) | Bound::Excluded(start),
		Bound::Included(end) | Bound::Excluded(end),
	) = (range.start_bound(), range.end_bound())
	{
		if comparator.compare(start, end).is_gt() {
			panic!("Invalid range (start key is greater than end key)");
		}
	}
}
