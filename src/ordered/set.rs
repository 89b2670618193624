//! A module containing [`OrderedSet`].

use core::fmt;
use core::iter::FusedIterator;
use core::ops::RangeBounds;

use crate::comparator::{Comparator, NaturalOrder};
use crate::ordered::map::{self, EmptyError, InvalidRangeError, OrderedMap};
use crate::traversal::SetTraversal;

/// An ordered set based on a red-black tree.
///
/// This is a wrapper around [`OrderedMap`] with `()` values, see its
/// documentation for more.
///
/// # Examples
/// ```
/// use rbmap::OrderedSet;
///
/// let mut set = OrderedSet::new();
///
/// set.insert(8);
/// set.insert(2);
/// set.insert(5);
///
/// assert_eq!(set.first(), Ok(&2));
/// assert_eq!(set.higher(&5), Some(&8));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [2, 5, 8]);
/// ```
#[derive(Clone)]
pub struct OrderedSet<K, C = NaturalOrder> {
	pub(crate) inner: OrderedMap<K, (), C>,
}

impl<K> OrderedSet<K, NaturalOrder> {
	/// See [`OrderedMap::new()`] for more details.
	pub fn new() -> Self {
		OrderedSet {
			inner: OrderedMap::new(),
		}
	}
	/// See [`OrderedMap::with_capacity()`] for more details.
	pub fn with_capacity(capacity: usize) -> Self {
		OrderedSet {
			inner: OrderedMap::with_capacity(capacity),
		}
	}
}

impl<K, C> OrderedSet<K, C> {
	/// See [`OrderedMap::with_comparator()`] for more details.
	pub fn with_comparator(comparator: C) -> Self {
		OrderedSet {
			inner: OrderedMap::with_comparator(comparator),
		}
	}
	/// See [`OrderedMap::comparator()`] for more details.
	pub fn comparator(&self) -> &C {
		self.inner.comparator()
	}
	/// See [`OrderedMap::len()`] for more details.
	pub fn len(&self) -> usize {
		self.inner.len()
	}
	/// See [`OrderedMap::is_empty()`] for more details.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
	/// See [`OrderedMap::clear()`] for more details.
	pub fn clear(&mut self) {
		self.inner.clear()
	}
	/// See [`OrderedMap::height()`] for more details.
	pub fn height(&self) -> usize {
		self.inner.height()
	}
	/// See [`OrderedMap::first_key()`] for more details.
	pub fn first(&self) -> Result<&K, EmptyError> {
		self.inner.first_key()
	}
	/// See [`OrderedMap::last_key()`] for more details.
	pub fn last(&self) -> Result<&K, EmptyError> {
		self.inner.last_key()
	}
	/// See [`OrderedMap::pop_first()`] for more details.
	pub fn pop_first(&mut self) -> Option<K> {
		self.inner.pop_first().map(first)
	}
	/// See [`OrderedMap::pop_last()`] for more details.
	pub fn pop_last(&mut self) -> Option<K> {
		self.inner.pop_last().map(first)
	}
	/// See [`OrderedMap::iter()`] for more details.
	pub fn iter(&self) -> Iter<'_, K> {
		Iter {
			inner: self.inner.keys(),
		}
	}
	/// See [`OrderedMap::iterate()`] for more details.
	pub fn iterate(&self) -> SetTraversal {
		SetTraversal {
			inner: self.inner.iterate(),
		}
	}
}

impl<K, C> OrderedSet<K, C>
where
	C: Comparator<K>,
{
	/// Adds a key to the set.
	///
	/// Returns `true` if the key was not already present, and `false` if
	/// an equal key was present, in which case the set is unchanged.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedSet;
	///
	/// let mut set = OrderedSet::new();
	///
	/// assert_eq!(set.insert(1), true);
	/// assert_eq!(set.insert(1), false);
	/// assert_eq!(set.len(), 1);
	/// ```
	pub fn insert(&mut self, key: K) -> bool {
		self.inner.insert(key, ())
	}
	/// See [`OrderedMap::remove()`] for more details.
	pub fn remove(&mut self, key: &K) -> bool {
		self.inner.remove(key)
	}
	/// Removes and returns the stored key equal to the given key, if
	/// present.
	pub fn take(&mut self, key: &K) -> Option<K> {
		self.inner.remove_entry(key).map(first)
	}
	/// See [`OrderedMap::contains_key()`] for more details.
	pub fn contains(&self, key: &K) -> bool {
		self.inner.contains_key(key)
	}
	/// Returns the stored key equal to the given key, if present.
	pub fn get(&self, key: &K) -> Option<&K> {
		self.inner.get_key_value(key).map(first)
	}
	/// See [`OrderedMap::floor_key()`] for more details.
	pub fn floor(&self, key: &K) -> Option<&K> {
		self.inner.floor_key(key)
	}
	/// See [`OrderedMap::ceiling_key()`] for more details.
	pub fn ceiling(&self, key: &K) -> Option<&K> {
		self.inner.ceiling_key(key)
	}
	/// See [`OrderedMap::lower_key()`] for more details.
	pub fn lower(&self, key: &K) -> Option<&K> {
		self.inner.lower_key(key)
	}
	/// See [`OrderedMap::higher_key()`] for more details.
	pub fn higher(&self, key: &K) -> Option<&K> {
		self.inner.higher_key(key)
	}
	/// See [`OrderedMap::range()`] for more details.
	pub fn range<R>(&self, range: R) -> Range<'_, K>
	where
		R: RangeBounds<K>,
	{
		Range {
			inner: self.inner.range(range),
		}
	}
	/// See [`OrderedMap::range_view()`] for more details.
	pub fn range_view(
		&self,
		from: &K,
		from_inclusive: bool,
		to: &K,
		to_inclusive: bool,
	) -> Result<SetTraversal, InvalidRangeError> {
		self.inner
			.range_view(from, from_inclusive, to, to_inclusive)
			.map(|inner| SetTraversal { inner })
	}
	/// See [`OrderedMap::head_view()`] for more details.
	pub fn head_view(&self, to: &K, inclusive: bool) -> SetTraversal {
		SetTraversal {
			inner: self.inner.head_view(to, inclusive),
		}
	}
	/// See [`OrderedMap::tail_view()`] for more details.
	pub fn tail_view(&self, from: &K, inclusive: bool) -> SetTraversal {
		SetTraversal {
			inner: self.inner.tail_view(from, inclusive),
		}
	}
}

fn first<A, B>((a, _): (A, B)) -> A {
	a
}

// Trait Impls ==========================

impl<K, C> Default for OrderedSet<K, C>
where
	C: Default,
{
	fn default() -> Self {
		OrderedSet {
			inner: OrderedMap::default(),
		}
	}
}

impl<K, C> fmt::Debug for OrderedSet<K, C>
where
	K: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

impl<K, C> PartialEq for OrderedSet<K, C>
where
	K: PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<K, C> Eq for OrderedSet<K, C> where K: Eq {}

impl<K, C> Extend<K> for OrderedSet<K, C>
where
	C: Comparator<K>,
{
	fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
		self.inner.extend(iter.into_iter().map(|key| (key, ())))
	}
}

impl<K, C> FromIterator<K> for OrderedSet<K, C>
where
	C: Comparator<K> + Default,
{
	fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
		let mut set = OrderedSet::default();
		set.extend(iter);
		set
	}
}

impl<K, const N: usize> From<[K; N]> for OrderedSet<K, NaturalOrder>
where
	K: Ord,
{
	fn from(keys: [K; N]) -> Self {
		let mut set = OrderedSet::with_capacity(N);
		set.extend(keys);
		set
	}
}

impl<K, C> IntoIterator for OrderedSet<K, C> {
	type Item = K;
	type IntoIter = IntoIter<K>;
	fn into_iter(self) -> Self::IntoIter {
		IntoIter {
			inner: self.inner.into_iter(),
		}
	}
}

impl<'a, K, C> IntoIterator for &'a OrderedSet<K, C> {
	type Item = &'a K;
	type IntoIter = Iter<'a, K>;
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// An iterator over the keys of an [`OrderedSet`].
///
/// This `struct` is created by the [`iter`] method on [`OrderedSet`].
///
/// [`iter`]: OrderedSet::iter
pub struct Iter<'a, K> {
	inner: map::Keys<'a, K, ()>,
}

impl<K> Clone for Iter<'_, K> {
	fn clone(&self) -> Self {
		Iter {
			inner: self.inner.clone(),
		}
	}
}

impl<'a, K> Iterator for Iter<'a, K> {
	type Item = &'a K;
	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next()
	}
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.inner.next_back()
	}
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
impl<K> FusedIterator for Iter<'_, K> {}

/// An iterator over a range of keys of an [`OrderedSet`].
///
/// This `struct` is created by the [`range`] method on [`OrderedSet`].
///
/// [`range`]: OrderedSet::range
pub struct Range<'a, K> {
	inner: map::Range<'a, K, ()>,
}

impl<K> Clone for Range<'_, K> {
	fn clone(&self) -> Self {
		Range {
			inner: self.inner.clone(),
		}
	}
}

impl<'a, K> Iterator for Range<'a, K> {
	type Item = &'a K;
	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(first)
	}
}

impl<K> DoubleEndedIterator for Range<'_, K> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.inner.next_back().map(first)
	}
}

impl<K> FusedIterator for Range<'_, K> {}

/// An owning iterator over the keys of an [`OrderedSet`].
///
/// This `struct` is created by the [`into_iter`] method on [`OrderedSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
/// [`IntoIterator`]: core::iter::IntoIterator
pub struct IntoIter<K> {
	inner: map::IntoIter<K, ()>,
}

impl<K> Iterator for IntoIter<K> {
	type Item = K;
	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(first)
	}
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl<K> DoubleEndedIterator for IntoIter<K> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.inner.next_back().map(first)
	}
}

impl<K> ExactSizeIterator for IntoIter<K> {}
impl<K> FusedIterator for IntoIter<K> {}

#[cfg(feature = "serde")]
mod serde {
	use core::marker::PhantomData;

	use serde::de::{SeqAccess, Visitor};
	use serde::ser::SerializeSeq;
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use crate::{Comparator, OrderedSet};

	impl<K, C> Serialize for OrderedSet<K, C>
	where
		K: Serialize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			let mut seq = serializer.serialize_seq(Some(self.len()))?;
			for key in self.iter() {
				seq.serialize_element(key)?;
			}
			seq.end()
		}
	}

	impl<'de, K, C> Deserialize<'de> for OrderedSet<K, C>
	where
		K: Deserialize<'de>,
		C: Comparator<K> + Default,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			deserializer.deserialize_seq(OrderedSetVisitor {
				k: PhantomData,
				c: PhantomData,
			})
		}
	}

	struct OrderedSetVisitor<K, C> {
		k: PhantomData<K>,
		c: PhantomData<C>,
	}

	impl<'de, K, C> Visitor<'de> for OrderedSetVisitor<K, C>
	where
		K: Deserialize<'de>,
		C: Comparator<K> + Default,
	{
		type Value = OrderedSet<K, C>;

		fn expecting(
			&self,
			formatter: &mut core::fmt::Formatter,
		) -> core::fmt::Result {
			formatter.write_str("an OrderedSet")
		}

		fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
		where
			A: SeqAccess<'de>,
		{
			let mut set = OrderedSet::default();
			while let Some(key) = access.next_element()? {
				set.insert(key);
			}
			Ok(set)
		}
	}
}

#[cfg(test)]
mod tests {
	use alloc::vec::Vec;

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::comparator::Reversed;

	fn collect<C>(set: &OrderedSet<i32, C>) -> Vec<i32> {
		set.iter().copied().collect()
	}

	#[test]
	fn insert_reports_new_keys() {
		let mut set = OrderedSet::new();
		for key in [5, 3, 8, 1, 4, 7, 9] {
			assert!(set.insert(key));
		}
		assert!(!set.insert(4));
		assert_eq!(set.len(), 7);
		assert_eq!(collect(&set), [1, 3, 4, 5, 7, 8, 9]);
		set.inner.tree.check_invariants().unwrap();
	}

	#[test]
	fn neighbours() {
		let set = OrderedSet::from([1, 3, 5]);

		assert_eq!(set.floor(&4), Some(&3));
		assert_eq!(set.ceiling(&4), Some(&5));
		assert_eq!(set.lower(&1), None);
		assert_eq!(set.higher(&5), None);
		assert_eq!(set.first(), Ok(&1));
		assert_eq!(set.last(), Ok(&5));
	}

	#[test]
	fn empty_set() {
		let mut set = OrderedSet::<u8>::new();
		assert!(set.is_empty());
		assert_eq!(set.first(), Err(EmptyError));
		assert_eq!(set.last(), Err(EmptyError));
		assert_eq!(set.pop_first(), None);
		assert!(!set.remove(&0));
		assert_eq!(set.iterate().advance(&set), None);
	}

	#[test]
	fn take_and_get_return_stored_key() {
		let mut set = OrderedSet::with_comparator(|a: &(u8, &str), b: &(u8, &str)| {
			a.0.cmp(&b.0)
		});
		set.insert((1, "stored"));
		set.insert((1, "ignored"));

		assert_eq!(set.get(&(1, "probe")), Some(&(1, "stored")));
		assert_eq!(set.take(&(1, "probe")), Some((1, "stored")));
		assert!(!set.contains(&(1, "probe")));
	}

	#[test]
	fn ranges_and_views() {
		let set = OrderedSet::from([1, 3, 5, 7, 9]);

		assert_eq!(set.range(3..=7).copied().collect::<Vec<_>>(), [3, 5, 7]);
		assert_eq!(set.range(4..).rev().copied().collect::<Vec<_>>(), [9, 7, 5]);

		let mut range = set.range(..6);
		assert_eq!(range.next(), Some(&1));
		let rest = range.clone();
		assert_eq!(range.copied().collect::<Vec<_>>(), [3, 5]);
		assert_eq!(rest.rev().copied().collect::<Vec<_>>(), [5, 3]);

		let mut view = set.range_view(&3, true, &7, false).unwrap();
		let mut keys = Vec::new();
		while let Some(step) = view.advance(&set) {
			keys.push(*step.unwrap());
		}
		assert_eq!(keys, [3, 5]);
		assert!(view.is_exhausted());

		assert_eq!(set.range_view(&7, true, &3, true), Err(InvalidRangeError));

		let mut head = set.head_view(&5, false);
		assert_eq!(head.advance(&set), Some(Ok(&1)));
		let mut tail = set.tail_view(&9, true);
		assert_eq!(tail.advance(&set), Some(Ok(&9)));
		assert_eq!(tail.advance(&set), None);
	}

	#[test]
	fn traversal_fails_after_insert() {
		let mut set = OrderedSet::from([1, 2]);
		let mut traversal = set.iterate();
		assert_eq!(traversal.advance(&set), Some(Ok(&1)));

		assert!(!set.insert(2));
		assert_eq!(traversal.advance(&set), Some(Ok(&2)));

		traversal.restart();
		assert!(set.insert(3));
		assert!(traversal.advance(&set).unwrap().is_err());
	}

	#[test]
	fn reversed_comparator_and_traits() {
		let set: OrderedSet<i32, Reversed<NaturalOrder>> = [2, 9, 4].into_iter().collect();
		assert_eq!(collect(&set), [9, 4, 2]);
		assert_eq!(set.first(), Ok(&9));
		assert_eq!(alloc::format!("{set:?}"), "{9, 4, 2}");

		let mut other = OrderedSet::with_comparator(Reversed(NaturalOrder));
		other.extend([4, 2, 9]);
		assert_eq!(set, other);

		assert_eq!(other.pop_last(), Some(2));
		assert_eq!(other.into_iter().collect::<Vec<_>>(), [9, 4]);
	}

	#[cfg(feature = "serde")]
	#[test]
	fn serde_round_trip_keeps_comparator_order() {
		let set: OrderedSet<i32, Reversed<NaturalOrder>> = [2, 9, 4].into_iter().collect();

		let json = serde_json::to_string(&set).unwrap();
		assert_eq!(json, "[9,4,2]");

		let back: OrderedSet<i32, Reversed<NaturalOrder>> = serde_json::from_str(&json).unwrap();
		back.inner.tree.check_invariants().unwrap();
		assert_eq!(back, set);

		let deduplicated: OrderedSet<i32> = serde_json::from_str("[3,1,3]").unwrap();
		assert_eq!(collect(&deduplicated), [1, 3]);
	}
}
