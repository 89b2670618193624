//! A module containing [`OrderedMap`].

use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Bound, Index, RangeBounds};

use crate::comparator::{Comparator, NaturalOrder};
use crate::traversal::Traversal;
use crate::tree::{predecessor, successor, Node, NodeId, RawTree};
use crate::utils::invalid_range_panic;

/// An ordered map based on a red-black tree.
///
/// `K` is the generic type parameter for the keys in the map.
///
/// `V` is the generic type parameter for the values associated with the
/// keys in the map.
///
/// `C` is the generic type parameter for the [`Comparator`] ordering
/// the keys, [`NaturalOrder`] (the keys' [`Ord`] implementation) by
/// default.
///
/// # Examples
/// ```
/// use rbmap::OrderedMap;
///
/// // Make a map of ages to names
/// let mut map = OrderedMap::new();
///
/// map.insert(31, "Ferris");
/// map.insert(7, "Corro");
/// map.insert(12, "Wasm");
///
/// // Change a value in the map
/// *map.get_mut(&12).unwrap() = "Wasmer";
///
/// // Nearest-key queries
/// assert_eq!(map.floor_key(&20), Some(&12));
/// assert_eq!(map.ceiling_key(&20), Some(&31));
///
/// // Iterate over the entries in the map
/// for (age, name) in map.iter() {
/// 	println!("{age}: {name}");
/// }
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V, C = NaturalOrder> {
	pub(crate) tree: RawTree<K, V, C>,
}

/// The error returned when asking an empty map or set for its first or
/// last key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyError;

impl fmt::Display for EmptyError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("the collection is empty")
	}
}

impl core::error::Error for EmptyError {}

/// The error returned when creating a range view whose start key comes
/// after its end key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRangeError;

impl fmt::Display for InvalidRangeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("range start key is greater than range end key")
	}
}

impl core::error::Error for InvalidRangeError {}

impl<K, V> OrderedMap<K, V, NaturalOrder> {
	/// Makes a new, empty `OrderedMap` ordered by the keys' [`Ord`]
	/// implementation.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map: OrderedMap<i8, bool> = OrderedMap::new();
	/// ```
	pub fn new() -> Self {
		OrderedMap::with_comparator(NaturalOrder)
	}

	/// Makes a new, empty `OrderedMap` with space for at least
	/// `capacity` entries.
	pub fn with_capacity(capacity: usize) -> Self {
		OrderedMap::with_capacity_and_comparator(capacity, NaturalOrder)
	}
}

impl<K, V, C> OrderedMap<K, V, C> {
	/// Makes a new, empty `OrderedMap` whose keys are ordered by the
	/// given [`Comparator`].
	///
	/// The comparator must be a consistent total order over the keys. If
	/// it is not the map stays memory-safe and balanced but lookups may
	/// miss keys that are present.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let mut map = OrderedMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
	///
	/// map.insert(1, "one");
	/// map.insert(2, "two");
	///
	/// assert_eq!(map.first_key(), Ok(&2));
	/// ```
	pub fn with_comparator(comparator: C) -> Self {
		OrderedMap::with_capacity_and_comparator(0, comparator)
	}

	/// Makes a new, empty `OrderedMap` with the given [`Comparator`] and
	/// space for at least `capacity` entries.
	pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
		OrderedMap {
			tree: RawTree::with_capacity(capacity, comparator),
		}
	}

	/// Returns a reference to the map's [`Comparator`].
	pub fn comparator(&self) -> &C {
		self.tree.comparator()
	}

	/// Returns the number of entries in the map.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let mut map = OrderedMap::new();
	///
	/// assert_eq!(map.len(), 0);
	/// map.insert(1, false);
	/// assert_eq!(map.len(), 1);
	/// ```
	pub fn len(&self) -> usize {
		self.tree.len()
	}

	/// Returns `true` if the map contains no entries, and `false` if it
	/// does.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let mut map = OrderedMap::new();
	///
	/// assert_eq!(map.is_empty(), true);
	/// map.insert(1, false);
	/// assert_eq!(map.is_empty(), false);
	/// ```
	pub fn is_empty(&self) -> bool {
		self.tree.len() == 0
	}

	/// Removes every entry from the map.
	///
	/// This is a structural modification, see [`Traversal`].
	pub fn clear(&mut self) {
		self.tree.clear()
	}

	/// Returns the number of entries on the longest path from the root
	/// of the underlying tree to a leaf.
	///
	/// This is never more than `2 * log2(len + 1)`.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = (0..1000).map(|x| (x, ())).collect::<OrderedMap<_, _>>();
	///
	/// assert!(map.height() <= 19);
	/// ```
	pub fn height(&self) -> usize {
		self.tree.height()
	}

	/// Returns the first key in the map.
	///
	/// # Examples
	/// ```
	/// use rbmap::{EmptyError, OrderedMap};
	///
	/// let mut map = OrderedMap::new();
	/// assert_eq!(map.first_key(), Err(EmptyError));
	///
	/// map.insert(4, ());
	/// map.insert(2, ());
	/// assert_eq!(map.first_key(), Ok(&2));
	/// ```
	pub fn first_key(&self) -> Result<&K, EmptyError> {
		self.first_key_value().map(|(key, _)| key).ok_or(EmptyError)
	}

	/// Returns the last key in the map.
	///
	/// # Examples
	/// ```
	/// use rbmap::{EmptyError, OrderedMap};
	///
	/// let mut map = OrderedMap::new();
	/// assert_eq!(map.last_key(), Err(EmptyError));
	///
	/// map.insert(4, ());
	/// map.insert(2, ());
	/// assert_eq!(map.last_key(), Ok(&4));
	/// ```
	pub fn last_key(&self) -> Result<&K, EmptyError> {
		self.last_key_value().map(|(key, _)| key).ok_or(EmptyError)
	}

	/// Returns the first entry in the map, if any.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(1, 'a'), (2, 'b')]);
	///
	/// assert_eq!(map.first_key_value(), Some((&1, &'a')));
	/// ```
	pub fn first_key_value(&self) -> Option<(&K, &V)> {
		self.tree.first().map(|id| self.tree.entry(id))
	}

	/// Returns the last entry in the map, if any.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(1, 'a'), (2, 'b')]);
	///
	/// assert_eq!(map.last_key_value(), Some((&2, &'b')));
	/// ```
	pub fn last_key_value(&self) -> Option<(&K, &V)> {
		self.tree.last().map(|id| self.tree.entry(id))
	}

	/// Removes and returns the first entry in the map, if any.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let mut map = OrderedMap::from([(1, 'a'), (2, 'b')]);
	///
	/// assert_eq!(map.pop_first(), Some((1, 'a')));
	/// assert_eq!(map.pop_first(), Some((2, 'b')));
	/// assert_eq!(map.pop_first(), None);
	/// ```
	pub fn pop_first(&mut self) -> Option<(K, V)> {
		self.tree.pop_first()
	}

	/// Removes and returns the last entry in the map, if any.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let mut map = OrderedMap::from([(1, 'a'), (2, 'b')]);
	///
	/// assert_eq!(map.pop_last(), Some((2, 'b')));
	/// assert_eq!(map.len(), 1);
	/// ```
	pub fn pop_last(&mut self) -> Option<(K, V)> {
		self.tree.pop_last()
	}

	/// Returns an iterator over every entry in the map in ascending
	/// order.
	///
	/// The iterator is double-ended, use [`Iterator::rev()`] for
	/// descending order.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(3, 'c'), (1, 'a'), (2, 'b')]);
	///
	/// let mut iter = map.iter();
	///
	/// assert_eq!(iter.next(), Some((&1, &'a')));
	/// assert_eq!(iter.next_back(), Some((&3, &'c')));
	/// assert_eq!(iter.next(), Some((&2, &'b')));
	/// assert_eq!(iter.next(), None);
	/// ```
	pub fn iter(&self) -> Iter<'_, K, V> {
		let window = self.tree.first().zip(self.tree.last());
		Iter {
			range: Range::new(self.tree.nodes(), window),
			remaining: self.tree.len(),
		}
	}

	/// Returns a mutable iterator over every entry in the map in
	/// ascending order.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let mut map = OrderedMap::from([(1, 10), (2, 20)]);
	///
	/// for (key, value) in map.iter_mut() {
	/// 	*value += key;
	/// }
	///
	/// assert_eq!(map.get(&2), Some(&22));
	/// ```
	pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
		IterMut {
			inner: self.tree.sorted_entries_mut().into_iter(),
		}
	}

	/// Returns an iterator over every key in the map in ascending order.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(2, 'b'), (1, 'a')]);
	///
	/// assert_eq!(map.keys().collect::<Vec<_>>(), [&1, &2]);
	/// ```
	pub fn keys(&self) -> Keys<'_, K, V> {
		Keys { inner: self.iter() }
	}

	/// Returns an iterator over every value in the map in ascending
	/// order of their keys.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(2, 'b'), (1, 'a')]);
	///
	/// assert_eq!(map.values().collect::<Vec<_>>(), [&'a', &'b']);
	/// ```
	pub fn values(&self) -> Values<'_, K, V> {
		Values { inner: self.iter() }
	}

	/// Returns a mutable iterator over every value in the map in
	/// ascending order of their keys.
	pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
		ValuesMut {
			inner: self.iter_mut(),
		}
	}

	/// Returns a fail-fast [`Traversal`] over every entry in the map in
	/// ascending order.
	///
	/// See [`Traversal`] for how it differs from [`OrderedMap::iter()`].
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let mut map = OrderedMap::from([(1, ()), (2, ()), (3, ())]);
	/// let mut traversal = map.iterate();
	///
	/// assert_eq!(traversal.advance(&map), Some(Ok((&1, &()))));
	///
	/// map.insert(4, ());
	///
	/// assert!(traversal.advance(&map).unwrap().is_err());
	/// ```
	pub fn iterate(&self) -> Traversal {
		let window = self.tree.first().zip(self.tree.last());
		Traversal::new(&self.tree, window)
	}
}

impl<K, V, C> OrderedMap<K, V, C>
where
	C: Comparator<K>,
{
	/// Adds an entry to the map, overwriting the value of an existing
	/// equal key.
	///
	/// Returns `true` if the key was not already present and a new entry
	/// was added, and `false` if an existing entry's value was
	/// overwritten. Overwriting keeps the originally inserted key and is
	/// not a structural modification.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let mut map = OrderedMap::new();
	///
	/// assert_eq!(map.insert(5, "a"), true);
	/// assert_eq!(map.insert(5, "b"), false);
	///
	/// assert_eq!(map.len(), 1);
	/// assert_eq!(map.get(&5), Some(&"b"));
	/// ```
	pub fn insert(&mut self, key: K, value: V) -> bool {
		self.tree.insert(key, value).is_none()
	}

	/// Adds an entry to the map, returning the previous value of an
	/// existing equal key if there was one.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let mut map = OrderedMap::new();
	///
	/// assert_eq!(map.insert_or_replace(5, "a"), None);
	/// assert_eq!(map.insert_or_replace(5, "b"), Some("a"));
	/// ```
	pub fn insert_or_replace(&mut self, key: K, value: V) -> Option<V> {
		self.tree.insert(key, value)
	}

	/// Removes the entry with the given key from the map.
	///
	/// Returns `true` if an entry was removed, and `false` if the key was
	/// not present.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let mut map = OrderedMap::from([(1, ()), (2, ())]);
	///
	/// assert_eq!(map.remove(&1), true);
	/// assert_eq!(map.remove(&1), false);
	/// assert_eq!(map.len(), 1);
	/// ```
	pub fn remove(&mut self, key: &K) -> bool {
		self.tree.remove(key).is_some()
	}

	/// Removes the entry with the given key from the map, returning it if
	/// it was present.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let mut map = OrderedMap::from([(1, 'a')]);
	///
	/// assert_eq!(map.remove_entry(&1), Some((1, 'a')));
	/// assert_eq!(map.remove_entry(&1), None);
	/// ```
	pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
		self.tree.remove(key)
	}

	/// Returns a reference to the value of the given key, if present.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(1, 'a')]);
	///
	/// assert_eq!(map.get(&1), Some(&'a'));
	/// assert_eq!(map.get(&2), None);
	/// ```
	pub fn get(&self, key: &K) -> Option<&V> {
		self.get_key_value(key).map(|(_, value)| value)
	}

	/// Returns the stored key and value equal to the given key, if
	/// present.
	pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
		self.tree.find(key).map(|id| self.tree.entry(id))
	}

	/// Returns a mutable reference to the value of the given key, if
	/// present.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let mut map = OrderedMap::from([(1, 'a')]);
	///
	/// if let Some(x) = map.get_mut(&1) {
	/// 	*x = 'b';
	/// }
	///
	/// assert_eq!(map.get(&1), Some(&'b'));
	/// ```
	pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
		let id = self.tree.find(key)?;
		Some(self.tree.value_mut(id))
	}

	/// Returns `true` if the map contains the given key, and `false` if
	/// not.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(1, 'a')]);
	///
	/// assert_eq!(map.contains_key(&1), true);
	/// assert_eq!(map.contains_key(&2), false);
	/// ```
	pub fn contains_key(&self, key: &K) -> bool {
		self.tree.find(key).is_some()
	}

	/// Returns the greatest key less than or equal to the given key, if
	/// any.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(1, ()), (3, ()), (5, ())]);
	///
	/// assert_eq!(map.floor_key(&4), Some(&3));
	/// assert_eq!(map.floor_key(&3), Some(&3));
	/// assert_eq!(map.floor_key(&0), None);
	/// ```
	pub fn floor_key(&self, key: &K) -> Option<&K> {
		self.floor_key_value(key).map(|(key, _)| key)
	}

	/// Returns the least key greater than or equal to the given key, if
	/// any.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(1, ()), (3, ()), (5, ())]);
	///
	/// assert_eq!(map.ceiling_key(&4), Some(&5));
	/// assert_eq!(map.ceiling_key(&5), Some(&5));
	/// assert_eq!(map.ceiling_key(&6), None);
	/// ```
	pub fn ceiling_key(&self, key: &K) -> Option<&K> {
		self.ceiling_key_value(key).map(|(key, _)| key)
	}

	/// Returns the greatest key strictly less than the given key, if any.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(1, ()), (3, ()), (5, ())]);
	///
	/// assert_eq!(map.lower_key(&3), Some(&1));
	/// assert_eq!(map.lower_key(&1), None);
	/// ```
	pub fn lower_key(&self, key: &K) -> Option<&K> {
		self.lower_key_value(key).map(|(key, _)| key)
	}

	/// Returns the least key strictly greater than the given key, if any.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(1, ()), (3, ()), (5, ())]);
	///
	/// assert_eq!(map.higher_key(&3), Some(&5));
	/// assert_eq!(map.higher_key(&5), None);
	/// ```
	pub fn higher_key(&self, key: &K) -> Option<&K> {
		self.higher_key_value(key).map(|(key, _)| key)
	}

	/// Returns the entry with the greatest key less than or equal to the
	/// given key, if any.
	pub fn floor_key_value(&self, key: &K) -> Option<(&K, &V)> {
		self.tree
			.search_below(key, true)
			.map(|id| self.tree.entry(id))
	}

	/// Returns the entry with the least key greater than or equal to the
	/// given key, if any.
	pub fn ceiling_key_value(&self, key: &K) -> Option<(&K, &V)> {
		self.tree
			.search_above(key, true)
			.map(|id| self.tree.entry(id))
	}

	/// Returns the entry with the greatest key strictly less than the
	/// given key, if any.
	pub fn lower_key_value(&self, key: &K) -> Option<(&K, &V)> {
		self.tree
			.search_below(key, false)
			.map(|id| self.tree.entry(id))
	}

	/// Returns the entry with the least key strictly greater than the
	/// given key, if any.
	pub fn higher_key_value(&self, key: &K) -> Option<(&K, &V)> {
		self.tree
			.search_above(key, false)
			.map(|id| self.tree.entry(id))
	}

	/// Returns an iterator over every entry in the map whose key is
	/// inside the given range, in ascending order.
	///
	/// # Panics
	///
	/// Panics if the range's start key is greater than its end key.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(1, 'a'), (3, 'b'), (5, 'c'), (7, 'd')]);
	///
	/// assert_eq!(
	/// 	map.range(3..7).collect::<Vec<_>>(),
	/// 	[(&3, &'b'), (&5, &'c')]
	/// );
	/// assert_eq!(
	/// 	map.range(..=3).rev().collect::<Vec<_>>(),
	/// 	[(&3, &'b'), (&1, &'a')]
	/// );
	/// ```
	pub fn range<R>(&self, range: R) -> Range<'_, K, V>
	where
		R: RangeBounds<K>,
	{
		invalid_range_panic(self.comparator(), &range);

		let window = self.tree.window(range.start_bound(), range.end_bound());
		Range::new(self.tree.nodes(), window)
	}

	/// Returns a fail-fast [`Traversal`] over every entry whose key lies
	/// between `from` and `to`, each end included or excluded by its
	/// flag, in ascending order.
	///
	/// Returns an [`InvalidRangeError`] if `from` is greater than `to`.
	///
	/// # Examples
	/// ```
	/// use rbmap::{InvalidRangeError, OrderedMap};
	///
	/// let map = OrderedMap::from([(1, ()), (3, ()), (5, ()), (7, ()), (9, ())]);
	///
	/// let mut view = map.range_view(&3, true, &7, false).unwrap();
	///
	/// assert_eq!(view.advance(&map), Some(Ok((&3, &()))));
	/// assert_eq!(view.advance(&map), Some(Ok((&5, &()))));
	/// assert_eq!(view.advance(&map), None);
	///
	/// assert_eq!(
	/// 	map.range_view(&7, true, &3, true),
	/// 	Err(InvalidRangeError)
	/// );
	/// ```
	pub fn range_view(
		&self,
		from: &K,
		from_inclusive: bool,
		to: &K,
		to_inclusive: bool,
	) -> Result<Traversal, InvalidRangeError> {
		if self.comparator().compare(from, to).is_gt() {
			return Err(InvalidRangeError);
		}

		Ok(self.view(inclusive_bound(from, from_inclusive), inclusive_bound(to, to_inclusive)))
	}

	/// Returns a fail-fast [`Traversal`] over every entry whose key is
	/// less than `to` (or equal to it if `inclusive`), in ascending order.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(1, ()), (3, ()), (5, ())]);
	///
	/// let mut view = map.head_view(&3, true);
	///
	/// assert_eq!(view.iter(&map).count(), 2);
	/// ```
	pub fn head_view(&self, to: &K, inclusive: bool) -> Traversal {
		self.view(Bound::Unbounded, inclusive_bound(to, inclusive))
	}

	/// Returns a fail-fast [`Traversal`] over every entry whose key is
	/// greater than `from` (or equal to it if `inclusive`), in ascending
	/// order.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(1, ()), (3, ()), (5, ())]);
	///
	/// let mut view = map.tail_view(&3, false);
	///
	/// assert_eq!(view.advance(&map), Some(Ok((&5, &()))));
	/// assert_eq!(view.advance(&map), None);
	/// ```
	pub fn tail_view(&self, from: &K, inclusive: bool) -> Traversal {
		self.view(inclusive_bound(from, inclusive), Bound::Unbounded)
	}

	fn view(&self, start: Bound<&K>, end: Bound<&K>) -> Traversal {
		Traversal::new(&self.tree, self.tree.window(start, end))
	}
}

fn inclusive_bound<K>(key: &K, inclusive: bool) -> Bound<&K> {
	match inclusive {
		true => Bound::Included(key),
		false => Bound::Excluded(key),
	}
}

// Trait Impls ==========================

impl<K, V, C> Default for OrderedMap<K, V, C>
where
	C: Default,
{
	fn default() -> Self {
		OrderedMap::with_comparator(C::default())
	}
}

impl<K, V, C> fmt::Debug for OrderedMap<K, V, C>
where
	K: fmt::Debug,
	V: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

impl<K, V, C> PartialEq for OrderedMap<K, V, C>
where
	K: PartialEq,
	V: PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && itertools::equal(self.iter(), other.iter())
	}
}

impl<K, V, C> Eq for OrderedMap<K, V, C>
where
	K: Eq,
	V: Eq,
{
}

impl<K, V, C> Index<&K> for OrderedMap<K, V, C>
where
	C: Comparator<K>,
{
	type Output = V;

	/// # Panics
	///
	/// Panics if the key is not present in the map.
	fn index(&self, key: &K) -> &V {
		self.get(key).expect("key not found in OrderedMap")
	}
}

impl<K, V, C> Extend<(K, V)> for OrderedMap<K, V, C>
where
	C: Comparator<K>,
{
	fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
		for (key, value) in iter {
			self.insert(key, value);
		}
	}
}

impl<K, V, C> FromIterator<(K, V)> for OrderedMap<K, V, C>
where
	C: Comparator<K> + Default,
{
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		let mut map = OrderedMap::default();
		map.extend(iter);
		map
	}
}

impl<K, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V, NaturalOrder>
where
	K: Ord,
{
	fn from(entries: [(K, V); N]) -> Self {
		let mut map = OrderedMap::with_capacity(N);
		map.extend(entries);
		map
	}
}

impl<K, V, C> IntoIterator for OrderedMap<K, V, C> {
	type Item = (K, V);
	type IntoIter = IntoIter<K, V>;
	fn into_iter(self) -> Self::IntoIter {
		IntoIter {
			inner: self.tree.into_sorted_vec().into_iter(),
		}
	}
}

impl<'a, K, V, C> IntoIterator for &'a OrderedMap<K, V, C> {
	type Item = (&'a K, &'a V);
	type IntoIter = Iter<'a, K, V>;
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, K, V, C> IntoIterator for &'a mut OrderedMap<K, V, C> {
	type Item = (&'a K, &'a mut V);
	type IntoIter = IterMut<'a, K, V>;
	fn into_iter(self) -> Self::IntoIter {
		self.iter_mut()
	}
}

// Iterators ============================

/// An iterator over a range of entries of an [`OrderedMap`].
///
/// This `struct` is created by the [`range`] method on [`OrderedMap`].
/// See its documentation for more.
///
/// [`range`]: OrderedMap::range
pub struct Range<'a, K, V> {
	nodes: &'a [Node<K, V>],
	front: Option<NodeId>,
	back: Option<NodeId>,
}

impl<'a, K, V> Range<'a, K, V> {
	fn new(nodes: &'a [Node<K, V>], window: Option<(NodeId, NodeId)>) -> Self {
		Range {
			nodes,
			front: window.map(|(front, _)| front),
			back: window.map(|(_, back)| back),
		}
	}

	fn entry(&self, id: NodeId) -> (&'a K, &'a V) {
		let node = &self.nodes[id];
		(&node.key, &node.value)
	}
}

impl<K, V> Clone for Range<'_, K, V> {
	fn clone(&self) -> Self {
		Range {
			nodes: self.nodes,
			front: self.front,
			back: self.back,
		}
	}
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
	type Item = (&'a K, &'a V);
	fn next(&mut self) -> Option<Self::Item> {
		let front = self.front?;
		if self.back == Some(front) {
			self.front = None;
			self.back = None;
		} else {
			self.front = successor(self.nodes, front);
		}
		Some(self.entry(front))
	}
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
	fn next_back(&mut self) -> Option<Self::Item> {
		let back = self.back?;
		if self.front == Some(back) {
			self.front = None;
			self.back = None;
		} else {
			self.back = predecessor(self.nodes, back);
		}
		Some(self.entry(back))
	}
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

/// An iterator over the entries of an [`OrderedMap`].
///
/// This `struct` is created by the [`iter`] method on [`OrderedMap`].
/// See its documentation for more.
///
/// [`iter`]: OrderedMap::iter
pub struct Iter<'a, K, V> {
	range: Range<'a, K, V>,
	remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
	fn clone(&self) -> Self {
		Iter {
			range: self.range.clone(),
			remaining: self.remaining,
		}
	}
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
	type Item = (&'a K, &'a V);
	fn next(&mut self) -> Option<Self::Item> {
		let entry = self.range.next()?;
		self.remaining -= 1;
		Some(entry)
	}
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
	fn next_back(&mut self) -> Option<Self::Item> {
		let entry = self.range.next_back()?;
		self.remaining -= 1;
		Some(entry)
	}
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of an [`OrderedMap`].
///
/// This `struct` is created by the [`iter_mut`] method on [`OrderedMap`].
/// See its documentation for more.
///
/// [`iter_mut`]: OrderedMap::iter_mut
pub struct IterMut<'a, K, V> {
	inner: alloc::vec::IntoIter<(&'a K, &'a mut V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
	type Item = (&'a K, &'a mut V);
	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next()
	}
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.inner.next_back()
	}
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of an [`OrderedMap`].
///
/// This `struct` is created by the [`keys`] method on [`OrderedMap`].
///
/// [`keys`]: OrderedMap::keys
pub struct Keys<'a, K, V> {
	inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
	fn clone(&self) -> Self {
		Keys {
			inner: self.inner.clone(),
		}
	}
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
	type Item = &'a K;
	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|(key, _)| key)
	}
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.inner.next_back().map(|(key, _)| key)
	}
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of an [`OrderedMap`].
///
/// This `struct` is created by the [`values`] method on [`OrderedMap`].
///
/// [`values`]: OrderedMap::values
pub struct Values<'a, K, V> {
	inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Values<'_, K, V> {
	fn clone(&self) -> Self {
		Values {
			inner: self.inner.clone(),
		}
	}
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
	type Item = &'a V;
	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|(_, value)| value)
	}
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.inner.next_back().map(|(_, value)| value)
	}
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of an [`OrderedMap`].
///
/// This `struct` is created by the [`values_mut`] method on
/// [`OrderedMap`].
///
/// [`values_mut`]: OrderedMap::values_mut
pub struct ValuesMut<'a, K, V> {
	inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
	type Item = &'a mut V;
	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|(_, value)| value)
	}
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.inner.next_back().map(|(_, value)| value)
	}
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// An owning iterator over the entries of an [`OrderedMap`].
///
/// This `struct` is created by the [`into_iter`] method on
/// [`OrderedMap`] (provided by the [`IntoIterator`] trait). See
/// its documentation for more.
///
/// [`into_iter`]: IntoIterator::into_iter
/// [`IntoIterator`]: core::iter::IntoIterator
pub struct IntoIter<K, V> {
	inner: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
	type Item = (K, V);
	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next()
	}
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.inner.next_back()
	}
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

#[cfg(feature = "serde")]
mod serde {
	use core::marker::PhantomData;

	use serde::de::{SeqAccess, Visitor};
	use serde::ser::SerializeSeq;
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use crate::{Comparator, OrderedMap};

	impl<K, V, C> Serialize for OrderedMap<K, V, C>
	where
		K: Serialize,
		V: Serialize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			let mut seq = serializer.serialize_seq(Some(self.len()))?;
			for (key, value) in self.iter() {
				seq.serialize_element(&(key, value))?;
			}
			seq.end()
		}
	}

	impl<'de, K, V, C> Deserialize<'de> for OrderedMap<K, V, C>
	where
		K: Deserialize<'de>,
		V: Deserialize<'de>,
		C: Comparator<K> + Default,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			deserializer.deserialize_seq(OrderedMapVisitor {
				k: PhantomData,
				v: PhantomData,
				c: PhantomData,
			})
		}
	}

	struct OrderedMapVisitor<K, V, C> {
		k: PhantomData<K>,
		v: PhantomData<V>,
		c: PhantomData<C>,
	}

	impl<'de, K, V, C> Visitor<'de> for OrderedMapVisitor<K, V, C>
	where
		K: Deserialize<'de>,
		V: Deserialize<'de>,
		C: Comparator<K> + Default,
	{
		type Value = OrderedMap<K, V, C>;

		fn expecting(
			&self,
			formatter: &mut core::fmt::Formatter,
		) -> core::fmt::Result {
			formatter.write_str("an OrderedMap")
		}

		fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
		where
			A: SeqAccess<'de>,
		{
			let mut map = OrderedMap::with_capacity_and_comparator(
				access.size_hint().unwrap_or(0),
				C::default(),
			);
			while let Some((key, value)) = access.next_element()? {
				map.insert(key, value);
			}
			Ok(map)
		}
	}
}

#[cfg(test)]
mod tests {
	use alloc::collections::BTreeMap;
	use alloc::vec::Vec;
	use core::cmp::Ordering;

	use pretty_assertions::assert_eq;
	use proptest::prelude::*;
	use rand::seq::SliceRandom;
	use rand::thread_rng;

	use super::*;
	use crate::comparator::Reversed;

	fn basic() -> OrderedMap<i32, char> {
		OrderedMap::from([
			(5, 'e'),
			(3, 'c'),
			(8, 'h'),
			(1, 'a'),
			(4, 'd'),
			(7, 'g'),
			(9, 'i'),
		])
	}

	fn keys_of<V, C>(map: &OrderedMap<i32, V, C>) -> Vec<i32> {
		map.keys().copied().collect()
	}

	#[test]
	fn insert_then_traverse_is_sorted() {
		let mut map = basic();
		map.tree.check_invariants().unwrap();
		assert_eq!(keys_of(&map), [1, 3, 4, 5, 7, 8, 9]);

		assert!(map.remove(&5));
		map.tree.check_invariants().unwrap();
		assert_eq!(keys_of(&map), [1, 3, 4, 7, 8, 9]);
	}

	#[test]
	fn overwrite_keeps_size() {
		let mut map = basic();
		assert_eq!(map.insert(4, 'x'), false);
		assert_eq!(map.insert(4, 'y'), false);
		assert_eq!(map.len(), 7);
		assert_eq!(map.get(&4), Some(&'y'));
		assert_eq!(map[&4], 'y');
	}

	#[test]
	fn remove_missing_key() {
		let mut map = basic();
		assert_eq!(map.remove(&6), false);
		assert_eq!(map.len(), 7);

		let mut empty = OrderedMap::<i32, ()>::new();
		assert_eq!(empty.remove(&6), false);
	}

	#[test]
	fn first_and_last_keys() {
		let mut map = basic();
		assert_eq!(map.first_key(), Ok(&1));
		assert_eq!(map.last_key(), Ok(&9));

		map.clear();
		assert_eq!(map.first_key(), Err(EmptyError));
		assert_eq!(map.last_key(), Err(EmptyError));
		assert_eq!(map.first_key_value(), None);
	}

	#[test]
	fn nearest_key_queries() {
		let map = OrderedMap::from([(1, ()), (3, ()), (5, ())]);

		assert_eq!(map.floor_key(&4), Some(&3));
		assert_eq!(map.ceiling_key(&4), Some(&5));
		assert_eq!(map.floor_key(&0), None);
		assert_eq!(map.ceiling_key(&6), None);

		assert_eq!(map.lower_key(&3), Some(&1));
		assert_eq!(map.higher_key(&3), Some(&5));
		assert_eq!(map.lower_key(&1), None);
		assert_eq!(map.higher_key(&5), None);
		assert_eq!(map.lower_key(&100), Some(&5));
		assert_eq!(map.higher_key(&-100), Some(&1));
	}

	#[test]
	fn range_view_half_open() {
		let map = OrderedMap::from([(1, ()), (3, ()), (5, ()), (7, ()), (9, ())]);
		let mut view = map.range_view(&3, true, &7, false).unwrap();

		assert_eq!(
			view.iter(&map)
				.map(|step| step.map(|(key, _)| *key))
				.collect::<Result<Vec<_>, _>>(),
			Ok(alloc::vec![3, 5])
		);
	}

	#[test]
	fn range_view_flags() {
		let map = OrderedMap::from([(1, ()), (3, ()), (5, ()), (7, ()), (9, ())]);
		let collect = |from, from_inclusive, to, to_inclusive| {
			let mut view = map
				.range_view(&from, from_inclusive, &to, to_inclusive)
				.unwrap();
			view.iter(&map)
				.map(|step| step.map(|(key, _)| *key))
				.collect::<Result<Vec<i32>, _>>()
				.unwrap()
		};

		assert_eq!(collect(3, true, 7, true), [3, 5, 7]);
		assert_eq!(collect(3, false, 7, false), [5]);
		assert_eq!(collect(3, false, 5, false), Vec::<i32>::new());
		assert_eq!(collect(5, false, 5, false), Vec::<i32>::new());
		assert_eq!(collect(5, true, 5, true), [5]);
		assert_eq!(collect(0, true, 100, true), [1, 3, 5, 7, 9]);
		assert_eq!(
			map.range_view(&6, true, &2, true),
			Err(InvalidRangeError)
		);
	}

	#[test]
	fn head_and_tail_views() {
		let map = OrderedMap::from([(1, ()), (3, ()), (5, ())]);
		let keys = |mut view: Traversal| {
			view.iter(&map)
				.map(|step| step.map(|(key, _)| *key))
				.collect::<Result<Vec<i32>, _>>()
				.unwrap()
		};

		assert_eq!(keys(map.head_view(&3, false)), [1]);
		assert_eq!(keys(map.head_view(&3, true)), [1, 3]);
		assert_eq!(keys(map.tail_view(&3, false)), [5]);
		assert_eq!(keys(map.tail_view(&0, false)), [1, 3, 5]);
		assert_eq!(keys(map.tail_view(&6, true)), Vec::<i32>::new());
	}

	#[test]
	fn borrowing_range_matches_btreemap() {
		let map = basic();
		let reference = map
			.iter()
			.map(|(key, value)| (*key, *value))
			.collect::<BTreeMap<_, _>>();

		for start in 0..11 {
			for end in start..11 {
				assert_eq!(
					map.range(start..end).collect::<Vec<_>>(),
					reference.range(start..end).collect::<Vec<_>>()
				);
				assert_eq!(
					map.range(start..=end).rev().collect::<Vec<_>>(),
					reference.range(start..=end).rev().collect::<Vec<_>>()
				);
			}
		}
		assert_eq!(map.range(..).count(), 7);
	}

	#[test]
	#[should_panic]
	fn borrowing_range_panics_on_crossed_bounds() {
		#[allow(clippy::reversed_empty_ranges)]
		let _ = basic().range(6..2);
	}

	#[test]
	fn double_ended_iter_meets_in_middle() {
		let map = basic();
		let mut iter = map.iter();

		assert_eq!(iter.len(), 7);
		assert_eq!(iter.next(), Some((&1, &'a')));
		assert_eq!(iter.next_back(), Some((&9, &'i')));
		assert_eq!(iter.len(), 5);
		assert_eq!(
			iter.rev().map(|(key, _)| *key).collect::<Vec<_>>(),
			[8, 7, 5, 4, 3]
		);
	}

	#[test]
	fn iter_mut_and_values_mut() {
		let mut map = basic();
		for (key, value) in map.iter_mut() {
			if *key % 2 == 0 {
				*value = '_';
			}
		}
		for value in map.values_mut() {
			value.make_ascii_uppercase();
		}

		assert_eq!(
			map.values().collect::<alloc::string::String>(),
			"AC_EG_I"
		);
	}

	#[test]
	fn value_iterators_run_both_ways() {
		let mut map = OrderedMap::from([(1, 10), (2, 20), (3, 30)]);

		let mut rank = 0;
		for value in map.values_mut().rev() {
			rank += 1;
			*value += rank;
		}

		let values = map.values();
		assert_eq!(values.clone().copied().collect::<Vec<_>>(), [13, 22, 31]);
		assert_eq!(values.rev().copied().collect::<Vec<_>>(), [31, 22, 13]);

		let mut values_mut = map.values_mut();
		assert_eq!(values_mut.next_back(), Some(&mut 31));
		assert_eq!(values_mut.next(), Some(&mut 13));
		assert_eq!(values_mut.len(), 1);
	}

	#[cfg(feature = "serde")]
	#[test]
	fn serde_round_trip_keeps_comparator_order() {
		use alloc::string::{String, ToString};

		let map: OrderedMap<i32, String, Reversed<NaturalOrder>> = [(1, "a"), (3, "c"), (2, "b")]
			.into_iter()
			.map(|(key, value)| (key, value.to_string()))
			.collect();

		let json = serde_json::to_string(&map).unwrap();
		assert_eq!(json, r#"[[3,"c"],[2,"b"],[1,"a"]]"#);

		let back: OrderedMap<i32, String, Reversed<NaturalOrder>> =
			serde_json::from_str(&json).unwrap();
		back.tree.check_invariants().unwrap();
		assert_eq!(back, map);
		assert_eq!(back.first_key(), Ok(&3));
	}

	#[cfg(feature = "serde")]
	#[test]
	fn serde_duplicate_keys_keep_last_value() {
		use alloc::string::String;

		let map: OrderedMap<i32, String> =
			serde_json::from_str(r#"[[1,"a"],[2,"x"],[1,"b"]]"#).unwrap();

		assert_eq!(map.len(), 2);
		assert_eq!(map.get(&1).map(String::as_str), Some("b"));
		assert_eq!(map.get(&2).map(String::as_str), Some("x"));
	}

	#[test]
	fn pops_drain_in_order() {
		let mut map = basic();
		assert_eq!(map.pop_first(), Some((1, 'a')));
		assert_eq!(map.pop_last(), Some((9, 'i')));
		map.tree.check_invariants().unwrap();
		assert_eq!(
			map.into_iter().collect::<Vec<_>>(),
			[(3, 'c'), (4, 'd'), (5, 'e'), (7, 'g'), (8, 'h')]
		);
	}

	#[test]
	fn custom_comparator_orders_keys() {
		let mut map = OrderedMap::with_comparator(|a: &&str, b: &&str| {
			a.len().cmp(&b.len()).then_with(|| a.cmp(b))
		});
		map.extend([("ccc", 3), ("a", 1), ("bb", 2), ("aa", 20)]);

		assert_eq!(
			map.keys().copied().collect::<Vec<_>>(),
			["a", "aa", "bb", "ccc"]
		);
		assert_eq!(map.floor_key(&"zz"), Some(&"bb"));

		let reversed: OrderedMap<i32, (), Reversed<NaturalOrder>> =
			(0..5).map(|x| (x, ())).collect();
		assert_eq!(keys_of(&reversed), [4, 3, 2, 1, 0]);
		assert_eq!(reversed.first_key(), Ok(&4));
		assert_eq!(reversed.ceiling_key(&10), Some(&4));
	}

	#[test]
	fn comparator_equal_keys_keep_first_key() {
		let mut map = OrderedMap::with_comparator(|a: &(i32, char), b: &(i32, char)| {
			a.0.cmp(&b.0)
		});
		assert!(map.insert((1, 'x'), "first"));
		assert!(!map.insert((1, 'y'), "second"));

		assert_eq!(map.first_key_value(), Some((&(1, 'x'), &"second")));
		assert_eq!(map.comparator()(&(1, 'a'), &(2, 'a')), Ordering::Less);
	}

	#[test]
	fn equality_and_debug() {
		let a = basic();
		let mut b = OrderedMap::new();
		for (key, value) in a.iter().rev() {
			b.insert(*key, *value);
		}
		assert_eq!(a, b);

		b.insert(100, 'z');
		assert!(a != b);

		let small = OrderedMap::from([(2, 'b'), (1, 'a')]);
		assert_eq!(alloc::format!("{small:?}"), "{1: 'a', 2: 'b'}");
	}

	#[test]
	fn clear_then_reuse() {
		let mut map = basic();
		map.clear();
		assert!(map.is_empty());
		assert_eq!(map.height(), 0);

		map.insert(1, 'a');
		map.tree.check_invariants().unwrap();
		assert_eq!(map.len(), 1);
	}

	const MAX_OPERATIONS: usize = 10_000;

	#[derive(Debug, Clone)]
	enum Operation {
		Insert(u16, u32),
		Remove(u16),
	}

	fn operation() -> impl Strategy<Value = Operation> {
		prop_oneof![
			3 => (0..2000u16, any::<u32>())
				.prop_map(|(key, value)| Operation::Insert(key, value)),
			2 => (0..2000u16).prop_map(Operation::Remove),
		]
	}

	fn height_bound(len: usize) -> usize {
		// floor(2 * log2(len + 1)), computed without floats
		(0..).take_while(|h| 1u128 << h <= (len as u128 + 1).pow(2)).last().unwrap_or(0)
	}

	#[test]
	fn height_bound_helper() {
		assert_eq!(height_bound(0), 0);
		assert_eq!(height_bound(1), 2);
		assert_eq!(height_bound(3), 4);
		assert_eq!(height_bound(1024), 20);
	}

	proptest!(
		#![proptest_config(ProptestConfig::with_cases(24))]

		#[test]
		fn random_operations_keep_invariants(
			operations in proptest::collection::vec(operation(), 0..MAX_OPERATIONS)
		) {
			let mut map = OrderedMap::new();
			let mut reference = BTreeMap::new();

			for (step, operation) in operations.into_iter().enumerate() {
				match operation {
					Operation::Insert(key, value) => {
						prop_assert_eq!(
							map.insert(key, value),
							reference.insert(key, value).is_none()
						);
					}
					Operation::Remove(key) => {
						prop_assert_eq!(
							map.remove(&key),
							reference.remove(&key).is_some()
						);
					}
				}

				if step % 500 == 0 {
					prop_assert!(map.tree.check_invariants().is_ok());
				}
				if step % 50 == 0 {
					prop_assert!(map.height() <= height_bound(map.len()));
				}
			}

			prop_assert!(map.tree.check_invariants().is_ok());
			prop_assert!(map.height() <= height_bound(map.len()));
			prop_assert_eq!(map.len(), map.iter().count());
			prop_assert!(map.iter().map(|(k, v)| (*k, *v)).eq(reference.into_iter()));
		}
	);

	proptest!(
		#![proptest_config(ProptestConfig::with_cases(256))]

		#[test]
		fn insert_get(
			mut inserts in proptest::collection::vec(0..10000i32, 0..1000),
			access in proptest::collection::vec(0..10000i32, 0..10)
		) {
			let reference = inserts.iter().map(|v| (*v, *v)).collect::<BTreeMap<_, _>>();
			let map = inserts.iter().map(|v| (*v, *v)).collect::<OrderedMap<_, _>>();
			prop_assert!(map.tree.check_invariants().is_ok());

			inserts.shuffle(&mut thread_rng());
			for key in inserts.iter().chain(access.iter()) {
				prop_assert_eq!(reference.get_key_value(key), map.get_key_value(key));
			}
		}

		#[test]
		fn nearest_keys_match_btreemap(
			inserts in proptest::collection::btree_set(0..1000i32, 0..200),
			probes in proptest::collection::vec(-10..1010i32, 0..50)
		) {
			let map = inserts.iter().map(|v| (*v, ())).collect::<OrderedMap<_, _>>();

			for probe in probes {
				prop_assert_eq!(map.floor_key(&probe), inserts.range(..=probe).next_back());
				prop_assert_eq!(map.lower_key(&probe), inserts.range(..probe).next_back());
				prop_assert_eq!(map.ceiling_key(&probe), inserts.range(probe..).next());
				prop_assert_eq!(
					map.higher_key(&probe),
					inserts.range((Bound::Excluded(probe), Bound::Unbounded)).next()
				);
			}
		}

		#[test]
		fn shuffled_removal_empties_map(
			inserts in proptest::collection::hash_set(0..10000i32, 0..500)
		) {
			let mut map = inserts.iter().map(|v| (*v, *v)).collect::<OrderedMap<_, _>>();

			let mut inserts = inserts.into_iter().collect::<Vec<_>>();
			inserts.shuffle(&mut thread_rng());
			for key in inserts {
				prop_assert_eq!(map.remove_entry(&key), Some((key, key)));
				prop_assert!(map.tree.check_invariants().is_ok());
			}
			prop_assert!(map.is_empty());
		}
	);
}
