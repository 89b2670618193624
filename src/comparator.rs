//! A module containing the [`Comparator`] capability used to order the
//! keys of an [`OrderedMap`](crate::OrderedMap).
//!
//! A comparator must describe a strict weak ordering over the keys, that
//! is it must be antisymmetric and transitive. This is not checked: an
//! inconsistent comparator never causes memory unsafety or a broken tree
//! shape, but lookups may then fail to find keys which are in the map.

use core::cmp::Ordering;

/// The ordering function a map or set is built around.
///
/// A blanket implementation is provided for every
/// `Fn(&K, &K) -> Ordering` so closures can be used directly.
///
/// # Examples
/// ```
/// use core::cmp::Ordering;
///
/// use rbmap::{Comparator, OrderedMap};
///
/// struct ByLength;
///
/// impl Comparator<&str> for ByLength {
/// 	fn compare(&self, a: &&str, b: &&str) -> Ordering {
/// 		a.len().cmp(&b.len())
/// 	}
/// }
///
/// let mut map = OrderedMap::with_comparator(ByLength);
/// map.insert("three", 3);
/// map.insert("a", 1);
///
/// assert_eq!(map.first_key(), Ok(&"a"));
/// ```
pub trait Comparator<K: ?Sized> {
	/// Compares `a` with `b`.
	fn compare(&self, a: &K, b: &K) -> Ordering;
}

impl<K, F> Comparator<K> for F
where
	K: ?Sized,
	F: Fn(&K, &K) -> Ordering,
{
	fn compare(&self, a: &K, b: &K) -> Ordering {
		self(a, b)
	}
}

/// The default [`Comparator`] which uses the key type's [`Ord`]
/// implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<K> Comparator<K> for NaturalOrder
where
	K: Ord + ?Sized,
{
	fn compare(&self, a: &K, b: &K) -> Ordering {
		a.cmp(b)
	}
}

/// A [`Comparator`] which reverses the ordering of another comparator.
///
/// # Examples
/// ```
/// use rbmap::{NaturalOrder, OrderedSet, Reversed};
///
/// let mut set = OrderedSet::with_comparator(Reversed(NaturalOrder));
/// set.extend([1, 5, 3]);
///
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [5, 3, 1]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<K, C> Comparator<K> for Reversed<C>
where
	K: ?Sized,
	C: Comparator<K>,
{
	fn compare(&self, a: &K, b: &K) -> Ordering {
		self.0.compare(b, a)
	}
}
