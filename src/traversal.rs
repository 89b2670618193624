//! A module containing [`Traversal`] and [`SetTraversal`], the fail-fast
//! sequences produced by [`OrderedMap::iterate()`],
//! [`OrderedMap::range_view()`] and their [`OrderedSet`] equivalents.
//!
//! Unlike [`OrderedMap::iter()`], a traversal does not borrow the
//! collection between steps, so the collection can be modified while a
//! traversal is in progress. Every step checks the collection's
//! structural modification counter against the one captured when the
//! traversal was created and reports a [`ConcurrentModificationError`]
//! instead of producing entries from a tree that has changed shape.
//!
//! Overwriting the value of an existing key is not a structural
//! modification and does not invalidate traversals.
//!
//! A traversal must be advanced with the collection that created it.

use core::fmt;
use core::iter::FusedIterator;

use log::debug;

use crate::tree::{successor, NodeId, RawTree};
use crate::{OrderedMap, OrderedSet};

/// The error returned by a [`Traversal`] step when the collection was
/// structurally modified after the traversal was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcurrentModificationError {
	/// The modification counter captured when the traversal was created.
	pub expected: u64,
	/// The modification counter found on the collection at this step.
	pub found: u64,
}

impl fmt::Display for ConcurrentModificationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"collection was structurally modified during traversal (expected modification count {}, found {})",
			self.expected, self.found
		)
	}
}

impl core::error::Error for ConcurrentModificationError {}

/// A lazy, restartable, fail-fast sequence of entries from an
/// [`OrderedMap`] in ascending order.
///
/// A `Traversal` only records where it is in the tree, nothing is copied
/// when it is created.
///
/// # Examples
/// ```
/// use rbmap::{ConcurrentModificationError, OrderedMap};
///
/// let mut map = OrderedMap::from([(1, "a"), (2, "b"), (3, "c")]);
///
/// let mut traversal = map.iterate();
/// assert_eq!(traversal.advance(&map), Some(Ok((&1, &"a"))));
///
/// map.insert(4, "d");
///
/// assert!(matches!(
/// 	traversal.advance(&map),
/// 	Some(Err(ConcurrentModificationError { .. }))
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
	// first and last node of the window, `None` for an empty window
	window: Option<(NodeId, NodeId)>,
	next: Option<NodeId>,
	expected: u64,
}

impl Traversal {
	pub(crate) fn new<K, V, C>(
		tree: &RawTree<K, V, C>,
		window: Option<(NodeId, NodeId)>,
	) -> Self {
		Traversal {
			window,
			next: window.map(|(front, _)| front),
			expected: tree.mod_count(),
		}
	}

	/// Produces the next entry of the traversal.
	///
	/// Returns `None` once the traversal is exhausted, and
	/// `Some(Err(ConcurrentModificationError))` if `map` was
	/// structurally modified since the traversal was created.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(1, true), (2, false)]);
	/// let mut traversal = map.iterate();
	///
	/// assert_eq!(traversal.advance(&map), Some(Ok((&1, &true))));
	/// assert_eq!(traversal.advance(&map), Some(Ok((&2, &false))));
	/// assert_eq!(traversal.advance(&map), None);
	/// ```
	pub fn advance<'a, K, V, C>(
		&mut self,
		map: &'a OrderedMap<K, V, C>,
	) -> Option<Result<(&'a K, &'a V), ConcurrentModificationError>> {
		self.advance_raw(&map.tree)
	}

	pub(crate) fn advance_raw<'a, K, V, C>(
		&mut self,
		tree: &'a RawTree<K, V, C>,
	) -> Option<Result<(&'a K, &'a V), ConcurrentModificationError>> {
		let current = self.next?;

		let found = tree.mod_count();
		if found != self.expected || current >= tree.len() {
			debug!(
				"traversal invalidated: expected modification count {}, found {found}",
				self.expected
			);
			return Some(Err(ConcurrentModificationError {
				expected: self.expected,
				found,
			}));
		}

		self.next = match self.window {
			Some((_, back)) if back != current => {
				successor(tree.nodes(), current)
			}
			_ => None,
		};

		Some(Ok(tree.entry(current)))
	}

	/// Moves the traversal back to the start of its window.
	///
	/// Restarting does not forgive structural modifications, a traversal
	/// over a modified collection keeps failing.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(1, ()), (2, ())]);
	/// let mut traversal = map.iterate();
	///
	/// while let Some(_) = traversal.advance(&map) {}
	/// assert!(traversal.is_exhausted());
	///
	/// traversal.restart();
	/// assert_eq!(traversal.advance(&map), Some(Ok((&1, &()))));
	/// ```
	pub fn restart(&mut self) {
		self.next = self.window.map(|(front, _)| front);
	}

	/// Returns `true` if there are no more entries to produce.
	pub fn is_exhausted(&self) -> bool {
		self.next.is_none()
	}

	/// Borrows `map` and adapts the rest of this traversal into an
	/// [`Iterator`].
	///
	/// The iterator stops after the first error.
	///
	/// # Examples
	/// ```
	/// use rbmap::OrderedMap;
	///
	/// let map = OrderedMap::from([(1, 'a'), (3, 'b'), (5, 'c'), (7, 'd')]);
	///
	/// let mut view = map.range_view(&3, true, &7, false).unwrap();
	///
	/// assert_eq!(
	/// 	view.iter(&map).collect::<Result<Vec<_>, _>>(),
	/// 	Ok(vec![(&3, &'b'), (&5, &'c')])
	/// );
	/// ```
	pub fn iter<'t, 'a, K, V, C>(
		&'t mut self,
		map: &'a OrderedMap<K, V, C>,
	) -> TraversalIter<'t, 'a, K, V, C> {
		TraversalIter {
			traversal: self,
			map,
			failed: false,
		}
	}
}

/// An iterator driving a [`Traversal`] over a borrowed [`OrderedMap`].
///
/// This `struct` is created by the [`Traversal::iter()`] method. See its
/// documentation for more.
pub struct TraversalIter<'t, 'a, K, V, C> {
	traversal: &'t mut Traversal,
	map: &'a OrderedMap<K, V, C>,
	failed: bool,
}

impl<'a, K, V, C> Iterator for TraversalIter<'_, 'a, K, V, C> {
	type Item = Result<(&'a K, &'a V), ConcurrentModificationError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}

		let step = self.traversal.advance(self.map);
		self.failed = matches!(step, Some(Err(_)));
		step
	}
}

impl<K, V, C> FusedIterator for TraversalIter<'_, '_, K, V, C> {}

/// The [`OrderedSet`] version of [`Traversal`], producing keys only.
///
/// # Examples
/// ```
/// use rbmap::OrderedSet;
///
/// let mut set = OrderedSet::from([1, 2, 3]);
/// let mut traversal = set.iterate();
///
/// assert_eq!(traversal.advance(&set), Some(Ok(&1)));
///
/// set.remove(&3);
///
/// assert!(traversal.advance(&set).unwrap().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetTraversal {
	pub(crate) inner: Traversal,
}

impl SetTraversal {
	/// See [`Traversal::advance()`] for more details.
	pub fn advance<'a, K, C>(
		&mut self,
		set: &'a OrderedSet<K, C>,
	) -> Option<Result<&'a K, ConcurrentModificationError>> {
		self.inner
			.advance_raw(&set.inner.tree)
			.map(|step| step.map(|(key, _)| key))
	}

	/// See [`Traversal::restart()`] for more details.
	pub fn restart(&mut self) {
		self.inner.restart()
	}

	/// See [`Traversal::is_exhausted()`] for more details.
	pub fn is_exhausted(&self) -> bool {
		self.inner.is_exhausted()
	}
}
