//! This crate provides [`OrderedMap`] and [`OrderedSet`], Data
//! Structures for storing keys in a user-chosen order based off an
//! arena-backed red-black tree.
//!
//! ## Example using the natural ordering
//!
//! ```rust
//! use rbmap::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//!
//! map.insert(5, "e");
//! map.insert(3, "c");
//! map.insert(8, "h");
//!
//! assert_eq!(map.len(), 3);
//! assert_eq!(map.floor_key(&4), Some(&3));
//! assert_eq!(map.higher_key(&5), Some(&8));
//!
//! for (key, value) in map.iter() {
//! 	println!("{key}: {value}");
//! }
//! ```
//!
//! ## Example using a custom comparator
//!
//! ```rust
//! use rbmap::OrderedSet;
//!
//! // Case-insensitive ordering of names
//! let mut names = OrderedSet::with_comparator(|a: &&str, b: &&str| {
//! 	a.to_lowercase().cmp(&b.to_lowercase())
//! });
//!
//! names.insert("ferris");
//! names.insert("Corro");
//!
//! // Equal under the comparator so this is not added
//! assert_eq!(names.insert("FERRIS"), false);
//!
//! assert_eq!(
//! 	names.iter().copied().collect::<Vec<_>>(),
//! 	["Corro", "ferris"]
//! );
//! ```
//!
//! ## Key Understandings and Philosophies:
//!
//! ### Comparators
//!
//! Every map and set is ordered by a [`Comparator`], which defaults to
//! [`NaturalOrder`] (the key type's [`Ord`] implementation). Any
//! `Fn(&K, &K) -> Ordering` closure is a comparator, and [`Reversed`]
//! flips an existing one. Two keys are the same key whenever the
//! comparator says they are [`Equal`](core::cmp::Ordering::Equal), even
//! if they differ otherwise.
//!
//! ### Borrowing iterators and fail-fast traversals
//!
//! There are two ways to walk over the entries of a collection.
//! [`OrderedMap::iter()`] and [`OrderedMap::range()`] borrow the map, so
//! the compiler rules out modification while they are alive.
//! [`OrderedMap::iterate()`] and [`OrderedMap::range_view()`] instead
//! return a [`Traversal`] which holds no borrow between steps. Each step
//! checks that the map has not been structurally modified (an insert of
//! a new key, a successful removal, or a clear) and reports a
//! [`ConcurrentModificationError`] if it has.
//!
//! ### Errors
//!
//! Asking an empty collection for its first or last key gives an
//! [`EmptyError`], and asking for a range view whose start key orders
//! after its end key gives an [`InvalidRangeError`]. Looking up a key
//! that is not present is not an error and gives `None`.
//!
//! ### Logging
//!
//! This crate reports through the [`log`] facade: rebalancing statistics
//! at `trace` level and invalidated traversals at `debug` level. Nothing
//! is printed unless the application installs a logger.
//!
//! # Crate Features
//!
//! By default this crate has no dependency on `std`.
//!
//! - `serde`: adds [`Serialize`] and [`Deserialize`] implementations for
//!   both collections. Deserializing requires a comparator which
//!   implements [`Default`].
//!
//! [`Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
//! [`Deserialize`]: https://docs.rs/serde/latest/serde/trait.Deserialize.html
//! [`log`]: https://docs.rs/log

#![no_std]
#![allow(clippy::tabs_in_doc_comments)]
#![allow(clippy::needless_return)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub(crate) mod tree;
pub(crate) mod utils;

pub mod comparator;
pub mod ordered;
pub mod traversal;

pub use crate::comparator::{Comparator, NaturalOrder, Reversed};
pub use crate::ordered::map::{EmptyError, InvalidRangeError, OrderedMap};
pub use crate::ordered::set::OrderedSet;
pub use crate::traversal::{
	ConcurrentModificationError, SetTraversal, Traversal,
};
