//! A module containing [`OrderedMap`](map::OrderedMap) and
//! [`OrderedSet`](set::OrderedSet) along with their iterators.

pub mod map;
pub mod set;
