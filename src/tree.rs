//! The arena-backed red-black tree shared by
//! [`OrderedMap`](crate::OrderedMap) and [`OrderedSet`](crate::OrderedSet).
//!
//! Nodes live in a dense `Vec` and refer to each other by index. Child
//! links are the owning direction, the parent link is a plain
//! back-reference index so there are no reference cycles to tear down.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::mem;
use core::ops::Bound;

use log::trace;
use smallvec::SmallVec;

use crate::comparator::Comparator;

pub(crate) type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
	Red,
	Black,
}

#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
	pub(crate) key: K,
	pub(crate) value: V,
	color: Color,
	parent: Option<NodeId>,
	left: Option<NodeId>,
	right: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub(crate) struct RawTree<K, V, C> {
	nodes: Vec<Node<K, V>>,
	root: Option<NodeId>,
	comparator: C,
	// bumped on every structural change, never on value overwrites
	mod_count: u64,
}

impl<K, V, C> RawTree<K, V, C> {
	pub(crate) fn with_capacity(capacity: usize, comparator: C) -> Self {
		RawTree {
			nodes: Vec::with_capacity(capacity),
			root: None,
			comparator,
			mod_count: 0,
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.nodes.len()
	}

	pub(crate) fn mod_count(&self) -> u64 {
		self.mod_count
	}

	pub(crate) fn comparator(&self) -> &C {
		&self.comparator
	}

	pub(crate) fn nodes(&self) -> &[Node<K, V>] {
		&self.nodes
	}

	pub(crate) fn entry(&self, id: NodeId) -> (&K, &V) {
		let node = &self.nodes[id];
		(&node.key, &node.value)
	}

	pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut V {
		&mut self.nodes[id].value
	}

	pub(crate) fn first(&self) -> Option<NodeId> {
		self.root.map(|root| leftmost(&self.nodes, root))
	}

	pub(crate) fn last(&self) -> Option<NodeId> {
		self.root.map(|root| rightmost(&self.nodes, root))
	}

	pub(crate) fn clear(&mut self) {
		self.nodes.clear();
		self.root = None;
		self.bump();
	}

	/// The number of nodes on the longest root-to-leaf path.
	pub(crate) fn height(&self) -> usize {
		let mut height = 0;
		let mut stack: SmallVec<[(NodeId, usize); 64]> = SmallVec::new();
		stack.extend(self.root.map(|root| (root, 1)));

		while let Some((id, depth)) = stack.pop() {
			height = height.max(depth);
			let node = &self.nodes[id];
			stack.extend(node.left.map(|left| (left, depth + 1)));
			stack.extend(node.right.map(|right| (right, depth + 1)));
		}

		height
	}

	/// Moves every entry out in ascending order.
	pub(crate) fn into_sorted_vec(self) -> Vec<(K, V)> {
		let order = self.in_order_ids();

		let mut slots = self
			.nodes
			.into_iter()
			.map(|node| Some((node.key, node.value)))
			.collect::<Vec<_>>();

		order
			.into_iter()
			.filter_map(|id| slots[id].take())
			.collect()
	}

	/// Mutable references to every entry in ascending order.
	pub(crate) fn sorted_entries_mut(&mut self) -> Vec<(&K, &mut V)> {
		let order = self.in_order_ids();

		let mut slots = self
			.nodes
			.iter_mut()
			.map(|node| Some((&node.key, &mut node.value)))
			.collect::<Vec<_>>();

		order
			.into_iter()
			.filter_map(|id| slots[id].take())
			.collect()
	}

	fn in_order_ids(&self) -> Vec<NodeId> {
		let mut order = Vec::with_capacity(self.nodes.len());
		let mut current = self.first();
		while let Some(id) = current {
			order.push(id);
			current = successor(&self.nodes, id);
		}
		order
	}

	fn bump(&mut self) {
		self.mod_count = self.mod_count.wrapping_add(1);
	}

	fn is_red(&self, id: Option<NodeId>) -> bool {
		id.is_some_and(|id| self.nodes[id].color == Color::Red)
	}

	fn replace_child(
		&mut self,
		parent: Option<NodeId>,
		old: NodeId,
		new: Option<NodeId>,
	) {
		match parent {
			None => self.root = new,
			Some(parent) if self.nodes[parent].left == Some(old) => {
				self.nodes[parent].left = new
			}
			Some(parent) => self.nodes[parent].right = new,
		}
	}

	fn rotate_left(&mut self, x: NodeId) {
		let y = self.nodes[x]
			.right
			.expect("left rotation requires a right child");
		let middle = self.nodes[y].left;

		self.nodes[x].right = middle;
		if let Some(middle) = middle {
			self.nodes[middle].parent = Some(x);
		}

		let parent = self.nodes[x].parent;
		self.nodes[y].parent = parent;
		self.replace_child(parent, x, Some(y));

		self.nodes[y].left = Some(x);
		self.nodes[x].parent = Some(y);
	}

	fn rotate_right(&mut self, x: NodeId) {
		let y = self.nodes[x]
			.left
			.expect("right rotation requires a left child");
		let middle = self.nodes[y].right;

		self.nodes[x].left = middle;
		if let Some(middle) = middle {
			self.nodes[middle].parent = Some(x);
		}

		let parent = self.nodes[x].parent;
		self.nodes[y].parent = parent;
		self.replace_child(parent, x, Some(y));

		self.nodes[y].right = Some(x);
		self.nodes[x].parent = Some(y);
	}

	fn insert_fixup(&mut self, mut node: NodeId) {
		let mut recolorings = 0;
		let mut rotations = 0;

		while let Some(mut parent) = self.nodes[node]
			.parent
			.filter(|parent| self.nodes[*parent].color == Color::Red)
		{
			// a red node is never the root
			let grandparent = self.nodes[parent]
				.parent
				.expect("red node without a parent");
			let parent_is_left = self.nodes[grandparent].left == Some(parent);
			let uncle = if parent_is_left {
				self.nodes[grandparent].right
			} else {
				self.nodes[grandparent].left
			};

			if let Some(uncle) = uncle.filter(|uncle| self.is_red(Some(*uncle))) {
				self.nodes[parent].color = Color::Black;
				self.nodes[uncle].color = Color::Black;
				self.nodes[grandparent].color = Color::Red;
				recolorings += 3;
				node = grandparent;
				continue;
			}

			if parent_is_left {
				if self.nodes[parent].right == Some(node) {
					self.rotate_left(parent);
					rotations += 1;
					parent = node;
				}
				self.rotate_right(grandparent);
			} else {
				if self.nodes[parent].left == Some(node) {
					self.rotate_right(parent);
					rotations += 1;
					parent = node;
				}
				self.rotate_left(grandparent);
			}
			rotations += 1;

			self.nodes[parent].color = Color::Black;
			self.nodes[grandparent].color = Color::Red;
			recolorings += 2;
			break;
		}

		if let Some(root) = self.root {
			if self.nodes[root].color == Color::Red {
				self.nodes[root].color = Color::Black;
				recolorings += 1;
			}
		}

		debug_assert!(rotations <= 2, "insert fix-up rotated {rotations} times");
		trace!(
			"insert fix-up: {recolorings} recolorings, {rotations} rotations"
		);
	}

	// `node` carries the extra black, `parent` is tracked separately since
	// `node` may be an empty leaf.
	fn remove_fixup(
		&mut self,
		mut node: Option<NodeId>,
		mut parent: Option<NodeId>,
	) {
		let mut recolorings = 0;
		let mut rotations = 0;

		while node != self.root && !self.is_red(node) {
			let Some(current_parent) = parent else {
				break;
			};

			if self.nodes[current_parent].left == node {
				let mut sibling = self.nodes[current_parent]
					.right
					.expect("double-black node without a sibling");

				if self.is_red(Some(sibling)) {
					self.nodes[sibling].color = Color::Black;
					self.nodes[current_parent].color = Color::Red;
					self.rotate_left(current_parent);
					rotations += 1;
					recolorings += 2;
					sibling = self.nodes[current_parent]
						.right
						.expect("double-black node without a sibling");
				}

				let near = self.nodes[sibling].left;
				let far = self.nodes[sibling].right;

				if !self.is_red(near) && !self.is_red(far) {
					self.nodes[sibling].color = Color::Red;
					recolorings += 1;
					node = Some(current_parent);
					parent = self.nodes[current_parent].parent;
					continue;
				}

				if !self.is_red(far) {
					let near = near.expect("red nephew missing");
					self.nodes[near].color = Color::Black;
					self.nodes[sibling].color = Color::Red;
					self.rotate_right(sibling);
					rotations += 1;
					recolorings += 2;
					sibling = self.nodes[current_parent]
						.right
						.expect("double-black node without a sibling");
				}

				self.nodes[sibling].color = self.nodes[current_parent].color;
				self.nodes[current_parent].color = Color::Black;
				if let Some(far) = self.nodes[sibling].right {
					self.nodes[far].color = Color::Black;
				}
				self.rotate_left(current_parent);
				rotations += 1;
				recolorings += 3;
			} else {
				let mut sibling = self.nodes[current_parent]
					.left
					.expect("double-black node without a sibling");

				if self.is_red(Some(sibling)) {
					self.nodes[sibling].color = Color::Black;
					self.nodes[current_parent].color = Color::Red;
					self.rotate_right(current_parent);
					rotations += 1;
					recolorings += 2;
					sibling = self.nodes[current_parent]
						.left
						.expect("double-black node without a sibling");
				}

				let near = self.nodes[sibling].right;
				let far = self.nodes[sibling].left;

				if !self.is_red(near) && !self.is_red(far) {
					self.nodes[sibling].color = Color::Red;
					recolorings += 1;
					node = Some(current_parent);
					parent = self.nodes[current_parent].parent;
					continue;
				}

				if !self.is_red(far) {
					let near = near.expect("red nephew missing");
					self.nodes[near].color = Color::Black;
					self.nodes[sibling].color = Color::Red;
					self.rotate_left(sibling);
					rotations += 1;
					recolorings += 2;
					sibling = self.nodes[current_parent]
						.left
						.expect("double-black node without a sibling");
				}

				self.nodes[sibling].color = self.nodes[current_parent].color;
				self.nodes[current_parent].color = Color::Black;
				if let Some(far) = self.nodes[sibling].left {
					self.nodes[far].color = Color::Black;
				}
				self.rotate_right(current_parent);
				rotations += 1;
				recolorings += 3;
			}

			node = self.root;
			break;
		}

		if let Some(node) = node {
			self.nodes[node].color = Color::Black;
		}

		debug_assert!(rotations <= 3, "remove fix-up rotated {rotations} times");
		trace!(
			"remove fix-up: {recolorings} recolorings, {rotations} rotations"
		);
	}

	/// Swaps the key and value of two distinct nodes, leaving the tree
	/// shape and colors alone.
	fn swap_entries(&mut self, a: NodeId, b: NodeId) {
		let (low, high) = if a < b { (a, b) } else { (b, a) };
		let (head, tail) = self.nodes.split_at_mut(high);
		let (x, y) = (&mut head[low], &mut tail[0]);

		mem::swap(&mut x.key, &mut y.key);
		mem::swap(&mut x.value, &mut y.value);
	}

	/// Removes an already unlinked node from the arena, moving the last
	/// arena node into its slot.
	fn release(&mut self, id: NodeId) -> (K, V) {
		let last = self.nodes.len() - 1;

		if id != last {
			let parent = self.nodes[last].parent;
			let left = self.nodes[last].left;
			let right = self.nodes[last].right;

			self.replace_child(parent, last, Some(id));
			if let Some(left) = left {
				self.nodes[left].parent = Some(id);
			}
			if let Some(right) = right {
				self.nodes[right].parent = Some(id);
			}
		}

		let node = self.nodes.swap_remove(id);
		(node.key, node.value)
	}

	pub(crate) fn remove_node(&mut self, mut id: NodeId) -> (K, V) {
		if let (Some(_), Some(right)) = (self.nodes[id].left, self.nodes[id].right)
		{
			let next = leftmost(&self.nodes, right);
			self.swap_entries(id, next);
			id = next;
		}

		// at most one child left now
		let child = self.nodes[id].left.or(self.nodes[id].right);
		let parent = self.nodes[id].parent;

		if let Some(child) = child {
			self.nodes[child].parent = parent;
		}
		self.replace_child(parent, id, child);

		if self.nodes[id].color == Color::Black {
			self.remove_fixup(child, parent);
		}

		self.bump();
		self.release(id)
	}

	pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
		self.first().map(|id| self.remove_node(id))
	}

	pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
		self.last().map(|id| self.remove_node(id))
	}
}

impl<K, V, C> RawTree<K, V, C>
where
	C: Comparator<K>,
{
	pub(crate) fn find(&self, key: &K) -> Option<NodeId> {
		let mut current = self.root;
		while let Some(id) = current {
			current = match self.comparator.compare(key, &self.nodes[id].key) {
				Ordering::Less => self.nodes[id].left,
				Ordering::Greater => self.nodes[id].right,
				Ordering::Equal => return Some(id),
			};
		}
		None
	}

	/// The greatest node whose key is below `key`, or equal to it when
	/// `inclusive`.
	pub(crate) fn search_below(&self, key: &K, inclusive: bool) -> Option<NodeId> {
		let mut best = None;
		let mut current = self.root;
		while let Some(id) = current {
			current = match self.comparator.compare(&self.nodes[id].key, key) {
				Ordering::Less => {
					best = Some(id);
					self.nodes[id].right
				}
				Ordering::Equal if inclusive => return Some(id),
				_ => self.nodes[id].left,
			};
		}
		best
	}

	/// The least node whose key is above `key`, or equal to it when
	/// `inclusive`.
	pub(crate) fn search_above(&self, key: &K, inclusive: bool) -> Option<NodeId> {
		let mut best = None;
		let mut current = self.root;
		while let Some(id) = current {
			current = match self.comparator.compare(&self.nodes[id].key, key) {
				Ordering::Greater => {
					best = Some(id);
					self.nodes[id].left
				}
				Ordering::Equal if inclusive => return Some(id),
				_ => self.nodes[id].right,
			};
		}
		best
	}

	/// The first node inside the given start bound.
	pub(crate) fn lower_bound(&self, bound: Bound<&K>) -> Option<NodeId> {
		match bound {
			Bound::Included(key) => self.search_above(key, true),
			Bound::Excluded(key) => self.search_above(key, false),
			Bound::Unbounded => self.first(),
		}
	}

	/// The last node inside the given end bound.
	pub(crate) fn upper_bound(&self, bound: Bound<&K>) -> Option<NodeId> {
		match bound {
			Bound::Included(key) => self.search_below(key, true),
			Bound::Excluded(key) => self.search_below(key, false),
			Bound::Unbounded => self.last(),
		}
	}

	/// The first and last nodes of the window between two bounds, or
	/// `None` if no key falls inside it.
	pub(crate) fn window(
		&self,
		start: Bound<&K>,
		end: Bound<&K>,
	) -> Option<(NodeId, NodeId)> {
		let front = self.lower_bound(start)?;
		let back = self.upper_bound(end)?;

		match self
			.comparator
			.compare(&self.nodes[front].key, &self.nodes[back].key)
		{
			Ordering::Greater => None,
			_ => Some((front, back)),
		}
	}

	/// Inserts the entry, returning the previous value if an equal key
	/// was already present. The stored key is kept in that case.
	pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
		let mut parent = None;
		let mut side = Ordering::Equal;
		let mut current = self.root;

		while let Some(id) = current {
			parent = Some(id);
			side = self.comparator.compare(&key, &self.nodes[id].key);
			current = match side {
				Ordering::Less => self.nodes[id].left,
				Ordering::Greater => self.nodes[id].right,
				Ordering::Equal => {
					return Some(mem::replace(&mut self.nodes[id].value, value));
				}
			};
		}

		let id = self.nodes.len();
		self.nodes.push(Node {
			key,
			value,
			color: Color::Red,
			parent,
			left: None,
			right: None,
		});

		match parent {
			None => self.root = Some(id),
			Some(parent) if side == Ordering::Less => {
				self.nodes[parent].left = Some(id)
			}
			Some(parent) => self.nodes[parent].right = Some(id),
		}

		self.bump();
		self.insert_fixup(id);

		None
	}

	pub(crate) fn remove(&mut self, key: &K) -> Option<(K, V)> {
		let id = self.find(key)?;
		Some(self.remove_node(id))
	}

	/// Verifies all five red-black invariants, returning the black
	/// height of the tree.
	#[cfg(test)]
	pub(crate) fn check_invariants(&self) -> Result<usize, &'static str> {
		use itertools::Itertools;

		let Some(root) = self.root else {
			return match self.nodes.is_empty() {
				true => Ok(0),
				false => Err("nodes left in the arena of an empty tree"),
			};
		};

		if self.nodes[root].parent.is_some() {
			return Err("root has a parent");
		}
		if self.nodes[root].color != Color::Black {
			return Err("root is red");
		}

		let black_height = self.black_height(Some(root))?;

		let mut keys = Vec::with_capacity(self.nodes.len());
		let mut current = self.first();
		while let Some(id) = current {
			keys.push(&self.nodes[id].key);
			current = successor(&self.nodes, id);
		}

		if keys.len() != self.nodes.len() {
			return Err("in-order traversal does not reach every node");
		}
		if !keys.iter().tuple_windows().all(|(a, b)| {
			self.comparator.compare(a, b) == Ordering::Less
		}) {
			return Err("in-order keys are not strictly ascending");
		}

		Ok(black_height)
	}

	#[cfg(test)]
	fn black_height(&self, id: Option<NodeId>) -> Result<usize, &'static str> {
		let Some(id) = id else {
			return Ok(1);
		};
		let node = &self.nodes[id];

		for child in [node.left, node.right].into_iter().flatten() {
			if self.nodes[child].parent != Some(id) {
				return Err("child does not link back to its parent");
			}
			if node.color == Color::Red && self.nodes[child].color == Color::Red {
				return Err("red node with a red child");
			}
		}

		let left = self.black_height(node.left)?;
		let right = self.black_height(node.right)?;
		if left != right {
			return Err("black height differs between siblings");
		}

		Ok(left + usize::from(node.color == Color::Black))
	}
}

pub(crate) fn leftmost<K, V>(nodes: &[Node<K, V>], mut id: NodeId) -> NodeId {
	while let Some(left) = nodes[id].left {
		id = left;
	}
	id
}

pub(crate) fn rightmost<K, V>(nodes: &[Node<K, V>], mut id: NodeId) -> NodeId {
	while let Some(right) = nodes[id].right {
		id = right;
	}
	id
}

pub(crate) fn successor<K, V>(nodes: &[Node<K, V>], id: NodeId) -> Option<NodeId> {
	if let Some(right) = nodes[id].right {
		return Some(leftmost(nodes, right));
	}

	let mut child = id;
	let mut parent = nodes[id].parent;
	while let Some(current) = parent {
		if nodes[current].left == Some(child) {
			return Some(current);
		}
		child = current;
		parent = nodes[current].parent;
	}
	None
}

pub(crate) fn predecessor<K, V>(
	nodes: &[Node<K, V>],
	id: NodeId,
) -> Option<NodeId> {
	if let Some(left) = nodes[id].left {
		return Some(rightmost(nodes, left));
	}

	let mut child = id;
	let mut parent = nodes[id].parent;
	while let Some(current) = parent {
		if nodes[current].right == Some(child) {
			return Some(current);
		}
		child = current;
		parent = nodes[current].parent;
	}
	None
}
