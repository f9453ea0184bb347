use std::collections::BTreeMap;

use crate::coder::{NullStrategy, Value};

/// Handle to a container node owned by an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeRef {
	/// Keyed container storage.
	Keyed(usize),
	/// Unkeyed container storage.
	Unkeyed(usize),
	/// Single-value container slot; unwritten resolves as null.
	Single(usize),
	/// Encoder slot; unassigned resolves as an empty map.
	Encoder(usize),
}

/// Encoder-side intermediate stored in containers.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EncodedValue {
	/// Explicit null, replaced by the strategy placeholder on resolve.
	Null,
	/// Final value.
	Resolved(Value),
	/// Node whose content may still be filled in.
	Pending(NodeRef),
}

/// Owned storage for every container created during one encode call.
///
/// Containers hand out indices into these tables so a nested container can
/// be linked into its parent before it is populated.
#[derive(Debug, Default)]
pub(crate) struct Arena {
	keyed: Vec<BTreeMap<String, EncodedValue>>,
	unkeyed: Vec<Vec<EncodedValue>>,
	slots: Vec<Option<EncodedValue>>,
}

impl Arena {
	pub(crate) fn alloc_keyed(&mut self) -> usize {
		self.keyed.push(BTreeMap::new());
		self.keyed.len() - 1
	}

	pub(crate) fn alloc_unkeyed(&mut self) -> usize {
		self.unkeyed.push(Vec::new());
		self.unkeyed.len() - 1
	}

	pub(crate) fn alloc_slot(&mut self) -> usize {
		self.slots.push(None);
		self.slots.len() - 1
	}

	pub(crate) fn keyed_mut(&mut self, index: usize) -> &mut BTreeMap<String, EncodedValue> {
		&mut self.keyed[index]
	}

	pub(crate) fn unkeyed_mut(&mut self, index: usize) -> &mut Vec<EncodedValue> {
		&mut self.unkeyed[index]
	}

	pub(crate) fn unkeyed_len(&self, index: usize) -> usize {
		self.unkeyed[index].len()
	}

	pub(crate) fn slot_mut(&mut self, index: usize) -> &mut Option<EncodedValue> {
		&mut self.slots[index]
	}

	/// Resolve an encoded value to its final form.
	///
	/// Returns `None` when the value is null and the strategy omits nulls.
	/// Reads only, so resolving twice yields the same tree.
	pub(crate) fn resolve(&self, value: &EncodedValue, strategy: &NullStrategy) -> Option<Value> {
		match value {
			EncodedValue::Null => strategy.placeholder(),
			EncodedValue::Resolved(value) => substitute_nulls(value, strategy),
			EncodedValue::Pending(node) => self.resolve_node(*node, strategy),
		}
	}

	fn resolve_node(&self, node: NodeRef, strategy: &NullStrategy) -> Option<Value> {
		match node {
			NodeRef::Keyed(index) => {
				let map = self.keyed[index]
					.iter()
					.filter_map(|(key, value)| self.resolve(value, strategy).map(|value| (key.clone(), value)))
					.collect();
				Some(Value::Map(map))
			}
			NodeRef::Unkeyed(index) => {
				let items = self.unkeyed[index].iter().filter_map(|value| self.resolve(value, strategy)).collect();
				Some(Value::Sequence(items))
			}
			NodeRef::Single(index) => match &self.slots[index] {
				Some(value) => self.resolve(value, strategy),
				None => strategy.placeholder(),
			},
			NodeRef::Encoder(index) => match &self.slots[index] {
				Some(value) => self.resolve(value, strategy),
				None => Some(Value::Map(BTreeMap::new())),
			},
		}
	}
}

/// Copy of `value` with every nested null replaced by the strategy placeholder.
fn substitute_nulls(value: &Value, strategy: &NullStrategy) -> Option<Value> {
	match value {
		Value::Null => strategy.placeholder(),
		Value::Map(entries) => Some(Value::Map(
			entries
				.iter()
				.filter_map(|(key, value)| substitute_nulls(value, strategy).map(|value| (key.clone(), value)))
				.collect(),
		)),
		Value::Sequence(items) => Some(Value::Sequence(items.iter().filter_map(|value| substitute_nulls(value, strategy)).collect())),
		leaf => Some(leaf.clone()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pending_nodes_resolve_after_late_writes() {
		let mut arena = Arena::default();
		let outer = arena.alloc_keyed();
		let inner = arena.alloc_unkeyed();
		arena.keyed_mut(outer).insert("items".to_owned(), EncodedValue::Pending(NodeRef::Unkeyed(inner)));

		let root = EncodedValue::Pending(NodeRef::Keyed(outer));
		let before = arena.resolve(&root, &NullStrategy::Sentinel).expect("map resolves");
		assert_eq!(before.get("items"), Some(&Value::Sequence(Vec::new())));

		arena.unkeyed_mut(inner).push(EncodedValue::Resolved(Value::from(1_i64)));
		arena.unkeyed_mut(inner).push(EncodedValue::Null);
		let after = arena.resolve(&root, &NullStrategy::Sentinel).expect("map resolves");
		assert_eq!(after.get("items"), Some(&Value::Sequence(vec![Value::from(1_i64), Value::Null])));
		assert_eq!(arena.resolve(&root, &NullStrategy::Sentinel), Some(after));
	}

	#[test]
	fn omit_strategy_drops_null_entries() {
		let mut arena = Arena::default();
		let map = arena.alloc_keyed();
		arena.keyed_mut(map).insert("a".to_owned(), EncodedValue::Null);
		arena.keyed_mut(map).insert("b".to_owned(), EncodedValue::Resolved(Value::Bool(true)));

		let value = arena
			.resolve(&EncodedValue::Pending(NodeRef::Keyed(map)), &NullStrategy::Omit)
			.expect("map resolves");
		let Value::Map(entries) = value else {
			panic!("expected map");
		};
		assert_eq!(entries.len(), 1);
		assert_eq!(entries.get("b"), Some(&Value::Bool(true)));
	}

	#[test]
	fn resolved_trees_take_the_strategy_placeholder() {
		let tree: Value = [("a", Value::Null), ("b", Value::Sequence(vec![Value::Null, Value::Bool(false)]))]
			.into_iter()
			.collect();
		let arena = Arena::default();
		let stored = EncodedValue::Resolved(tree);

		let marked = arena.resolve(&stored, &NullStrategy::string_null()).expect("map resolves");
		assert_eq!(marked.get("a"), Some(&Value::from("$null")));
		assert_eq!(marked.get("b"), Some(&Value::Sequence(vec![Value::from("$null"), Value::Bool(false)])));

		let omitted = arena.resolve(&stored, &NullStrategy::Omit).expect("map resolves");
		assert_eq!(omitted.get("a"), None);
		assert_eq!(omitted.get("b"), Some(&Value::Sequence(vec![Value::Bool(false)])));
	}

	#[test]
	fn untouched_slots_resolve_by_kind() {
		let mut arena = Arena::default();
		let single = arena.alloc_slot();
		let encoder = arena.alloc_slot();

		assert_eq!(arena.resolve(&EncodedValue::Pending(NodeRef::Single(single)), &NullStrategy::Sentinel), Some(Value::Null));
		assert_eq!(arena.resolve(&EncodedValue::Pending(NodeRef::Single(single)), &NullStrategy::Omit), None);
		assert_eq!(
			arena.resolve(&EncodedValue::Pending(NodeRef::Encoder(encoder)), &NullStrategy::Sentinel),
			Some(Value::Map(Default::default()))
		);
	}
}
