//! Symbol allocation and scope tracking for one code-generation pass.

use std::collections::HashMap;

use crate::graph::NodeId;
use crate::types::TypeTag;

/// A generated variable holding one node's output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub ty: TypeTag,
    pub name: String,
    pub node: NodeId,
}

#[derive(Clone, Debug, Default)]
struct Frame {
    symbols: HashMap<String, Symbol>,
    by_node: HashMap<NodeId, String>,
    counters: HashMap<TypeTag, usize>,
}

/// Stack of naming scopes.
///
/// A pushed frame starts from its parent's counters, so a fresh name never
/// shadows a symbol that is still visible. Lookups search innermost first.
///
/// [`GraphEvaluator`](crate::evaluator::GraphEvaluator) keeps one table per
/// pass and resolves producers with [`lookup_node`](Self::lookup_node). Hosts
/// that splice generated bodies into their own nested blocks use the same
/// table directly, naming by [`lookup`](Self::lookup) and tracking nesting with
/// [`depth`](Self::depth).
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    frames: Vec<Frame>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scope(&mut self) {
        let counters = self
            .frames
            .last()
            .map(|f| f.counters.clone())
            .unwrap_or_default();
        self.frames.push(Frame {
            counters,
            ..Frame::default()
        });
    }

    /// Drop the innermost frame and every symbol declared in it.
    pub fn pop_scope(&mut self) {
        self.frames.pop();
    }

    /// Number of open frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Number of symbols visible from the innermost frame.
    pub fn len(&self) -> usize {
        self.frames.iter().map(|f| f.symbols.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocate a fresh `<type>_<n>` symbol for `node` in the innermost frame.
    ///
    /// Opens the global frame if none is open.
    pub fn allocate(&mut self, node: NodeId, ty: TypeTag) -> Symbol {
        if self.frames.is_empty() {
            self.push_scope();
        }
        let top = self.frames.len() - 1;
        let frame = &mut self.frames[top];
        let counter = frame.counters.entry(ty).or_insert(0);
        let name = format!("{}_{}", ty.glsl(), counter);
        *counter += 1;

        let symbol = Symbol {
            ty,
            name: name.clone(),
            node,
        };
        frame.by_node.insert(node, name.clone());
        frame.symbols.insert(name, symbol.clone());
        symbol
    }

    /// The visible symbol called `name`.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.frames.iter().rev().find_map(|f| f.symbols.get(name))
    }

    /// The symbol bound to `node`'s output, if it is visible.
    pub fn lookup_node(&self, node: NodeId) -> Option<&Symbol> {
        self.frames
            .iter()
            .rev()
            .find_map(|f| f.by_node.get(&node).and_then(|name| f.symbols.get(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_counted_per_type() {
        let mut table = SymbolTable::new();
        table.push_scope();
        assert_eq!(table.allocate(NodeId(0), TypeTag::Float).name, "float_0");
        assert_eq!(table.allocate(NodeId(1), TypeTag::Vec3).name, "vec3_0");
        assert_eq!(table.allocate(NodeId(2), TypeTag::Float).name, "float_1");
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn lookup_searches_outward_and_pop_discards() {
        let mut table = SymbolTable::new();
        table.push_scope();
        let outer = table.allocate(NodeId(0), TypeTag::Float);

        table.push_scope();
        let inner = table.allocate(NodeId(1), TypeTag::Float);
        assert_eq!(inner.name, "float_1", "inner frame continues outer counters");
        assert_eq!(table.lookup_node(NodeId(0)), Some(&outer));
        assert_eq!(table.lookup("float_1"), Some(&inner));
        assert_eq!(table.depth(), 2);

        table.pop_scope();
        assert_eq!(table.lookup_node(NodeId(1)), None);
        assert_eq!(table.lookup("float_0"), Some(&outer));
    }

    #[test]
    fn allocate_opens_a_global_frame() {
        let mut table = SymbolTable::new();
        assert!(table.is_empty());
        table.allocate(NodeId(0), TypeTag::Vec4);
        assert_eq!(table.depth(), 1);
    }
}
