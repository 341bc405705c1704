use node_forge_material::{
    MaterialNode, MathOperation, NodeGraph, NodeKind, SymbolTable, TypeTag, compile_graph,
};

#[test]
fn host_block_continues_numbering_after_compiled_body() {
    let mut graph = NodeGraph::new();
    let a = graph.add_node(MaterialNode::new("a", NodeKind::Math(MathOperation::Add)));
    let b = graph.add_node(MaterialNode::new("b", NodeKind::Math(MathOperation::Multiply)));
    graph.connect(b, "Value1", a).unwrap();
    graph.set_root(b).unwrap();
    let shader = compile_graph(&graph).unwrap();

    // Re-declare the body's symbols in a host scope, then open a nested block.
    let mut table = SymbolTable::new();
    table.push_scope();
    for (id, symbol) in &shader.bindings {
        assert_eq!(table.allocate(*id, symbol.ty).name, symbol.name);
    }

    table.push_scope();
    assert_eq!(table.depth(), 2);
    let local = table.allocate(a, TypeTag::Float);
    assert_eq!(local.name, "float_2");
    assert_eq!(table.lookup("float_1").map(|s| s.node), Some(b));
    assert_eq!(table.lookup_node(a), Some(&local));

    table.pop_scope();
    assert_eq!(table.depth(), 1);
    assert!(table.lookup("float_2").is_none());
    assert_eq!(table.lookup_node(a).map(|s| s.name.as_str()), Some("float_0"));
}
