//! Turns a material graph into GLSL source.

use crate::config::{CompileOptions, ResultBinding};
use crate::error::{GraphError, GraphResult};
use crate::graph::{NodeGraph, NodeId};
use crate::node::{MaterialNode, SocketBinding};
use crate::symbols::{Symbol, SymbolTable};

/// Output of one compile pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledShader {
    /// Complete function body: declarations followed by the result binding.
    pub source: String,
    /// Symbol holding the root node's value.
    pub result: Symbol,
    /// One `<type> <name> = <expr>;` per generated node, in emission order.
    pub statements: Vec<String>,
    /// Symbol of every generated node, in emission order.
    pub bindings: Vec<(NodeId, Symbol)>,
}

impl CompiledShader {
    pub fn symbol_of(&self, node: NodeId) -> Option<&Symbol> {
        self.bindings
            .iter()
            .find(|(id, _)| *id == node)
            .map(|(_, s)| s)
    }
}

/// Compiles one graph. Owns the symbol table of its pass; the graph is borrowed
/// immutably for the evaluator's whole lifetime.
pub struct GraphEvaluator<'g> {
    graph: &'g NodeGraph,
    options: CompileOptions,
    symbols: SymbolTable,
    allocated: usize,
}

impl<'g> GraphEvaluator<'g> {
    pub fn new(graph: &'g NodeGraph) -> Self {
        Self::with_options(graph, CompileOptions::default())
    }

    pub fn with_options(graph: &'g NodeGraph, options: CompileOptions) -> Self {
        Self {
            graph,
            options,
            symbols: SymbolTable::new(),
            allocated: 0,
        }
    }

    /// Number of symbols allocated by the last pass.
    pub fn symbols_allocated(&self) -> usize {
        self.allocated
    }

    #[tracing::instrument(skip(self), fields(nodes = self.graph.len()))]
    pub fn compile(&mut self) -> GraphResult<CompiledShader> {
        self.symbols = SymbolTable::new();
        self.allocated = 0;
        let order = self.graph.evaluate()?;

        self.symbols.push_scope();
        let generated = self.generate_all(&order);
        self.symbols.pop_scope();
        let (statements, bindings) = generated?;

        let root = self.graph.root().ok_or(GraphError::MissingRoot)?;
        let result = bindings
            .iter()
            .find(|(id, _)| *id == root)
            .map(|(_, s)| s.clone())
            .ok_or_else(|| GraphError::UnresolvedSymbol {
                node: "<output>".to_string(),
                producer: self.node_name(root),
            })?;

        let source = self.assemble(&statements, &result);
        tracing::debug!(root = %result.name, statements = statements.len(), "material compiled");
        Ok(CompiledShader {
            source,
            result,
            statements,
            bindings,
        })
    }

    fn generate_all(&mut self, order: &[NodeId]) -> GraphResult<(Vec<String>, Vec<(NodeId, Symbol)>)> {
        let mut statements = Vec::with_capacity(order.len());
        let mut bindings = Vec::with_capacity(order.len());
        let graph = self.graph;
        for &id in order {
            let node = graph.node(id)?;
            let inputs = self.resolve_inputs(node)?;
            let expr = node.generate_code(&inputs);

            let symbol = self.symbols.allocate(id, node.output_type());
            self.allocated += 1;
            tracing::debug!(node = node.name(), symbol = %symbol.name, "generated");

            let mut statement = String::new();
            if self.options.node_comments {
                statement.push_str(&format!("// {}\n", node.name()));
            }
            statement.push_str(&format!("{} {} = {};", symbol.ty.glsl(), symbol.name, expr));
            statements.push(statement);
            bindings.push((id, symbol));
        }
        Ok((statements, bindings))
    }

    /// One expression per socket, in declaration order.
    fn resolve_inputs(&self, node: &MaterialNode) -> GraphResult<Vec<String>> {
        node.sockets()
            .iter()
            .map(|socket| match socket.binding() {
                None => Err(GraphError::MissingSocketBinding {
                    node: node.name().to_string(),
                    socket: socket.name().to_string(),
                }),
                Some(SocketBinding::Literal(lit)) => {
                    if lit.ty != socket.ty() {
                        return Err(GraphError::type_mismatch(
                            node.name(),
                            socket.name(),
                            socket.ty(),
                            lit.ty,
                        ));
                    }
                    Ok(lit.text.clone())
                }
                Some(SocketBinding::Connected(producer)) => {
                    let producer_node = self.graph.node(*producer)?;
                    if producer_node.output_type() != socket.ty() {
                        return Err(GraphError::type_mismatch(
                            node.name(),
                            socket.name(),
                            socket.ty(),
                            producer_node.output_type(),
                        ));
                    }
                    self.symbols
                        .lookup_node(*producer)
                        .map(|s| s.name.clone())
                        .ok_or_else(|| GraphError::UnresolvedSymbol {
                            node: node.name().to_string(),
                            producer: producer_node.name().to_string(),
                        })
                }
            })
            .collect()
    }

    fn assemble(&self, statements: &[String], result: &Symbol) -> String {
        let indent = &self.options.indent;
        let mut out = String::new();
        for statement in statements {
            for line in statement.lines() {
                out.push_str(indent);
                out.push_str(line);
                out.push('\n');
            }
        }
        match &self.options.result {
            ResultBinding::Return => {
                out.push_str(&format!("{indent}return {};\n", result.name));
            }
            ResultBinding::Assign { target } => {
                out.push_str(&format!("{indent}{target} = {};\n", result.name));
            }
            ResultBinding::None => {}
        }
        out
    }

    fn node_name(&self, id: NodeId) -> String {
        self.graph
            .node(id)
            .map(|n| n.name().to_string())
            .unwrap_or_else(|_| id.to_string())
    }
}

/// Compile `graph` with default options.
pub fn compile_graph(graph: &NodeGraph) -> GraphResult<CompiledShader> {
    GraphEvaluator::new(graph).compile()
}

pub fn compile_graph_with_options(
    graph: &NodeGraph,
    options: CompileOptions,
) -> GraphResult<CompiledShader> {
    GraphEvaluator::with_options(graph, options).compile()
}
