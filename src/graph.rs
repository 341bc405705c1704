use std::fmt;

use crate::error::{GraphError, GraphResult};
use crate::node::MaterialNode;
use crate::types::{TypeTag, ValueLiteral};

/// Index of a node inside the [`NodeGraph`] arena that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns every node of a material plus the designation of its output node.
///
/// Sockets refer to producers by [`NodeId`], so nodes never own each other.
#[derive(Clone, Debug, Default)]
pub struct NodeGraph {
    nodes: Vec<MaterialNode>,
    root: Option<NodeId>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: MaterialNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> GraphResult<&MaterialNode> {
        self.nodes.get(id.index()).ok_or(GraphError::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut MaterialNode> {
        self.nodes
            .get_mut(id.index())
            .ok_or(GraphError::UnknownNode(id))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &MaterialNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// First node with the given name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes().find(|(_, n)| n.name() == name).map(|(id, _)| id)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Designate the output node whose inputs define the compiled material.
    pub fn set_root(&mut self, id: NodeId) -> GraphResult<()> {
        self.node(id)?;
        self.root = Some(id);
        Ok(())
    }

    /// Connect `producer`'s output to `socket` on `consumer`.
    pub fn connect(&mut self, consumer: NodeId, socket: &str, producer: NodeId) -> GraphResult<()> {
        self.node(producer)?;
        self.node_mut(consumer)?.connect(socket, producer)
    }

    pub fn set_value(&mut self, node: NodeId, socket: &str, literal: ValueLiteral) -> GraphResult<()> {
        self.node_mut(node)?.set_value(socket, literal)
    }

    pub fn add_value(
        &mut self,
        node: NodeId,
        socket: &str,
        ty: TypeTag,
        text: impl Into<String>,
    ) -> GraphResult<()> {
        self.node_mut(node)?.add_value(socket, ty, text)
    }

    /// Nodes reachable from the root, every producer before its consumers.
    ///
    /// Depth-first post-order with a three-color mark; producers are visited
    /// in socket declaration order, so the order is deterministic. Reaching a
    /// node that is still in progress means the graph has a cycle.
    pub fn evaluate(&self) -> GraphResult<Vec<NodeId>> {
        let root = self.root.ok_or(GraphError::MissingRoot)?;
        self.node(root)?;

        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        let mut order: Vec<NodeId> = Vec::new();
        // (node, index of the next producer to visit)
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        marks[root.index()] = Mark::InProgress;

        while let Some((id, next)) = stack.pop() {
            let node = self.node(id)?;
            let Some(producer) = node.producers().nth(next) else {
                marks[id.index()] = Mark::Done;
                tracing::trace!(node = node.name(), "visited");
                order.push(id);
                continue;
            };
            stack.push((id, next + 1));

            let mark = marks
                .get(producer.index())
                .copied()
                .ok_or(GraphError::UnknownNode(producer))?;
            match mark {
                Mark::Done => {}
                Mark::InProgress => {
                    return Err(GraphError::CycleDetected {
                        node: self.node(producer)?.name().to_string(),
                    });
                }
                Mark::Unvisited => {
                    marks[producer.index()] = Mark::InProgress;
                    stack.push((producer, 0));
                }
            }
        }

        Ok(order)
    }
}
