//! Arena storage for one computation tree.
//!
//! Nodes are created through the constructors on [`Graph`] and referred to by
//! [`NodeId`]. Edges only point from a consumer to ids that already exist, so
//! a graph is acyclic by construction. Each node may feed at most one
//! consumer; a second connection is rejected instead of silently rerouting
//! the gradient.

pub mod node;
pub mod outlet;

pub use node::{Node, NodeKind};
pub use outlet::Outlet;

use crate::error::GradNodeError;
use crate::graph::node::Operands;
use crate::types::{NodeId, Scalar};

/// A scalar computation tree.
///
/// `generation` counts constant changes. Passes stamp the nodes they visit
/// with the current generation, and read-back checks the stamp so that a
/// value or gradient computed before the last change is never handed out.
#[derive(Debug, Clone)]
pub struct Graph<T: Scalar = f32> {
    pub(crate) nodes: Vec<Node<T>>,
    pub(crate) generation: u64,
}

impl<T: Scalar> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> Graph<T> {
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            generation: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all nodes in construction order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<T>> {
        self.nodes.iter()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|node| node.id)
    }

    fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len())
    }

    // --- Construction ---

    /// Adds a constant leaf.
    pub fn constant(&mut self, value: T, learnable: bool) -> NodeId {
        let id = self.next_id();
        let node = Node::new(id, NodeKind::Constant { learnable }, Vec::new(), value);
        log::trace!("Created {}", node);
        self.nodes.push(node);
        id
    }

    /// Adds a constant adjusted by the parameter update.
    pub fn learnable(&mut self, value: T) -> NodeId {
        self.constant(value, true)
    }

    /// Adds a constant the parameter update leaves alone.
    pub fn fixed(&mut self, value: T) -> NodeId {
        self.constant(value, false)
    }

    pub fn add(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GradNodeError> {
        self.operator(NodeKind::Add, &[a, b])
    }

    pub fn mul(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GradNodeError> {
        self.operator(NodeKind::Multiply, &[a, b])
    }

    /// Adds the terminal `target - result` node.
    pub fn loss(&mut self, result: NodeId, target: NodeId) -> Result<NodeId, GradNodeError> {
        self.operator(NodeKind::Loss, &[result, target])
    }

    /// Adds a node of `kind` fed by `inputs`, connecting every input's outlet
    /// to the new node.
    ///
    /// All checks run before anything is connected, so a failed call leaves
    /// the graph as it was. A constant built this way starts at zero.
    ///
    /// # Errors
    /// * `InvalidArity` if `inputs.len()` differs from the kind's arity.
    /// * `NodeNotFound` for an id outside this graph.
    /// * `LossNotTerminal` if an input is a Loss node.
    /// * `OutletAlreadyConnected` if an input already feeds a node, or is
    ///   listed twice.
    pub fn operator(&mut self, kind: NodeKind, inputs: &[NodeId]) -> Result<NodeId, GradNodeError> {
        let expected = kind.arity();
        if inputs.len() != expected {
            return Err(GradNodeError::InvalidArity {
                kind: kind.name(),
                expected,
                actual: inputs.len(),
            });
        }

        let id = self.next_id();
        for (slot, &input) in inputs.iter().enumerate() {
            let operand = self.node(input)?;
            if operand.kind == NodeKind::Loss {
                return Err(GradNodeError::LossNotTerminal { node: input });
            }
            if let Some(consumer) = operand.outlet.target() {
                return Err(GradNodeError::OutletAlreadyConnected {
                    node: input,
                    consumer,
                    slot: operand.outlet.slot(),
                });
            }
            if let Some(first) = inputs[..slot].iter().position(|&other| other == input) {
                return Err(GradNodeError::OutletAlreadyConnected {
                    node: input,
                    consumer: id,
                    slot: first,
                });
            }
        }

        for (slot, &input) in inputs.iter().enumerate() {
            self.nodes[input.0].outlet.connect(id, slot);
        }
        let node = Node::new(id, kind, inputs.to_vec(), T::zero());
        log::trace!("Created {} with inputs {:?}", node, inputs);
        self.nodes.push(node);
        Ok(id)
    }

    // --- Read-back ---

    pub fn node(&self, id: NodeId) -> Result<&Node<T>, GradNodeError> {
        self.nodes.get(id.0).ok_or(GradNodeError::NodeNotFound {
            node: id,
            len: self.nodes.len(),
        })
    }

    pub fn outlet(&self, id: NodeId) -> Result<Outlet, GradNodeError> {
        Ok(self.node(id)?.outlet)
    }

    pub fn is_learnable(&self, id: NodeId) -> Result<bool, GradNodeError> {
        Ok(self.node(id)?.is_learnable())
    }

    /// Current value of a node.
    ///
    /// Constants are always readable. Operator nodes need a forward pass
    /// since the last constant change.
    pub fn value(&self, id: NodeId) -> Result<T, GradNodeError> {
        let node = self.node(id)?;
        if !node.has_value(self.generation) {
            return Err(GradNodeError::StaleState {
                node: id,
                pass: "forward",
            });
        }
        Ok(node.value)
    }

    /// Per-input gradients computed by the node's last backward step.
    pub fn gradients(&self, id: NodeId) -> Result<&[T], GradNodeError> {
        let node = self.node(id)?;
        if !node.has_gradients(self.generation) {
            return Err(GradNodeError::StaleState {
                node: id,
                pass: "backward",
            });
        }
        Ok(&node.gradients)
    }

    /// The gradient directed at `id` by its consumer, read through its
    /// outlet. An unconnected node gets the root seed of one once it has
    /// been backpropagated.
    pub fn gradient_at(&self, id: NodeId) -> Result<T, GradNodeError> {
        let node = self.node(id)?;
        match node.outlet.target() {
            Some(consumer) => Ok(self.gradients(consumer)?[node.outlet.slot()]),
            None if node.has_gradients(self.generation) => Ok(T::one()),
            None => Err(GradNodeError::StaleState {
                node: id,
                pass: "backward",
            }),
        }
    }

    /// Overwrites a constant's value. Invalidates every cached value and
    /// gradient in the graph.
    pub fn set_value(&mut self, id: NodeId, value: T) -> Result<(), GradNodeError> {
        let len = self.nodes.len();
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(GradNodeError::NodeNotFound { node: id, len })?;
        if !node.kind.is_constant() {
            return Err(GradNodeError::NotAConstant { node: id });
        }
        node.value = value;
        self.invalidate();
        Ok(())
    }

    /// Learnable constants reachable from `root`, in traversal order.
    pub fn learnable_constants(&self, root: NodeId) -> Result<Vec<NodeId>, GradNodeError> {
        Ok(self
            .traverse(root)?
            .filter(|&id| self.nodes[id.0].is_learnable())
            .collect())
    }

    // --- Pass plumbing ---

    /// Marks every cached value and gradient stale.
    pub(crate) fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub(crate) fn operand_values(&self, id: NodeId) -> Operands<T> {
        let mut operands = Operands::new();
        for input in &self.nodes[id.0].inputs {
            operands.push(self.nodes[input.0].value);
        }
        operands
    }

    /// Gradient flowing into `id`: its consumer's gradient slot, or the seed
    /// of one for an unconnected node. Does not check freshness; the passes
    /// visit consumers first and `check_incoming` guards the pass root.
    pub(crate) fn directed_gradient(&self, id: NodeId) -> T {
        let outlet = self.nodes[id.0].outlet;
        match outlet.target() {
            Some(consumer) => self.nodes[consumer.0].gradients[outlet.slot()],
            None => T::one(),
        }
    }

    /// A pass started below the top of the tree reads its root's gradient
    /// from the consumer, which must have been backpropagated already.
    pub(crate) fn check_incoming(&self, root: NodeId) -> Result<(), GradNodeError> {
        if let Some(consumer) = self.node(root)?.outlet.target() {
            if !self.nodes[consumer.0].has_gradients(self.generation) {
                return Err(GradNodeError::StaleState {
                    node: consumer,
                    pass: "backward",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
