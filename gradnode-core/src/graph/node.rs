use crate::graph::outlet::Outlet;
use crate::types::{NodeId, Scalar};
use std::fmt;

/// Largest input count of any node variant.
pub(crate) const MAX_ARITY: usize = 2;

/// The closed set of node variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Leaf holding an externally set scalar. Only learnable constants are
    /// adjusted by the parameter update.
    Constant { learnable: bool },
    /// `inputs[0] + inputs[1]`
    Add,
    /// `inputs[0] * inputs[1]`
    Multiply,
    /// `inputs[1] - inputs[0]`, i.e. target minus result. Always the root.
    Loss,
}

impl NodeKind {
    /// Number of inputs this variant takes.
    pub fn arity(self) -> usize {
        match self {
            NodeKind::Constant { .. } => 0,
            NodeKind::Add | NodeKind::Multiply | NodeKind::Loss => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Constant { .. } => "const",
            NodeKind::Add => "add",
            NodeKind::Multiply => "mul",
            NodeKind::Loss => "loss",
        }
    }

    pub fn is_constant(self) -> bool {
        matches!(self, NodeKind::Constant { .. })
    }

    pub fn is_learnable(self) -> bool {
        matches!(self, NodeKind::Constant { learnable: true })
    }
}

/// Input values of a node, gathered from the arena before dispatch.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Operands<T> {
    values: [T; MAX_ARITY],
    len: usize,
}

impl<T: Scalar> Operands<T> {
    pub(crate) fn new() -> Self {
        Operands {
            values: [T::zero(); MAX_ARITY],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, value: T) {
        self.values[self.len] = value;
        self.len += 1;
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.values[..self.len]
    }
}

/// One record of the graph arena.
///
/// `value` and `gradients` are caches owned by the passes: they are only
/// meaningful for the generation recorded in `evaluated_at` and
/// `differentiated_at` respectively.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) id: NodeId,
    pub(crate) kind: NodeKind,
    pub(crate) inputs: Vec<NodeId>,
    pub(crate) value: T,
    pub(crate) gradients: Vec<T>,
    pub(crate) outlet: Outlet,
    pub(crate) evaluated_at: Option<u64>,
    pub(crate) differentiated_at: Option<u64>,
}

impl<T: Scalar> Node<T> {
    pub(crate) fn new(id: NodeId, kind: NodeKind, inputs: Vec<NodeId>, value: T) -> Self {
        let gradients = vec![T::zero(); inputs.len()];
        Node {
            id,
            kind,
            inputs,
            value,
            gradients,
            outlet: Outlet::default(),
            evaluated_at: None,
            differentiated_at: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn outlet(&self) -> Outlet {
        self.outlet
    }

    pub fn is_learnable(&self) -> bool {
        self.kind.is_learnable()
    }

    /// Whether `value` reflects the leaves as of `generation`.
    pub(crate) fn has_value(&self, generation: u64) -> bool {
        self.kind.is_constant() || self.evaluated_at == Some(generation)
    }

    pub(crate) fn has_gradients(&self, generation: u64) -> bool {
        self.differentiated_at == Some(generation)
    }

    /// Recomputes `value` from the operand values.
    pub(crate) fn forward(&mut self, operands: &[T]) {
        match self.kind {
            NodeKind::Constant { .. } => {}
            NodeKind::Add => self.value = operands[0] + operands[1],
            NodeKind::Multiply => self.value = operands[0] * operands[1],
            NodeKind::Loss => self.value = operands[1] - operands[0],
        }
    }

    /// Distributes `gradient` over the input slots.
    ///
    /// Multiply reads the operand values of the current forward pass. Loss
    /// ignores `gradient` and seeds both slots with its own value: this
    /// engine treats `target - result` as the gradient of the loss.
    pub(crate) fn backward(&mut self, gradient: T, operands: &[T]) {
        match self.kind {
            NodeKind::Constant { .. } => {}
            NodeKind::Add => {
                self.gradients[0] = gradient;
                self.gradients[1] = gradient;
            }
            NodeKind::Multiply => {
                self.gradients[0] = gradient * operands[1];
                self.gradients[1] = gradient * operands[0];
            }
            NodeKind::Loss => {
                self.gradients[0] = self.value;
                self.gradients[1] = self.value;
            }
        }
    }
}

impl<T: Scalar> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.kind.name(), self.value)?;
        if self.is_learnable() {
            write!(f, " (learnable)")?;
        }
        Ok(())
    }
}
