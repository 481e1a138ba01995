use crate::error::GradNodeError;
use crate::graph::Graph;
use crate::types::{NodeId, Scalar};

/// Pre-order walk from a root through its transitive inputs.
///
/// Uses an explicit stack: a node is yielded before any of its inputs, and
/// its inputs are pushed in slot order, so the last input is explored first.
/// Consumers always come before their producers.
#[derive(Debug, Clone)]
pub struct Traversal<'g, T: Scalar> {
    graph: &'g Graph<T>,
    stack: Vec<NodeId>,
}

impl<'g, T: Scalar> Iterator for Traversal<'g, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Inputs were validated at construction.
        self.stack.extend_from_slice(&self.graph.nodes[id.0].inputs);
        Some(id)
    }
}

impl<T: Scalar> Graph<T> {
    /// Walks `root` and every node it depends on, consumers first.
    pub fn traverse(&self, root: NodeId) -> Result<Traversal<'_, T>, GradNodeError> {
        self.node(root)?;
        Ok(Traversal {
            graph: self,
            stack: vec![root],
        })
    }
}

#[cfg(test)]
#[path = "traversal_test.rs"]
mod tests;
