use crate::error::GradNodeError;
use crate::graph::Graph;
use crate::types::{NodeId, Scalar};

impl<T: Scalar> Graph<T> {
    /// Evaluation order for `root`: the traversal reversed, so every producer
    /// precedes its consumer and `root` comes last.
    pub fn eval_order(&self, root: NodeId) -> Result<Vec<NodeId>, GradNodeError> {
        let mut order: Vec<NodeId> = self.traverse(root)?.collect();
        order.reverse();
        Ok(order)
    }

    /// Recomputes the value of `root` and of every node it depends on from
    /// the current constants.
    ///
    /// Must run again after any constant changes, before reading values and
    /// before a backward pass.
    pub fn forward(&mut self, root: NodeId) -> Result<(), GradNodeError> {
        let order = self.eval_order(root)?;
        log::debug!("Forward pass from {} over {} nodes", root, order.len());

        let generation = self.generation;
        for (step, id) in order.into_iter().enumerate() {
            let operands = self.operand_values(id);
            let node = &mut self.nodes[id.0];
            node.forward(operands.as_slice());
            node.evaluated_at = Some(generation);
            log::trace!("{}: {}", step, node);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "forward_test.rs"]
mod tests;
