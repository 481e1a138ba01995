use crate::error::GradNodeError;
use crate::graph::Graph;
use crate::types::{NodeId, Scalar};

impl<T: Scalar> Graph<T> {
    /// Propagates gradients from `root` down to every node it depends on.
    ///
    /// Nodes are visited consumers first, so each node reads the gradient its
    /// consumer has just written for it before distributing that gradient to
    /// its own inputs. An unconnected root is seeded with one; a root inside
    /// a larger tree reads the gradient its consumer computed for it.
    ///
    /// # Errors
    /// `StaleState` if `root` has not been forwarded since the last constant
    /// change, or if `root` has a consumer that has not been backpropagated.
    pub fn backward(&mut self, root: NodeId) -> Result<(), GradNodeError> {
        if !self.node(root)?.has_value(self.generation) {
            return Err(GradNodeError::StaleState {
                node: root,
                pass: "forward",
            });
        }
        self.check_incoming(root)?;
        let order: Vec<NodeId> = self.traverse(root)?.collect();
        log::debug!("Backward pass from {} over {} nodes", root, order.len());

        let generation = self.generation;
        for id in order {
            let gradient = self.directed_gradient(id);
            let operands = self.operand_values(id);
            let node = &mut self.nodes[id.0];
            node.backward(gradient, operands.as_slice());
            node.differentiated_at = Some(generation);
            log::trace!("{} <- {}, gradients {:?}", node, gradient, node.gradients);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
