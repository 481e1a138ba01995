use crate::error::GradNodeError;
use crate::graph::Graph;
use crate::optim::config::validate_rate;
use crate::types::{NodeId, Scalar};

impl<T: Scalar> Graph<T> {
    /// Nudges every learnable constant under `root` by `gradient * rate`,
    /// where the gradient is the one directed at the constant through its own
    /// outlet (or the seed of one when the constant feeds nothing).
    ///
    /// The step moves the result towards the target of a Loss root, whose
    /// gradients carry `target - result`. Returns the number of constants
    /// adjusted; zero leaves the graph untouched.
    ///
    /// # Errors
    /// * `InvalidConfig` if `rate` is not a finite positive number.
    /// * `StaleState` if `root` has not been backpropagated since the last
    ///   constant change, or if `root` has a consumer that has not.
    pub fn update_parameters(&mut self, root: NodeId, rate: T) -> Result<usize, GradNodeError> {
        validate_rate(rate)?;
        if !self.node(root)?.has_gradients(self.generation) {
            return Err(GradNodeError::StaleState {
                node: root,
                pass: "backward",
            });
        }
        self.check_incoming(root)?;

        // Read every gradient before touching a constant.
        let deltas: Vec<(NodeId, T)> = self
            .learnable_constants(root)?
            .into_iter()
            .map(|id| (id, self.directed_gradient(id) * rate))
            .collect();
        if deltas.is_empty() {
            log::debug!("Parameter update from {}: no learnable constants", root);
            return Ok(0);
        }

        for &(id, delta) in &deltas {
            let node = &mut self.nodes[id.0];
            node.value += delta;
            log::debug!("Updated {} by {}", node, delta);
        }
        self.invalidate();
        Ok(deltas.len())
    }
}

#[cfg(test)]
#[path = "update_test.rs"]
mod tests;
