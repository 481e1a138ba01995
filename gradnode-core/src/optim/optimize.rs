use crate::error::GradNodeError;
use crate::graph::Graph;
use crate::optim::config::OptimizeConfig;
use crate::types::{NodeId, Scalar};

/// Outcome of an optimize run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeReport<T> {
    history: Vec<T>,
    learnable: usize,
    final_value: T,
}

impl<T: Scalar> OptimizeReport<T> {
    /// Root value seen by the forward pass of each iteration, in order.
    pub fn history(&self) -> &[T] {
        &self.history
    }

    /// Number of learnable constants reachable from the root.
    pub fn learnable(&self) -> usize {
        self.learnable
    }

    /// Root value after the last update.
    pub fn final_value(&self) -> T {
        self.final_value
    }
}

impl<T: Scalar> Graph<T> {
    /// Runs one iteration: forward, backward, then the parameter update.
    ///
    /// Returns the root value computed by this iteration's forward pass,
    /// i.e. before the update.
    pub fn step(&mut self, root: NodeId, rate: T) -> Result<T, GradNodeError> {
        self.forward(root)?;
        let value = self.value(root)?;
        self.backward(root)?;
        self.update_parameters(root, rate)?;
        Ok(value)
    }
}

/// Repeats [`Graph::step`] on `root` for `config.iterations()` iterations.
///
/// There is no convergence check and no early exit. A graph without
/// learnable constants runs to completion without changing anything. The
/// first error aborts the run; the graph is then left mid-iteration.
pub fn optimize<T: Scalar>(
    graph: &mut Graph<T>,
    root: NodeId,
    config: &OptimizeConfig<T>,
) -> Result<OptimizeReport<T>, GradNodeError> {
    let learnable = graph.learnable_constants(root)?.len();
    log::info!(
        "Optimizing {} for {} iterations at rate {} ({} learnable constants)",
        root,
        config.iterations(),
        config.rate(),
        learnable
    );
    if learnable == 0 {
        log::warn!("No learnable constant reachable from {}; nothing will be learned", root);
    }

    let mut history = Vec::with_capacity(config.iterations());
    for iteration in 0..config.iterations() {
        let value = graph.step(root, config.rate())?;
        log::debug!("Iteration {}: {} = {}", iteration, root, value);
        history.push(value);
    }

    graph.forward(root)?;
    let final_value = graph.value(root)?;
    log::info!("Finished optimizing {}: final value {}", root, final_value);

    Ok(OptimizeReport {
        history,
        learnable,
        final_value,
    })
}

#[cfg(test)]
#[path = "optimize_test.rs"]
mod tests;
