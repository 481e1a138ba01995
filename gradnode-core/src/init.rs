//! Re-initialization of learnable constants from random distributions.

use crate::error::GradNodeError;
use crate::graph::Graph;
use crate::types::{NodeId, Scalar};
use rand::distributions::uniform::SampleUniform;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::{Normal, StandardNormal};

/// Fills every learnable constant under `root` with a sample from
/// `U(low, high)`.
///
/// Fixed constants are left alone. Returns the number of constants filled.
///
/// # Errors
/// `InvalidConfig` unless `low < high` and both bounds are finite.
pub fn uniform_<T, R>(
    graph: &mut Graph<T>,
    root: NodeId,
    low: T,
    high: T,
    rng: &mut R,
) -> Result<usize, GradNodeError>
where
    T: Scalar + SampleUniform,
    R: Rng + ?Sized,
{
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(GradNodeError::InvalidConfig(format!(
            "uniform_ requires finite low < high, got [{}, {})",
            low, high
        )));
    }
    let dist = Uniform::new(low, high);
    fill_learnable(graph, root, || dist.sample(&mut *rng))
}

/// Fills every learnable constant under `root` with a sample from
/// `N(mean, std^2)`.
///
/// # Errors
/// `InvalidConfig` if `std` is negative or not finite.
pub fn normal_<T, R>(
    graph: &mut Graph<T>,
    root: NodeId,
    mean: T,
    std: T,
    rng: &mut R,
) -> Result<usize, GradNodeError>
where
    T: Scalar,
    StandardNormal: Distribution<T>,
    R: Rng + ?Sized,
{
    let dist = Normal::new(mean, std)
        .map_err(|e| GradNodeError::InvalidConfig(format!("normal_: {}", e)))?;
    fill_learnable(graph, root, || dist.sample(&mut *rng))
}

// --- Internal Helper for In-place Fill ---

fn fill_learnable<T, F>(graph: &mut Graph<T>, root: NodeId, mut sample: F) -> Result<usize, GradNodeError>
where
    T: Scalar,
    F: FnMut() -> T,
{
    let targets = graph.learnable_constants(root)?;
    for &id in &targets {
        graph.set_value(id, sample())?;
    }
    log::debug!("Initialized {} learnable constants under {}", targets.len(), root);
    Ok(targets.len())
}

// --- Tests ---
#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
