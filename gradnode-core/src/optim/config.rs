use crate::error::GradNodeError;
use crate::types::Scalar;

/// Settings of the optimize loop: how many iterations to run and the rate
/// applied to every gradient step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizeConfig<T: Scalar = f32> {
    iterations: usize,
    rate: T,
}

impl<T: Scalar> OptimizeConfig<T> {
    /// Creates a validated configuration.
    ///
    /// # Errors
    /// `InvalidConfig` if `iterations` is zero or `rate` is not a finite
    /// positive number.
    pub fn new(iterations: usize, rate: T) -> Result<Self, GradNodeError> {
        if iterations == 0 {
            return Err(GradNodeError::InvalidConfig(
                "iterations must be positive".to_string(),
            ));
        }
        validate_rate(rate)?;
        Ok(OptimizeConfig { iterations, rate })
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn rate(&self) -> T {
        self.rate
    }
}

pub(crate) fn validate_rate<T: Scalar>(rate: T) -> Result<(), GradNodeError> {
    if !rate.is_finite() || rate <= T::zero() {
        return Err(GradNodeError::InvalidConfig(format!(
            "rate must be a finite positive number, got {}",
            rate
        )));
    }
    Ok(())
}

impl Default for OptimizeConfig<f32> {
    /// 100 iterations at rate 0.01.
    fn default() -> Self {
        OptimizeConfig {
            iterations: 100,
            rate: 0.01,
        }
    }
}

impl Default for OptimizeConfig<f64> {
    /// 100 iterations at rate 0.01.
    fn default() -> Self {
        OptimizeConfig {
            iterations: 100,
            rate: 0.01,
        }
    }
}
