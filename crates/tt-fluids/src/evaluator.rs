//! The external property evaluator seam.

use crate::error::FluidResult;

/// A pure, stateless property lookup over SI arguments.
///
/// Mirrors CoolProp's `PropsSI(output, key1, value1, key2, value2, fluid)`.
/// Implementations must be thread-safe and return an error (never a
/// non-finite value) when the state is invalid for the fluid.
pub trait PropertyEvaluator: Send + Sync {
    /// Backend name, used in logs.
    fn name(&self) -> &str;

    fn props(
        &self,
        output_key: &str,
        input1_key: &str,
        input1_value: f64,
        input2_key: &str,
        input2_value: f64,
        fluid: &str,
    ) -> FluidResult<f64>;
}

/// Adapter turning a closure into a [`PropertyEvaluator`].
///
/// Handy for tables of precomputed values and for tests.
pub struct FnEvaluator<F> {
    name: String,
    f: F,
}

impl<F> FnEvaluator<F> {
    pub fn new(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &str, f64, &str, f64, &str) -> FluidResult<f64> + Send + Sync,
    {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> PropertyEvaluator for FnEvaluator<F>
where
    F: Fn(&str, &str, f64, &str, f64, &str) -> FluidResult<f64> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn props(
        &self,
        output_key: &str,
        input1_key: &str,
        input1_value: f64,
        input2_key: &str,
        input2_value: f64,
        fluid: &str,
    ) -> FluidResult<f64> {
        (self.f)(
            output_key,
            input1_key,
            input1_value,
            input2_key,
            input2_value,
            fluid,
        )
    }
}
