//! CoolProp-based property evaluator.

use rfluids::native::CoolProp;
use tracing::debug;

use crate::error::{FluidError, FluidResult};
use crate::evaluator::PropertyEvaluator;

/// CoolProp backend, reached through `rfluids`' `PropsSI` binding.
///
/// Thread-safe: every call is an independent lookup with no retained state.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoolPropEvaluator {}

impl CoolPropEvaluator {
    /// Create a new CoolProp evaluator.
    pub fn new() -> Self {
        Self {}
    }
}

impl PropertyEvaluator for CoolPropEvaluator {
    fn name(&self) -> &str {
        "CoolProp"
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
        let value = CoolProp::props_si(
            output_key,
            input1_key,
            input1_value,
            input2_key,
            input2_value,
            fluid,
        )
        .map_err(|e| FluidError::Backend {
            message: e.to_string(),
        })?;

        if !value.is_finite() {
            return Err(FluidError::Backend {
                message: format!(
                    "CoolProp returned {} for {} at {}={}, {}={} ({})",
                    value, output_key, input1_key, input1_value, input2_key, input2_value, fluid
                ),
            });
        }

        debug!(
            output_key,
            input1_key, input1_value, input2_key, input2_value, fluid, value, "PropsSI"
        );
        Ok(value)
    }
}
