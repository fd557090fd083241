//! Fluid property requests: unit conversion, fluid resolution, evaluation.

use tracing::debug;
use tt_fluids::{
    FluidQuery, PropertyEvaluator, PropertyResult, PropertySymbol, StateVar, evaluate,
    resolve_fluid_name, to_si,
};

use crate::error::AppResult;
use crate::request::{InputSpec, PropertyRequest, StateSpec};

/// Build the validated query for a request, converting inputs to SI.
pub fn build_query(request: &PropertyRequest) -> AppResult<FluidQuery> {
    let fluid = resolve_fluid_name(&request.fluid);
    let query = match &request.state {
        StateSpec::General { inputs: [a, b] } => {
            FluidQuery::general(fluid, state_var(a)?, state_var(b)?)?
        }
        StateSpec::Saturation { input, quality } => {
            FluidQuery::saturation(fluid, state_var(input)?, *quality)?
        }
    };
    Ok(query)
}

fn state_var(input: &InputSpec) -> AppResult<StateVar> {
    let value_si = to_si(input.symbol, input.value, &input.unit)?;
    Ok(StateVar::new(input.symbol, value_si))
}

/// Requested outputs, or the default set when none were named.
pub fn requested_outputs(request: &PropertyRequest) -> Vec<PropertySymbol> {
    if request.outputs.is_empty() {
        PropertySymbol::DEFAULT_OUTPUTS.to_vec()
    } else {
        request.outputs.clone()
    }
}

/// Evaluate a property request against `evaluator`.
pub fn run_properties(
    evaluator: &dyn PropertyEvaluator,
    request: &PropertyRequest,
) -> AppResult<PropertyResult> {
    let query = build_query(request)?;
    let outputs = requested_outputs(request);
    debug!(fluid = query.fluid(), ?outputs, "running property request");
    Ok(evaluate(evaluator, &query, &outputs)?)
}
