//! Fluid state queries: one fluid plus the independent variables that fix its state.

use tt_core::numeric::ensure_finite;

use crate::error::{FluidError, FluidResult};
use crate::symbol::{PropertySymbol, QUALITY_KEY};

/// One independent variable with its value already in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVar {
    pub symbol: PropertySymbol,
    pub value_si: f64,
}

impl StateVar {
    pub fn new(symbol: PropertySymbol, value_si: f64) -> Self {
        Self { symbol, value_si }
    }
}

/// How the two evaluator inputs are formed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryMode {
    /// Two distinct input-eligible variables.
    General { first: StateVar, second: StateVar },
    /// Saturation state: `P` or `T` plus vapor quality in `[0, 1]`.
    Saturation { var: StateVar, quality: f64 },
}

/// A validated property query for a single fluid.
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FluidQuery {
    fluid: String,
    mode: QueryMode,
}

impl FluidQuery {
    /// General two-variable state.
    pub fn general(
        fluid: impl Into<String>,
        first: StateVar,
        second: StateVar,
    ) -> FluidResult<Self> {
        let fluid = validate_fluid(fluid.into())?;
        for var in [first, second] {
            validate_input(var)?;
        }
        if first.symbol == second.symbol {
            return Err(FluidError::invalid_query(format!(
                "input variables must differ (both are {})",
                first.symbol
            )));
        }

        Ok(Self {
            fluid,
            mode: QueryMode::General { first, second },
        })
    }

    /// Saturation state fixed by pressure or temperature and vapor quality.
    pub fn saturation(fluid: impl Into<String>, var: StateVar, quality: f64) -> FluidResult<Self> {
        let fluid = validate_fluid(fluid.into())?;
        if !matches!(var.symbol, PropertySymbol::P | PropertySymbol::T) {
            return Err(FluidError::invalid_query(format!(
                "saturation queries take P or T, not {}",
                var.symbol
            )));
        }
        validate_input(var)?;
        let quality = ensure_finite(quality, "quality")?;
        if !(0.0..=1.0).contains(&quality) {
            return Err(FluidError::invalid_query(format!(
                "quality must be between 0 and 1, got {}",
                quality
            )));
        }

        Ok(Self {
            fluid,
            mode: QueryMode::Saturation { var, quality },
        })
    }

    pub fn fluid(&self) -> &str {
        &self.fluid
    }

    pub fn mode(&self) -> &QueryMode {
        &self.mode
    }

    /// Vapor quality, only present for saturation queries.
    pub fn quality(&self) -> Option<f64> {
        match self.mode {
            QueryMode::General { .. } => None,
            QueryMode::Saturation { quality, .. } => Some(quality),
        }
    }

    /// The two (key, SI value) pairs handed to the evaluator.
    pub fn evaluator_inputs(&self) -> [(&'static str, f64); 2] {
        match self.mode {
            QueryMode::General { first, second } => {
                [input_pair(first), input_pair(second)]
            }
            QueryMode::Saturation { var, quality } => {
                [input_pair(var), (QUALITY_KEY, quality)]
            }
        }
    }
}

fn input_pair(var: StateVar) -> (&'static str, f64) {
    // Only input-eligible symbols get past construction.
    (var.symbol.input_key().unwrap_or_default(), var.value_si)
}

fn validate_fluid(fluid: String) -> FluidResult<String> {
    let trimmed = fluid.trim();
    if trimmed.is_empty() {
        return Err(FluidError::invalid_query("fluid name is empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_input(var: StateVar) -> FluidResult<()> {
    if !var.symbol.is_input() {
        return Err(FluidError::UnsupportedSymbol {
            symbol: var.symbol.key().to_string(),
        });
    }
    if !var.value_si.is_finite() {
        return Err(FluidError::invalid_query(format!(
            "value for {} must be finite",
            var.symbol
        )));
    }
    Ok(())
}
