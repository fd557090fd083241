//! Property query facade: one evaluator call per requested output.

use serde::Serialize;
use tracing::debug;
use tt_core::units::{
    Density, Pressure, SpecEnergy, SpecHeat, SpecVolume, Temperature, j_per_kg, j_per_kg_k, k,
    kg_per_m3, m3_per_kg, pa,
};

use crate::error::{FluidError, FluidResult};
use crate::evaluator::PropertyEvaluator;
use crate::query::FluidQuery;
use crate::symbol::PropertySymbol;

/// Values of the requested outputs, in SI units and in request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyResult {
    fluid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<f64>,
    values: Vec<(PropertySymbol, f64)>,
}

/// One line of the result table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRow {
    pub property: &'static str,
    pub symbol: PropertySymbol,
    pub value: f64,
    pub unit: &'static str,
}

impl PropertyResult {
    pub fn fluid(&self) -> &str {
        &self.fluid
    }

    pub fn quality(&self) -> Option<f64> {
        self.quality
    }

    pub fn get(&self, symbol: PropertySymbol) -> Option<f64> {
        self.values
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertySymbol, f64)> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rows for display: name, symbol, value, SI unit.
    pub fn rows(&self) -> Vec<PropertyRow> {
        self.iter()
            .map(|(symbol, value)| PropertyRow {
                property: symbol.name(),
                symbol,
                value,
                unit: symbol.si_unit(),
            })
            .collect()
    }

    pub fn temperature(&self) -> Option<Temperature> {
        self.get(PropertySymbol::T).map(k)
    }

    pub fn pressure(&self) -> Option<Pressure> {
        self.get(PropertySymbol::P).map(pa)
    }

    pub fn density(&self) -> Option<Density> {
        self.get(PropertySymbol::D).map(kg_per_m3)
    }

    pub fn enthalpy(&self) -> Option<SpecEnergy> {
        self.get(PropertySymbol::H).map(j_per_kg)
    }

    pub fn specific_volume(&self) -> Option<SpecVolume> {
        self.get(PropertySymbol::V).map(m3_per_kg)
    }

    /// Specific entropy; shares dimensions with specific heat.
    pub fn entropy(&self) -> Option<SpecHeat> {
        self.get(PropertySymbol::S).map(j_per_kg_k)
    }

    pub fn cp(&self) -> Option<SpecHeat> {
        self.get(PropertySymbol::CP).map(j_per_kg_k)
    }

    pub fn cv(&self) -> Option<SpecHeat> {
        self.get(PropertySymbol::CV).map(j_per_kg_k)
    }
}

/// Evaluate every requested output for `query`.
///
/// Duplicate symbols in `outputs` are evaluated once, at their first position.
/// The first evaluator failure aborts the query and names the output that failed.
pub fn evaluate(
    evaluator: &dyn PropertyEvaluator,
    query: &FluidQuery,
    outputs: &[PropertySymbol],
) -> FluidResult<PropertyResult> {
    let [(key1, value1), (key2, value2)] = query.evaluator_inputs();
    let mut values: Vec<(PropertySymbol, f64)> = Vec::with_capacity(outputs.len());

    for &symbol in outputs {
        if values.iter().any(|(s, _)| *s == symbol) {
            continue;
        }

        let raw = evaluator
            .props(
                symbol.output_key(),
                key1,
                value1,
                key2,
                value2,
                query.fluid(),
            )
            .map_err(|err| FluidError::EvaluationFailed {
                symbol,
                message: match err {
                    FluidError::Backend { message } => message,
                    other => other.to_string(),
                },
            })?;

        values.push((symbol, symbol.from_evaluator(raw)));
    }

    debug!(
        backend = evaluator.name(),
        fluid = query.fluid(),
        outputs = values.len(),
        "property query evaluated"
    );

    Ok(PropertyResult {
        fluid: query.fluid().to_string(),
        quality: query.quality(),
        values,
    })
}
