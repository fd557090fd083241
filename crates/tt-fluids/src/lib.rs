//! tt-fluids: fluid property lookup for termotables.
//!
//! Provides:
//! - Property symbols and their SI units / evaluator keys
//! - Conversion between friendly input units and SI
//! - Validated fluid queries (general two-variable or saturation)
//! - The `PropertyEvaluator` seam and its CoolProp backend
//! - The query facade that assembles a `PropertyResult`
//!
//! # Architecture
//!
//! Property values are never computed here. Every number comes from a
//! `PropertyEvaluator`, a `PropsSI`-shaped pure lookup; CoolProp (via
//! `rfluids`) is the production backend.
//!
//! # Example
//!
//! ```no_run
//! use tt_fluids::{CoolPropEvaluator, FluidQuery, PropertySymbol, StateVar, evaluate, to_si};
//!
//! let t = to_si(PropertySymbol::T, 100.0, "°C").unwrap();
//! let p = to_si(PropertySymbol::P, 101.325, "kPa").unwrap();
//! let query = FluidQuery::general(
//!     "Water",
//!     StateVar::new(PropertySymbol::T, t),
//!     StateVar::new(PropertySymbol::P, p),
//! )
//! .unwrap();
//!
//! let result = evaluate(&CoolPropEvaluator::new(), &query, &[PropertySymbol::D]).unwrap();
//! println!("Density: {:?} kg/m³", result.get(PropertySymbol::D));
//! ```

pub mod catalog;
pub mod coolprop;
pub mod error;
pub mod evaluator;
pub mod properties;
pub mod query;
pub mod symbol;
pub mod units;

// Re-exports for ergonomics
pub use catalog::{
    FluidCatalogEntry, FluidCategory, filter_practical_coolprop_catalog,
    practical_coolprop_catalog, resolve_fluid_name,
};
pub use coolprop::CoolPropEvaluator;
pub use error::{FluidError, FluidResult};
pub use evaluator::{FnEvaluator, PropertyEvaluator};
pub use properties::{PropertyResult, PropertyRow, evaluate};
pub use query::{FluidQuery, QueryMode, StateVar};
pub use symbol::{PropertySymbol, QUALITY_KEY, parse_symbol_list};
pub use units::{
    accepted_units, friendly_unit, from_si, parse_input, split_value_and_unit, to_si,
};
