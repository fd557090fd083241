//! Property symbols understood by the query facade.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FluidError;

/// Evaluator key for vapor quality, the second input of saturation queries.
pub const QUALITY_KEY: &str = "Q";

/// Thermodynamic property that can be requested as an output.
///
/// `T`, `P`, `H` and `D` can also serve as independent input variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PropertySymbol {
    /// Temperature
    T,
    /// Pressure
    P,
    /// Mass density
    D,
    /// Specific enthalpy
    H,
    /// Specific entropy
    S,
    /// Specific volume
    V,
    /// Specific heat at constant pressure
    CP,
    /// Specific heat at constant volume
    CV,
}

impl PropertySymbol {
    pub const ALL: [PropertySymbol; 8] = [
        PropertySymbol::T,
        PropertySymbol::P,
        PropertySymbol::D,
        PropertySymbol::H,
        PropertySymbol::S,
        PropertySymbol::V,
        PropertySymbol::CP,
        PropertySymbol::CV,
    ];

    /// Symbols that may be used as independent state variables.
    pub const INPUTS: [PropertySymbol; 4] = [
        PropertySymbol::T,
        PropertySymbol::P,
        PropertySymbol::H,
        PropertySymbol::D,
    ];

    /// Outputs shown when the caller does not pick any.
    pub const DEFAULT_OUTPUTS: [PropertySymbol; 4] = [
        PropertySymbol::T,
        PropertySymbol::P,
        PropertySymbol::D,
        PropertySymbol::H,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::T => "T",
            Self::P => "P",
            Self::D => "D",
            Self::H => "H",
            Self::S => "S",
            Self::V => "V",
            Self::CP => "CP",
            Self::CV => "CV",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::T => "Temperature",
            Self::P => "Pressure",
            Self::D => "Density",
            Self::H => "Specific enthalpy",
            Self::S => "Specific entropy",
            Self::V => "Specific volume",
            Self::CP => "Specific heat at constant pressure",
            Self::CV => "Specific heat at constant volume",
        }
    }

    /// One-line description for the property guide.
    pub fn description(&self) -> &'static str {
        match self {
            Self::T => "Degree of thermal agitation",
            Self::P => "Force exerted per unit area",
            Self::D => "Mass per unit volume",
            Self::H => "Total energy (internal + PV)",
            Self::S => "Energy unavailable for work",
            Self::V => "Volume occupied by 1 kg",
            Self::CP => "Energy to raise 1 kg by 1 K at constant P",
            Self::CV => "Energy to raise 1 kg by 1 K at constant V",
        }
    }

    pub fn si_unit(&self) -> &'static str {
        match self {
            Self::T => "K",
            Self::P => "Pa",
            Self::D => "kg/m³",
            Self::H => "J/kg",
            Self::S | Self::CP | Self::CV => "J/kg·K",
            Self::V => "m³/kg",
        }
    }

    /// Evaluator key used when this symbol is requested as an output.
    ///
    /// CoolProp has no specific-volume output, so `V` is read as mass density
    /// and inverted by [`PropertySymbol::from_evaluator`].
    pub fn output_key(&self) -> &'static str {
        match self {
            Self::T => "T",
            Self::P => "P",
            Self::D | Self::V => "Dmass",
            Self::H => "Hmass",
            Self::S => "Smass",
            Self::CP => "Cpmass",
            Self::CV => "Cvmass",
        }
    }

    /// Evaluator key used when this symbol is an independent input.
    pub fn input_key(&self) -> Option<&'static str> {
        match self {
            Self::T => Some("T"),
            Self::P => Some("P"),
            Self::H => Some("Hmass"),
            Self::D => Some("Dmass"),
            Self::S | Self::V | Self::CP | Self::CV => None,
        }
    }

    pub fn is_input(&self) -> bool {
        self.input_key().is_some()
    }

    /// Map a raw evaluator output (read with [`output_key`](Self::output_key)) to this symbol's SI value.
    pub fn from_evaluator(&self, raw: f64) -> f64 {
        match self {
            Self::V => 1.0 / raw,
            _ => raw,
        }
    }
}

impl fmt::Display for PropertySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for PropertySymbol {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|sym| sym.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FluidError::UnsupportedSymbol {
                symbol: wanted.to_string(),
            })
    }
}

impl TryFrom<String> for PropertySymbol {
    type Error = FluidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PropertySymbol> for String {
    fn from(sym: PropertySymbol) -> Self {
        sym.key().to_string()
    }
}

/// Parse a comma-separated symbol list such as `"T, P, D, CP"`.
pub fn parse_symbol_list(text: &str) -> Result<Vec<PropertySymbol>, FluidError> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("cp".parse::<PropertySymbol>().unwrap(), PropertySymbol::CP);
        assert_eq!(" T ".parse::<PropertySymbol>().unwrap(), PropertySymbol::T);
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let err = "Z".parse::<PropertySymbol>().unwrap_err();
        assert!(matches!(err, FluidError::UnsupportedSymbol { symbol } if symbol == "Z"));
    }

    #[test]
    fn only_inputs_have_input_keys() {
        let inputs: HashSet<_> = PropertySymbol::INPUTS.into_iter().collect();
        for sym in PropertySymbol::ALL {
            assert_eq!(sym.is_input(), inputs.contains(&sym), "{sym}");
            assert!(!sym.output_key().is_empty());
        }
    }

    #[test]
    fn specific_volume_is_inverse_density() {
        assert_eq!(PropertySymbol::V.output_key(), "Dmass");
        assert!((PropertySymbol::V.from_evaluator(1000.0) - 1.0e-3).abs() < 1e-15);
        assert_eq!(PropertySymbol::D.from_evaluator(1000.0), 1000.0);
    }

    #[test]
    fn symbol_list_parsing() {
        let list = parse_symbol_list("T, p,D ,,cv").unwrap();
        assert_eq!(
            list,
            vec![
                PropertySymbol::T,
                PropertySymbol::P,
                PropertySymbol::D,
                PropertySymbol::CV
            ]
        );
        assert!(parse_symbol_list("T,X").is_err());
    }
}
