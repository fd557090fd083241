//! Conversion between friendly input units and the SI units the evaluator expects.
//!
//! Only the independent input variables carry a unit choice:
//!
//! | Symbol | Friendly | SI |
//! |--------|----------|----|
//! | `T` | °C | K |
//! | `P` | kPa | Pa |
//! | `H` | kJ/kg | J/kg |
//! | `D` | kg/m³ | kg/m³ |
//!
//! Density is always taken as SI, whatever unit string accompanies it.

use tt_core::units::CELSIUS_OFFSET_K;

use crate::error::{FluidError, FluidResult};
use crate::symbol::PropertySymbol;

/// Unit assumed for a bare number typed for `symbol`.
pub fn friendly_unit(symbol: PropertySymbol) -> FluidResult<&'static str> {
    match symbol {
        PropertySymbol::T => Ok("°C"),
        PropertySymbol::P => Ok("kPa"),
        PropertySymbol::H => Ok("kJ/kg"),
        PropertySymbol::D => Ok("kg/m³"),
        other => Err(unsupported(other)),
    }
}

/// Units accepted by [`to_si`] for `symbol`, friendly unit first.
pub fn accepted_units(symbol: PropertySymbol) -> &'static [&'static str] {
    match symbol {
        PropertySymbol::T => &["°C", "K"],
        PropertySymbol::P => &["kPa", "Pa"],
        PropertySymbol::H => &["kJ/kg", "J/kg"],
        PropertySymbol::D => &["kg/m³"],
        _ => &[],
    }
}

/// Affine map `si = value * scale + offset` selected by symbol and unit.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Affine {
    scale: f64,
    offset: f64,
}

const IDENTITY: Affine = Affine {
    scale: 1.0,
    offset: 0.0,
};

fn affine_for(symbol: PropertySymbol, unit: &str) -> FluidResult<Affine> {
    let normalized = normalize_unit(unit);
    let unknown = || FluidError::UnknownUnit {
        unit: unit.trim().to_string(),
        symbol,
    };

    match symbol {
        PropertySymbol::T => match normalized.as_str() {
            "°c" | "c" | "degc" | "celsius" => Ok(Affine {
                scale: 1.0,
                offset: CELSIUS_OFFSET_K,
            }),
            "k" | "kelvin" => Ok(IDENTITY),
            _ => Err(unknown()),
        },
        PropertySymbol::P => match normalized.as_str() {
            "kpa" => Ok(Affine {
                scale: 1e3,
                offset: 0.0,
            }),
            "pa" | "pascal" => Ok(IDENTITY),
            _ => Err(unknown()),
        },
        PropertySymbol::H => match normalized.as_str() {
            "kj/kg" => Ok(Affine {
                scale: 1e3,
                offset: 0.0,
            }),
            "j/kg" => Ok(IDENTITY),
            _ => Err(unknown()),
        },
        PropertySymbol::D => Ok(IDENTITY),
        other => Err(unsupported(other)),
    }
}

/// Convert `value` expressed in `unit` to the SI unit of `symbol`.
///
/// An empty unit means the friendly unit of the symbol.
pub fn to_si(symbol: PropertySymbol, value: f64, unit: &str) -> FluidResult<f64> {
    let unit = if unit.trim().is_empty() {
        friendly_unit(symbol)?
    } else {
        unit
    };
    let map = affine_for(symbol, unit)?;
    Ok(value * map.scale + map.offset)
}

/// Convert an SI value of `symbol` back to `unit`. Inverse of [`to_si`].
pub fn from_si(symbol: PropertySymbol, value_si: f64, unit: &str) -> FluidResult<f64> {
    let unit = if unit.trim().is_empty() {
        friendly_unit(symbol)?
    } else {
        unit
    };
    let map = affine_for(symbol, unit)?;
    Ok((value_si - map.offset) / map.scale)
}

/// Parse user text such as `"25 °C"`, `"101.325kPa"` or `"300"` into an SI value.
///
/// A bare number is read in the symbol's friendly unit.
pub fn parse_input(symbol: PropertySymbol, raw_text: &str) -> FluidResult<f64> {
    let (value, unit) = split_value_and_unit(raw_text)?;
    to_si(symbol, value, &unit)
}

fn unsupported(symbol: PropertySymbol) -> FluidError {
    FluidError::UnsupportedSymbol {
        symbol: symbol.key().to_string(),
    }
}

/// Lowercase, strip whitespace, fold `º`/`℃` variants onto `°c`.
fn normalize_unit(unit: &str) -> String {
    let compact: String = unit
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    match compact.as_str() {
        "℃" => "°c".to_string(),
        other => other.replace('º', "°"),
    }
}

/// Split a value+unit string into (numeric_value, unit_string).
///
/// Examples:
/// - "25°C" -> (25.0, "°C")
/// - "101.325 kPa" -> (101.325, "kPa")
/// - "300" -> (300.0, "")
pub fn split_value_and_unit(input: &str) -> FluidResult<(f64, String)> {
    let trimmed = input.trim();

    // Exponent markers only count when followed by a digit or sign.
    let bytes = trimmed.as_bytes();
    let split_idx = trimmed
        .char_indices()
        .find(|&(i, c)| {
            let exponent = (c == 'e' || c == 'E')
                && i > 0
                && bytes
                    .get(i + 1)
                    .is_some_and(|b| b.is_ascii_digit() || *b == b'-' || *b == b'+');
            !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || exponent)
        })
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| FluidError::Parse {
        message: format!("Could not parse numeric value from '{}'", input),
    })?;

    Ok((value, unit_part.trim().to_string()))
}
