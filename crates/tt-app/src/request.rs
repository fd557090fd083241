//! Request schema: what a user asks for, as plain serde data.
//!
//! Requests are self-contained and passed by value; nothing is cached between
//! them. Files may be YAML or JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tt_fluids::PropertySymbol;
use tt_tables::InterpMethod;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Properties(PropertyRequest),
    Interpolate(InterpolationRequest),
    Mesh(MeshRequest),
}

/// A fluid-property lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyRequest {
    /// CoolProp name or catalog alias.
    pub fluid: String,
    /// Empty means the default set (T, P, D, H).
    #[serde(default)]
    pub outputs: Vec<PropertySymbol>,
    pub state: StateSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StateSpec {
    /// Two independent state variables.
    General { inputs: [InputSpec; 2] },
    /// Saturation line at P or T with a vapor quality in [0, 1].
    Saturation { input: InputSpec, quality: f64 },
}

/// One state variable as the user typed it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputSpec {
    pub symbol: PropertySymbol,
    pub value: f64,
    /// Empty means the symbol's friendly unit (°C, kPa, kJ/kg, kg/m³).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,
}

impl InputSpec {
    pub fn new(symbol: PropertySymbol, value: f64, unit: impl Into<String>) -> Self {
        Self {
            symbol,
            value,
            unit: unit.into(),
        }
    }
}

/// Which CSV columns play x, y and value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableSelection {
    pub csv: PathBuf,
    pub x: String,
    pub y: String,
    pub value: String,
}

/// Interpolate one value column at a point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterpolationRequest {
    #[serde(flatten)]
    pub table: TableSelection,
    #[serde(default = "default_method")]
    pub method: InterpMethod,
    /// Query point `[x, y]`; defaults to the column medians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<[f64; 2]>,
}

/// Build the pivoted (or resampled) mesh of one value column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshRequest {
    #[serde(flatten)]
    pub table: TableSelection,
    #[serde(default)]
    pub format: MeshFormat,
    /// Evaluate on an evenly spaced lattice instead of the raw pivot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resample: Option<Resample>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Resample {
    pub nx: usize,
    pub ny: usize,
    #[serde(default = "default_method")]
    pub method: InterpMethod,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MeshFormat {
    #[default]
    Ascii,
    Csv,
    Json,
}

fn default_method() -> InterpMethod {
    InterpMethod::Linear
}

/// Load a request from a `.json` file, or YAML for any other extension.
pub fn load_request(path: &Path) -> AppResult<Request> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::RequestFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_request(&content, is_json(path)).map_err(|message| AppError::RequestParse {
        path: path.to_path_buf(),
        message,
    })
}

/// Write a request as YAML, or JSON for a `.json` path.
pub fn save_request(path: &Path, request: &Request) -> AppResult<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(request)?
    } else {
        serde_yaml::to_string(request)?
    };
    std::fs::write(path, content)?;
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn parse_request(content: &str, json: bool) -> Result<Request, String> {
    if json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_property_request() {
        let yaml = r#"
type: properties
fluid: water
outputs: [D, H, cp]
state:
  mode: general
  inputs:
    - { symbol: T, value: 100, unit: "°C" }
    - { symbol: P, value: 101.325 }
"#;
        let request = parse_request(yaml, false).unwrap();
        let Request::Properties(req) = request else {
            panic!("expected a property request");
        };
        assert_eq!(req.fluid, "water");
        assert_eq!(
            req.outputs,
            vec![PropertySymbol::D, PropertySymbol::H, PropertySymbol::CP]
        );
        let StateSpec::General { inputs } = req.state else {
            panic!("expected general state");
        };
        assert_eq!(inputs[0].unit, "°C");
        assert_eq!(inputs[1].unit, "");
    }

    #[test]
    fn json_saturation_request() {
        let json = r#"{
            "type": "properties",
            "fluid": "R134a",
            "state": {"mode": "saturation", "input": {"symbol": "P", "value": 500, "unit": "kPa"}, "quality": 1.0}
        }"#;
        let Request::Properties(req) = parse_request(json, true).unwrap() else {
            panic!("expected a property request");
        };
        assert!(req.outputs.is_empty());
        assert!(matches!(req.state, StateSpec::Saturation { quality, .. } if quality == 1.0));
    }

    #[test]
    fn interpolation_defaults() {
        let yaml = "type: interpolate\ncsv: table.csv\nx: T\ny: P\nvalue: rho\n";
        let Request::Interpolate(req) = parse_request(yaml, false).unwrap() else {
            panic!("expected an interpolation request");
        };
        assert_eq!(req.method, InterpMethod::Linear);
        assert_eq!(req.at, None);
        assert_eq!(req.table.value, "rho");
    }

    #[test]
    fn mesh_request_with_resample() {
        let yaml = "type: mesh\ncsv: t.csv\nx: a\ny: b\nvalue: c\nformat: csv\nresample: { nx: 10, ny: 20, method: cubic }\n";
        let Request::Mesh(req) = parse_request(yaml, false).unwrap() else {
            panic!("expected a mesh request");
        };
        assert_eq!(req.format, MeshFormat::Csv);
        assert_eq!(
            req.resample,
            Some(Resample {
                nx: 10,
                ny: 20,
                method: InterpMethod::Cubic
            })
        );
    }

    #[test]
    fn bad_method_and_symbol_are_rejected() {
        let yaml = "type: interpolate\ncsv: t.csv\nx: a\ny: b\nvalue: c\nmethod: quintic\n";
        assert!(parse_request(yaml, false).unwrap_err().contains("quintic"));

        let yaml = "type: properties\nfluid: Water\noutputs: [Z]\nstate: { mode: saturation, input: { symbol: T, value: 100 }, quality: 0 }\n";
        assert!(parse_request(yaml, false).is_err());
    }

    #[test]
    fn yaml_round_trip() {
        let request = Request::Interpolate(InterpolationRequest {
            table: TableSelection {
                csv: PathBuf::from("t.csv"),
                x: "T".into(),
                y: "P".into(),
                value: "h".into(),
            },
            method: InterpMethod::Nearest,
            at: Some([300.0, 1.0e5]),
        });
        let text = serde_yaml::to_string(&request).unwrap();
        assert_eq!(parse_request(&text, false).unwrap(), request);
    }
}
