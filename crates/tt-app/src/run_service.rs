//! Execute any saved request.

use serde::Serialize;
use tt_fluids::{PropertyEvaluator, PropertyResult};
use tt_tables::MeshGrid;

use crate::error::AppResult;
use crate::property_service::run_properties;
use crate::request::{MeshFormat, Request};
use crate::table_service::{InterpolationResponse, run_interpolation, run_mesh};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Properties(PropertyResult),
    Interpolate(InterpolationResponse),
    Mesh {
        format: MeshFormat,
        #[serde(flatten)]
        mesh: MeshGrid,
    },
}

/// Run one request to completion. Nothing is retained between calls.
pub fn execute(evaluator: &dyn PropertyEvaluator, request: &Request) -> AppResult<Response> {
    Ok(match request {
        Request::Properties(req) => Response::Properties(run_properties(evaluator, req)?),
        Request::Interpolate(req) => Response::Interpolate(run_interpolation(req)?),
        Request::Mesh(req) => Response::Mesh {
            format: req.format,
            mesh: run_mesh(req)?,
        },
    })
}
