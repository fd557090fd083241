//! Shared application service layer for termotables.
//!
//! Turns request-scoped configuration (CLI flags or a saved YAML/JSON
//! request) into property lookups and table interpolations, and funnels
//! every failure into [`AppError`].

pub mod error;
pub mod property_service;
pub mod request;
pub mod run_service;
pub mod table_service;

pub use error::{AppError, AppResult};
pub use property_service::{build_query, requested_outputs, run_properties};
pub use request::{
    InputSpec, InterpolationRequest, MeshFormat, MeshRequest, PropertyRequest, Request, Resample,
    StateSpec, TableSelection, load_request, save_request,
};
pub use run_service::{Response, execute};
pub use table_service::{
    DEFAULT_PREVIEW_ROWS, InterpolationResponse, TablePreview, load_decision, preview_table,
    run_interpolation, run_mesh,
};
