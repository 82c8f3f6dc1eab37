//! Catalog engine: REST client and asynchronous command execution.
mod api;
mod engine;
mod types;

pub use api::{ApiSettings, PlantApi, ReqwestApi};
pub use engine::EngineHandle;
pub use types::{
    ApiError, ApiErrorKind, EngineEvent, ImageUpload, PageEnvelope, PageQuery, PlantDraft,
    PlantRecord, WriteKind,
};
