//! bunkai-api crate
//!
//! Web server exposing bunkai morpheme decompositions and segmentations as an HTTP API.
//! The dataset (JSON Lines) is loaded once at startup and never changes.
//!
//! ## Endpoints
//! - `GET /decomposition/{word}` - Morphemes of a surface word
//! - `GET /segmentation/{word}` - Morphs (byte spans) of a surface word
//! - `GET /lemma/{lemma}` - All words sharing a lemma
//! - `GET /diagnostics` - Load report
//! - `GET /health` - Health Check
//!
//! ## Usage Example
//! ```bash
//! BUNKAI_DATASET_PATH=./morphynet.jsonl cargo run -p bunkai-api
//! curl http://127.0.0.1:5540/segmentation/cargando
//! ```

pub mod adapter;
pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;

pub use adapter::JsonLinesAdapter;
pub use api::AppState;
pub use config::Config;
pub use errors::{ApiError, ApiErrorKind};
pub use service::{BunkaiApiService, BunkaiApiServiceFull};
