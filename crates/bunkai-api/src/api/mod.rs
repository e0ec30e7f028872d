//! API module

mod handlers;
mod routes;
mod state;

pub use handlers::{get_decomposition, get_diagnostics, get_lemma, get_segmentation, health_check};
pub use routes::{create_router, run_server};
pub use state::AppState;
