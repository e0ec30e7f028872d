//! Service module

mod bunkai_api_service;

pub use bunkai_api_service::{BunkaiApiService, BunkaiApiServiceFull};
