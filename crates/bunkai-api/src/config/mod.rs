//! Config module

mod constants;
mod env;

pub use constants::{
  DEFAULT_BIND_ADDR, ENV_BIND_ADDR, ENV_CONFIG_PATH, ENV_DATASET_PATH, MAX_WORD_LENGTH,
};
pub use env::Config;
