//! モデルモジュール

mod response;

pub use response::{
  DecompositionResponse, DiagnosticsResponse, LemmaResponse, MorphDto, MorphemeDto,
  SegmentationResponse, WordDto,
};
