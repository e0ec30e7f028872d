//! Alignment Engine
//!
//! - `normalize`: 文字単位の正書法的な畳み込み
//! - `edit_distance`: 接頭辞ごとの編集距離
//! - `aligner`: 形態素列による表層形の最良分割
//! - `derivation`: 派生レコード（基底 + 接辞）のアライメント

pub mod aligner;
pub mod derivation;
pub mod edit_distance;
pub mod normalize;

pub use aligner::{Aligner, Alignment};
pub use derivation::{DerivedAnalysis, align_derivation, derivation_morphemes};
