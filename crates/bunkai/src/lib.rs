//! bunkai 形態素分解・分節ライブラリー
//!
//! 形式の異なる形態論的注釈ソースを、単一の正規表現（分解 + 分節）へ正規化する

/// 設定モジュール - BunkaiConfig 等の設定構造体を定義
pub mod config;

/// エラーモジュール - BunkaiError, BunkaiResult等のエラー型を定義
pub mod errors;

/// データモデルモジュール - Morpheme, Segmentation, Word, RawEntry等のデータ構造を定義
pub mod models;

/// アライメントモジュール - 編集距離に基づく表層形の最良分割
pub mod alignment;

/// リゾルバーモジュール - SAME_AS_LEMMA エントリーの兄弟語からの復元
pub mod resolver;

/// インデックスモジュール - 見出し語グループの2フェーズ構築と読み込みレポート
pub mod index;

/// アダプターモジュール - FormatAdapter 境界
pub mod adapter;

/// 問い合わせモジュール - MorphologyQuery トレイト
pub mod query;

/// サービスモジュール - BunkaiService 等の上位レベルAPIを提供
pub mod service;

/// 再エクスポート
pub use config::BunkaiConfig;
pub use errors::{BunkaiError, BunkaiResult};
pub use query::MorphologyQuery;
pub use service::BunkaiService;
