//! HTTPハンドラー定義
//!
//! 読み込み済みインデックスへの問い合わせはハッシュ参照のみなので、
//! spawn_blocking を使わずハンドラー内で同期的に処理する。

use axum::{
  Json,
  extract::{Path, State},
};
use tracing::debug;

use crate::config::MAX_WORD_LENGTH;
use crate::errors::{ApiError, Result};
use crate::models::{DecompositionResponse, DiagnosticsResponse, LemmaResponse, SegmentationResponse};

use super::state::AppState;

/// パス引数の検証
fn validate_query(value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(ApiError::invalid_input("問い合わせ語が空です"));
  }
  if value.len() > MAX_WORD_LENGTH {
    return Err(ApiError::word_too_long(value.len(), MAX_WORD_LENGTH));
  }
  Ok(())
}

/// GET /decomposition/{word} エンドポイント
///
/// # Response
/// - 200 OK: `morphemes` は未知・未解決の語では `null`
/// - 400 Bad Request: 入力エラー
pub async fn get_decomposition(
  State(state): State<AppState>,
  Path(word): Path<String>,
) -> Result<Json<DecompositionResponse>> {
  validate_query(&word)?;
  debug!(word = %word, "decomposition query");
  Ok(Json(state.service.decomposition(&word)?))
}

/// GET /segmentation/{word} エンドポイント
///
/// # Response
/// - 200 OK: `morphs` は未知・未アライメントの語では `null`
/// - 400 Bad Request: 入力エラー
pub async fn get_segmentation(
  State(state): State<AppState>,
  Path(word): Path<String>,
) -> Result<Json<SegmentationResponse>> {
  validate_query(&word)?;
  debug!(word = %word, "segmentation query");
  Ok(Json(state.service.segmentation(&word)?))
}

/// GET /lemma/{lemma} エンドポイント
///
/// 取り込み順の語を返す。未知の見出し語では空配列。
pub async fn get_lemma(
  State(state): State<AppState>,
  Path(lemma): Path<String>,
) -> Result<Json<LemmaResponse>> {
  validate_query(&lemma)?;
  debug!(lemma = %lemma, "lemma query");
  Ok(Json(state.service.lemma(&lemma)?))
}

/// GET /diagnostics エンドポイント
pub async fn get_diagnostics(State(state): State<AppState>) -> Result<Json<DiagnosticsResponse>> {
  Ok(Json(state.service.diagnostics()?))
}

/// ヘルスチェックエンドポイント
///
/// サーバーが稼働しているかを確認する。
pub async fn health_check() -> &'static str {
  "OK"
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validate_query_accepts_ordinary_words() {
    assert!(validate_query("cargando").is_ok());
    assert!(validate_query("Désengageraient").is_ok());
  }

  #[test]
  fn validate_query_rejects_blank_and_oversized() {
    assert_eq!(validate_query(" ").unwrap_err().code(), "invalid_input");

    let long = "a".repeat(MAX_WORD_LENGTH + 1);
    assert_eq!(validate_query(&long).unwrap_err().code(), "word_too_long");
  }
}
