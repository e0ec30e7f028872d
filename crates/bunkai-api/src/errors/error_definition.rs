//! APIエラー定義

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

// bunkai クレートのエラー型をインポート
use bunkai::errors::{BunkaiError, ConfigError};

/// エラーの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
  /// 入力値が無効
  InvalidInput,
  /// 問い合わせ語が長すぎる
  WordTooLong,
  /// 内部エラー
  Internal,
  /// 設定エラー
  Config,
}

impl ApiErrorKind {
  /// エラーコードを取得
  #[must_use]
  pub fn code(&self) -> &'static str {
    match self {
      Self::InvalidInput => "invalid_input",
      Self::WordTooLong => "word_too_long",
      Self::Internal => "internal_error",
      Self::Config => "config_error",
    }
  }

  /// HTTPステータスコードを取得
  #[must_use]
  pub fn status(&self) -> StatusCode {
    match self {
      Self::InvalidInput | Self::WordTooLong => StatusCode::BAD_REQUEST,
      Self::Internal | Self::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

/// APIエラー
#[derive(Debug, Error)]
pub enum ApiError {
  /// 入力値が無効
  #[error("入力値が無効です: {0}")]
  InvalidInput(String),

  /// 問い合わせ語が長すぎる
  #[error("問い合わせ語が長すぎます: {0} バイト（最大: {1} バイト）")]
  WordTooLong(usize, usize),

  /// 内部エラー
  #[error("内部エラー: {0}")]
  Internal(String),

  /// 設定エラー
  #[error("設定エラー: {0}")]
  Config(String),
}

impl ApiError {
  /// エラーの種類を取得
  #[must_use]
  pub fn kind(&self) -> ApiErrorKind {
    match self {
      Self::InvalidInput(_) => ApiErrorKind::InvalidInput,
      Self::WordTooLong(_, _) => ApiErrorKind::WordTooLong,
      Self::Internal(_) => ApiErrorKind::Internal,
      Self::Config(_) => ApiErrorKind::Config,
    }
  }

  /// エラーコードを取得
  #[must_use]
  pub fn code(&self) -> &'static str {
    self.kind().code()
  }

  /// HTTPステータスコードを取得
  #[must_use]
  pub fn status(&self) -> StatusCode {
    self.kind().status()
  }

  /// 無効な入力エラーを作成
  #[must_use]
  pub fn invalid_input(message: impl Into<String>) -> Self {
    Self::InvalidInput(message.into())
  }

  /// 語長超過エラーを作成
  #[must_use]
  pub fn word_too_long(actual: usize, max: usize) -> Self {
    Self::WordTooLong(actual, max)
  }

  /// 内部エラーを作成
  #[must_use]
  pub fn internal(message: impl Into<String>) -> Self {
    Self::Internal(message.into())
  }

  /// 設定エラーを作成
  #[must_use]
  pub fn config(message: impl Into<String>) -> Self {
    Self::Config(message.into())
  }
}

/// エラーレスポンスのJSON構造
#[derive(Serialize)]
struct ErrorResponse {
  error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
  code: &'static str,
  message: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = ErrorResponse {
      error: ErrorBody {
        code: self.code(),
        message: self.to_string(),
      },
    };

    (status, Json(body)).into_response()
  }
}

impl From<ConfigError> for ApiError {
  fn from(err: ConfigError) -> Self {
    ApiError::config(err.to_string())
  }
}

/// BunkaiError から ApiError への変換
///
/// 起動時の読み込み失敗は設定エラー、それ以外は内部エラーとして扱う。
impl From<BunkaiError> for ApiError {
  fn from(err: BunkaiError) -> Self {
    match err {
      BunkaiError::Config(err) => ApiError::from(err),
      BunkaiError::Adapter(_) | BunkaiError::Index(_) => {
        ApiError::config(format!("dataset error: {err}"))
      }
      BunkaiError::Entry(_)
      | BunkaiError::Alignment(_)
      | BunkaiError::Resolve(_)
      | BunkaiError::Segmentation(_) => ApiError::internal(format!("internal error: {err}")),
      // #[non_exhaustive] な enum のため、将来追加されるバリアントに対応
      _ => ApiError::internal(format!("unknown error: {err}")),
    }
  }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, ApiError>;
