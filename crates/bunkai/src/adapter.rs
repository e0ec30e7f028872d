//! FormatAdapter: データソースごとの読み込み境界
//!
//! コアは [`RawEntry`] の契約のみに依存し、具体的なファイル形式は知らない。
//! 具体的なアダプター（JSON Lines 等）はコアの外側で実装する。

use crate::errors::AdapterError;
use crate::models::RawEntry;

/// データソースから RawEntry 列を生成する能力
pub trait FormatAdapter: Send + Sync {
  /// ログ・エラー用のアダプター名
  fn name(&self) -> &str;

  /// ソース全体を読み込み、取り込み順の RawEntry 列を返す。
  ///
  /// # Errors
  /// ソース自体が読めない場合のみ。個々の不正エントリーはコア側で扱う。
  fn read_entries(&self) -> Result<Vec<RawEntry>, AdapterError>;
}

/// メモリ上の RawEntry 列をそのまま返すアダプター
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdapter {
  name: String,
  entries: Vec<RawEntry>,
}

impl InMemoryAdapter {
  /// 名前と RawEntry 列から作成する
  pub fn new(name: impl Into<String>, entries: Vec<RawEntry>) -> Self {
    Self {
      name: name.into(),
      entries,
    }
  }
}

impl FormatAdapter for InMemoryAdapter {
  fn name(&self) -> &str {
    &self.name
  }

  fn read_entries(&self) -> Result<Vec<RawEntry>, AdapterError> {
    Ok(self.entries.clone())
  }
}
