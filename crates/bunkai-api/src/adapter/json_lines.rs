//! JSON Lines FormatAdapter
//!
//! 1行1レコードの RawEntry を読む。例:
//!
//! ```text
//! {"lemma":"walk","surface":"walked","tag":"V|PST","morphemes":{"kind":"explicit","morphemes":["walk","ed"]}}
//! {"lemma":"walk","surface":"walk","morphemes":{"kind":"same-as-lemma"}}
//! ```
//!
//! 空行は無視し、解析できない行は警告ログを出して読み飛ばす。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use bunkai::adapter::FormatAdapter;
use bunkai::errors::AdapterError;
use bunkai::models::RawEntry;

/// JSON Lines ファイルから RawEntry を読むアダプター
#[derive(Debug, Clone)]
pub struct JsonLinesAdapter {
  path: PathBuf,
}

impl JsonLinesAdapter {
  /// ファイルパスから作成する
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// 読み込み対象のパス
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// 文字列全体を解析する（ファイル読み込み以外の処理）
  pub fn parse_str(&self, source: &str) -> Vec<RawEntry> {
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in source.lines().enumerate() {
      let line = line.trim();
      if line.is_empty() {
        continue;
      }
      match serde_json::from_str::<RawEntry>(line) {
        Ok(entry) => entries.push(entry),
        Err(e) => {
          skipped += 1;
          warn!(path = ?self.path, line = index + 1, error = %e, "skipping unparseable line");
        }
      }
    }

    if skipped > 0 {
      info!(path = ?self.path, skipped, parsed = entries.len(), "json lines parsed with skips");
    }
    entries
  }
}

impl FormatAdapter for JsonLinesAdapter {
  fn name(&self) -> &str {
    "json-lines"
  }

  fn read_entries(&self) -> Result<Vec<RawEntry>, AdapterError> {
    let source = std::fs::read_to_string(&self.path).map_err(|e| AdapterError::Read {
      path: self.path.clone(),
      source: Arc::new(e),
    })?;
    Ok(self.parse_str(&source))
  }
}
