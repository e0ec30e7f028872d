// crates/bunkai/src/service.rs

//! BunkaiService: bunkai クレートの統合ファサード。
//!
//! - 設定検証 (BunkaiConfig)
//! - データセット読み込み (FormatAdapter → LemmaIndex)
//! - 問い合わせ (MorphologyQuery)
//!
//! 下流の言語別コンシューマからは、この構造体だけを意識すればよい。
//! 読み込み完了後は不変で、複数スレッドから共有できる。

use tracing::info;

use crate::adapter::FormatAdapter;
use crate::config::BunkaiConfig;
use crate::errors::BunkaiResult;
use crate::index::{LemmaIndex, LoadReport};
use crate::models::{Decomposition, RawEntry, Segmentation, Word};
use crate::query::MorphologyQuery;

/// bunkai クレートの統合ファサード。
///
/// 読み込み済みの [`LemmaIndex`] を所有する。グローバルな登録簿は持たず、
/// 呼び出し側が明示的に値を保持する。
#[derive(Debug, Clone)]
pub struct BunkaiService {
  /// 読み込み時の設定
  config: BunkaiConfig,

  /// 凍結済みインデックス
  index: LemmaIndex,
}

impl BunkaiService {
  /// RawEntry 列からデータセットを読み込む。
  ///
  /// # 処理フロー
  /// 1. 設定の妥当性を検証
  /// 2. 第1フェーズ（アライメント）
  /// 3. 第2フェーズ（プレースホルダー解決）
  ///
  /// # エラー
  /// - 設定が不正
  /// - エントリーが1件もない
  pub fn load(config: BunkaiConfig, entries: &[RawEntry]) -> BunkaiResult<Self> {
    // ConfigError / IndexError は #[from] で BunkaiError に自動変換
    config.validate()?;
    let index = LemmaIndex::build(entries, &config)?;
    Ok(Self { config, index })
  }

  /// FormatAdapter からデータセットを読み込む。
  ///
  /// # エラー
  /// - アダプターがソースを読めない
  /// - [`BunkaiService::load`] と同じ
  pub fn load_from_adapter(config: BunkaiConfig, adapter: &dyn FormatAdapter) -> BunkaiResult<Self> {
    let entries = adapter.read_entries()?;
    info!(adapter = adapter.name(), entries = entries.len(), "entries read");
    Self::load(config, &entries)
  }

  /// 複数の FormatAdapter を連結して1つのデータセットとして読み込む。
  ///
  /// エントリーはアダプターの並び順に連結されるため、取り込み順
  /// （ordinal）は全アダプターを通した全順序になる。異なるソースの
  /// 同じ見出し語は1つのグループにまとまる。
  ///
  /// # エラー
  /// - いずれかのアダプターがソースを読めない
  /// - [`BunkaiService::load`] と同じ
  pub fn load_from_adapters(
    config: BunkaiConfig,
    adapters: &[&dyn FormatAdapter],
  ) -> BunkaiResult<Self> {
    let mut entries = Vec::new();
    for adapter in adapters {
      let read = adapter.read_entries()?;
      info!(adapter = adapter.name(), entries = read.len(), offset = entries.len(), "entries read");
      entries.extend(read);
    }
    Self::load(config, &entries)
  }

  /// 読み込み時の設定
  pub fn config(&self) -> &BunkaiConfig {
    &self.config
  }

  /// 内部インデックスへの参照
  pub fn index(&self) -> &LemmaIndex {
    &self.index
  }
}

impl MorphologyQuery for BunkaiService {
  fn decomposition_of(&self, surface: &str) -> Option<&Decomposition> {
    self.index.decomposition_of(surface)
  }

  fn segmentation_of(&self, surface: &str) -> Option<&Segmentation> {
    self.index.segmentation_of(surface)
  }

  fn words_for_lemma(&self, lemma: &str) -> Vec<&Word> {
    self.index.words_for_lemma(lemma)
  }

  fn words_for_surface(&self, surface: &str) -> Vec<&Word> {
    self.index.words_for_surface(surface)
  }

  fn diagnostics(&self) -> &LoadReport {
    self.index.diagnostics()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
