//! エラー定義

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// 設定ファイル（BunkaiConfig）関連のエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ConfigError {
  /// alignment.span_slack が許容範囲外
  #[error("alignment.span_slack は {max} 以下である必要があります: actual={actual}")]
  InvalidSpanSlack {
    /// 許容される最大値
    max: usize,
    /// 実際に指定された値
    actual: usize,
  },

  /// resolver.strategy = "suffix-table" なのに suffix_table が空
  #[error("resolver.strategy が suffix-table の場合、suffix_table に少なくとも1つの形態を指定してください")]
  EmptySuffixTable,

  /// suffix_table に空文字列が含まれている
  #[error("resolver.suffix_table に空文字列が含まれています: index={index}")]
  EmptySuffixTableEntry {
    /// 空文字列の位置
    index: usize,
  },

  /// loading.max_reported_failures < 1
  #[error("loading.max_reported_failures は 1 以上である必要があります: actual={actual}")]
  InvalidMaxReportedFailures {
    /// 実際に指定された値
    actual: usize,
  },

  /// 設定ファイルの読み込みに失敗
  #[error("設定ファイルの読み込みに失敗しました: path={path:?}, error={source}")]
  Read {
    /// 読み込もうとしたパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },

  /// TOML の解析に失敗
  #[error("設定ファイルの解析に失敗しました: {reason}")]
  Parse {
    /// 解析失敗の理由
    reason: String,
  },
}

/// RawEntry が FormatAdapter の契約に違反している（MalformedRawEntry）
///
/// そのエントリー単体にとっては致命的だが、バッチ全体は中断しない。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntryError {
  /// 表層形が空
  #[error("表層形が空です: lemma={lemma}")]
  EmptySurface {
    /// 対象エントリーの見出し語
    lemma: String,
  },

  /// 見出し語が空
  #[error("見出し語が空です: surface={surface}")]
  EmptyLemma {
    /// 対象エントリーの表層形
    surface: String,
  },

  /// 形態素リストが空
  #[error("形態素リストが空です: surface={surface}")]
  EmptyMorphemeList {
    /// 対象エントリーの表層形
    surface: String,
  },

  /// 形態素リスト中に空文字列がある
  #[error("形態素リストに空の形態素があります: surface={surface}, index={index}")]
  EmptyMorpheme {
    /// 対象エントリーの表層形
    surface: String,
    /// 空だった形態素の位置
    index: usize,
  },

  /// 派生レコードの基底または接辞が空
  #[error("派生レコードの基底または接辞が空です: surface={surface}")]
  EmptyDerivationPart {
    /// 対象エントリーの表層形
    surface: String,
  },
}

/// アライメント失敗（AlignmentFailure）
///
/// 回復可能。分解は保持し、分節のみ未確定として扱う。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AlignmentError {
  /// 入力の表層形が空
  #[error("アライメント対象の表層形が空です")]
  EmptySurface,

  /// 入力の形態素列が空
  #[error("アライメント対象の形態素列が空です: surface={surface}")]
  EmptyMorphemes {
    /// 対象の表層形
    surface: String,
  },

  /// 非空スパンへの分割が存在しない
  #[error("分割が存在しません: surface={surface}, morphemes={morphemes}")]
  NoPartition {
    /// 対象の表層形
    surface: String,
    /// 形態素数
    morphemes: usize,
  },

  /// 最良分割のコストが受理閾値を超えた
  #[error("最良分割のコストが閾値を超えました: surface={surface}, cost={cost}, threshold={threshold}")]
  CostAboveThreshold {
    /// 対象の表層形
    surface: String,
    /// 最良分割の総編集コスト
    cost: u32,
    /// 受理閾値
    threshold: u32,
  },

  /// 選ばれた分割から分節を構築できない
  #[error("アライメント結果の分節が不正です: {0}")]
  Segmentation(#[from] SegmentationError),
}

/// プレースホルダー解決失敗（UnresolvedPlaceholder）
///
/// エントリーは完全に未解決として扱う。推測は行わない。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolveError {
  /// SAME_AS_LEMMA ではないエントリーが渡された
  #[error("SAME_AS_LEMMA のエントリーではありません: surface={surface}")]
  NotPlaceholder {
    /// 対象の表層形
    surface: String,
  },

  /// 参照可能な兄弟語が存在しない
  #[error("参照可能な兄弟語がありません: lemma={lemma}, surface={surface}")]
  NoEligibleSibling {
    /// 対象の見出し語
    lemma: String,
    /// 対象の表層形
    surface: String,
  },

  /// 兄弟語から得た語幹が表層形の接頭辞ではない
  #[error("語幹が表層形の接頭辞ではありません: stem={stem}, surface={surface}")]
  StemNotPrefix {
    /// 兄弟語の最終形態を除いた語幹
    stem: String,
    /// 対象の表層形
    surface: String,
  },

  /// 合成した分節が不変条件を満たさない
  #[error("合成した分節が不正です: {0}")]
  Segmentation(#[from] SegmentationError),
}

/// Morph / Segmentation の不変条件違反
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SegmentationError {
  /// start >= end または end が表層形の長さを超える
  #[error("スパンが不正です: start={start}, end={end}, len={len}")]
  InvalidSpan {
    /// 開始バイト位置
    start: usize,
    /// 終了バイト位置
    end: usize,
    /// 表層形のバイト長
    len: usize,
  },

  /// スパン境界が UTF-8 の文字境界ではない
  #[error("スパン境界が文字境界ではありません: offset={offset}")]
  NotCharBoundary {
    /// 問題のバイト位置
    offset: usize,
  },

  /// スパン同士が重なっている、または順序が逆
  #[error("スパンが重なっているか順序が不正です: previous_end={previous_end}, start={start}")]
  Overlap {
    /// 直前のスパンの終了位置
    previous_end: usize,
    /// 現在のスパンの開始位置
    start: usize,
  },

  /// morph のテキストが表層形の部分文字列と一致しない
  #[error("morph のテキストが表層形と一致しません: expected={expected}, actual={actual}")]
  TextMismatch {
    /// 表層形の部分文字列
    expected: String,
    /// morph に格納されたテキスト
    actual: String,
  },

  /// 空の分節
  #[error("分節が空です")]
  Empty,
}

/// データセット全体の読み込みエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum IndexError {
  /// エントリーが1件もない
  #[error("データセットにエントリーがありません")]
  EmptyDataset,
}

/// FormatAdapter のエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum AdapterError {
  /// ソースの読み込みに失敗
  #[error("データソースの読み込みに失敗しました: path={path:?}, error={source}")]
  Read {
    /// 読み込もうとしたパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },

  /// ソースの形式が不正
  #[error("データソースの形式が不正です: adapter={adapter}, reason={reason}")]
  InvalidFormat {
    /// アダプター名
    adapter: String,
    /// 不正の理由
    reason: String,
  },
}

/// 統合エラー
/// 本クレートの外部に公開するエラー用 API はこのエラーを返すこと
/// `BunkaiResult<T>` = `Result<T, BunkaiError>` として使用する
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum BunkaiError {
  /// 設定エラー
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// エントリー契約違反
  #[error(transparent)]
  Entry(#[from] EntryError),

  /// アライメント失敗
  #[error(transparent)]
  Alignment(#[from] AlignmentError),

  /// プレースホルダー解決失敗
  #[error(transparent)]
  Resolve(#[from] ResolveError),

  /// 分節の不変条件違反
  #[error(transparent)]
  Segmentation(#[from] SegmentationError),

  /// インデックス構築エラー
  #[error(transparent)]
  Index(#[from] IndexError),

  /// FormatAdapter エラー
  #[error(transparent)]
  Adapter(#[from] AdapterError),
}

/// bunkai クレートの標準 Result 型エイリアス
pub type BunkaiResult<T> = Result<T, BunkaiError>;
