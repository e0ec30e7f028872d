//! データセット読み込み結果のレポート型定義
//!
//! エントリーごとの結果を集計し、失敗したエントリーを上限付きで列挙する。

use serde::Serialize;

/// 失敗の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
  /// FormatAdapter の契約違反（エントリーは除外される）
  Malformed,
  /// アライメント失敗（分解は保持、分節なし）
  AlignmentFailure,
  /// プレースホルダー解決失敗（完全に未解決）
  UnresolvedPlaceholder,
}

/// 失敗したエントリー1件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFailure {
  /// 取り込み順位置
  pub ordinal: usize,
  /// 見出し語
  pub lemma: String,
  /// 表層形
  pub surface: String,
  /// 失敗の種類
  pub kind: FailureKind,
  /// エラーメッセージ
  pub reason: String,
}

/// データセット読み込みの集計結果
///
/// 1エントリーの失敗でバッチ全体が中断されないことを前提に、
/// 最終的な各エントリーの状態を数える。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
  /// 入力エントリーの総数
  pub total: usize,
  /// 明示的な形態素列から分解・分節の両方が得られた件数
  pub aligned: usize,
  /// アライメントに失敗し、分解のみ得られた件数
  pub decomposition_only: usize,
  /// 派生レコードから分解・分節が得られた件数
  pub derived: usize,
  /// 兄弟語から解決されたプレースホルダーの件数
  pub resolved_placeholders: usize,
  /// 解決できなかったプレースホルダーの件数
  pub unresolved_placeholders: usize,
  /// 注釈なしの件数
  pub unannotated: usize,
  /// 契約違反で除外された件数
  pub malformed: usize,
  /// 失敗エントリーの一覧（`max_reported_failures` 件まで）
  pub failures: Vec<EntryFailure>,
  /// 上限を超えて列挙されなかった失敗の件数
  pub omitted_failures: usize,
  #[serde(skip)]
  max_reported_failures: usize,
}

impl LoadReport {
  /// 失敗一覧の上限を指定して作成する
  pub fn with_failure_limit(max_reported_failures: usize) -> Self {
    Self {
      max_reported_failures,
      ..Self::default()
    }
  }

  /// 全エントリーが欠けなく解決されたか
  pub fn is_clean(&self) -> bool {
    self.failure_count() == 0 && self.unannotated == 0
  }

  /// 失敗の総数（列挙上限とは無関係）
  pub fn failure_count(&self) -> usize {
    self.malformed + self.decomposition_only + self.unresolved_placeholders
  }

  /// 合計件数を記録
  pub fn record_total(&mut self) {
    self.total += 1;
  }

  /// アライメント成功を記録
  pub fn record_aligned(&mut self) {
    self.aligned += 1;
  }

  /// 派生レコードの成功を記録
  pub fn record_derived(&mut self) {
    self.derived += 1;
  }

  /// 注釈なしを記録
  pub fn record_unannotated(&mut self) {
    self.unannotated += 1;
  }

  /// プレースホルダー解決成功を記録
  pub fn record_resolved_placeholder(&mut self) {
    self.resolved_placeholders += 1;
  }

  /// 失敗を記録
  pub fn record_failure(&mut self, failure: EntryFailure) {
    match failure.kind {
      FailureKind::Malformed => self.malformed += 1,
      FailureKind::AlignmentFailure => self.decomposition_only += 1,
      FailureKind::UnresolvedPlaceholder => self.unresolved_placeholders += 1,
    }
    if self.failures.len() < self.max_reported_failures {
      self.failures.push(failure);
    } else {
      self.omitted_failures += 1;
    }
  }

  /// 種類ごとの失敗一覧
  pub fn failures_of(&self, kind: FailureKind) -> impl Iterator<Item = &EntryFailure> {
    self.failures.iter().filter(move |f| f.kind == kind)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn failure(ordinal: usize, kind: FailureKind) -> EntryFailure {
    EntryFailure {
      ordinal,
      lemma: "l".into(),
      surface: "s".into(),
      kind,
      reason: String::new(),
    }
  }

  #[test]
  fn failures_are_counted_by_kind() {
    let mut report = LoadReport::with_failure_limit(10);
    report.record_failure(failure(0, FailureKind::Malformed));
    report.record_failure(failure(1, FailureKind::AlignmentFailure));
    report.record_failure(failure(2, FailureKind::UnresolvedPlaceholder));
    report.record_failure(failure(3, FailureKind::UnresolvedPlaceholder));

    assert_eq!(report.malformed, 1);
    assert_eq!(report.decomposition_only, 1);
    assert_eq!(report.unresolved_placeholders, 2);
    assert_eq!(report.failure_count(), 4);
    assert_eq!(report.failures_of(FailureKind::UnresolvedPlaceholder).count(), 2);
    assert!(!report.is_clean());
  }

  #[test]
  fn failure_list_is_bounded() {
    let mut report = LoadReport::with_failure_limit(2);
    for i in 0..5 {
      report.record_failure(failure(i, FailureKind::Malformed));
    }

    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.omitted_failures, 3);
    assert_eq!(report.malformed, 5);
    assert_eq!(report.failures[1].ordinal, 1);
  }

  #[test]
  fn report_without_failures_is_clean() {
    let mut report = LoadReport::with_failure_limit(1);
    report.record_total();
    report.record_aligned();
    assert!(report.is_clean());
  }

  #[test]
  fn serializes_kind_in_kebab_case() {
    let json = serde_json::to_value(failure(0, FailureKind::AlignmentFailure)).unwrap();
    assert_eq!(json["kind"], "alignment-failure");
  }
}
