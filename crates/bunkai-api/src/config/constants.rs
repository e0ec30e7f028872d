//! API設定の定数定義

/// デフォルトのバインドアドレス
///
/// 開発環境での利用を想定した localhost の標準ポート。
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5540";

/// 問い合わせ語の最大長（バイト単位）
pub const MAX_WORD_LENGTH: usize = 1024;

/// バインドアドレスの環境変数名
pub const ENV_BIND_ADDR: &str = "BUNKAI_API_BIND_ADDR";

/// データセット（JSON Lines）パスの環境変数名
pub const ENV_DATASET_PATH: &str = "BUNKAI_DATASET_PATH";

/// bunkai 設定ファイル（TOML）パスの環境変数名
pub const ENV_CONFIG_PATH: &str = "BUNKAI_CONFIG_PATH";
