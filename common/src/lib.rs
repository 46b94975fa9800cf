//! Stack-Set Status Common
//!
//! サーバーとテストで共有する型・エラー・設定

#![warn(missing_docs)]

/// 設定管理（setup.conf + 環境変数）
pub mod config;

/// エラー型定義
pub mod error;

/// HTTP入出力の型定義
pub mod protocol;

/// プローブ結果・レポートのコアデータ型
pub mod types;
