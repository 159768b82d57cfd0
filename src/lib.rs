//! vismeasure - 商品画像ビジュアル計測ツール
//!
//! データセット（Excel/CSV）または単一画像を入力として、
//! 外部マルチモーダルAIモデルによる構造化された視覚計測を行う

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod render;
pub mod resolver;
pub mod session;
