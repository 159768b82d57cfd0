use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vismeasure")]
#[command(about = "商品画像ビジュアル計測ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// データセット（.xlsx/.xls/.csv）を解析して商品一覧を表示
    List {
        /// データセットファイルのパス
        #[arg(required = true)]
        dataset: PathBuf,
    },

    /// データセットの商品1件をビジュアル計測
    Analyze {
        /// データセットファイルのパス
        #[arg(required = true)]
        dataset: PathBuf,

        /// 対象の商品ID（省略時は対話選択）
        #[arg(short, long)]
        id: Option<String>,
    },

    /// ローカル画像ファイルを直接ビジュアル計測
    AnalyzeImage {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,
    },

    /// 対話モード: 商品を選択しながら連続計測
    Browse {
        /// データセットファイルのパス
        #[arg(required = true)]
        dataset: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
