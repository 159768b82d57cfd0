use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisMeasureError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`vismeasure config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("データセットを読み込めません: {0}")]
    ContainerDecode(String),

    #[error("商品が見つかりません: {0}")]
    ProductNotFound(String),

    #[error("画像を取得できませんでした: {0}")]
    ImageResolution(String),

    #[error("API呼び出しエラー: {0}")]
    ModelRequest(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),
}

pub type Result<T> = std::result::Result<T, VisMeasureError>;
