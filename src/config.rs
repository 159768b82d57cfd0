use crate::error::{Result, VisMeasureError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 既定の中継エンドポイント
///
/// 公開のパススルーを使うため信頼はしない前提。対象が公開画像URLで
/// あることからプロトタイプ用途では許容している
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.allorigins.win/raw";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub relay_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash-preview-09-2025".into(),
            relay_endpoint: DEFAULT_RELAY_ENDPOINT.into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VisMeasureError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("vismeasure").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.api_key.clone().ok_or(VisMeasureError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }
}
