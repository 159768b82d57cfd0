//! セッション状態ストア
//!
//! 商品リスト・選択・計測結果をひとつの状態構造体で持ち、
//! Actionの適用でのみ更新する。各操作は直前の状態とActionに対して決定的。
//!
//! 解析リクエストには発行時点の連番タグを付け、選択切り替え後に届いた
//! 古いレスポンス（stale response）は破棄する

use vismeasure_common::{AnalysisResult, ProductRecord};

/// 入力モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dataset,
    Single,
}

/// セッション状態
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub products: Vec<ProductRecord>,
    pub selected: Option<usize>,
    pub tab: Tab,
    pub analysis: Option<AnalysisResult>,
    pub error: Option<String>,
    request_seq: u64,
}

/// 状態更新アクション
#[derive(Debug, Clone)]
pub enum Action {
    /// ファイル再アップロード: 以前のリストは破棄される
    DatasetLoaded(Vec<ProductRecord>),
    ClearProducts,
    /// 商品選択（範囲外インデックスは無視）
    Select(usize),
    SwitchTab(Tab),
    /// 解析開始: リクエスト連番を進め、前回の結果を消す
    AnalysisStarted,
    /// 解析完了: seqが現在の連番と一致しない場合は無視
    AnalysisFinished {
        seq: u64,
        outcome: std::result::Result<AnalysisResult, String>,
    },
}

impl SessionState {
    /// 現在のリクエスト連番
    ///
    /// AnalysisStartedの直後に読み、AnalysisFinishedへ渡す
    pub fn current_request(&self) -> u64 {
        self.request_seq
    }

    pub fn selected_product(&self) -> Option<&ProductRecord> {
        self.selected.and_then(|i| self.products.get(i))
    }

    /// Actionを適用して状態を更新する
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::DatasetLoaded(products) => {
                self.products = products;
                self.selected = None;
                self.analysis = None;
                self.error = None;
            }
            Action::ClearProducts => {
                self.products.clear();
                self.selected = None;
                self.analysis = None;
                self.error = None;
            }
            Action::Select(index) => {
                if index < self.products.len() {
                    self.selected = Some(index);
                    self.analysis = None;
                    self.error = None;
                }
            }
            Action::SwitchTab(tab) => {
                self.tab = tab;
                self.analysis = None;
                self.error = None;
            }
            Action::AnalysisStarted => {
                self.request_seq += 1;
                self.analysis = None;
                self.error = None;
            }
            Action::AnalysisFinished { seq, outcome } => {
                // 選択切り替え等で新しいリクエストが始まっていたら破棄
                if seq != self.request_seq {
                    return;
                }
                match outcome {
                    Ok(result) => self.analysis = Some(result),
                    Err(message) => self.error = Some(message),
                }
            }
        }
    }
}
