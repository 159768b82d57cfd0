use clap::Parser;
use std::path::Path;
use vismeasure::{analyzer, cli, config, dataset, error, render, resolver, session};

use cli::{Cli, Commands};
use config::Config;
use error::{Result, VisMeasureError};
use session::{Action, SessionState};
use vismeasure_common::{AnalysisResult, ProductRecord};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::List { dataset: path } => {
            println!("🛍 vismeasure - 商品一覧\n");
            let products = dataset::load_dataset(&path)?;
            println!("✔ {}件の商品を検出\n", products.len());

            for product in &products {
                println!(
                    "  {}  {}  画像{}枚",
                    product.id,
                    product.category,
                    product.images.len()
                );
            }
        }

        Commands::Analyze { dataset: path, id } => {
            println!("🛍 vismeasure - 商品ビジュアル計測\n");

            // キー未設定ならリクエストを試みる前に失敗させる
            let api_key = config.get_api_key()?;

            println!("[1/3] データセットを解析中...");
            let products = dataset::load_dataset(&path)?;
            println!("✔ {}件の商品を検出\n", products.len());

            if products.is_empty() {
                return Err(VisMeasureError::ProductNotFound(
                    "データセットに有効な行がありません".into(),
                ));
            }

            let record = match id {
                Some(id) => products
                    .iter()
                    .find(|p| p.id == id)
                    .cloned()
                    .ok_or(VisMeasureError::ProductNotFound(id))?,
                None => {
                    let index = select_product(&products)?;
                    products[index].clone()
                }
            };

            let client = reqwest::Client::new();
            let strategies = resolver::default_strategies(&config.relay_endpoint);

            let image_url = first_image(&record)?;
            println!("[2/3] 画像を取得中... {}", image_url);
            let image_base64 = resolver::resolve_url(&client, &strategies, image_url).await?;
            println!("✔ 取得完了\n");

            println!("[3/3] AI解析中...");
            let result = analyzer::measure_image(
                &client,
                &api_key,
                &config.model,
                "image/jpeg",
                &image_base64,
            )
            .await?;
            println!("✔ 解析完了\n");

            println!("{} ({})\n", record.id, record.category);
            print!("{}", render::render_analysis(&result));
        }

        Commands::AnalyzeImage { image } => {
            println!("🖼 vismeasure - 単一画像計測\n");

            let api_key = config.get_api_key()?;

            println!("[1/2] 画像を読み込み中...");
            let (mime_type, image_base64) = resolver::resolve_file(&image)?;
            println!("✔ 読み込み完了 ({})\n", mime_type);

            println!("[2/2] AI解析中...");
            let client = reqwest::Client::new();
            let result = analyzer::measure_image(
                &client,
                &api_key,
                &config.model,
                &mime_type,
                &image_base64,
            )
            .await?;
            println!("✔ 解析完了\n");

            print!("{}", render::render_analysis(&result));
        }

        Commands::Browse { dataset: path } => {
            println!("🛍 vismeasure - 対話モード\n");
            run_browse(&config, &path).await?;
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  中継エンドポイント: {}", config.relay_endpoint);
                println!(
                    "  APIキー: {}",
                    if config.api_key.is_some() {
                        "設定済み"
                    } else {
                        "未設定"
                    }
                );
            }
        }
    }

    Ok(())
}

fn init_logger(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// 商品の先頭画像URL
///
/// レコードの不変条件でimagesは非空だが、インデックスパニックは避ける
fn first_image(record: &ProductRecord) -> Result<&str> {
    record
        .images
        .first()
        .map(|s| s.as_str())
        .ok_or_else(|| VisMeasureError::ImageResolution("画像URLがありません".into()))
}

fn select_product(products: &[ProductRecord]) -> Result<usize> {
    let items: Vec<String> = products
        .iter()
        .map(|p| format!("{} ({}) 画像{}枚", p.id, p.category, p.images.len()))
        .collect();

    dialoguer::Select::new()
        .with_prompt("商品を選択")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| VisMeasureError::CliExecution(e.to_string()))
}

/// 対話モード: セッションストアを介して選択→計測を繰り返す
async fn run_browse(config: &Config, path: &Path) -> Result<()> {
    let api_key = config.get_api_key()?;
    let client = reqwest::Client::new();
    let strategies = resolver::default_strategies(&config.relay_endpoint);

    let products = dataset::load_dataset(path)?;
    println!("✔ {}件の商品を検出\n", products.len());

    let mut state = SessionState::default();
    state.apply(Action::DatasetLoaded(products));

    if state.products.is_empty() {
        println!("有効な商品がありません");
        return Ok(());
    }

    loop {
        let mut items: Vec<String> = state
            .products
            .iter()
            .map(|p| format!("{} ({}) 画像{}枚", p.id, p.category, p.images.len()))
            .collect();
        items.push("終了".into());

        let choice = dialoguer::Select::new()
            .with_prompt("商品を選択")
            .items(&items)
            .default(0)
            .interact()
            .map_err(|e| VisMeasureError::CliExecution(e.to_string()))?;

        if choice == state.products.len() {
            break;
        }

        state.apply(Action::Select(choice));
        state.apply(Action::AnalysisStarted);
        let seq = state.current_request();

        let record = match state.selected_product() {
            Some(record) => record.clone(),
            None => continue,
        };

        println!("\n解析中: {} ...", record.id);
        let outcome = analyze_record(&client, &strategies, &api_key, &config.model, &record)
            .await
            .map_err(|e| e.to_string());

        state.apply(Action::AnalysisFinished { seq, outcome });

        if let Some(result) = &state.analysis {
            println!("\n{} ({})\n", record.id, record.category);
            print!("{}", render::render_analysis(result));
            println!();
        }
        if let Some(message) = &state.error {
            println!("✖ {}\n", message);
        }
    }

    Ok(())
}

async fn analyze_record(
    client: &reqwest::Client,
    strategies: &[resolver::FetchStrategy],
    api_key: &str,
    model: &str,
    record: &ProductRecord,
) -> Result<AnalysisResult> {
    let image_url = first_image(record)?;
    let image_base64 = resolver::resolve_url(client, strategies, image_url).await?;
    analyzer::measure_image(client, api_key, model, "image/jpeg", &image_base64).await
}
