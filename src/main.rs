// ==========================================
// 商品目录导入 - 命令行入口
// ==========================================
// 用法:
//   catalog-importer import <business_id> <file>
//   catalog-importer seed <business_id>
//   catalog-importer template <out.csv>
//   catalog-importer list <business_id>
// 环境变量: CATALOG_IMPORTER_DB_PATH, CATALOG_IMPORTER_LOCALE, CATALOG_IMPORTER_LOG_FORMAT, RUST_LOG
// ==========================================

use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;

use anyhow::{bail, Context};
use catalog_importer::app::{get_default_db_path, AppState};
use catalog_importer::events::default_sinks;
use catalog_importer::i18n::{self, t_with_args};
use catalog_importer::importer::{write_template, ProductFieldMapper};
use catalog_importer::seed::seed_demo_catalog;
use catalog_importer::{logging, TenantId};

const USAGE: &str = "\
用法:
  catalog-importer import <business_id> <file>
  catalog-importer seed <business_id>
  catalog-importer template <out.csv>
  catalog-importer list <business_id>";

#[tokio::main]
async fn main() -> ExitCode {
    match std::env::var("CATALOG_IMPORTER_LOG_FORMAT").as_deref() {
        Ok("json") => logging::init_json(),
        _ => logging::init(),
    }

    if let Ok(locale) = std::env::var("CATALOG_IMPORTER_LOCALE") {
        i18n::set_locale(locale.trim());
    }

    tracing::info!("{} v{}", catalog_importer::APP_NAME, catalog_importer::VERSION);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> anyhow::Result<()> {
    let command = args.first().map(String::as_str);

    match (command, args.len()) {
        (Some("template"), 2) => {
            let out_path = &args[1];
            let file = File::create(out_path)
                .with_context(|| format!("无法创建文件: {}", out_path))?;
            write_template(BufWriter::new(file), &ProductFieldMapper::default())?;
            println!("{}", t_with_args("template.written", &[("path", out_path)]));
            Ok(())
        }
        (Some("import"), 3) => {
            let state = open_state()?;
            let response = state.import_api.import_products(&args[1], &args[2]).await?;
            println!("{}", response.message);
            for failure in &response.category_failures {
                println!("  ! {}: {}", failure.name, failure.reason);
            }
            Ok(())
        }
        (Some("seed"), 2) => {
            let state = open_state()?;
            let tenant = parse_tenant(&args[1])?;
            let summary =
                seed_demo_catalog(state.catalog_repo.as_ref(), &tenant, state.config_manager.as_ref())
                    .await?;
            println!(
                "{}",
                t_with_args(
                    "seed.done",
                    &[
                        ("categories", &summary.categories_created.to_string()),
                        ("products", &summary.products_inserted.to_string()),
                    ],
                )
            );
            Ok(())
        }
        (Some("list"), 2) => {
            let state = open_state()?;
            let categories = state.import_api.list_categories(&args[1]).await?;
            let products = state.import_api.list_products(&args[1]).await?;
            let output = serde_json::json!({
                "categories": categories,
                "products": products,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        _ => bail!("{}", USAGE),
    }
}

fn open_state() -> anyhow::Result<AppState> {
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);
    let (notifier, cache) = default_sinks();
    AppState::new(db_path, notifier, cache)
}

fn parse_tenant(raw: &str) -> anyhow::Result<TenantId> {
    TenantId::new(raw).context("商户标识不能为空")
}
