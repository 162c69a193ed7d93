use anyhow::{Context, Result};
use clap::Parser;
use gsoc_guide::{cli, config, logging, server, Guide};
use cli::{Cli, Commands};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);
    let config = Config::load().context("設定ファイルの読み込みに失敗")?;

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.bind_addr.clone());
            let guide = Arc::new(Guide::from_config(config)?);

            println!("🌐 gsoc-guide - サーバ起動: http://{}", bind);
            println!("  Try: curl http://{}/api/proposals", bind);
            server::serve(&bind, guide)
                .await
                .with_context(|| format!("サーバを起動できません: {}", bind))?;
        }

        Commands::Orgs { json } => {
            let guide = Guide::from_config(config)?;
            let map = guide.listing.list_all_with_proposal_flag().await;

            if json {
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                for (name, has) in &map {
                    println!("{} {}", if *has { "✔" } else { " " }, name);
                }
                let with = map.values().filter(|h| **h).count();
                println!("\n{}組織中 {}組織に提案書あり", map.len(), with);
            }
        }

        Commands::Summary => {
            let guide = Guide::from_config(config)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("提案書を集計中...");
            spinner.enable_steady_tick(Duration::from_millis(120));

            let overview = guide.listing.overview().await;
            spinner.finish_and_clear();

            println!("📊 提案書の集計 ({})\n", overview.generated_at);
            println!("  組織数: {}", overview.total_organizations);
            println!("  提案書のある組織: {}", overview.organizations_with_proposals);
            println!("  提案書の総数: {}", overview.total_proposals);
        }

        Commands::Proposals { org, json } => {
            let guide = Guide::from_config(config)?;
            let proposals = guide.aggregator.list_proposals(&org).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&proposals)?);
            } else if proposals.is_empty() {
                println!("提案書が見つかりません: {}", org);
            } else {
                println!("📄 {} の提案書 ({}件)\n", org, proposals.len());
                for p in &proposals {
                    let size = p
                        .size_bytes
                        .map(|s| format!("{} bytes", s))
                        .unwrap_or_else(|| "-".into());
                    println!("  [{}] {} ({})", p.source_year, p.file_name, size);
                    println!("        {}", p.path);
                }
            }
        }

        Commands::Resolve { org, with_index } => {
            let guide = Guide::from_config(config)?;
            match guide.resolver.resolve(&org, with_index).await {
                Some(folder) => println!("✔ {} → {}", org, folder),
                None => println!("一致するフォルダがありません（入力をそのまま使用: {}）", org),
            }
        }

        Commands::Config { set_token, show } => {
            let mut config = config;

            if let Some(token) = set_token {
                config
                    .set_github_token(token)
                    .context("設定ファイルの保存に失敗")?;
                println!("✔ GitHubトークンを設定しました");
            }

            if show {
                println!("設定:");
                println!("  リポジトリ: {}/{}", config.repo_owner, config.repo_name);
                println!("  最新年度: {}", config.current);
                for archive in &config.archives {
                    println!("  過去年度: {}", archive);
                }
                println!("  ローカルミラー: {}", config.mirror_path().display());
                println!("  メタデータAPI: {}/{}.json", config.metadata_api_base, config.metadata_year);
                println!("  待ち受け: {}", config.bind_addr);
                println!("  GitHubトークン: {}", if config.github_token().is_some() { "設定済み" } else { "未設定（匿名）" });
            }
        }
    }

    Ok(())
}
