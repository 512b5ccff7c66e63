use anyhow::Context;
use clap::Parser;
use font_grabber::utils::{logger, output, validation::Validate};
use font_grabber::{
    CancelToken, CliConfig, DiscoveryResponse, ErrorRecord, FontDiscovery, HttpFetcher,
    LogProgress, StaticPageRenderer,
};
use std::sync::Arc;

const EXIT_INVALID_INPUT: i32 = 1;
const EXIT_DISCOVERY_FAILED: i32 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌（輸出到 stderr，stdout 只留給 JSON 結果）
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting font-grabber CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Invalid target: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        print_json(&ErrorRecord::invalid_url(), config.pretty)?;
        std::process::exit(EXIT_INVALID_INPUT);
    }

    let options = match config.discovery_options() {
        Ok(options) => options,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(EXIT_INVALID_INPUT);
        }
    };

    let renderer = StaticPageRenderer::new(&options.browser_user_agent, options.timeout())
        .context("failed to build page renderer")?;
    let fetcher = HttpFetcher::new(&options.fetch_user_agent, options.timeout())
        .context("failed to build HTTP client")?;
    let discovery = FontDiscovery::new(renderer, fetcher, options).with_progress(Arc::new(LogProgress));

    // Ctrl-C 只設旗標，進行中的請求會跑完
    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("⚠️  Interrupted, stopping after the current request");
            on_interrupt.cancel();
        }
    });

    let response = discovery
        .discover(&config.url, config.ticket.as_deref(), &cancel)
        .await;
    print_json(&response, config.pretty)?;

    match response {
        DiscoveryResponse::Catalog(catalog) => {
            tracing::info!(
                "✅ Found {} fonts ({} primary, {} fallback)",
                catalog.total_fonts_found,
                catalog.fonts.primary.len(),
                catalog.fonts.fallback.len()
            );
            Ok(())
        }
        DiscoveryResponse::Error(record) => {
            eprintln!("❌ {}: {}", record.error, record.error_message);
            std::process::exit(EXIT_DISCOVERY_FAILED);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    output::write_json(&mut stdout, value, pretty).context("failed to write result")?;
    Ok(())
}
