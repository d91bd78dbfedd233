use clap::Parser;
use tsv2go::utils::logger;
use tsv2go::{CliConfig, CodegenPipeline, GenError, GeneratorEngine, LocalStorage};

fn report_failure(stage: &str, e: &GenError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?})",
        stage,
        e,
        e.category()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting tsv2go");
    tracing::debug!("CLI arguments: {:?}", cli);

    // 解析並驗證配置，之後不再覆寫任何值
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => report_failure("Configuration", &e),
    };
    tracing::debug!("Resolved configuration: {:?}", config);

    let storage = LocalStorage::new(".");
    let engine = GeneratorEngine::new(CodegenPipeline::new(storage, config));

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no file will be written");
        let model = match engine.plan().await {
            Ok(model) => model,
            Err(e) => report_failure("Generation", &e),
        };
        match serde_json::to_string_pretty(&model) {
            Ok(json) => println!("{}", json),
            Err(e) => report_failure("Generation", &GenError::from(e)),
        }
        return;
    }

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Generated {}", output_path);
        }
        Err(e) => report_failure("Generation", &e),
    }
}
