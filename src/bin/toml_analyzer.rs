use anyhow::Context;
use chat_analyzer::core::{export, ConfigProvider};
use chat_analyzer::utils::{logger, validation::Validate};
use chat_analyzer::{
    analyze, AnalysisEngine, AnalysisPipeline, LocalStorage, TomlConfig, TranscriptParser,
    STDIN_INPUT,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-analyzer")]
#[command(about = "Chat transcript analysis driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "chat-analyzer.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Parse and analyze without writing any exports
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let verbose = args.verbose || config.verbose_logging();
    if config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Starting TOML-based chat analyzer");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No exports will be written");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = AnalysisPipeline::new(LocalStorage::default(), config);
    let engine = AnalysisEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Analysis completed successfully!");
            println!("✅ Analysis completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name, config.pipeline.version
    );
    println!("  Source: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.load.output_formats.join(", "));
    println!("  Max input: {} bytes", config.max_input_bytes());

    if let Some(zip_name) = config.zip_filename() {
        println!("  Compression: {} (ZIP)", zip_name);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let input = config.input_path();
    if input == STDIN_INPUT {
        println!("🔍 Dry run skipped: stdin input can only be read once");
        return Ok(());
    }

    chat_analyzer::core::parser::validate_source_name(input)?;
    let data = tokio::fs::read(input)
        .await
        .with_context(|| format!("failed to read transcript '{}'", input))?;
    let rows = TranscriptParser::new(config.max_input_bytes())
        .parse_bytes(&data)
        .with_context(|| format!("failed to parse transcript '{}'", input))?;

    let result = analyze(rows);
    let sentiment = result.sentiment();

    println!("🔍 Dry Run Analysis:");
    println!("  Conversations: {}", result.conversation_count());
    println!("  Messages: {}", result.total_messages());
    for (role, count) in result.messages_by_user_type().iter() {
        println!("    {}: {}", role, count);
    }
    println!(
        "  Sentiment: {} positive, {} neutral, {} negative",
        sentiment.positive, sentiment.neutral, sentiment.negative
    );
    println!("  Top issues:");
    for entry in result.top_issues() {
        println!("    {}: {}", entry.issue, entry.count);
    }
    println!("  Feature requests:");
    for entry in result.feature_requests() {
        println!("    {}: {}", export::chart_label(&entry.feature), entry.count);
    }
    println!();
    println!("✅ Dry run complete. Re-run without --dry-run to write exports.");

    Ok(())
}
