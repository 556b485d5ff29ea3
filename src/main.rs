use cardio_risk_api::adapters::http;
use cardio_risk_api::core::ConfigProvider;
use cardio_risk_api::utils::error::{CardioError, ErrorSeverity};
use cardio_risk_api::utils::logger;
use cardio_risk_api::CliConfig;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 設定錯誤時日誌尚未依設定初始化，先用命令列旗標
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            logger::init_logger(cli.verbose, cli.json_logs, None);
            fail(e);
        }
    };

    logger::init_logger(cli.verbose, config.json_logs, config.log_level.as_deref());

    tracing::info!("🚀 Starting cardio-api");
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    // 模型載入失敗即終止，不接受流量
    let app = match http::app_from_config(&config) {
        Ok(app) => app,
        Err(e) => fail(e),
    };

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => fail(CardioError::ServerError {
            message: format!("cannot bind {}: {}", addr, e),
        }),
    };

    tracing::info!("🌐 Listening on http://{}", addr);

    if let Err(e) = http::serve(listener, app).await {
        fail(e);
    }

    tracing::info!("✅ Server stopped");
}

fn fail(e: CardioError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
