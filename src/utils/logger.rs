use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn default_filter(verbose: bool, level: Option<&str>) -> String {
    match (verbose, level) {
        (true, _) => "cardio_risk_api=debug,tower_http=debug,info".to_string(),
        (false, Some(level)) => format!("cardio_risk_api={},info", level),
        (false, None) => "cardio_risk_api=info".to_string(),
    }
}

/// 初始化日誌。`RUST_LOG` 優先於預設過濾器。
pub fn init_logger(verbose: bool, json: bool, level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, level)));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .json(), // JSON for log collectors in hosted deployments
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false, None), "cardio_risk_api=info");
        assert_eq!(default_filter(false, Some("warn")), "cardio_risk_api=warn,info");
        assert!(default_filter(true, Some("warn")).starts_with("cardio_risk_api=debug"));
    }
}
