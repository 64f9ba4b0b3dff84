//! 统一可观测性模块
//!
//! 所有二进制通过单一入口点初始化日志，保证格式和过滤规则一致。

pub mod tracing;

use ::tracing::info;
use anyhow::Result;

use crate::config::ObservabilityConfig;

/// 初始化日志
///
/// # Example
///
/// ```ignore
/// use los_shared::config::AppConfig;
/// use los_shared::observability::init_tracing;
///
/// let config = AppConfig::load("los-mock")?;
/// init_tracing(&config.service_name, &config.observability)?;
/// ```
pub fn init_tracing(service_name: &str, config: &ObservabilityConfig) -> Result<()> {
    tracing::init(config)?;

    info!(
        service = %service_name,
        log_level = %config.log_level,
        log_format = %config.log_format,
        "Observability initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_falls_back_on_invalid_level() {
        let config = ObservabilityConfig {
            log_level: "not a [valid filter".to_string(),
            log_format: "pretty".to_string(),
        };
        // 无效过滤表达式不应 panic
        let _ = super::tracing::env_filter(&config);
    }

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let config = ObservabilityConfig::default();
        let _ = init_tracing("los-test", &config);
        assert!(init_tracing("los-test", &config).is_err());
    }
}
