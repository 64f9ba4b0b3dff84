//! 命令执行器
//!
//! 负责执行各 CLI 子命令的具体逻辑。

use std::fs;
use std::io::Write as _;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use los_shared::config::AppConfig;

use super::commands::GenerateArgs;
use crate::generators::{BuildRequest, build_tree};
use crate::minify::minify;
use crate::models::{RecordVariant, TreeStats};
use crate::services::{ValuesServiceState, values_routes};
use crate::worker::run_with_large_stack;

/// 格式化输出的最大树深度
///
/// 缩进随层数线性增长，深链的格式化输出体积与深度成平方关系。
pub const PRETTY_MAX_DEPTH: usize = 64;

/// 命令执行器
///
/// 持有加载好的应用配置，命令行参数优先于配置。
pub struct CommandRunner {
    config: AppConfig,
}

impl CommandRunner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// 执行 server 命令
    pub async fn run_server(&self, port: Option<u16>) -> Result<()> {
        let mut config = self.config.clone();
        if let Some(port) = port {
            config.server.port = port;
        }
        let addr: SocketAddr = config.server_addr().parse().context("无效的监听地址")?;

        info!(%addr, seed = ?self.config.generator.seed, "启动 LOS Mock 服务");

        let state = Arc::new(ValuesServiceState::new(self.config.generator.clone()));
        let app = build_app(state);

        let listener = TcpListener::bind(addr).await.context("绑定端口失败")?;

        info!("LOS Mock 服务已启动: http://{}", addr);
        info!("可用端点:");
        info!("  GET /health - 健康检查");
        info!("  GET /api/values/startup - 预热");
        info!("  GET /api/values/get/{{count}} - 基础记录树");
        info!("  GET /api/values/getfull/{{count}} - 扩展记录树");
        info!("  GET /api/values/getminified/{{count}} - 精简记录树");
        info!("按 Ctrl+C 停止服务");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("服务器运行失败")?;

        info!("LOS Mock 服务已停止");
        Ok(())
    }

    /// 执行 generate 命令
    pub async fn run_generate(&self, args: GenerateArgs) -> Result<()> {
        let request = self.build_request(&args);
        let seed = args.seed.or(self.config.generator.seed);
        let (minified, pretty) = (args.minify, args.pretty);

        let (stats, body) = run_with_large_stack("los-generate", move || {
            let tree = build_tree(&request, seed);
            let stats = tree.stats();
            let pretty = pretty_allowed(pretty, &stats);
            let body = if minified {
                encode(&minify(tree.root()), pretty)?
            } else {
                encode(&tree, pretty)?
            };
            Ok((stats, body))
        })
        .await
        .context("生成记录树失败")?;

        info!(
            requested = request.count,
            node_count = stats.node_count,
            max_depth = stats.max_depth,
            leaf_count = stats.leaf_count,
            max_fanout = stats.max_fanout,
            "记录树生成完成"
        );

        match args.output {
            Some(path) => {
                fs::write(&path, &body).with_context(|| format!("写入文件失败: {}", path))?;
                info!(path = %path, bytes = body.len(), "已写入文件");
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&body).context("写入标准输出失败")?;
                stdout.write_all(b"\n")?;
            }
        }

        Ok(())
    }

    fn build_request(&self, args: &GenerateArgs) -> BuildRequest {
        let defaults = &self.config.generator;
        BuildRequest::new(args.count, RecordVariant::from_extended(args.extended)).with_percents(
            args.child_percent.unwrap_or(defaults.default_child_percent),
            args.sibling_percent
                .unwrap_or(defaults.default_sibling_percent),
        )
    }
}

/// 深度超过 [`PRETTY_MAX_DEPTH`] 时改为紧凑输出
fn pretty_allowed(pretty: bool, stats: &TreeStats) -> bool {
    if pretty && stats.max_depth > PRETTY_MAX_DEPTH {
        warn!(
            max_depth = stats.max_depth,
            limit = PRETTY_MAX_DEPTH,
            "树深度超过格式化上限，改为紧凑输出"
        );
        return false;
    }
    pretty
}

fn encode<T: Serialize>(value: &T, pretty: bool) -> los_shared::error::Result<Vec<u8>> {
    let body = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    Ok(body)
}

/// 组装 HTTP 应用：健康检查 + Values 路由 + 请求追踪
pub fn build_app(state: Arc<ValuesServiceState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(values_routes().with_state(state))
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// 等待 Ctrl+C 信号
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "监听关闭信号失败");
    }
    info!("收到关闭信号");
}
