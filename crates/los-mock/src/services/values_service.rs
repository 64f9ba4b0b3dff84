//! Mock Values 服务
//!
//! 按请求生成 LOS 记录树，提供完整格式、扩展格式和精简格式三种响应。

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use los_shared::config::GeneratorConfig;
use los_shared::error::LosError;

use crate::generators::{BuildRequest, build_tree};
use crate::minify::minify;
use crate::models::RecordVariant;
use crate::worker::run_with_large_stack;

/// Values 服务状态
pub struct ValuesServiceState {
    pub generator: GeneratorConfig,
}

impl ValuesServiceState {
    pub fn new(generator: GeneratorConfig) -> Self {
        Self { generator }
    }

    /// 合并查询参数与默认配置
    fn build_request(&self, count: i64, variant: RecordVariant, query: &BranchQuery) -> BuildRequest {
        BuildRequest::new(count, variant).with_percents(
            query
                .child_percent
                .unwrap_or(self.generator.default_child_percent),
            query
                .sibling_percent
                .unwrap_or(self.generator.default_sibling_percent),
        )
    }

    fn seed(&self, query: &BranchQuery) -> Option<u64> {
        query.seed.or(self.generator.seed)
    }
}

impl Default for ValuesServiceState {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

// ============================================================================
// 请求/响应 DTO
// ============================================================================

/// 分支参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchQuery {
    /// 新节点成为子节点的概率（百分比）
    pub child_percent: Option<i32>,
    /// 新节点成为兄弟节点的概率（百分比）
    pub sibling_percent: Option<i32>,
    /// 随机种子，覆盖配置中的种子
    pub seed: Option<u64>,
}

/// API 错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal_error(err: LosError) -> ApiError {
    tracing::error!(code = err.code(), error = %err, "生成响应失败");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: err.to_string(),
            code: err.code().to_string(),
        }),
    )
}

/// 响应格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Labeled,
    Minified,
}

// ============================================================================
// 路由配置
// ============================================================================

/// 构建 Values 服务路由
pub fn values_routes() -> Router<Arc<ValuesServiceState>> {
    Router::new()
        .route("/api/values/startup", get(startup))
        .route("/api/values/get/{count}", get(get_basic))
        .route("/api/values/getfull/{count}", get(get_full))
        .route("/api/values/getminified/{count}", get(get_minified))
}

// ============================================================================
// Handler 实现
// ============================================================================

/// 预热端点
async fn startup() -> Json<&'static str> {
    Json("Started")
}

/// 基础格式记录树
async fn get_basic(
    State(state): State<Arc<ValuesServiceState>>,
    Path(count): Path<i64>,
    Query(query): Query<BranchQuery>,
) -> Result<Response, ApiError> {
    let request = state.build_request(count, RecordVariant::Basic, &query);
    render(request, state.seed(&query), Format::Labeled).await
}

/// 扩展格式记录树
async fn get_full(
    State(state): State<Arc<ValuesServiceState>>,
    Path(count): Path<i64>,
    Query(query): Query<BranchQuery>,
) -> Result<Response, ApiError> {
    let request = state.build_request(count, RecordVariant::Extended, &query);
    render(request, state.seed(&query), Format::Labeled).await
}

/// 精简格式（基础变体）
async fn get_minified(
    State(state): State<Arc<ValuesServiceState>>,
    Path(count): Path<i64>,
    Query(query): Query<BranchQuery>,
) -> Result<Response, ApiError> {
    let request = state.build_request(count, RecordVariant::Basic, &query);
    render(request, state.seed(&query), Format::Minified).await
}

/// 生成并序列化
///
/// 构建和编码都是纯计算，放到大栈工作线程执行，树也在那里释放。
async fn render(request: BuildRequest, seed: Option<u64>, format: Format) -> Result<Response, ApiError> {
    tracing::info!(
        count = request.count,
        variant = request.variant.name(),
        format = ?format,
        "生成记录树"
    );

    let body = run_with_large_stack("los-render", move || {
        let tree = build_tree(&request, seed);
        let body = match format {
            Format::Labeled => serde_json::to_vec(&tree)?,
            Format::Minified => serde_json::to_vec(&minify(tree.root()))?,
        };
        tracing::debug!(node_count = tree.node_count(), bytes = body.len(), "响应已序列化");
        Ok(body)
    })
    .await
    .map_err(internal_error)?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
