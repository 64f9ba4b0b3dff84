//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。

use clap::{Parser, Subcommand};

/// LOS 模拟数据命令行工具
///
/// 启动 HTTP 服务，或直接生成一棵记录树输出为 JSON。
#[derive(Parser, Debug)]
#[command(name = "los-mock")]
#[command(version, about = "LOS 记录树模拟数据工具")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// 配置目录，默认读取 CONFIG_DIR 或 ./config
    #[arg(long)]
    pub config_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 子命令枚举
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 启动 Mock 服务（HTTP REST API）
    Server {
        /// 服务端口，覆盖配置文件
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// 生成一棵记录树并输出 JSON
    Generate(GenerateArgs),
}

/// generate 子命令参数
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// 节点数（含根），超过 20000 会被截断
    #[arg(short, long, default_value = "100", allow_negative_numbers = true)]
    pub count: i64,

    /// 生成扩展格式记录
    #[arg(long)]
    pub extended: bool,

    /// 子节点概率（百分比），默认取配置
    #[arg(long, allow_negative_numbers = true)]
    pub child_percent: Option<i32>,

    /// 兄弟节点概率（百分比），默认取配置
    #[arg(long, allow_negative_numbers = true)]
    pub sibling_percent: Option<i32>,

    /// 随机种子，默认取配置
    #[arg(long)]
    pub seed: Option<u64>,

    /// 输出精简格式
    #[arg(long)]
    pub minify: bool,

    /// 格式化 JSON 输出
    #[arg(long)]
    pub pretty: bool,

    /// 输出到文件，默认标准输出
    #[arg(short, long)]
    pub output: Option<String>,
}

// ============================================================================
// 单元测试
// ============================================================================
