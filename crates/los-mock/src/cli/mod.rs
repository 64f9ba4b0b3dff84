//! CLI 模块
//!
//! 提供命令行接口，支持以下功能：
//!
//! - `server` - 启动 Mock HTTP 服务
//! - `generate` - 生成一棵记录树并输出 JSON
//!
//! # 使用示例
//!
//! ```bash
//! # 启动服务器
//! los-mock server --port 8085
//!
//! # 生成 500 个节点的扩展格式记录树，固定种子
//! los-mock generate -c 500 --extended --seed 42 -o tree.json
//!
//! # 精简格式，偏向纵深
//! los-mock generate -c 1000 --child-percent 80 --sibling-percent 20 --minify
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands, GenerateArgs};
pub use runner::{CommandRunner, build_app};
