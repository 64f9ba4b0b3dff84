//! LOS Mock
//!
//! 为下游消费方生成随机的嵌套 LOS（line of sponsorship）记录树，用于开发和测试环境。
//!
//! # 主要模块
//!
//! - `models`: 记录模型与生成结果树
//! - `generators`: 随机源、名字供应、记录工厂、树构建器
//! - `minify`: 去字段名的精简格式
//! - `services`: REST API
//! - `worker`: 深层树编码使用的大栈工作线程
//!
//! # 使用示例
//!
//! ```rust
//! use los_mock::generators::{BuildRequest, build_tree};
//! use los_mock::minify::minify;
//! use los_mock::models::RecordVariant;
//!
//! let request = BuildRequest::new(100, RecordVariant::Basic).with_percents(60, 40);
//! let tree = build_tree(&request, Some(42));
//! assert_eq!(tree.node_count(), 100);
//!
//! let minified = minify(tree.root());
//! assert_eq!(minified[1], "100000");
//! ```

pub mod cli;
pub mod generators;
pub mod minify;
pub mod models;
pub mod services;
pub mod worker;
