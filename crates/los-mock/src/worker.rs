//! 大栈工作线程
//!
//! serde 对嵌套结构的 JSON 编码是递归的，20000 层单链远超 tokio 工作线程和
//! 阻塞线程池默认的 2 MiB 栈。生成和编码统一放到独立线程执行，
//! 与调用方运行在哪种运行时无关。

use std::thread;

use tokio::sync::oneshot;
use tracing::Span;

use los_shared::error::{LosError, Result};

/// 工作线程栈大小
pub const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// 在独立的大栈线程上执行任务，异步等待结果
///
/// 任务 panic 时返回 `LosError::Internal`；线程创建失败返回 `LosError::Io`。
pub async fn run_with_large_stack<F, T>(name: &str, job: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    let span = Span::current();

    thread::Builder::new()
        .name(name.to_string())
        .stack_size(WORKER_STACK_SIZE)
        .spawn(move || {
            let _entered = span.enter();
            // 接收方已放弃等待时结果直接丢弃
            let _ = tx.send(job());
        })?;

    rx.await
        .map_err(|_| LosError::Internal(format!("工作线程 {} 异常退出", name)))?
}
