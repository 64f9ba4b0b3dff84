//! 随机源
//!
//! 每次构建独占一个实例，不在请求之间共享可变状态。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 随机源
///
/// 给定种子时结果完全可复现；未给定时从操作系统熵源初始化。
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// [0, 100) 上的均匀分布
    pub fn percent(&mut self) -> f64 {
        self.rng.random_range(0.0..100.0)
    }

    /// 以 `percent`% 的概率返回 true
    ///
    /// 超出 [0, 100] 的值退化为恒假 / 恒真。
    pub fn chance(&mut self, percent: i32) -> bool {
        self.percent() < f64::from(percent)
    }

    /// [low, high] 闭区间上的均匀整数
    pub fn int_inclusive(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    /// 派生一个子种子，供名字生成等协作者使用
    pub fn derive_seed(&mut self) -> u64 {
        self.rng.random()
    }
}
