//! 名字供应
//!
//! 为每个新节点提供显示名，不保证唯一。

use fake::Fake;
use fake::faker::name::en::Name;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// 名字供应接口
pub trait NameSupply: Send {
    fn next_name(&mut self) -> String;
}

/// 基于 fake 的随机英文姓名
pub struct FakeNameSupply {
    rng: StdRng,
}

impl FakeNameSupply {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NameSupply for FakeNameSupply {
    fn next_name(&mut self) -> String {
        Name().fake_with_rng(&mut self.rng)
    }
}

/// 循环使用固定名单
///
/// 名单为空时退化为 `ABO {n}` 形式的编号名。
#[derive(Debug, Clone, Default)]
pub struct CyclingNameSupply {
    names: Vec<String>,
    issued: usize,
}

impl CyclingNameSupply {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            issued: 0,
        }
    }
}

impl NameSupply for CyclingNameSupply {
    fn next_name(&mut self) -> String {
        let name = if self.names.is_empty() {
            format!("ABO {}", self.issued)
        } else {
            self.names[self.issued % self.names.len()].clone()
        };
        self.issued += 1;
        name
    }
}
