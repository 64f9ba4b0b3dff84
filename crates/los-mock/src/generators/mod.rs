//! 生成器模块
//!
//! 随机源、名字供应、单条记录工厂和树构建器。

pub mod names;
pub mod random;
pub mod record_factory;
pub mod tree_builder;

pub use names::{CyclingNameSupply, FakeNameSupply, NameSupply};
pub use random::RandomSource;
pub use record_factory::RecordFactory;
pub use tree_builder::{
    BuildRequest, MAX_RECORD_COUNT, TreeBuilder, build_tree, clamped_count,
};
