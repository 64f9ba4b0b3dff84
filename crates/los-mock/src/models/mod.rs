//! 模拟数据模型
//!
//! LOS 记录、附加字段以及生成结果树。

pub mod record;
pub mod tree;

pub use record::{
    AboDetail, AboNumber, AboRecord, Award, ContactInfo, Preorder, RecordVariant,
    VolumeContainer, VolumeResult,
};
pub use tree::{AboTree, TreeStats};
