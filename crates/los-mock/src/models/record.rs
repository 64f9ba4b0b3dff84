//! ABO 记录模型
//!
//! LOS（line of sponsorship）数据流中的单个节点。字段名与下游消费方约定的
//! JSON 格式保持一致（PascalCase，`ID`、`ABONo` 等保留原始大小写）。

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 记录变体
///
/// Extended 是 Basic 的严格超集，多出的字段放在 [`AboDetail`] 中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordVariant {
    #[default]
    Basic,
    Extended,
}

impl RecordVariant {
    pub fn from_extended(extended: bool) -> Self {
        if extended { Self::Extended } else { Self::Basic }
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, Self::Extended)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Extended => "extended",
        }
    }
}

/// ABO 记录
///
/// 节点独占其子节点，子节点按插入顺序排列。
/// 深链（最深可达 20000 层）的释放由手写的 `Drop` 迭代完成。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AboRecord {
    pub name: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub group_size: i32,
    pub aff: String,
    pub entry: NaiveDateTime,
    pub is_active: bool,
    pub is_confidential: bool,
    pub is_international: bool,
    /// 仅 Extended 变体携带
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub detail: Option<AboDetail>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AboRecord>,
}

impl AboRecord {
    pub fn variant(&self) -> RecordVariant {
        RecordVariant::from_extended(self.detail.is_some())
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// 先序遍历（不递归）
    pub fn iter(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }
}

impl Drop for AboRecord {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// 先序遍历迭代器
pub struct Preorder<'a> {
    stack: Vec<&'a AboRecord>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a AboRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Extended 变体的附加字段
///
/// 序列化时平铺进 [`AboRecord`]，字段顺序即声明顺序。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AboDetail {
    #[serde(rename = "FosterSponsorABO")]
    pub foster_sponsor: Option<AboNumber>,
    #[serde(rename = "UplinePlatinumABO")]
    pub upline_platinum: Option<AboNumber>,
    #[serde(rename = "CurrentAward")]
    pub current_award: Option<Award>,
    #[serde(rename = "HighestAward")]
    pub highest_award: Option<Award>,
    #[serde(rename = "Extended")]
    pub contact: Option<ContactInfo>,
    #[serde(rename = "Volume")]
    pub volume: Option<VolumeContainer>,
}

/// ABO 编号引用（推荐人 / 上线）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboNumber {
    #[serde(rename = "Aff")]
    pub aff: String,
    #[serde(rename = "ABONo")]
    pub abo_no: String,
}

/// 奖衔
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Award {
    pub code: String,
    pub name: String,
    pub rank: i32,
    pub qualification_period: i32,
}

/// 扩展联系方式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactInfo {
    pub primary_name: String,
    pub primary_phone_no: i64,
    pub primary_email: String,
}

/// 业绩历史
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VolumeContainer {
    /// 奖金周期，格式 YYYYMM
    pub bonus_period: i64,
    pub results: Vec<VolumeResult>,
}

/// 单个周期的业绩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeResult {
    #[serde(rename = "PV")]
    pub pv: f64,
    #[serde(rename = "BV")]
    pub bv: f64,
}
