//! 单条记录工厂
//!
//! 根据序号和变体生成一条 ABO 记录，不处理树结构。

use chrono::{NaiveDate, NaiveDateTime};

use super::names::NameSupply;
use super::random::RandomSource;
use crate::models::{AboDetail, AboRecord, RecordVariant, VolumeContainer, VolumeResult};

/// ID 前缀，后接十进制序号
pub const ID_PREFIX: &str = "10000";
pub const DEFAULT_AFF: &str = "US";

pub const ACTIVE_PERCENT: i32 = 90;
pub const CONFIDENTIAL_PERCENT: i32 = 10;
pub const INTERNATIONAL_PERCENT: i32 = 10;

pub const ENTRY_YEAR_RANGE: (i32, i32) = (1950, 2010);
/// 日期最大取 28，避免生成不存在的日期
pub const ENTRY_MAX_DAY: i32 = 28;

/// Extended 记录的业绩占位数据（固定值，不随机）
pub const FILLER_BONUS_PERIOD: i64 = 201410;
pub const FILLER_PV: f64 = 140.11;
pub const FILLER_BV: f64 = 131.13;

/// 记录工厂
pub struct RecordFactory<N: NameSupply> {
    names: N,
}

impl<N: NameSupply> RecordFactory<N> {
    pub fn new(names: N) -> Self {
        Self { names }
    }

    /// 生成一条记录
    ///
    /// GroupSize 初始为 0，挂到父节点后由树构建器覆盖。
    pub fn create(
        &mut self,
        ordinal: usize,
        variant: RecordVariant,
        rng: &mut RandomSource,
    ) -> AboRecord {
        let name = self.names.next_name();
        let is_active = rng.chance(ACTIVE_PERCENT);
        let is_confidential = rng.chance(CONFIDENTIAL_PERCENT);
        let is_international = rng.chance(INTERNATIONAL_PERCENT);
        let entry = random_entry(rng);

        let detail = match variant {
            RecordVariant::Basic => None,
            RecordVariant::Extended => Some(filler_detail()),
        };

        AboRecord {
            name,
            id: format!("{}{}", ID_PREFIX, ordinal),
            group_size: 0,
            aff: DEFAULT_AFF.to_string(),
            entry,
            is_active,
            is_confidential,
            is_international,
            detail,
            children: Vec::new(),
        }
    }
}

fn random_entry(rng: &mut RandomSource) -> NaiveDateTime {
    let year = rng.int_inclusive(ENTRY_YEAR_RANGE.0, ENTRY_YEAR_RANGE.1);
    let month = rng.int_inclusive(1, 12);
    let day = rng.int_inclusive(1, ENTRY_MAX_DAY);

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn filler_detail() -> AboDetail {
    AboDetail {
        volume: Some(VolumeContainer {
            bonus_period: FILLER_BONUS_PERIOD,
            results: vec![VolumeResult {
                pv: FILLER_PV,
                bv: FILLER_BV,
            }],
        }),
        ..Default::default()
    }
}
