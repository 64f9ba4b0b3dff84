//! 树构建器
//!
//! 按“向下 / 横向 / 回到根”的概率分支生成固定节点数的记录树。
//!
//! 每一步在挂载点下追加一个新节点，然后抽两次签：
//!
//! - 子节点签命中：新节点成为下一步的挂载点（加深）
//! - 否则兄弟签命中：挂载点不变（加宽）
//! - 都未命中：本轮结束，下一轮从根节点重新开始
//!
//! 节点先放在按序号索引的 arena 中，最后自底向上组装成所有权树，
//! 整个过程不递归，20000 层的单链也不会耗尽栈空间。

use tracing::{debug, info};

use super::names::{FakeNameSupply, NameSupply};
use super::random::RandomSource;
use super::record_factory::RecordFactory;
use crate::models::{AboRecord, AboTree, RecordVariant};

/// 单次生成的最大节点数（含根）
pub const MAX_RECORD_COUNT: usize = 20_000;

/// 非根节点 GroupSize 的取值范围
pub const GROUP_SIZE_RANGE: (i32, i32) = (1, 24);

/// 构建请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildRequest {
    /// 请求的节点数（含根），超过上限会被截断
    pub count: i64,
    pub variant: RecordVariant,
    pub child_percent: i32,
    pub sibling_percent: i32,
}

impl BuildRequest {
    pub fn new(count: i64, variant: RecordVariant) -> Self {
        Self {
            count,
            variant,
            child_percent: 50,
            sibling_percent: 50,
        }
    }

    pub fn with_percents(mut self, child_percent: i32, sibling_percent: i32) -> Self {
        self.child_percent = child_percent;
        self.sibling_percent = sibling_percent;
        self
    }
}

/// 截断后的实际节点数，至少包含根节点
pub fn clamped_count(requested: i64) -> usize {
    requested.clamp(1, MAX_RECORD_COUNT as i64) as usize
}

/// 单步之后的走向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    AdvanceDepth,
    AdvanceBreadth,
    Terminate,
}

impl Step {
    fn choose(make_child: bool, make_sibling: bool) -> Self {
        if make_child {
            Self::AdvanceDepth
        } else if make_sibling {
            Self::AdvanceBreadth
        } else {
            Self::Terminate
        }
    }
}

/// 根节点在 arena 中的位置
const ROOT: usize = 0;

/// 树构建器
///
/// 持有自己的随机源和名字供应，不同请求之间互不影响。
pub struct TreeBuilder<N: NameSupply> {
    factory: RecordFactory<N>,
    rng: RandomSource,
}

impl TreeBuilder<FakeNameSupply> {
    /// 使用随机英文姓名；名字序列的种子由同一随机源派生
    pub fn seeded(seed: Option<u64>) -> Self {
        let mut rng = RandomSource::new(seed);
        let names = FakeNameSupply::new(rng.derive_seed());
        Self::new(names, rng)
    }
}

impl<N: NameSupply> TreeBuilder<N> {
    pub fn new(names: N, rng: RandomSource) -> Self {
        Self {
            factory: RecordFactory::new(names),
            rng,
        }
    }

    pub fn build(&mut self, request: &BuildRequest) -> AboTree {
        let node_count = clamped_count(request.count);
        let target_extra = node_count - 1;
        let variant = request.variant;

        info!(
            requested = request.count,
            node_count,
            variant = variant.name(),
            child_percent = request.child_percent,
            sibling_percent = request.sibling_percent,
            "开始生成记录树"
        );

        let root = self.factory.create(0, variant, &mut self.rng);

        // records[i] 是序号 i + 1 的节点；children[i] 是序号 i 的子节点序号
        let mut records: Vec<AboRecord> = Vec::with_capacity(target_extra);
        let mut children: Vec<Vec<usize>> = Vec::with_capacity(node_count);
        children.push(Vec::new());

        let mut counter = 0usize;
        let mut rounds = 0usize;
        while counter < target_extra {
            rounds += 1;
            let mut attach = ROOT;

            while counter < target_extra {
                counter += 1;
                let idx = counter;

                let mut record = self.factory.create(idx, variant, &mut self.rng);
                let (low, high) = GROUP_SIZE_RANGE;
                record.group_size = self.rng.int_inclusive(low, high);
                records.push(record);
                children.push(Vec::new());
                children[attach].push(idx);
                debug_assert_eq!(records.len(), idx);

                let make_child = self.rng.chance(request.child_percent);
                let make_sibling = self.rng.chance(request.sibling_percent);
                match Step::choose(make_child, make_sibling) {
                    Step::AdvanceDepth => attach = idx,
                    Step::AdvanceBreadth => {}
                    Step::Terminate => break,
                }
            }
        }
        debug_assert_eq!(counter, target_extra, "创建计数超出目标");

        let root = assemble(root, records, children);
        debug!(rounds, node_count, "记录树生成完成");

        AboTree::new(root, node_count, variant)
    }
}

/// 按序号从大到小组装：子节点序号总大于父节点，轮到父节点时子树已完整
fn assemble(
    mut root: AboRecord,
    records: Vec<AboRecord>,
    mut children: Vec<Vec<usize>>,
) -> AboRecord {
    let mut finished: Vec<Option<AboRecord>> = records.into_iter().map(Some).collect();

    for idx in (1..children.len()).rev() {
        let ids = std::mem::take(&mut children[idx]);
        if ids.is_empty() {
            continue;
        }
        let kids = take_finished(ids, &mut finished);
        if let Some(record) = finished[idx - 1].as_mut() {
            record.children = kids;
        }
    }

    root.children = take_finished(std::mem::take(&mut children[ROOT]), &mut finished);
    root
}

fn take_finished(ids: Vec<usize>, finished: &mut [Option<AboRecord>]) -> Vec<AboRecord> {
    ids.into_iter()
        .filter_map(|id| finished[id - 1].take())
        .collect()
}

/// 便捷入口：按种子生成一棵树
pub fn build_tree(request: &BuildRequest, seed: Option<u64>) -> AboTree {
    TreeBuilder::seeded(seed).build(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::names::CyclingNameSupply;
    use crate::models::TreeStats;
    use std::collections::HashSet;

    fn build(count: i64, child: i32, sibling: i32, seed: u64) -> AboTree {
        let request = BuildRequest::new(count, RecordVariant::Basic).with_percents(child, sibling);
        build_tree(&request, Some(seed))
    }

    #[test]
    fn test_clamped_count() {
        assert_eq!(clamped_count(-5), 1);
        assert_eq!(clamped_count(0), 1);
        assert_eq!(clamped_count(1), 1);
        assert_eq!(clamped_count(500), 500);
        assert_eq!(clamped_count(20_000), 20_000);
        assert_eq!(clamped_count(20_001), 20_000);
        assert_eq!(clamped_count(i64::MAX), 20_000);
    }

    #[test]
    fn test_step_choice() {
        assert_eq!(Step::choose(true, true), Step::AdvanceDepth);
        assert_eq!(Step::choose(true, false), Step::AdvanceDepth);
        assert_eq!(Step::choose(false, true), Step::AdvanceBreadth);
        assert_eq!(Step::choose(false, false), Step::Terminate);
    }

    #[test]
    fn test_root_only() {
        for count in [-3, 0, 1] {
            let tree = build(count, 50, 50, 1);
            assert_eq!(tree.node_count(), 1);
            assert!(tree.root().children.is_empty());
            assert_eq!(tree.root().id, "100000");
            assert_eq!(tree.root().group_size, 0);
        }
    }

    #[test]
    fn test_node_count_and_unique_ordinals() {
        let tree = build(1_000, 50, 50, 7);
        assert_eq!(tree.node_count(), 1_000);

        let ids: Vec<String> = tree.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), 1_000);
        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), 1_000);

        // 先序遍历即创建顺序
        let expected: Vec<String> = (0..1_000).map(|i| format!("10000{}", i)).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_group_sizes() {
        let tree = build(2_000, 50, 50, 9);
        assert_eq!(tree.root().group_size, 0);
        assert!(
            tree.iter()
                .skip(1)
                .all(|r| (1..=24).contains(&r.group_size))
        );
    }

    #[test]
    fn test_all_child_builds_single_chain() {
        let tree = build(500, 100, 0, 3);
        let stats = tree.stats();

        assert_eq!(stats.node_count, 500);
        assert_eq!(stats.max_depth, 499);
        assert_eq!(stats.max_fanout, 1);
        assert_eq!(stats.leaf_count, 1);
    }

    #[test]
    fn test_all_sibling_builds_flat_tree() {
        let tree = build(500, 0, 100, 3);

        assert_eq!(tree.root().children.len(), 499);
        assert!(tree.root().children.iter().all(|c| c.children.is_empty()));
        assert_eq!(tree.stats().max_depth, 1);
    }

    #[test]
    fn test_never_branching_restarts_at_root() {
        let tree = build(300, 0, 0, 5);
        assert_eq!(tree.root().children.len(), 299);
        assert_eq!(tree.stats().max_depth, 1);
    }

    #[test]
    fn test_out_of_range_percents_do_not_crash() {
        let tree = build(400, 250, -40, 6);
        assert_eq!(tree.stats().max_depth, 399);

        let tree = build(400, -1, 101, 6);
        assert_eq!(tree.root().children.len(), 399);
    }

    #[test]
    fn test_clamp_boundary() {
        let at_limit = build(20_000, 50, 50, 8);
        let over_limit = build(20_001, 50, 50, 8);
        assert_eq!(at_limit.node_count(), 20_000);
        assert_eq!(over_limit.node_count(), 20_000);
        assert_eq!(TreeStats::collect(over_limit.root()).node_count, 20_000);
    }

    #[test]
    fn test_max_depth_chain_does_not_overflow() {
        let tree = build(20_000, 100, 0, 10);
        let stats = tree.stats();
        assert_eq!(stats.node_count, 20_000);
        assert_eq!(stats.max_depth, 19_999);
    }

    #[test]
    fn test_same_seed_same_tree() {
        let a = build(300, 60, 40, 42);
        let b = build(300, 60, 40, 42);
        assert_eq!(a.root(), b.root());

        let c = build(300, 60, 40, 43);
        assert_ne!(a.root(), c.root());
    }

    #[test]
    fn test_extended_variant_propagates() {
        let request = BuildRequest::new(50, RecordVariant::Extended);
        let tree = build_tree(&request, Some(1));
        assert_eq!(tree.variant(), RecordVariant::Extended);
        assert!(tree.iter().all(|r| r.detail.is_some()));
    }

    #[test]
    fn test_custom_name_supply() {
        let names = CyclingNameSupply::new(["Root", "Child"]);
        let mut builder = TreeBuilder::new(names, RandomSource::from_seed(1));
        let tree = builder.build(&BuildRequest::new(2, RecordVariant::Basic));

        assert_eq!(tree.root().name, "Root");
        assert_eq!(tree.root().children[0].name, "Child");
        assert_eq!(tree.root().children[0].id, "100001");
    }
}
