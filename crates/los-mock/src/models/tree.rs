//! 生成结果：一棵以序号 0 为根的记录树

use serde::{Serialize, Serializer};

use super::record::{AboRecord, Preorder, RecordVariant};

/// 记录树
///
/// 构建完成后只读。`node_count` 是截断后的实际节点数（含根），
/// 调用方据此观察请求数量是否被截断。
#[derive(Debug)]
pub struct AboTree {
    root: AboRecord,
    node_count: usize,
    variant: RecordVariant,
}

impl AboTree {
    pub(crate) fn new(root: AboRecord, node_count: usize, variant: RecordVariant) -> Self {
        Self {
            root,
            node_count,
            variant,
        }
    }

    pub fn root(&self) -> &AboRecord {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn variant(&self) -> RecordVariant {
        self.variant
    }

    /// 先序遍历，顺序与节点创建顺序一致
    pub fn iter(&self) -> Preorder<'_> {
        self.root.iter()
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats::collect(&self.root)
    }
}

/// 序列化时只输出根节点，与原有接口的响应体一致
impl Serialize for AboTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

/// 树形统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TreeStats {
    pub node_count: usize,
    /// 根节点深度为 0
    pub max_depth: usize,
    pub leaf_count: usize,
    /// 单个节点的最大子节点数
    pub max_fanout: usize,
}

impl TreeStats {
    pub fn collect(root: &AboRecord) -> Self {
        let mut stats = Self::default();
        let mut stack = vec![(root, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            stats.node_count += 1;
            stats.max_depth = stats.max_depth.max(depth);
            stats.max_fanout = stats.max_fanout.max(node.children.len());
            if node.children.is_empty() {
                stats.leaf_count += 1;
            }
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }

        stats
    }
}
