//! 精简格式
//!
//! 去掉字段名，把记录树转换为只保留值的嵌套数组，用于压缩传输体积。
//!
//! 每个节点输出为一个数组：先按固定顺序列出各字段的值，
//! 如有子节点，再追加一个元素，内容是各子节点的精简数组。
//! 字段顺序由 [`BASIC_FIELDS`] / [`EXTENDED_FIELDS`] 静态声明。

use std::ops::Deref;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::models::{AboDetail, AboRecord};

/// 字段描述：名称 + 取值函数
pub struct FieldDescriptor {
    pub name: &'static str,
    pub extract: fn(&AboRecord) -> Value,
}

/// 两种变体共有的字段
pub static BASIC_FIELDS: [FieldDescriptor; 8] = [
    FieldDescriptor {
        name: "Name",
        extract: |r| Value::from(r.name.as_str()),
    },
    FieldDescriptor {
        name: "ID",
        extract: |r| Value::from(r.id.as_str()),
    },
    FieldDescriptor {
        name: "GroupSize",
        extract: |r| Value::from(r.group_size),
    },
    FieldDescriptor {
        name: "Aff",
        extract: |r| Value::from(r.aff.as_str()),
    },
    FieldDescriptor {
        name: "Entry",
        extract: |r| Value::from(r.entry.format("%Y-%m-%dT%H:%M:%S").to_string()),
    },
    FieldDescriptor {
        name: "IsActive",
        extract: |r| Value::from(r.is_active),
    },
    FieldDescriptor {
        name: "IsConfidential",
        extract: |r| Value::from(r.is_confidential),
    },
    FieldDescriptor {
        name: "IsInternational",
        extract: |r| Value::from(r.is_international),
    },
];

/// Extended 变体追加的字段
pub static EXTENDED_FIELDS: [FieldDescriptor; 6] = [
    FieldDescriptor {
        name: "FosterSponsorABO",
        extract: |r| detail_value(r, |d| to_value(&d.foster_sponsor)),
    },
    FieldDescriptor {
        name: "UplinePlatinumABO",
        extract: |r| detail_value(r, |d| to_value(&d.upline_platinum)),
    },
    FieldDescriptor {
        name: "CurrentAward",
        extract: |r| detail_value(r, |d| to_value(&d.current_award)),
    },
    FieldDescriptor {
        name: "HighestAward",
        extract: |r| detail_value(r, |d| to_value(&d.highest_award)),
    },
    FieldDescriptor {
        name: "Extended",
        extract: |r| detail_value(r, |d| to_value(&d.contact)),
    },
    FieldDescriptor {
        name: "Volume",
        extract: |r| detail_value(r, |d| to_value(&d.volume)),
    },
];

fn detail_value(record: &AboRecord, f: fn(&AboDetail) -> Value) -> Value {
    record.detail.as_ref().map(f).unwrap_or(Value::Null)
}

/// 附加字段都是纯数据结构，序列化不会失败
fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// 某条记录应输出的字段列表
pub fn fields_for(record: &AboRecord) -> impl Iterator<Item = &'static FieldDescriptor> {
    let extended: &'static [FieldDescriptor] = if record.detail.is_some() {
        &EXTENDED_FIELDS
    } else {
        &[]
    };
    BASIC_FIELDS.iter().chain(extended.iter())
}

/// 某条记录的字段数（不含子节点）
pub fn field_count(record: &AboRecord) -> usize {
    fields_for(record).count()
}

fn field_values(record: &AboRecord) -> Vec<Value> {
    fields_for(record).map(|field| (field.extract)(record)).collect()
}

/// 遍历栈帧：节点、下一个待处理的子节点、已完成的子节点结果
struct Frame<'a> {
    node: &'a AboRecord,
    next_child: usize,
    children: Vec<Value>,
}

impl<'a> Frame<'a> {
    fn new(node: &'a AboRecord) -> Self {
        Self {
            node,
            next_child: 0,
            children: Vec::with_capacity(node.children.len()),
        }
    }

    fn finish(self) -> Vec<Value> {
        let mut values = field_values(self.node);
        if !self.children.is_empty() {
            values.push(Value::Array(self.children));
        }
        values
    }
}

/// 精简结果：根节点的值数组
///
/// `serde_json::Value` 的析构随嵌套层数递归，单链深树会耗尽栈空间，
/// 这里用显式栈逐层拆开。
#[derive(Debug, PartialEq, Default)]
pub struct Minified(Vec<Value>);

impl Deref for Minified {
    type Target = Vec<Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Serialize for Minified {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl Drop for Minified {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.0);
        while let Some(value) = stack.pop() {
            match value {
                Value::Array(items) => stack.extend(items),
                Value::Object(map) => stack.extend(map.into_iter().map(|(_, v)| v)),
                _ => {}
            }
        }
    }
}

/// 将记录树转换为精简格式
///
/// 后序遍历，使用显式栈，不随树深度递归。
pub fn minify(root: &AboRecord) -> Minified {
    let mut stack = vec![Frame::new(root)];

    while let Some(frame) = stack.last_mut() {
        let node = frame.node;
        if let Some(child) = node.children.get(frame.next_child) {
            frame.next_child += 1;
            stack.push(Frame::new(child));
            continue;
        }

        let Some(done) = stack.pop() else { break };
        let values = done.finish();
        match stack.last_mut() {
            Some(parent) => parent.children.push(Value::Array(values)),
            None => return Minified(values),
        }
    }

    Minified::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{BuildRequest, build_tree};
    use crate::models::RecordVariant;
    use serde_json::json;

    /// 校验精简结构与原树逐层对应
    fn assert_shape(record: &AboRecord, values: &[Value]) {
        let mut pending: Vec<(&AboRecord, &[Value])> = vec![(record, values)];
        while let Some((node, values)) = pending.pop() {
            let fields = field_count(node);
            if node.children.is_empty() {
                assert_eq!(values.len(), fields);
                continue;
            }
            assert_eq!(values.len(), fields + 1);
            let nested = values[fields].as_array().unwrap();
            assert_eq!(nested.len(), node.children.len());
            for (child, child_values) in node.children.iter().zip(nested) {
                pending.push((child, child_values.as_array().unwrap().as_slice()));
            }
        }
    }

    #[test]
    fn test_descriptor_order() {
        let basic: Vec<&str> = BASIC_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(
            basic,
            vec![
                "Name",
                "ID",
                "GroupSize",
                "Aff",
                "Entry",
                "IsActive",
                "IsConfidential",
                "IsInternational"
            ]
        );
        let extended: Vec<&str> = EXTENDED_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(
            extended,
            vec![
                "FosterSponsorABO",
                "UplinePlatinumABO",
                "CurrentAward",
                "HighestAward",
                "Extended",
                "Volume"
            ]
        );
    }

    #[test]
    fn test_single_node_has_field_count_only() {
        let tree = build_tree(&BuildRequest::new(1, RecordVariant::Basic), Some(1));
        let root = tree.root();
        let values = minify(root);

        assert_eq!(values.len(), 8);
        assert_eq!(values[0], json!(root.name));
        assert_eq!(values[1], json!("100000"));
        assert_eq!(values[2], json!(0));
        assert_eq!(values[3], json!("US"));
        assert_eq!(
            values[4],
            json!(root.entry.format("%Y-%m-%dT%H:%M:%S").to_string())
        );
        assert_eq!(values[5], json!(root.is_active));
    }

    #[test]
    fn test_entry_matches_labeled_serialization() {
        let tree = build_tree(&BuildRequest::new(1, RecordVariant::Basic), Some(2));
        let labeled = serde_json::to_value(tree.root()).unwrap();
        let values = minify(tree.root());
        assert_eq!(values[4], labeled["Entry"]);
    }

    #[test]
    fn test_nested_shape_matches_tree() {
        let request = BuildRequest::new(800, RecordVariant::Basic).with_percents(55, 60);
        let tree = build_tree(&request, Some(5));
        let values = minify(tree.root());

        assert_shape(tree.root(), &values);
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let request = BuildRequest::new(6, RecordVariant::Basic).with_percents(0, 100);
        let tree = build_tree(&request, Some(3));
        let values = minify(tree.root());

        let nested = values[8].as_array().unwrap();
        let ids: Vec<&str> = nested
            .iter()
            .map(|child| child[1].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["100001", "100002", "100003", "100004", "100005"]);
    }

    #[test]
    fn test_extended_fields_appended() {
        let request = BuildRequest::new(3, RecordVariant::Extended).with_percents(100, 0);
        let tree = build_tree(&request, Some(4));
        let values = minify(tree.root());

        assert_eq!(values.len(), 15);
        for value in &values[8..13] {
            assert!(value.is_null());
        }
        assert_eq!(
            values[13],
            json!({"BonusPeriod": 201410, "Results": [{"PV": 140.11, "BV": 131.13}]})
        );
        assert_shape(tree.root(), &values);
    }

    #[test]
    fn test_deep_chain_minify() {
        let request = BuildRequest::new(20_000, RecordVariant::Basic).with_percents(100, 0);
        let tree = build_tree(&request, Some(6));
        let values = minify(tree.root());

        let mut depth = 0;
        let mut current: &[Value] = &values;
        while current.len() == 9 {
            current = current[8][0].as_array().unwrap().as_slice();
            depth += 1;
        }
        assert_eq!(depth, 19_999);
        assert_eq!(current.len(), 8);

        // 在默认测试线程栈上释放 20000 层嵌套
        drop(values);
    }

    #[test]
    fn test_drop_dismantles_nested_objects() {
        let mut nested = Value::Array(vec![Value::from(1)]);
        for _ in 0..50_000 {
            let mut map = serde_json::Map::new();
            map.insert("Inner".to_string(), Value::Array(vec![nested]));
            nested = Value::Object(map);
        }
        let minified = Minified(vec![nested, json!("tail")]);
        assert_eq!(minified.len(), 2);
        drop(minified);
    }
}
