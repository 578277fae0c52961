//! 所属设备解析与设备树构建。
//!
//! 设备树是以 `psr_id` 为键的森林，节点之间只记录下标，不保存父指针。

use crate::record::{DeviceRecord, RawDevice};
use domain::PsrType;
use domain::catalog::Affiliation;
use std::collections::HashMap;

/// 解析设备的所属设备 ID，无所属设备时返回空串。
///
/// 电缆终端与电缆接头取起点或终点位置为本设备的第一条电缆段；
/// 其余类型按类型 → 字段名表从原始记录中读取。
pub fn get_affiliated_psr_id(all: &[RawDevice], device: &RawDevice) -> String {
    match device.device_type().affiliation() {
        Affiliation::CableSegmentEndpoint => all
            .iter()
            .filter(|segment| segment.device_type() == PsrType::CableSegment)
            .find(|segment| {
                segment.start_position == device.psr_id || segment.end_position == device.psr_id
            })
            .map(|segment| segment.psr_id.clone())
            .unwrap_or_default(),
        Affiliation::Field(field) => device.field(field),
        Affiliation::None => String::new(),
    }
}

/// 设备森林。
///
/// 每个设备只会出现在以下位置之一：`roots`、某一个父节点的 `children`、`orphans`。
/// 所属设备不在本批数据中的设备记为孤立节点，不挂到任何树上，也不提升为根。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceForest {
    pub roots: Vec<usize>,
    pub children: Vec<Vec<usize>>,
    pub orphans: Vec<usize>,
}

impl DeviceForest {
    /// 以设备列表下标构建森林。
    pub fn build(devices: &[DeviceRecord]) -> Self {
        let index: HashMap<&str, usize> = devices
            .iter()
            .enumerate()
            .map(|(position, device)| (device.psr_id.as_str(), position))
            .collect();

        let mut forest = Self {
            roots: Vec::new(),
            children: vec![Vec::new(); devices.len()],
            orphans: Vec::new(),
        };

        for (position, device) in devices.iter().enumerate() {
            if device.affiliated_psr_id.is_empty() || device.psr_type.is_structural_anchor() {
                forest.roots.push(position);
                continue;
            }
            match index.get(device.affiliated_psr_id.as_str()) {
                Some(&parent) if parent != position => forest.children[parent].push(position),
                _ => forest.orphans.push(position),
            }
        }

        forest
    }

    pub fn children_of(&self, position: usize) -> &[usize] {
        self.children
            .get(position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 从根节点深度优先遍历得到的下标序列。
    pub fn depth_first(&self, root: usize) -> Vec<usize> {
        let mut visited = vec![false; self.children.len()];
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(position) = stack.pop() {
            if position >= visited.len() || visited[position] {
                continue;
            }
            visited[position] = true;
            order.push(position);
            stack.extend(self.children_of(position).iter().rev());
        }
        order
    }

    /// 从任一根节点可达的设备数。
    pub fn attached_count(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.depth_first(root).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn raw(value: Value) -> RawDevice {
        serde_json::from_value(value).expect("raw")
    }

    #[test]
    fn cable_terminal_resolves_to_segment_by_endpoint() {
        let all = vec![
            raw(json!({ "psr_id": "S1", "psrType": "0201", "start_position": "X", "end_position": "Y" })),
            raw(json!({ "psr_id": "S2", "psrType": "0201", "start_position": "J1", "end_position": "Z" })),
            raw(json!({ "psr_id": "S3", "psrType": "0201", "start_position": "Q", "end_position": "J1" })),
            raw(json!({ "psr_id": "J1", "psrType": "0203" })),
        ];
        assert_eq!(get_affiliated_psr_id(&all, &all[3]), "S2");
    }

    #[test]
    fn cable_terminal_without_segment_has_no_parent() {
        let all = vec![
            raw(json!({ "psr_id": "T1", "psrType": "0202" })),
            raw(json!({ "psr_id": "X", "psrType": "0103", "start_position": "T1" })),
        ];
        assert_eq!(get_affiliated_psr_id(&all, &all[0]), "");
    }

    #[test]
    fn mapped_types_read_the_parent_field() {
        let breaker = raw(json!({ "psr_id": "B1", "psrType": "0305", "pole_id": "T9" }));
        let conductor = raw(json!({ "psr_id": "C1", "psrType": "0101", "start_pole_id": "T3" }));
        let unmapped = raw(json!({ "psr_id": "U1", "psrType": "9999", "pole_id": "T9" }));
        let all = vec![breaker.clone(), conductor.clone(), unmapped.clone()];
        assert_eq!(get_affiliated_psr_id(&all, &breaker), "T9");
        assert_eq!(get_affiliated_psr_id(&all, &conductor), "T3");
        assert_eq!(get_affiliated_psr_id(&all, &unmapped), "");
    }
}
