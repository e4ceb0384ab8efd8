/// 位置列表中的保留无效标记。合法的节点编号永远不会等于它。
pub const INVALID: u32 = u32::MAX;

/// 仅支持追加的位置序列，用于收集查询结果与候选集合。
/// `search` 返回的列表所有权转移给调用方。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PosList {
    items: Vec<u32>,
}

impl PosList {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline]
    pub fn add(&mut self, x: u32) {
        self.items.push(x);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> u32 {
        self.items[i]
    }

    /// 剔除所有等于 INVALID 的元素，保持其余元素的相对顺序。
    pub fn compact(&mut self) {
        self.items.retain(|&x| x != INVALID);
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.items
    }
}
