use std::fmt::Write as _;

use crate::index::nodes::{ChildTable, NOCHILD, ROOT};

/// 位置堆全文索引。
///
/// 对长度为 n 的文本一次性构建（O(n)），此后不可变；`search` 以
/// O(m+k) 时间返回模式串的全部出现位置（k 为出现次数）。
///
/// 内部把文本倒置存放：`text[0]` 是用户文本的最右字符。节点编号与
/// 文本位置一一对应，节点 0 是根，表示空前缀。从根到节点 i 的边标签
/// 序列，是后缀 `text[i..0]` 在当时唯一的最短前缀。
#[derive(Debug)]
pub struct PositionHeap {
    /// 倒置的私有文本副本
    pub(crate) text: Vec<u8>,
    /// 最终主堆的向下有向树
    pub(crate) children: ChildTable,
    /// 最大可达指针：从根到 `max_reach[i]` 的路径，是 `text[i..0]`
    /// 在树中能走到的最长前缀
    pub(crate) max_reach: Vec<u32>,
    /// DFS 发现时间
    pub(crate) discovery: Vec<u32>,
    /// DFS 完成时间（与发现时间共用同一个计数器）
    pub(crate) finishing: Vec<u32>,
}

impl PositionHeap {
    /// 为 `input` 构建位置堆。空文本合法：索引为空，任何查询都返回空表。
    pub fn build(input: &[u8]) -> Self {
        let n = input.len();
        let mut text = Vec::with_capacity(n);
        text.extend(input.iter().rev().copied());

        // 构建期间：children 存对偶堆（向下），parent 存主堆（向上）
        let mut children = ChildTable::new(n);
        let mut parent = vec![ROOT; n];
        let mut max_reach = vec![ROOT; n];

        if n > 0 {
            build_trees(&text, &mut parent, &mut children);
            install_max_reaches(&text, &parent, &children, &mut max_reach);

            // 丢弃对偶堆，把同一对数组改写成最终的主堆
            children.clear();
            for i in 1..n as u32 {
                children.insert_child(i, parent[i as usize]);
            }
        }
        drop(parent); // 只在构建与安装最大可达指针时需要

        let mut discovery = vec![0u32; n];
        let mut finishing = vec![0u32; n];
        if n > 0 {
            set_discovery_finishing(&children, &mut discovery, &mut finishing);
        }

        Self { text, children, max_reach, discovery, finishing }
    }

    /// 索引文本的长度（字节数）。
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 缩进的先序遍历转储，调试用。每行给出节点编号、深度、最大可达、
    /// DFS 时间戳，以及按边标签标注的孩子。
    pub fn preorder_dump(&self) -> String {
        let mut out = String::new();
        if self.text.is_empty() {
            return out;
        }
        let mut stack = vec![(ROOT, 0u32)];
        while let Some((node, depth)) = stack.pop() {
            for _ in 0..depth {
                out.push(' ');
            }
            let _ = write!(
                out,
                "Node {}  Depth {}  max reach: {}  discovery: {}  finish: {}  Children:",
                node,
                depth,
                self.max_reach[node as usize],
                self.discovery[node as usize],
                self.finishing[node as usize],
            );
            let mut kids = Vec::new();
            let mut child = self.children.first_child(node);
            while child != NOCHILD {
                let label = self.text[(child - depth) as usize] as char;
                let _ = write!(out, " ({},{})", label, child);
                kids.push(child);
                child = self.children.next_sibling(child);
            }
            out.push('\n');
            // 逆序入栈，使出栈顺序与孩子链表一致
            for &k in kids.iter().rev() {
                stack.push((k, depth + 1));
            }
        }
        out
    }
}

/// 一趟扫描同时建出主堆（向上的 parent 数组）与对偶堆（向下的
/// 孩子/兄弟数组）。
///
/// 处理位置 i 时，从最近加入的节点沿主堆向上爬，找到第一个在对偶堆里
/// 有 c = text[i] 孩子的祖先；该孩子就是 text[i..0] 已经是树中节点的
/// 最长前缀，新节点挂在它下面。对偶堆里，新节点挂到爬升途中看到的、
/// 还没有 c 孩子的最高节点下面。对偶孩子的标签由其自身编号决定
/// （text[child - 0]），所以查询时深度参数恒为 0。
///
/// 爬升的总代价由 path_node 深度的势函数摊还，整体 O(n)。
fn build_trees(text: &[u8], parent: &mut [u32], dual: &mut ChildTable) {
    let mut path_node = ROOT;
    for i in 1..text.len() as u32 {
        let c = text[i as usize];
        if dual.child_on_letter(text, ROOT, 0, c) == NOCHILD {
            // 第一次见到字母 c：新节点同时是主堆与对偶堆的根孩子
            parent[i as usize] = ROOT;
            dual.insert_child(i, ROOT);
        } else {
            let mut prev;
            let mut node = path_node;
            let x = loop {
                prev = node;
                node = parent[node as usize];
                let x = dual.child_on_letter(text, node, 0, c);
                if x != NOCHILD {
                    break x;
                }
            };
            parent[i as usize] = x;
            dual.insert_child(i, prev);
        }
        path_node = i;
    }
}

/// 为每个节点安装最大可达指针，O(n)。
///
/// 与建树同样的爬升方式：从上一个指针指向的节点沿主堆向上，直到某个
/// 祖先在对偶堆里有 c = text[i] 孩子，指针落在该孩子上。对偶堆里
/// p 的 c 孩子，按构造恰好是比 p 的根路径多前置一个字符 c 的节点，
/// 所以沿对偶孩子下行就是在主堆里沿 text[i..0] 的前缀逐字下行。
fn install_max_reaches(text: &[u8], parent: &[u32], dual: &ChildTable, max_reach: &mut [u32]) {
    let first = dual.child_on_letter(text, ROOT, 0, text[0]);
    let mut path_node = if first == NOCHILD { ROOT } else { first };
    max_reach[ROOT as usize] = path_node;

    for i in 1..text.len() as u32 {
        let c = text[i as usize];
        // 根在对偶堆里必有 c 孩子（建树时要么已存在，要么 i 自己补上），
        // 所以爬升必然终止
        let mut x = dual.child_on_letter(text, path_node, 0, c);
        while x == NOCHILD {
            path_node = parent[path_node as usize];
            x = dual.child_on_letter(text, path_node, 0, c);
        }
        path_node = x;
        max_reach[i as usize] = path_node;
    }
}

/// 一趟 DFS 打上发现/完成时间戳，两者共用一个递增计数器。
/// 退化输入下树高可达 n，所以用显式栈而不是递归。
fn set_discovery_finishing(children: &ChildTable, discovery: &mut [u32], finishing: &mut [u32]) {
    let mut counter = 0u32;
    // (节点, 下一个待访问的孩子)
    let mut stack: Vec<(u32, u32)> = Vec::new();
    discovery[ROOT as usize] = counter;
    counter += 1;
    stack.push((ROOT, children.first_child(ROOT)));

    while let Some(top) = stack.last_mut() {
        let (node, child) = *top;
        if child == NOCHILD {
            finishing[node as usize] = counter;
            counter += 1;
            stack.pop();
        } else {
            top.1 = children.next_sibling(child);
            discovery[child as usize] = counter;
            counter += 1;
            stack.push((child, children.first_child(child)));
        }
    }
}
