//! 查询引擎：在建好的位置堆上以 O(m+k) 回答子串出现位置查询。

use crate::index::heap::PositionHeap;
use crate::index::nodes::{NOCHILD, ROOT};
use crate::util::poslist::PosList;

impl PositionHeap {
    /// 返回模式串在文本中全部出现位置，位置采用倒置约定（位置 0 是
    /// 用户文本的最右字符），报告的是匹配串最左字符的位置。结果列表
    /// 的所有权转移给调用方；顺序没有保证。
    ///
    /// 空模式串返回全部位置；空文本上任何查询都返回空表。模式串
    /// 只被读取，不会被修改。
    ///
    /// 模式串不落出树时，出现位置 = 索引路径终点的整棵子树，加上
    /// 最大可达指针落入该子树的祖先。落出树时，把模式串分解成一串
    /// 最大因子 X_1 X_2 … X_j，先取 X_1 的候选集合，再逐因子剪枝。
    pub fn search(&self, pattern: &[u8]) -> Vec<u32> {
        if self.text.is_empty() {
            return Vec::new();
        }
        let m = pattern.len();

        // X_1 不落出树时直接得到全部出现位置，否则得到候选集合
        let (path_end_depth, mut candidates) = self.gen_candidates(pattern);
        let fell_off = path_end_depth < m;

        if !fell_off {
            candidates.compact();
        } else {
            let mut offset = path_end_depth;
            while offset < m && !candidates.is_empty() {
                candidates = self.prune_candidates(&pattern[offset..], candidates, &mut offset);
            }
        }
        candidates.into_vec()
    }

    /// 沿模式串尽量深地走索引路径。返回 (路径末端节点, 末端深度)；
    /// 末端深度小于模式长度即“落出树”。空模式串停在根。
    ///
    /// 模式串按用户方向从左到右逐字消费，在倒置约定下这正是从右往左。
    fn index_into_trie(&self, pattern: &[u8]) -> (u32, usize) {
        let m = pattern.len();
        if m == 0 {
            return (ROOT, 0);
        }
        let mut child = ROOT;
        let mut depth = 0usize;
        loop {
            let path_node = child;
            child = self
                .children
                .child_on_letter(&self.text, path_node, depth as u32, pattern[depth]);
            depth += 1;
            if child == NOCHILD {
                return (path_node, depth - 1);
            }
            if depth == m {
                return (child, depth);
            }
        }
    }

    /// 模式串不落出树：返回它的全部出现位置。落出树：返回最大前缀
    /// X_1 的候选集合（路径末端节点本身也是 X_1 的出现，一并计入）。
    fn gen_candidates(&self, pattern: &[u8]) -> (usize, PosList) {
        let (path_end_node, path_end_depth) = self.index_into_trie(pattern);

        // 最大可达指针落入末端子树的真祖先
        let mut candidates = self.path_occurrences(pattern, path_end_node);

        if path_end_depth == pattern.len() {
            candidates = self.append_subtree_occurrences(path_end_node, candidates);
        } else {
            candidates.add(path_end_node);
        }
        (path_end_depth, candidates)
    }

    /// 重走索引路径，收集末端节点的真祖先中最大可达指针落入末端子树
    /// 的那些。末端就是根时没有真祖先，直接返回空表。
    fn path_occurrences(&self, pattern: &[u8], path_end_node: u32) -> PosList {
        let mut occurrences = PosList::new();
        let mut node = ROOT;
        let mut depth = 0usize;
        while node != path_end_node {
            if self.is_descendant(self.max_reach[node as usize], path_end_node) {
                occurrences.add(node);
            }
            node = self
                .children
                .child_on_letter(&self.text, node, depth as u32, pattern[depth]);
            depth += 1;
        }
        occurrences
    }

    /// 把 `node` 及其全部后代追加进列表。树高可达 n，用显式栈。
    fn append_subtree_occurrences(&self, node: u32, mut occurrences: PosList) -> PosList {
        let mut stack = vec![node];
        while let Some(x) = stack.pop() {
            occurrences.add(x);
            let mut child = self.children.first_child(x);
            while child != NOCHILD {
                stack.push(child);
                child = self.children.next_sibling(child);
            }
        }
        occurrences
    }

    /// 用下一个最大因子 X_i 剪枝候选集合。
    ///
    /// `suffix` 是模式串去掉前 `offset` 个字符后的剩余部分；沿它索引
    /// 得到 X_i 及其末端节点。候选 h 保留的条件（w = h - offset）：
    /// 要么 w 是末端节点的祖先且 `max_reach[w]` 落入末端子树（w 是
    /// X_i 的候选），要么这是最后一个因子且 w 是末端节点的后代（w 是
    /// X_j 的出现）。
    fn prune_candidates(&self, suffix: &[u8], candidates: PosList, offset: &mut usize) -> PosList {
        let (path_end_node, path_end_depth) = self.index_into_trie(suffix);
        let fell_off = path_end_depth < suffix.len();

        let mut kept = PosList::new();
        if path_end_depth == 0 {
            // 首字符不是任何边标签，即它在位置 1..n-1 都不出现。位置 0
            // （根自身，索引路径到不了）仍可能承载长度为 1 的末因子：
            // 文本最右字符在别处不出现时只能在这里补报。
            if suffix.len() == 1 && suffix[0] == self.text[0] {
                for idx in 0..candidates.len() {
                    let h = candidates.get(idx);
                    if h as usize == *offset {
                        kept.add(h);
                    }
                }
                *offset += 1;
            }
            // 其余情形返回空表且不推进 offset，调用方的循环随即终止
            return kept;
        }

        for idx in 0..candidates.len() {
            let h = candidates.get(idx);
            if (h as usize) < *offset {
                continue; // 偏移后越过文本右端
            }
            let w = h - *offset as u32;
            let ancestor_hit = self.is_descendant(path_end_node, w)
                && self.is_descendant(self.max_reach[w as usize], path_end_node);
            let descendant_hit = !fell_off && self.is_descendant(w, path_end_node);
            if ancestor_hit || descendant_hit {
                kept.add(h);
            }
        }
        *offset += path_end_depth;
        kept
    }

    /// a 是否为 b 的（不必真）后代：DFS 时间区间包含判定，O(1)。
    #[inline]
    pub(crate) fn is_descendant(&self, a: u32, b: u32) -> bool {
        self.discovery[b as usize] <= self.discovery[a as usize]
            && self.finishing[a as usize] <= self.finishing[b as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::pos;

    /// Brute-force occurrence scan, left-to-right starts.
    fn naive_starts(text: &[u8], pattern: &[u8]) -> Vec<usize> {
        if pattern.is_empty() || pattern.len() > text.len() {
            return Vec::new();
        }
        text.windows(pattern.len())
            .enumerate()
            .filter(|(_, w)| *w == pattern)
            .map(|(i, _)| i)
            .collect()
    }

    /// Run a search and translate the result to sorted left-to-right starts.
    fn starts(text: &[u8], pattern: &[u8]) -> Vec<usize> {
        let heap = PositionHeap::build(text);
        let mut out: Vec<usize> = heap
            .search(pattern)
            .into_iter()
            .map(|h| pos::to_start(text.len(), h))
            .collect();
        out.sort_unstable();
        out
    }

    fn assert_matches_naive(text: &[u8], pattern: &[u8]) {
        assert_eq!(
            starts(text, pattern),
            naive_starts(text, pattern),
            "text={:?} pattern={:?}",
            std::str::from_utf8(text),
            std::str::from_utf8(pattern)
        );
    }

    #[test]
    fn abracadabra_scenarios() {
        assert_eq!(starts(b"abracadabra", b"abra"), vec![0, 7]);
        assert_eq!(starts(b"abracadabra", b"a"), vec![0, 3, 5, 7, 10]);
        assert_eq!(starts(b"abracadabra", b"cad"), vec![4]);
    }

    #[test]
    fn repeated_char_text() {
        assert_eq!(starts(b"aaaa", b"aa"), vec![0, 1, 2]);
        assert_eq!(starts(b"aaaa", b"a"), vec![0, 1, 2, 3]);
        assert_eq!(starts(b"aaaa", b"aaaa"), vec![0]);
        assert_eq!(starts(b"aaaa", b"aaaaa"), vec![]);
    }

    #[test]
    fn mississippi_scenarios() {
        assert_eq!(starts(b"mississippi", b"issi"), vec![1, 4]);
        assert_eq!(starts(b"mississippi", b"ssippix"), vec![]);
        assert_eq!(starts(b"mississippi", b"mississippi"), vec![0]);
        assert_eq!(starts(b"mississippi", b"pi"), vec![9]);
    }

    #[test]
    fn empty_text_matches_nothing() {
        assert_eq!(starts(b"", b"a"), vec![]);
        let heap = PositionHeap::build(b"");
        assert_eq!(heap.search(b""), vec![]);
    }

    #[test]
    fn empty_pattern_returns_all_positions() {
        let heap = PositionHeap::build(b"abracadabra");
        let mut got = heap.search(b"");
        got.sort_unstable();
        let expect: Vec<u32> = (0..11).collect();
        assert_eq!(got, expect);
    }

    #[test]
    fn pattern_longer_than_text() {
        assert_eq!(starts(b"abc", b"abcd"), vec![]);
        assert_eq!(starts(b"a", b"aa"), vec![]);
    }

    #[test]
    fn pattern_equal_to_text() {
        assert_eq!(starts(b"abc", b"abc"), vec![0]);
        assert_eq!(starts(b"a", b"a"), vec![0]);
    }

    #[test]
    fn absent_single_character() {
        assert_eq!(starts(b"abracadabra", b"z"), vec![]);
        assert_eq!(starts(b"aaaa", b"b"), vec![]);
    }

    #[test]
    fn unique_last_character_is_found() {
        // 'b' occurs only as the rightmost character: node 0 is the root,
        // so the indexing path alone cannot report it
        assert_eq!(starts(b"ab", b"b"), vec![1]);
        assert_eq!(starts(b"aab", b"b"), vec![2]);
        assert_eq!(starts(b"xyz", b"z"), vec![2]);
    }

    #[test]
    fn match_ending_on_unique_last_character() {
        // the final factor is a single character that labels no edge
        assert_eq!(starts(b"ab", b"ab"), vec![0]);
        assert_eq!(starts(b"xyz", b"yz"), vec![1]);
        assert_eq!(starts(b"xyz", b"xyz"), vec![0]);
        assert_eq!(starts(b"aab", b"ab"), vec![1]);
        assert_eq!(starts(b"aab", b"aab"), vec![0]);
        // same shape, but the pattern does not occur
        assert_eq!(starts(b"xyz", b"zz"), vec![]);
        assert_eq!(starts(b"xyz", b"xz"), vec![]);
    }

    #[test]
    fn every_suffix_finds_its_own_start() {
        for text in [&b"abracadabra"[..], b"mississippi", b"aaaa", b"ab", b"x"] {
            let heap = PositionHeap::build(text);
            for start in 0..text.len() {
                let suffix = &text[start..];
                let got = heap.search(suffix);
                let want = pos::to_rev(text.len(), start);
                assert!(
                    got.contains(&want),
                    "suffix {:?} of {:?} missing its own start",
                    std::str::from_utf8(suffix),
                    std::str::from_utf8(text)
                );
            }
        }
    }

    #[test]
    fn results_have_no_duplicates() {
        let heap = PositionHeap::build(b"abababab");
        for pat in [&b"ab"[..], b"a", b"b", b"abab", b"ba"] {
            let mut got = heap.search(pat);
            let before = got.len();
            got.sort_unstable();
            got.dedup();
            assert_eq!(got.len(), before, "duplicates for {:?}", std::str::from_utf8(pat));
        }
    }

    #[test]
    fn is_descendant_matches_tree_structure() {
        let heap = PositionHeap::build(b"abracadabra");
        let n = heap.text_len() as u32;
        // recompute subtree membership by walking from every node
        for b in 0..n {
            let mut members = vec![false; n as usize];
            let mut stack = vec![b];
            while let Some(x) = stack.pop() {
                members[x as usize] = true;
                let mut child = heap.children.first_child(x);
                while child != NOCHILD {
                    stack.push(child);
                    child = heap.children.next_sibling(child);
                }
            }
            for a in 0..n {
                assert_eq!(
                    heap.is_descendant(a, b),
                    members[a as usize],
                    "is_descendant({}, {})",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn falls_off_tree_multi_factor_patterns() {
        // long patterns that decompose into several maximal factors
        let text = b"abracadabra";
        for pat in [&b"racadab"[..], b"acadabra", b"bracadabr", b"adab", b"dabra"] {
            assert_matches_naive(text, pat);
        }
    }

    #[test]
    fn randomized_cross_check_small_alphabet() {
        // deterministic LCG, alphabet {a, b}: dense repetitions stress the
        // factor decomposition
        let mut x: u32 = 42;
        let mut step = || {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (x >> 16) as usize
        };
        for _ in 0..20 {
            let n = 2 + step() % 40;
            let text: Vec<u8> = (0..n).map(|_| b"ab"[step() % 2]).collect();
            for _ in 0..25 {
                let m = 1 + step() % 8;
                let pattern: Vec<u8> = (0..m).map(|_| b"ab"[step() % 2]).collect();
                assert_matches_naive(&text, &pattern);
            }
            // and every substring of the text itself
            for start in 0..n {
                for len in 1..=(n - start).min(6) {
                    assert_matches_naive(&text, &text[start..start + len]);
                }
            }
        }
    }

    #[test]
    fn randomized_cross_check_larger_alphabet() {
        let mut x: u32 = 7;
        let mut step = || {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (x >> 16) as usize
        };
        for _ in 0..10 {
            let n = 5 + step() % 120;
            let text: Vec<u8> = (0..n).map(|_| b"abcd"[step() % 4]).collect();
            for _ in 0..40 {
                let m = 1 + step() % 12;
                let pattern: Vec<u8> = (0..m).map(|_| b"abcd"[step() % 4]).collect();
                assert_matches_naive(&text, &pattern);
            }
        }
    }
}
