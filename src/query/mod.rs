pub mod engine;

use anyhow::Result;
use std::io::Write;

use rayon::prelude::*;

use crate::index::PositionHeap;
use crate::util::pos;

/// 批量查询选项。
#[derive(Clone, Copy, Debug)]
pub struct SearchOpt {
    /// 查询使用的线程数。索引建成后只读，模式串之间可以安全并行。
    pub threads: usize,
    /// 直接输出内部倒置位置，不换算成从左到右的起始下标
    pub raw_positions: bool,
}

impl Default for SearchOpt {
    fn default() -> Self {
        Self { threads: 1, raw_positions: false }
    }
}

/// 在同一个索引上查询一批模式串，按输入顺序逐行写出结果。
///
/// 每行三列（制表符分隔）：模式串、出现次数、升序位置列表。
pub fn search_patterns(
    heap: &PositionHeap,
    patterns: &[Vec<u8>],
    out: &mut dyn Write,
    opt: SearchOpt,
) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opt.threads)
        .build()
        .unwrap_or_else(|_| rayon::ThreadPoolBuilder::new().build().unwrap());

    let lines: Vec<String> = pool.install(|| {
        patterns
            .par_iter()
            .map(|pat| format_match_line(heap, pat, opt))
            .collect()
    });

    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// 查询单个模式串并排版一行结果。
fn format_match_line(heap: &PositionHeap, pattern: &[u8], opt: SearchOpt) -> String {
    let n = heap.text_len();
    let mut positions: Vec<usize> = heap
        .search(pattern)
        .into_iter()
        .map(|h| if opt.raw_positions { h as usize } else { pos::to_start(n, h) })
        .collect();
    positions.sort_unstable();

    let list = positions
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{}\t{}\t{}",
        String::from_utf8_lossy(pattern),
        positions.len(),
        list
    )
}
