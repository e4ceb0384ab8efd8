//! 演示如何在 library 模式下使用 pheap-rust 做子串查询。
//!
//! 运行方式：
//! ```bash
//! cargo run --example simple_search
//! ```

use pheap_rust::index::PositionHeap;
use pheap_rust::util::pos;

fn main() {
    // 1. 为文本建索引
    let text = b"abracadabra";
    println!("文本: {}", std::str::from_utf8(text).unwrap());
    println!("长度: {} 字节", text.len());

    let heap = PositionHeap::build(text);
    println!("位置堆构建完成：{} 个节点", heap.text_len());

    // 2. 查询若干模式串
    for pattern in [&b"abra"[..], b"a", b"cad", b"bra", b"zzz"] {
        let hits = heap.search(pattern);
        let mut starts: Vec<usize> = hits
            .iter()
            .map(|&h| pos::to_start(text.len(), h))
            .collect();
        starts.sort_unstable();
        println!(
            "\n模式 '{}': 找到 {} 处",
            std::str::from_utf8(pattern).unwrap(),
            starts.len()
        );
        for s in &starts {
            println!("  起始下标 {}", s);
        }
    }

    // 3. 查看索引树的形状（调试输出）
    let small = PositionHeap::build(b"aabab");
    println!("\n'aabab' 的索引树:");
    print!("{}", small.preorder_dump());

    println!("\n完成！");
}
