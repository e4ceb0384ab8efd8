//! # pheap-rust
//!
//! 位置堆（position heap）全文子串索引的 Rust 实现。
//!
//! 对固定文本 T（长度 n）一次性建索引，之后任意次查询模式串 P
//! （长度 m）的全部出现位置，单次查询最坏 O(m + k) 时间（k 为
//! 出现次数）。本 crate 提供：
//!
//! - **线性时间构建**：一趟扫描同时建出主堆与对偶堆，再以同样的
//!   摊还爬升方式装上最大可达指针，整体 O(n)
//! - **快速查询**：DFS 发现/完成时间戳支持 O(1) 祖先判定；模式串
//!   落出树时按最大因子分解逐段剪枝，保持 O(m + k)
//! - **批量查询**：索引建成后只读，多个模式串可并行查询
//!
//! ## 快速示例
//!
//! ```rust
//! use pheap_rust::index::PositionHeap;
//! use pheap_rust::util::pos;
//!
//! let text = b"abracadabra";
//! let heap = PositionHeap::build(text);
//!
//! // 返回倒置约定下的位置（0 是文本最右字符）……
//! let hits = heap.search(b"abra");
//! // ……换算成用户从左到右的起始下标
//! let mut starts: Vec<usize> = hits
//!     .into_iter()
//!     .map(|h| pos::to_start(text.len(), h))
//!     .collect();
//! starts.sort_unstable();
//! assert_eq!(starts, vec![0, 7]);
//! ```
//!
//! ## 模块说明
//!
//! - [`index`] — 位置堆的构建（节点存储、建树、最大可达指针、DFS 标号）
//! - [`query`] — 查询引擎与批量查询驱动
//! - [`io`] — 文本文件与模式串文件读取
//! - [`util`] — 位置列表与位置约定换算

pub mod index;
pub mod io;
pub mod query;
pub mod util;
