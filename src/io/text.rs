use anyhow::Result;

/// 读入待索引的文本文件。shell 工具写出的文件通常带一个结尾换行，
/// 它不属于文本内容，剥掉一次（\n 或 \r\n）。
pub fn read_text_file(path: &str) -> Result<Vec<u8>> {
    let mut data = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("cannot open text file '{}': {}", path, e))?;
    if data.last() == Some(&b'\n') {
        data.pop();
        if data.last() == Some(&b'\r') {
            data.pop();
        }
    }
    Ok(data)
}
