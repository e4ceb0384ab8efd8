use anyhow::Result;
use std::io::BufRead;

/// 逐行读取模式串：每行一个，空行跳过，行尾的 \r 一并去掉。
/// 模式串按原始字节处理，不做编码检查。
pub struct PatternReader<R: BufRead> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> PatternReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: Vec::new() }
    }

    pub fn next_pattern(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            self.buf.clear();
            let n = self.reader.read_until(b'\n', &mut self.buf)?;
            if n == 0 {
                return Ok(None);
            }
            let mut line = &self.buf[..];
            while let [rest @ .., b'\n' | b'\r'] = line {
                line = rest;
            }
            if line.is_empty() {
                continue;
            }
            return Ok(Some(line.to_vec()));
        }
    }
}
