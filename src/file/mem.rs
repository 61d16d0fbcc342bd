//! 内存后备文件

use super::BackingFile;
use crate::error::{Error, ErrorKind, Result};
use alloc::vec::Vec;

/// 内存中的后备文件
///
/// 读取越过末尾时返回短计数，写入越过末尾时补零增长，与普通文件语义一致。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemFile {
    data: Vec<u8>,
    /// 实际写入次数
    write_count: u64,
    /// 实际读取次数
    read_count: u64,
}

impl MemFile {
    /// 创建空文件
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已有内容创建文件
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// 创建 `len` 字节、全零的文件
    pub fn zeroed(len: usize) -> Self {
        Self::from_vec(alloc::vec![0u8; len])
    }

    /// 文件内容
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// 取出文件内容
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// 文件长度（字节）
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 文件是否为空
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 获取实际读取次数
    pub fn read_count(&self) -> u64 {
        self.read_count
    }

    /// 获取实际写入次数
    pub fn write_count(&self) -> u64 {
        self.write_count
    }
}

fn to_index(offset: u64) -> Result<usize> {
    usize::try_from(offset)
        .map_err(|_| Error::new(ErrorKind::OutOfRange, "offset exceeds addressable memory"))
}

impl BackingFile for MemFile {
    fn len(&mut self) -> Result<u64> {
        Ok(self.data.len() as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        self.read_count += 1;
        let start = to_index(offset)?;
        if start >= self.data.len() {
            return Ok(0);
        }
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        Ok(n)
    }

    fn write_all_at(&mut self, offset: u64, buf: &[u8]) -> Result<()> {
        self.write_count += 1;
        let start = to_index(offset)?;
        let end = start
            .checked_add(buf.len())
            .ok_or(Error::new(ErrorKind::OutOfRange, "write range overflows"))?;
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        self.data[start..end].copy_from_slice(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_file_creation() {
        let file = MemFile::zeroed(64);
        assert_eq!(file.len(), 64);
        assert!(!file.is_empty());
        assert!(MemFile::new().is_empty());
    }

    #[test]
    fn test_mem_file_read_write() {
        let mut file = MemFile::zeroed(16);

        file.write_all_at(2, &[0xAA, 0xBB]).unwrap();

        let mut buf = [0u8; 4];
        assert_eq!(file.read_at(0, &mut buf).unwrap(), 4);
        assert_eq!(buf, [0, 0, 0xAA, 0xBB]);
        assert_eq!(file.read_count(), 1);
        assert_eq!(file.write_count(), 1);
    }

    #[test]
    fn test_mem_file_short_read() {
        let mut file = MemFile::from_vec(alloc::vec![1, 2, 3]);

        let mut buf = [0u8; 8];
        assert_eq!(file.read_at(1, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[2, 3]);
        assert_eq!(file.read_at(3, &mut buf).unwrap(), 0);
        assert_eq!(file.read_at(100, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_mem_file_grows() {
        let mut file = MemFile::new();

        file.write_all_at(6, &[5, 5]).unwrap();
        assert_eq!(file.as_slice(), &[0, 0, 0, 0, 0, 0, 5, 5]);
        assert_eq!(BackingFile::len(&mut file).unwrap(), 8);
    }

    #[test]
    fn test_through_mut_reference() {
        let mut file = MemFile::zeroed(4);
        {
            let mut by_ref: &mut MemFile = &mut file;
            BackingFile::write_all_at(&mut by_ref, 4, &[1, 2]).unwrap();
            assert_eq!(BackingFile::len(&mut by_ref).unwrap(), 6);
            BackingFile::flush(&mut by_ref).unwrap();
        }
        assert_eq!(file.as_slice(), &[0, 0, 0, 0, 1, 2]);
        assert_eq!(file.write_count(), 1);
    }
}
