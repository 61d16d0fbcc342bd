//! 地址转换
//!
//! 记录索引 → (文件块号, 块内偏移) → 文件字节偏移，全部为纯函数。

use crate::error::{Error, ErrorKind, Result};

/// 缓存几何参数
///
/// `block_size = records_per_block * record_size` 在创建时计算一次，之后不变。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    records_per_block: usize,
    record_size: usize,
    block_size: usize,
}

/// 一条记录在文件和块中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLocation {
    /// 文件块号
    pub block: u64,
    /// 块内字节偏移
    pub offset: usize,
}

impl Geometry {
    /// 创建几何参数
    ///
    /// # 错误
    ///
    /// 任一参数为零或 `block_size` 溢出时返回 `InvalidInput`
    pub fn new(records_per_block: usize, record_size: usize) -> Result<Self> {
        if records_per_block == 0 || record_size == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "records per block and record size must be positive",
            ));
        }
        let block_size = records_per_block
            .checked_mul(record_size)
            .ok_or(Error::new(ErrorKind::InvalidInput, "block size overflows"))?;
        Ok(Self {
            records_per_block,
            record_size,
            block_size,
        })
    }

    /// 每块记录数
    pub fn records_per_block(&self) -> usize {
        self.records_per_block
    }

    /// 记录大小（字节）
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// 块大小（字节）
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// 记录所在的文件块号
    #[inline]
    pub fn block_of(&self, record: u64) -> u64 {
        record / self.records_per_block as u64
    }

    /// 记录在块内的字节偏移
    #[inline]
    pub fn offset_of(&self, record: u64) -> usize {
        (record % self.records_per_block as u64) as usize * self.record_size
    }

    /// 文件块的起始字节偏移
    ///
    /// # 错误
    ///
    /// 块的字节范围无法用 u64 表示时返回 `OutOfRange`
    pub fn file_offset(&self, block: u64) -> Result<u64> {
        let start = block
            .checked_mul(self.block_size as u64)
            .ok_or(Error::new(ErrorKind::OutOfRange, "block offset overflows"))?;
        start
            .checked_add(self.block_size as u64)
            .ok_or(Error::new(ErrorKind::OutOfRange, "block end overflows"))?;
        Ok(start)
    }

    /// 定位记录
    ///
    /// 同时校验记录所在块的字节地址可以表示，避免静默算出错误地址。
    pub fn locate(&self, record: u64) -> Result<RecordLocation> {
        let block = self.block_of(record);
        self.file_offset(block)?;
        Ok(RecordLocation {
            block,
            offset: self.offset_of(record),
        })
    }
}
