//! rcache_core: 定长记录的块缓存
//!
//! 在按定长记录读写的客户端与随机访问后备文件之间提供块级缓存：
//! - **固定容量**的槽位表，创建时一次性分配
//! - **写回**：写入只标记脏块，驱逐、同步或关闭时才落盘
//! - **自动同步**：每隔固定次数的读写同步一次
//! - **可插拔替换策略**（FIFO / LRU / NUR 或自定义）
//!
//! # 示例
//!
//! ```rust,ignore
//! use rcache_core::{CacheConfig, PolicyKind, RecordCache, Result};
//!
//! fn main() -> Result<()> {
//!     let file = std::fs::OpenOptions::new()
//!         .read(true)
//!         .write(true)
//!         .open("records.bin")?;
//!
//!     // 8 个槽位，每块 16 条 64 字节记录
//!     let config = CacheConfig::new(8, 16, 64, 100).with_policy(PolicyKind::Nur);
//!     let mut cache = RecordCache::new(file, config)?;
//!
//!     let mut rec = [0u8; 64];
//!     cache.read(42, &mut rec)?;
//!     rec[0] = 0xFF;
//!     cache.write(42, &rec)?;
//!
//!     println!("{}", cache.take_instrument());
//!     cache.close()?;
//!     Ok(())
//! }
//! ```
//!
//! # 模块结构
//!
//! - [`error`] - 错误类型定义
//! - [`file`] - 后备文件抽象
//! - [`cache`] - 槽位表、地址转换与缓存管理器
//! - [`strategy`] - 块替换策略
//! - [`consts`] - 常量定义

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// ===== 核心模块 =====

/// 错误处理
pub mod error;

/// 常量定义
pub mod consts;

/// 后备文件抽象
pub mod file;

/// 记录块缓存
pub mod cache;

/// 块替换策略
pub mod strategy;

// ===== 公共导出 =====

// 错误处理
pub use error::{Error, ErrorKind, Result};

// 后备文件
pub use file::{BackingFile, MemFile};

// 缓存
pub use cache::{
    CacheConfig, Geometry, Instrument, RecordCache, RecordLocation, Slot, SlotFlags, SlotId,
    SlotTable,
};

// 替换策略
pub use strategy::{AccessOutcome, FifoPolicy, LruPolicy, NurPolicy, PolicyKind, ReplacementPolicy};

// 常量
pub use consts::DEFAULT_SYNC_INTERVAL;
