//! 定长记录块缓存
//!
//! 在按定长记录读写的客户端与随机访问后备文件之间维护固定数量的块槽位，
//! 读写优先在内存中完成，写入延迟到块被驱逐或同步时才落盘。
//!
//! # 主要组件
//!
//! - [`Geometry`] - 地址转换：记录索引 → 文件块号 / 块内偏移 / 文件偏移
//! - [`SlotTable`] / [`Slot`] - 槽位表，槽位身份即下标
//! - [`SlotFlags`] - 槽位状态标志（`VALID` / `DIRTY`）
//! - [`RecordCache`] - 缓存管理器
//! - [`Instrument`] - 统计信息
//! - [`CacheConfig`] - 创建配置
//!
//! # 槽位状态机
//!
//! ```text
//! Invalid --装入--> Valid/Clean --写--> Valid/Dirty --刷新--> Valid/Clean
//!    ^                                                          |
//!    +-------------------- 驱逐 / 失效 -------------------------+
//! ```
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use rcache_core::{CacheConfig, MemFile, RecordCache};
//!
//! // 2 个槽位，每块 4 条 8 字节记录
//! let config = CacheConfig::new(2, 4, 8, 1000);
//! let mut cache = RecordCache::new(MemFile::zeroed(256), config)?;
//!
//! cache.write(10, &[1u8; 8])?;
//! let mut rec = [0u8; 8];
//! cache.read(10, &mut rec)?;
//!
//! // 关闭时同步所有脏块并交还后备文件
//! let file = cache.close()?;
//! ```

mod addr;
mod config;
mod instrument;
mod record_cache;
mod slot;

pub use addr::{Geometry, RecordLocation};
pub use config::CacheConfig;
pub use instrument::Instrument;
pub use record_cache::RecordCache;
pub use slot::{Slot, SlotFlags, SlotId, SlotTable};
