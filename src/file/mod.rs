//! 后备文件抽象
//!
//! 缓存把后备存储看作一段平坦的字节序列，按 `block_size` 划分为定长块。
//! backing.rs 定义 [`BackingFile`] 接口以及 `std` 下的文件实现，
//! mem.rs 提供纯内存实现，主要用于 no_std 环境和测试。

mod backing;
mod mem;

pub use backing::BackingFile;
pub use mem::MemFile;
