//! 常量定义

/// 默认自动同步间隔（读写次数）
///
/// 仅在 [`CacheConfig::with_sync_interval`](crate::cache::CacheConfig::with_sync_interval)
/// 显式使用时生效，否则同步间隔等于解引用阈值。
pub const DEFAULT_SYNC_INTERVAL: u32 = 1000;
