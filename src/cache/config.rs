//! 缓存创建配置

use super::addr::Geometry;
use crate::error::{Error, ErrorKind, Result};
use crate::strategy::PolicyKind;

/// 缓存创建配置
///
/// # 示例
///
/// ```rust,ignore
/// // 16 个槽位，每块 32 条 64 字节记录，NUR 每 8 次访问解引用一次
/// let config = CacheConfig::new(16, 32, 64, 8)
///     .with_policy(PolicyKind::Nur)
///     .with_sync_interval(DEFAULT_SYNC_INTERVAL);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// 槽位数量
    pub block_count: usize,
    /// 每块记录数
    pub records_per_block: usize,
    /// 记录大小（字节）
    pub record_size: usize,
    /// 解引用阈值，交给替换策略解释
    pub deref_threshold: u32,
    /// 自动同步间隔；`None` 时等于 `deref_threshold`
    pub sync_interval: Option<u32>,
    /// 记录数上限；索引不小于此值时返回 `OutOfRange`
    pub record_limit: Option<u64>,
    /// 内置替换策略
    pub policy: PolicyKind,
}

impl CacheConfig {
    /// 创建配置
    pub fn new(
        block_count: usize,
        records_per_block: usize,
        record_size: usize,
        deref_threshold: u32,
    ) -> Self {
        Self {
            block_count,
            records_per_block,
            record_size,
            deref_threshold,
            sync_interval: None,
            record_limit: None,
            policy: PolicyKind::default(),
        }
    }

    /// 设置自动同步间隔
    pub fn with_sync_interval(mut self, interval: u32) -> Self {
        self.sync_interval = Some(interval);
        self
    }

    /// 设置记录数上限
    pub fn with_record_limit(mut self, limit: u64) -> Self {
        self.record_limit = Some(limit);
        self
    }

    /// 选择内置替换策略
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// 实际生效的自动同步间隔
    pub fn effective_sync_interval(&self) -> u32 {
        self.sync_interval.unwrap_or(self.deref_threshold)
    }

    /// 校验配置并计算几何参数
    pub fn validate(&self) -> Result<Geometry> {
        if self.block_count == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "block count must be positive",
            ));
        }
        if self.deref_threshold == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "dereference threshold must be positive",
            ));
        }
        if self.effective_sync_interval() == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "sync interval must be positive",
            ));
        }
        Geometry::new(self.records_per_block, self.record_size)
    }
}
