//! 块替换策略
//!
//! 缓存只通过 [`ReplacementPolicy`] 与具体策略交互：
//!
//! - 未命中时由策略选出牺牲槽位（[`ReplacementPolicy::select_victim`]）
//! - 每次读写成功后通知策略（[`ReplacementPolicy::on_read`] / [`ReplacementPolicy::on_write`]）
//! - 整体失效时重置策略（[`ReplacementPolicy::invalidate`]）
//!
//! 牺牲槽位若是脏块，由缓存在复用前写回，策略本身不做 I/O。
//!
//! # 内置策略
//!
//! | 策略 | 类型 | 选择规则 |
//! |------|------|----------|
//! | FIFO | [`FifoPolicy`] | 最早装入的块 |
//! | LRU  | [`LruPolicy`]  | 最久未访问的块（`lru` crate） |
//! | NUR  | [`NurPolicy`]  | 最近未使用，按 (引用位, 脏位) 分级 |
//!
//! 所有内置策略都优先使用空闲槽位。

mod fifo;
mod lru;
mod nur;

pub use self::fifo::FifoPolicy;
pub use self::lru::LruPolicy;
pub use self::nur::NurPolicy;

use crate::cache::{SlotId, SlotTable};
use alloc::boxed::Box;

/// 一次访问通知的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    /// 仅更新了访问元数据
    Touched,
    /// 策略在本次访问后清除了引用信息（计入 `derefs` 统计）
    Dereferenced,
}

/// 块替换策略接口
///
/// 任何满足此约定的策略（LRU、LFU、时钟、随机……）都可以接入缓存。
pub trait ReplacementPolicy {
    /// 策略名称
    fn name(&self) -> &'static str;

    /// 初始化簿记信息
    ///
    /// 在缓存创建时调用一次，`slots` 的长度即槽位数量。
    fn init(&mut self, slots: &SlotTable, deref_threshold: u32);

    /// 选择一个牺牲槽位
    ///
    /// 必须总是返回一个槽位，即使没有空闲槽位（强制驱逐驻留块）。
    fn select_victim(&mut self, slots: &SlotTable) -> SlotId;

    /// 一次读访问已完成
    fn on_read(&mut self, slots: &SlotTable, id: SlotId) -> AccessOutcome;

    /// 一次写访问已完成
    fn on_write(&mut self, slots: &SlotTable, id: SlotId) -> AccessOutcome;

    /// 缓存整体失效，重置簿记信息
    fn invalidate(&mut self, slots: &SlotTable);

    /// 释放策略资源
    fn close(&mut self) {}
}

/// 内置策略选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    /// 先进先出
    Fifo,
    /// 最近最少使用
    #[default]
    Lru,
    /// 最近未使用
    Nur,
}

impl PolicyKind {
    /// 构造对应的策略对象
    pub fn build(self) -> Box<dyn ReplacementPolicy> {
        match self {
            PolicyKind::Fifo => Box::new(FifoPolicy::new()),
            PolicyKind::Lru => Box::new(LruPolicy::new()),
            PolicyKind::Nur => Box::new(NurPolicy::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_kind_build() {
        assert_eq!(PolicyKind::Fifo.build().name(), "FIFO");
        assert_eq!(PolicyKind::Lru.build().name(), "LRU");
        assert_eq!(PolicyKind::Nur.build().name(), "NUR");
        assert_eq!(PolicyKind::default(), PolicyKind::Lru);
    }
}
