//! LRU 替换策略（使用 lru crate）

use super::{AccessOutcome, ReplacementPolicy};
use crate::cache::{SlotId, SlotTable};
use ::lru::LruCache;
use core::num::NonZeroUsize;

/// 最近最少使用策略
///
/// 以槽位 ID 为键维护访问顺序：
/// - `on_read` / `on_write` 通过 `put` 把槽位移到 MRU 端
/// - `select_victim` 用 `peek_lru` 取 LRU 端，不移除；随后的访问会把它移回 MRU
///
/// 键的数量不超过槽位数量，所以 `LruCache` 自身永远不会触发驱逐。
pub struct LruPolicy {
    order: LruCache<SlotId, ()>,
}

impl LruPolicy {
    /// 创建策略（容量在 `init` 时按槽位数量设置）
    pub fn new() -> Self {
        Self {
            order: LruCache::new(NonZeroUsize::MIN),
        }
    }

    fn touch(&mut self, id: SlotId) -> AccessOutcome {
        self.order.put(id, ());
        AccessOutcome::Touched
    }
}

impl Default for LruPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for LruPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruPolicy")
            .field("capacity", &self.order.cap())
            .field("tracked", &self.order.len())
            .finish()
    }
}

impl ReplacementPolicy for LruPolicy {
    fn name(&self) -> &'static str {
        "LRU"
    }

    fn init(&mut self, slots: &SlotTable, _deref_threshold: u32) {
        let cap = NonZeroUsize::new(slots.len()).unwrap_or(NonZeroUsize::MIN);
        self.order = LruCache::new(cap);
    }

    fn select_victim(&mut self, slots: &SlotTable) -> SlotId {
        if let Some(id) = slots.first_free() {
            return id;
        }
        match self.order.peek_lru() {
            Some((&id, _)) => id,
            None => 0,
        }
    }

    fn on_read(&mut self, _slots: &SlotTable, id: SlotId) -> AccessOutcome {
        self.touch(id)
    }

    fn on_write(&mut self, _slots: &SlotTable, id: SlotId) -> AccessOutcome {
        self.touch(id)
    }

    fn invalidate(&mut self, _slots: &SlotTable) {
        self.order.clear();
    }

    fn close(&mut self) {
        self.order.clear();
    }
}
