//! FIFO 替换策略

use super::{AccessOutcome, ReplacementPolicy};
use crate::cache::{SlotId, SlotTable};
use alloc::collections::VecDeque;

/// 先进先出策略
///
/// 空闲槽位优先；否则驱逐装入时间最早的块。访问不改变顺序。
#[derive(Debug, Default)]
pub struct FifoPolicy {
    /// 装入顺序，队首最老
    queue: VecDeque<SlotId>,
}

impl FifoPolicy {
    /// 创建策略
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn init(&mut self, slots: &SlotTable, _deref_threshold: u32) {
        self.queue = VecDeque::with_capacity(slots.len());
    }

    fn select_victim(&mut self, slots: &SlotTable) -> SlotId {
        let victim = match slots.first_free() {
            Some(id) => {
                // 装入失败的槽位可能仍在队列中
                self.queue.retain(|&queued| queued != id);
                id
            }
            None => self.queue.pop_front().unwrap_or(0),
        };
        self.queue.push_back(victim);
        victim
    }

    fn on_read(&mut self, _slots: &SlotTable, _id: SlotId) -> AccessOutcome {
        AccessOutcome::Touched
    }

    fn on_write(&mut self, _slots: &SlotTable, _id: SlotId) -> AccessOutcome {
        AccessOutcome::Touched
    }

    fn invalidate(&mut self, _slots: &SlotTable) {
        self.queue.clear();
    }

    fn close(&mut self) {
        self.queue = VecDeque::new();
    }
}
