//! NUR（Not Used Recently）替换策略

use super::{AccessOutcome, ReplacementPolicy};
use crate::cache::{SlotId, SlotTable};
use alloc::vec::Vec;

/// 最近未使用策略
///
/// 每个槽位一个引用位，访问时置位；每 `deref_threshold` 次访问清除全部引用位
/// （一次"解引用"）。驱逐时空闲槽位优先，否则按 `2 * 引用位 + 脏位` 分级，
/// 取级别最低的有效槽位，同级取下标最小者。
#[derive(Debug, Default)]
pub struct NurPolicy {
    referenced: Vec<bool>,
    deref_threshold: u32,
    /// 自上次解引用以来的访问次数
    accesses: u32,
}

impl NurPolicy {
    /// 创建策略
    pub fn new() -> Self {
        Self::default()
    }

    fn touch(&mut self, id: SlotId) -> AccessOutcome {
        if let Some(bit) = self.referenced.get_mut(id) {
            *bit = true;
        }
        self.accesses += 1;
        if self.deref_threshold > 0 && self.accesses >= self.deref_threshold {
            log::trace!("[RCACHE] NUR dereference after {} accesses", self.accesses);
            self.clear_references();
            return AccessOutcome::Dereferenced;
        }
        AccessOutcome::Touched
    }

    fn clear_references(&mut self) {
        self.referenced.iter_mut().for_each(|bit| *bit = false);
        self.accesses = 0;
    }
}

impl ReplacementPolicy for NurPolicy {
    fn name(&self) -> &'static str {
        "NUR"
    }

    fn init(&mut self, slots: &SlotTable, deref_threshold: u32) {
        self.referenced = alloc::vec![false; slots.len()];
        self.deref_threshold = deref_threshold;
        self.accesses = 0;
    }

    fn select_victim(&mut self, slots: &SlotTable) -> SlotId {
        if let Some(id) = slots.first_free() {
            return id;
        }
        slots
            .iter()
            .filter(|slot| slot.is_valid())
            .min_by_key(|slot| {
                let referenced = self.referenced.get(slot.id()).copied().unwrap_or(false);
                2 * u8::from(referenced) + u8::from(slot.is_dirty())
            })
            .map(|slot| slot.id())
            .unwrap_or(0)
    }

    fn on_read(&mut self, _slots: &SlotTable, id: SlotId) -> AccessOutcome {
        self.touch(id)
    }

    fn on_write(&mut self, _slots: &SlotTable, id: SlotId) -> AccessOutcome {
        self.touch(id)
    }

    fn invalidate(&mut self, _slots: &SlotTable) {
        log::trace!("[RCACHE] NUR reset on invalidate");
        self.clear_references();
    }

    fn close(&mut self) {
        self.referenced = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(count: usize, threshold: u32) -> (SlotTable, NurPolicy) {
        let mut table = SlotTable::new(count, 8).unwrap();
        let mut policy = NurPolicy::new();
        policy.init(&table, threshold);
        for id in 0..count {
            table.get_mut(id).unwrap().mark_loaded(id as u64 + 100);
        }
        (table, policy)
    }

    #[test]
    fn test_nur_prefers_free_slot() {
        let mut table = SlotTable::new(2, 8).unwrap();
        let mut policy = NurPolicy::new();
        policy.init(&table, 10);
        table.get_mut(0).unwrap().mark_loaded(1);

        assert_eq!(policy.select_victim(&table), 1);
    }

    #[test]
    fn test_nur_class_ordering() {
        let (mut table, mut policy) = setup(4, 100);

        // 0: 引用+脏 (3)，1: 引用 (2)，2: 脏 (1)，3: 干净未引用 (0)
        policy.on_write(&table, 0);
        table.get_mut(0).unwrap().mark_dirty();
        policy.on_read(&table, 1);
        table.get_mut(2).unwrap().mark_dirty();

        assert_eq!(policy.select_victim(&table), 3);

        policy.on_read(&table, 3);
        assert_eq!(policy.select_victim(&table), 2);
    }

    #[test]
    fn test_nur_dereference() {
        let (table, mut policy) = setup(2, 3);

        assert_eq!(policy.on_read(&table, 0), AccessOutcome::Touched);
        assert_eq!(policy.on_read(&table, 1), AccessOutcome::Touched);
        assert!(policy.referenced.iter().all(|&bit| bit));

        assert_eq!(policy.on_write(&table, 0), AccessOutcome::Dereferenced);
        assert!(policy.referenced.iter().all(|&bit| !bit));
        assert_eq!(policy.accesses, 0);
    }

    #[test]
    fn test_nur_invalidate_resets_without_dereference() {
        let (table, mut policy) = setup(2, 3);

        policy.on_read(&table, 0);
        policy.on_read(&table, 1);
        policy.invalidate(&table);
        assert!(policy.referenced.iter().all(|&bit| !bit));
        assert_eq!(policy.accesses, 0);

        // 失效后重新计数，不会提前解引用
        assert_eq!(policy.on_read(&table, 0), AccessOutcome::Touched);
        assert_eq!(policy.on_read(&table, 1), AccessOutcome::Touched);
        assert_eq!(policy.on_read(&table, 0), AccessOutcome::Dereferenced);
    }

    #[test]
    fn test_nur_ties_pick_lowest_id() {
        let (table, mut policy) = setup(3, 100);
        policy.on_read(&table, 0);

        assert_eq!(policy.select_victim(&table), 1);
    }
}
