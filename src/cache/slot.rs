//! 槽位与槽位表
//!
//! 槽位表在创建缓存时一次性分配，槽位身份即其下标，之后从不重排。

use crate::error::{Error, ErrorKind, Result};
use alloc::vec::Vec;
use bitflags::bitflags;

/// 槽位 ID（即槽位在表中的下标）
pub type SlotId = usize;

bitflags! {
    /// 槽位状态标志
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SlotFlags: u8 {
        /// 缓冲区中是已加载的文件块
        const VALID = 0x01;
        /// 加载或上次刷新后被修改过
        const DIRTY = 0x02;
    }
}

/// 缓存槽位
///
/// # 字段说明
///
/// - `id`: 槽位下标，创建后不变
/// - `block`: 当前驻留的文件块号，仅在 `VALID` 时有意义
/// - `flags`: 槽位状态标志，`DIRTY` 蕴含 `VALID`
/// - `data`: 恰好 `block_size` 字节的块缓冲区
pub struct Slot {
    id: SlotId,
    block: u64,
    flags: SlotFlags,
    data: Vec<u8>,
}

impl core::fmt::Debug for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Slot")
            .field("id", &self.id)
            .field("block", &self.block)
            .field("flags", &self.flags)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl Slot {
    fn new(id: SlotId, block_size: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(block_size)
            .map_err(|e| Error::with_cause(ErrorKind::NoMemory, "slot buffer allocation failed", e))?;
        data.resize(block_size, 0);
        Ok(Self {
            id,
            block: 0,
            flags: SlotFlags::empty(),
            data,
        })
    }

    /// 槽位 ID
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// 驻留的文件块号（仅在有效时返回）
    pub fn block(&self) -> Option<u64> {
        self.is_valid().then_some(self.block)
    }

    /// 状态标志
    pub fn flags(&self) -> SlotFlags {
        self.flags
    }

    /// 检查是否有效
    pub fn is_valid(&self) -> bool {
        self.flags.contains(SlotFlags::VALID)
    }

    /// 检查是否是脏块
    pub fn is_dirty(&self) -> bool {
        self.flags.contains(SlotFlags::DIRTY)
    }

    /// 检查是否驻留指定文件块
    pub fn holds(&self, block: u64) -> bool {
        self.is_valid() && self.block == block
    }

    /// 块数据
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// 装入新块后的状态：有效、干净
    pub(crate) fn mark_loaded(&mut self, block: u64) {
        self.block = block;
        self.flags.insert(SlotFlags::VALID);
        self.flags.remove(SlotFlags::DIRTY);
    }

    pub(crate) fn mark_dirty(&mut self) {
        debug_assert!(self.is_valid(), "dirty slot must be valid");
        self.flags.insert(SlotFlags::DIRTY);
    }

    pub(crate) fn mark_clean(&mut self) {
        self.flags.remove(SlotFlags::DIRTY);
    }

    pub(crate) fn invalidate(&mut self) {
        self.flags = SlotFlags::empty();
    }
}

/// 槽位表
#[derive(Debug)]
pub struct SlotTable {
    slots: Vec<Slot>,
}

impl SlotTable {
    /// 分配 `count` 个槽位，每个带 `block_size` 字节的零缓冲区
    ///
    /// # 错误
    ///
    /// 分配失败时返回 `NoMemory`
    pub fn new(count: usize, block_size: usize) -> Result<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(count)
            .map_err(|e| Error::with_cause(ErrorKind::NoMemory, "slot table allocation failed", e))?;
        for id in 0..count {
            slots.push(Slot::new(id, block_size)?);
        }
        Ok(Self { slots })
    }

    /// 查找驻留指定文件块的槽位
    pub fn find_resident(&self, block: u64) -> Option<SlotId> {
        self.slots.iter().position(|slot| slot.holds(block))
    }

    /// 第一个无效（空闲）槽位
    pub fn first_free(&self) -> Option<SlotId> {
        self.slots.iter().position(|slot| !slot.is_valid())
    }

    /// 按 ID 获取槽位
    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        self.slots.get_mut(id)
    }

    /// 按下标顺序遍历槽位
    pub fn iter(&self) -> core::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// 槽位数量
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// 槽位表是否为空
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 有效槽位数量
    pub fn resident_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_valid()).count()
    }

    /// 脏槽位数量
    pub fn dirty_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_dirty()).count()
    }

    /// 使所有槽位无效（不刷新！）
    pub(crate) fn invalidate_all(&mut self) {
        for slot in &mut self.slots {
            slot.invalidate();
        }
    }
}
