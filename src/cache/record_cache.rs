//! 缓存管理器
//!
//! 数据路径：
//!
//! ```text
//! read/write(record)
//!   -> 查找驻留槽位
//!      命中: hits += 1
//!      未命中: 策略选牺牲槽位 -> 脏则写回 -> 从文件装入新块
//!   -> 在槽位缓冲区的记录偏移处拷贝 record_size 字节
//!   -> 通知策略
//!   -> access_counter += 1，到达同步间隔则 sync()
//! ```

use super::addr::{Geometry, RecordLocation};
use super::config::CacheConfig;
use super::instrument::Instrument;
use super::slot::{SlotId, SlotTable};
use crate::error::{Error, ErrorKind, Result};
use crate::file::BackingFile;
use crate::strategy::{AccessOutcome, ReplacementPolicy};
use alloc::boxed::Box;

const UNKNOWN_SLOT: Error = Error::new(
    ErrorKind::InvalidInput,
    "replacement policy returned an unknown slot",
);

/// 定长记录块缓存
///
/// 缓存在打开期间独占后备文件。所有操作都是同步阻塞的，需要 `&mut self`，
/// 多线程共享时应把整个缓存放进一把锁：
///
/// ```rust,ignore
/// let cache = std::sync::Mutex::new(RecordCache::new(file, config)?);
/// ```
///
/// 丢弃缓存不会写回脏块，必须调用 [`RecordCache::close`]。
pub struct RecordCache<F: BackingFile> {
    /// 后备文件
    file: F,
    /// 地址转换参数
    geometry: Geometry,
    /// 槽位表
    slots: SlotTable,
    /// 替换策略
    policy: Box<dyn ReplacementPolicy>,
    /// 解引用阈值（交给策略）
    deref_threshold: u32,
    /// 自动同步间隔
    sync_interval: u32,
    /// 记录数上限
    record_limit: Option<u64>,
    /// 自上次同步以来的读写次数
    access_counter: u32,
    /// 统计信息
    stats: Instrument,
}

impl<F: BackingFile> RecordCache<F> {
    /// 创建缓存，使用配置中的内置策略
    ///
    /// # 错误
    ///
    /// - 配置无效时返回 `InvalidInput`
    /// - 槽位缓冲区分配失败时返回 `NoMemory`
    pub fn new(file: F, config: CacheConfig) -> Result<Self> {
        let policy = config.policy.build();
        Self::with_policy(file, config, policy)
    }

    /// 创建缓存，使用自定义替换策略（忽略 `config.policy`）
    pub fn with_policy(
        file: F,
        config: CacheConfig,
        mut policy: Box<dyn ReplacementPolicy>,
    ) -> Result<Self> {
        let geometry = config.validate()?;
        let slots = SlotTable::new(config.block_count, geometry.block_size())?;
        policy.init(&slots, config.deref_threshold);

        log::debug!(
            "[RCACHE] create: {} slots x {} bytes ({} records of {} bytes), policy={}",
            config.block_count,
            geometry.block_size(),
            geometry.records_per_block(),
            geometry.record_size(),
            policy.name()
        );

        Ok(Self {
            file,
            geometry,
            slots,
            policy,
            deref_threshold: config.deref_threshold,
            sync_interval: config.effective_sync_interval(),
            record_limit: config.record_limit,
            access_counter: 0,
            stats: Instrument::default(),
        })
    }

    /// 关闭缓存
    ///
    /// 先同步全部脏块。同步失败时返回错误，但缓存资源照样释放；
    /// 成功时关闭策略、刷新后备文件并交还文件。
    pub fn close(mut self) -> Result<F> {
        let synced = self.sync();
        self.policy.close();

        if let Err(err) = synced {
            log::warn!("[RCACHE] close: sync failed, dirty blocks lost: {}", err);
            return Err(err);
        }

        self.file.flush()?;
        log::debug!("[RCACHE] close: {}", self.stats);
        Ok(self.file)
    }

    /// 同步：把所有脏块写回后备文件
    ///
    /// 遇到第一个写入失败即返回 `Io`，之后的槽位保持原状。
    /// 成功时清零访问计数并增加 `syncs`，不论是否真的有脏块。
    ///
    /// # 返回
    ///
    /// 写回的块数量
    pub fn sync(&mut self) -> Result<usize> {
        let mut flushed = 0;
        for id in 0..self.slots.len() {
            if self.flush_slot(id)? {
                flushed += 1;
            }
        }

        self.access_counter = 0;
        self.stats.syncs += 1;
        log::debug!("[RCACHE] sync: {} dirty blocks written", flushed);
        Ok(flushed)
    }

    /// 使整个缓存失效（不刷新！）
    ///
    /// 警告：未同步的写入全部丢失，需要持久化的调用者应先调用 [`sync`](Self::sync)。
    pub fn invalidate(&mut self) {
        let dropped = self.slots.dirty_count();
        if dropped > 0 {
            log::warn!("[RCACHE] invalidate: discarding {} dirty blocks", dropped);
        }
        self.slots.invalidate_all();
        self.policy.invalidate(&self.slots);
    }

    /// 读取一条记录
    ///
    /// # 参数
    ///
    /// * `record` - 记录索引
    /// * `out` - 目标缓冲区，长度必须等于 `record_size`
    pub fn read(&mut self, record: u64, out: &mut [u8]) -> Result<()> {
        self.check_record_buf(out.len())?;
        let loc = self.locate(record)?;
        let id = self.resolve(loc.block)?;

        let size = self.geometry.record_size();
        let slot = self.slots.get(id).ok_or(UNKNOWN_SLOT)?;
        out.copy_from_slice(&slot.data()[loc.offset..loc.offset + size]);

        self.stats.reads += 1;
        let outcome = self.policy.on_read(&self.slots, id);
        self.after_access(outcome)
    }

    /// 写入一条记录
    ///
    /// 只把所在块标记为脏，不立即落盘。
    ///
    /// # 参数
    ///
    /// * `record` - 记录索引
    /// * `src` - 源数据，长度必须等于 `record_size`
    pub fn write(&mut self, record: u64, src: &[u8]) -> Result<()> {
        self.check_record_buf(src.len())?;
        let loc = self.locate(record)?;
        let id = self.resolve(loc.block)?;

        let size = self.geometry.record_size();
        let slot = self.slots.get_mut(id).ok_or(UNKNOWN_SLOT)?;
        slot.data_mut()[loc.offset..loc.offset + size].copy_from_slice(src);
        slot.mark_dirty();

        self.stats.writes += 1;
        let outcome = self.policy.on_write(&self.slots, id);
        self.after_access(outcome)
    }

    /// 获取统计信息快照并清零计数
    pub fn take_instrument(&mut self) -> Instrument {
        core::mem::take(&mut self.stats)
    }

    /// 查看统计信息（不清零）
    pub fn instrument(&self) -> Instrument {
        self.stats
    }

    /// 地址转换参数
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// 槽位数量
    pub fn block_count(&self) -> usize {
        self.slots.len()
    }

    /// 槽位表（只读）
    pub fn slots(&self) -> &SlotTable {
        &self.slots
    }

    /// 自上次同步以来的读写次数
    pub fn access_counter(&self) -> u32 {
        self.access_counter
    }

    /// 自动同步间隔
    pub fn sync_interval(&self) -> u32 {
        self.sync_interval
    }

    /// 解引用阈值
    pub fn deref_threshold(&self) -> u32 {
        self.deref_threshold
    }

    /// 替换策略名称
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// 后备文件（只读）
    pub fn file(&self) -> &F {
        &self.file
    }

    // 内部辅助方法

    fn check_record_buf(&self, len: usize) -> Result<()> {
        if len != self.geometry.record_size() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "buffer length must equal record size",
            ));
        }
        Ok(())
    }

    fn locate(&self, record: u64) -> Result<RecordLocation> {
        if let Some(limit) = self.record_limit {
            if record >= limit {
                return Err(Error::new(
                    ErrorKind::OutOfRange,
                    "record index beyond record limit",
                ));
            }
        }
        self.geometry.locate(record)
    }

    /// 确保文件块驻留，返回其槽位
    fn resolve(&mut self, block: u64) -> Result<SlotId> {
        if let Some(id) = self.slots.find_resident(block) {
            self.stats.hits += 1;
            log::trace!("[RCACHE] block={} HIT slot={}", block, id);
            return Ok(id);
        }

        let id = self.policy.select_victim(&self.slots);
        let victim = self.slots.get(id).ok_or(UNKNOWN_SLOT)?;
        log::debug!(
            "[RCACHE] block={} MISS, victim slot={} (resident={:?}, dirty={})",
            block,
            id,
            victim.block(),
            victim.is_dirty()
        );

        if victim.is_dirty() {
            log::warn!(
                "[RCACHE] evicting dirty block={:?} from slot={}",
                victim.block(),
                id
            );
            self.flush_slot(id)?;
        }
        self.load(id, block)?;
        Ok(id)
    }

    /// 写回单个脏槽位；槽位干净时返回 `false`
    fn flush_slot(&mut self, id: SlotId) -> Result<bool> {
        let slot = self.slots.get_mut(id).ok_or(UNKNOWN_SLOT)?;
        let block = match slot.block() {
            Some(block) if slot.is_dirty() => block,
            _ => return Ok(false),
        };

        let offset = self.geometry.file_offset(block)?;
        if let Err(err) = self.file.write_all_at(offset, slot.data()) {
            log::error!("[RCACHE] flush block={} slot={} failed: {}", block, id, err);
            return Err(err);
        }
        slot.mark_clean();
        log::trace!("[RCACHE] flushed block={} slot={}", block, id);
        Ok(true)
    }

    /// 从文件装入块；失败时槽位保持无效
    fn load(&mut self, id: SlotId, block: u64) -> Result<()> {
        let offset = self.geometry.file_offset(block)?;
        let slot = self.slots.get_mut(id).ok_or(UNKNOWN_SLOT)?;
        slot.invalidate();

        let n = match self.file.read_at(offset, slot.data_mut()) {
            Ok(n) => n,
            Err(err) => {
                log::error!("[RCACHE] load block={} slot={} failed: {}", block, id, err);
                return Err(err);
            }
        };

        // 文件末尾的不完整块补零
        let data = slot.data_mut();
        let n = n.min(data.len());
        data[n..].fill(0);

        slot.mark_loaded(block);
        log::debug!("[RCACHE] loaded block={} into slot={} ({} bytes from file)", block, id, n);
        Ok(())
    }

    fn after_access(&mut self, outcome: AccessOutcome) -> Result<()> {
        if outcome == AccessOutcome::Dereferenced {
            self.stats.derefs += 1;
        }

        self.access_counter += 1;
        if self.access_counter >= self.sync_interval {
            log::debug!("[RCACHE] {} accesses, auto sync", self.access_counter);
            self.sync()?;
        }
        Ok(())
    }
}

impl<F: BackingFile> core::fmt::Debug for RecordCache<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecordCache")
            .field("geometry", &self.geometry)
            .field("block_count", &self.slots.len())
            .field("resident", &self.slots.resident_count())
            .field("dirty", &self.slots.dirty_count())
            .field("policy", &self.policy.name())
            .field("access_counter", &self.access_counter)
            .field("sync_interval", &self.sync_interval)
            .field("stats", &self.stats)
            .finish()
    }
}
