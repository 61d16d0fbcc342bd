//! 缓存统计信息

use core::fmt;

/// 缓存统计信息
///
/// 由缓存持有，每次操作更新。通过
/// [`RecordCache::take_instrument`](super::RecordCache::take_instrument)
/// 取得的是一份拷贝，同时清零缓存内的计数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Instrument {
    /// 读次数
    pub reads: u64,
    /// 写次数
    pub writes: u64,
    /// 命中次数
    pub hits: u64,
    /// 同步次数（显式与自动）
    pub syncs: u64,
    /// 解引用次数（由替换策略报告）
    pub derefs: u64,
}

impl Instrument {
    /// 总访问次数
    pub fn accesses(&self) -> u64 {
        self.reads + self.writes
    }

    /// 计算命中率
    pub fn hit_rate(&self) -> f64 {
        let accesses = self.accesses();
        if accesses == 0 {
            0.0
        } else {
            self.hits as f64 / accesses as f64
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reads={} writes={} hits={} ({:.1}%) syncs={} derefs={}",
            self.reads,
            self.writes,
            self.hits,
            self.hit_rate() * 100.0,
            self.syncs,
            self.derefs
        )
    }
}
