//! 后备文件接口

use crate::error::Result;

/// 后备文件接口
///
/// 实现此 trait 以提供缓存下层的随机访问字节存储。缓存在打开期间独占文件，
/// 每次访问都显式给出字节偏移，实现可以使用 seek + read/write，也可以使用
/// pread/pwrite 风格的接口。
///
/// # 示例
///
/// ```rust,ignore
/// use rcache_core::{BackingFile, Result};
///
/// struct MyDisk {
///     // ...
/// }
///
/// impl BackingFile for MyDisk {
///     fn len(&mut self) -> Result<u64> {
///         // 返回当前文件长度（字节）
///         Ok(0)
///     }
///
///     fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
///         // 读取数据，遇到文件末尾时返回实际读取的字节数
///         Ok(buf.len())
///     }
///
///     fn write_all_at(&mut self, offset: u64, buf: &[u8]) -> Result<()> {
///         // 写入全部数据
///         Ok(())
///     }
/// }
/// ```
pub trait BackingFile {
    /// 当前文件长度（字节）
    fn len(&mut self) -> Result<u64>;

    /// 从 `offset` 处读取数据到 `buf`
    ///
    /// # 返回
    ///
    /// 成功返回读取的字节数。只有遇到文件末尾时才允许小于 `buf.len()`。
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// 将 `buf` 全部写入 `offset` 处
    ///
    /// 写入位置超出文件末尾时文件增长。
    fn write_all_at(&mut self, offset: u64, buf: &[u8]) -> Result<()>;

    /// 刷新底层存储
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: BackingFile + ?Sized> BackingFile for &mut T {
    fn len(&mut self) -> Result<u64> {
        (**self).len()
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        (**self).read_at(offset, buf)
    }

    fn write_all_at(&mut self, offset: u64, buf: &[u8]) -> Result<()> {
        (**self).write_all_at(offset, buf)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

#[cfg(feature = "std")]
mod std_files {
    use super::*;
    use std::fs::File;
    use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
    use std::vec::Vec;

    fn seek_read<F: Read + Seek>(file: &mut F, offset: u64, buf: &mut [u8]) -> Result<usize> {
        file.seek(SeekFrom::Start(offset))?;
        let mut filled = 0;
        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    fn seek_write<F: Write + Seek>(file: &mut F, offset: u64, buf: &[u8]) -> Result<()> {
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(buf)?;
        Ok(())
    }

    /// 文件实现：seek 到块偏移后读写
    impl BackingFile for File {
        fn len(&mut self) -> Result<u64> {
            Ok(self.metadata()?.len())
        }

        fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
            seek_read(self, offset, buf)
        }

        fn write_all_at(&mut self, offset: u64, buf: &[u8]) -> Result<()> {
            seek_write(self, offset, buf)
        }

        fn flush(&mut self) -> Result<()> {
            Write::flush(self)?;
            Ok(())
        }
    }

    /// 内存游标实现，超出末尾的写入由 `Cursor` 自动补零
    impl BackingFile for Cursor<Vec<u8>> {
        fn len(&mut self) -> Result<u64> {
            Ok(self.get_ref().len() as u64)
        }

        fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
            seek_read(self, offset, buf)
        }

        fn write_all_at(&mut self, offset: u64, buf: &[u8]) -> Result<()> {
            seek_write(self, offset, buf)
        }
    }
}
