// runtime 模块入口，将解析器与槽位表统一暴露为 crate 级接口
use crate::errno::Errno;

mod resolver;
mod slots;

#[cfg(test)]
pub(crate) mod testutil;

pub use slots::SymbolSlot;

// checked 进程级解析
pub(crate) fn resolve(hash: u32) -> Result<usize, Errno> {
    resolver::resolve(hash)
}

// unchecked 进程级解析，固定基址路径
pub(crate) unsafe fn resolve_unchecked(hash: u32) -> usize {
    resolver::resolve_unchecked(hash)
}

// 单次初始化遍历，按表序绑定全部槽位
pub(crate) fn bind_slots(slots: &[SymbolSlot]) -> Result<(), Errno> {
    slots::bind_slots(slots)
}

pub(crate) unsafe fn bind_slots_unchecked(slots: &[SymbolSlot]) {
    slots::bind_slots_unchecked(slots)
}
