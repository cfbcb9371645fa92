// 写一次的符号槽位：初始存名字哈希，单次初始化遍历后存可调用地址
use super::resolver;
use crate::elf::LinkMap;
use crate::errno::Errno;
use once_cell::sync::OnceCell;
use std::mem;


// 单个解析槽位
// 哈希与目标签名的对应关系由构建期生成的表约定，解析器无从校验
pub struct SymbolSlot {
    hash: u32,
    addr: OnceCell<usize>,
}

impl SymbolSlot {
    // 以导出名的 SDBM 哈希构造未绑定槽位（哈希由构建期工具预计算）
    pub const fn new(hash: u32) -> Self {
        Self {
            hash,
            addr: OnceCell::new(),
        }
    }

    pub fn hash(&self) -> u32 {
        self.hash
    }

    pub fn is_bound(&self) -> bool {
        self.addr.get().is_some()
    }

    // checked 读取，未绑定返回 Uninit
    pub fn addr(&self) -> Result<usize, Errno> {
        self.addr.get().copied().ok_or(Errno::Uninit)
    }

    // 槽位只允许写入一次
    fn bind(&self, addr: usize) -> Result<(), Errno> {
        self.addr.set(addr).map_err(|_| Errno::Dup)
    }

    // 以调用方声明的函数指针类型取出绑定地址
    // 绑定前调用属未定义行为（与原始单遍初始化约定一致）
    pub unsafe fn get<F: Copy>(&self) -> F {
        debug_assert_eq!(mem::size_of::<F>(), mem::size_of::<usize>());
        let addr = self.addr.get().copied().unwrap_or(0);
        mem::transmute_copy(&addr)
    }
}

// 单次初始化遍历：按表序逐槽解析并绑定，任一失败立即返回
pub(crate) fn bind_slots(slots: &[SymbolSlot]) -> Result<(), Errno> {
    for slot in slots {
        let addr = resolver::resolve(slot.hash())?;
        slot.bind(addr)?;
    }
    Ok(())
}

// unchecked 版初始化遍历，解析路径与尺寸敏感实现同形
pub(crate) unsafe fn bind_slots_unchecked(slots: &[SymbolSlot]) {
    for slot in slots {
        let addr = resolver::resolve_unchecked(slot.hash());
        let _ = slot.bind(addr);
    }
}

// 在给定模块链中执行单次绑定遍历（测试与嵌入场景）
pub(crate) unsafe fn bind_slots_in_chain(
    head: *const LinkMap,
    slots: &[SymbolSlot],
) -> Result<(), Errno> {
    for slot in slots {
        let addr = resolver::resolve_in_chain(head, slot.hash())?;
        slot.bind(addr)?;
    }
    Ok(())
}
