// link map 遍历与符号解析管线
use crate::elf::{self, LinkMap, Module};
use crate::errno::Errno;
use crate::log;


// checked 路径模块遍历上限，损坏成环的 link map 靠它止损
const MODULE_SCAN_LIMIT: usize = 4096;

// checked：在给定模块链中解析哈希，穷尽后返回 NoSym
pub(crate) unsafe fn resolve_in_chain(head: *const LinkMap, hash: u32) -> Result<usize, Errno> {
    let mut lmap = head;
    let mut steps = 0usize;
    while !lmap.is_null() {
        if steps >= MODULE_SCAN_LIMIT {
            return Err(Errno::BadLinkMap);
        }
        steps += 1;
        let module = Module::new(lmap);
        if let Some(addr) = module.scan(hash)? {
            return Ok(addr);
        }
        lmap = module.next();
    }
    Err(Errno::NoSym)
}

// unchecked：与尺寸敏感路径同形，符号缺失时扫描不会终止
pub(crate) unsafe fn resolve_in_chain_unchecked(head: *const LinkMap, hash: u32) -> usize {
    let mut lmap = head;
    loop {
        let module = Module::new(lmap);
        if let Some(addr) = module.scan_unchecked(hash) {
            return addr;
        }
        lmap = module.next();
    }
}

// 跳过链头的不可用模块（主程序自身，64 位 Linux 另有一个占位项）
unsafe fn skip_leading(head: *const LinkMap) -> Result<*const LinkMap, Errno> {
    let mut lmap = head;
    for _ in 0..elf::LINK_MAP_SKIP {
        if lmap.is_null() {
            return Err(Errno::BadLinkMap);
        }
        lmap = (*lmap).l_next;
    }
    if lmap.is_null() {
        return Err(Errno::BadLinkMap);
    }
    Ok(lmap)
}

// checked 进程级解析：经 _r_debug 取链头，PIE 进程同样可用
pub(crate) fn resolve(hash: u32) -> Result<usize, Errno> {
    let resolved = unsafe {
        let head = elf::link_map_from_r_debug()?;
        resolve_in_chain(skip_leading(head)?, hash)
    };
    match resolved {
        Ok(addr) => {
            log::debug(format_args!("resolved 0x{:08x} -> 0x{:x}", hash, addr));
            Ok(addr)
        }
        Err(err) => {
            log::warn(format_args!("resolve 0x{:08x} failed: {:?}", hash, err));
            Err(err)
        }
    }
}

// unchecked 进程级解析：固定基址读 ELF 头，仅非 PIE 映像可用
pub(crate) unsafe fn resolve_unchecked(hash: u32) -> usize {
    let mut lmap = elf::link_map_from_fixed_base();
    for _ in 0..elf::LINK_MAP_SKIP {
        lmap = (*lmap).l_next;
    }
    resolve_in_chain_unchecked(lmap, hash)
}
