// link map 获取原语，通过 include! 嵌入 elf.rs

// 非 PIE 映像的固定加载基址，ELF 头位于此处
#[cfg(target_pointer_width = "64")]
pub(crate) const ELF_BASE_ADDRESS: usize = 0x400000;
#[cfg(target_pointer_width = "32")]
pub(crate) const ELF_BASE_ADDRESS: usize = 0x8048000;

// 链头需跳过的模块数：首项为主程序自身；64 位 Linux 第二项是不可用的占位
#[cfg(all(target_os = "linux", target_pointer_width = "64"))]
pub(crate) const LINK_MAP_SKIP: usize = 2;
#[cfg(not(all(target_os = "linux", target_pointer_width = "64")))]
pub(crate) const LINK_MAP_SKIP: usize = 1;

unsafe extern "C" {
    // glibc 导出的 r_debug 实例，与 DT_DEBUG 指向同一结构
    static _r_debug: RDebug;
}

// 经 _r_debug 获取链头，PIE 进程同样可用
pub(crate) fn link_map_from_r_debug() -> Result<*const LinkMap, Errno> {
    let head = unsafe { _r_debug.r_map };
    if head.is_null() {
        return Err(Errno::BadLinkMap);
    }
    Ok(head as *const LinkMap)
}

// 从固定基址读 ELF 头定位 PT_DYNAMIC，经 DT_DEBUG 取链头
// 仅对加载在 ELF_BASE_ADDRESS 的非 PIE 映像有效，无任何检查
pub(crate) unsafe fn link_map_from_fixed_base() -> *const LinkMap {
    let ehdr = ELF_BASE_ADDRESS as *const ElfEhdr;
    let mut phdr = (ELF_BASE_ADDRESS + (*ehdr).e_phoff as usize) as *const ElfPhdr;
    // 动态段程序头几乎不会是第一项，先行前进
    loop {
        phdr = phdr.add(1);
        if (*phdr).p_type == PT_DYNAMIC {
            break;
        }
    }
    // 非 PIE 映像的 p_vaddr 即运行期地址
    let dynamic = (*phdr).p_vaddr as usize as *const ElfDyn;
    let debug = dynamic_value_raw(dynamic, DT_DEBUG) as *const RDebug;
    (*debug).r_map
}

// 在动态段中查找标签对应的值，无终止检查（原样保留的尺寸敏感路径）
unsafe fn dynamic_value_raw(dynamic: *const ElfDyn, tag: ElfSxword) -> usize {
    let mut entry = dynamic;
    loop {
        if (*entry).d_tag == tag {
            return (*entry).d_un as usize;
        }
        entry = entry.add(1);
    }
}
