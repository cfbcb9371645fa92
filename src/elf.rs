// ELF 运行期结构解析核心，处理 link map、动态段与符号表
// 所有被遍历的内存归 loader 所有，本模块只读，从不分配或释放

use crate::errno::Errno;
use crate::hash::sdbm_hash_cstr;
use std::ffi::c_char;
use std::mem;

// 动态段标签常量
pub(crate) const DT_NULL: ElfSxword = 0;
pub(crate) const DT_HASH: ElfSxword = 4;
pub(crate) const DT_STRTAB: ElfSxword = 5;
pub(crate) const DT_SYMTAB: ElfSxword = 6;
pub(crate) const DT_DEBUG: ElfSxword = 21;
pub(crate) const DT_GNU_HASH: ElfSxword = 0x6ffffef5;

const PT_DYNAMIC: ElfWord = 2;

// ELF 基本类型别名，按目标位宽选择
#[cfg(target_pointer_width = "64")]
type ElfAddr = u64;
#[cfg(target_pointer_width = "32")]
type ElfAddr = u32;

#[cfg(target_pointer_width = "64")]
type ElfOff = u64;
#[cfg(target_pointer_width = "32")]
type ElfOff = u32;

#[cfg(target_pointer_width = "64")]
pub(crate) type ElfXword = u64;
#[cfg(target_pointer_width = "32")]
pub(crate) type ElfXword = u32;

#[cfg(target_pointer_width = "64")]
pub(crate) type ElfSxword = i64;
#[cfg(target_pointer_width = "32")]
pub(crate) type ElfSxword = i32;

type ElfWord = u32;
type ElfHalf = u16;

// ELF 文件头，与 Elf32_Ehdr/Elf64_Ehdr 内存布局一致
#[repr(C)]
#[derive(Clone, Copy)]
struct ElfEhdr {
    e_ident: [u8; 16],
    e_type: ElfHalf,
    e_machine: ElfHalf,
    e_version: ElfWord,
    e_entry: ElfAddr,
    e_phoff: ElfOff,
    e_shoff: ElfOff,
    e_flags: ElfWord,
    e_ehsize: ElfHalf,
    e_phentsize: ElfHalf,
    e_phnum: ElfHalf,
    e_shentsize: ElfHalf,
    e_shnum: ElfHalf,
    e_shstrndx: ElfHalf,
}

// 程序头，64 位与 32 位字段顺序不同
#[cfg(target_pointer_width = "64")]
#[repr(C)]
#[derive(Clone, Copy)]
struct ElfPhdr {
    p_type: ElfWord,
    p_flags: ElfWord,
    p_offset: ElfOff,
    p_vaddr: ElfAddr,
    p_paddr: ElfAddr,
    p_filesz: ElfXword,
    p_memsz: ElfXword,
    p_align: ElfXword,
}

#[cfg(target_pointer_width = "32")]
#[repr(C)]
#[derive(Clone, Copy)]
struct ElfPhdr {
    p_type: ElfWord,
    p_offset: ElfOff,
    p_vaddr: ElfAddr,
    p_paddr: ElfAddr,
    p_filesz: ElfWord,
    p_memsz: ElfWord,
    p_flags: ElfWord,
    p_align: ElfWord,
}

// 动态段条目
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct ElfDyn {
    pub(crate) d_tag: ElfSxword,
    pub(crate) d_un: ElfXword,
}

// 符号表条目，64 位与 32 位字段顺序不同
#[cfg(target_pointer_width = "64")]
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct ElfSym {
    pub(crate) st_name: ElfWord,
    pub(crate) st_info: u8,
    pub(crate) st_other: u8,
    pub(crate) st_shndx: ElfHalf,
    pub(crate) st_value: ElfAddr,
    pub(crate) st_size: ElfXword,
}

#[cfg(target_pointer_width = "32")]
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct ElfSym {
    pub(crate) st_name: ElfWord,
    pub(crate) st_value: ElfAddr,
    pub(crate) st_size: ElfWord,
    pub(crate) st_info: u8,
    pub(crate) st_other: u8,
    pub(crate) st_shndx: ElfHalf,
}

// loader 内部 link_map 节点，与 glibc 布局一致，只读不释放
#[repr(C)]
pub(crate) struct LinkMap {
    pub(crate) l_addr: usize,
    pub(crate) l_name: *const c_char,
    pub(crate) l_ld: *const ElfDyn,
    pub(crate) l_next: *mut LinkMap,
    pub(crate) l_prev: *mut LinkMap,
}

// loader 调试接口 r_debug，DT_DEBUG 指向同一实例
#[repr(C)]
pub(crate) struct RDebug {
    pub(crate) r_version: libc::c_int,
    pub(crate) r_map: *mut LinkMap,
    pub(crate) r_brk: usize,
    pub(crate) r_state: libc::c_int,
    pub(crate) r_ldbase: usize,
}

// 单个已加载模块，包装 loader 持有的 link_map 节点
#[derive(Clone, Copy)]
pub(crate) struct Module {
    lmap: *const LinkMap,
}

// 模块的两张核心表与符号总数
pub(crate) struct ModuleTables {
    pub(crate) strtab: *const c_char,
    pub(crate) symtab: *const ElfSym,
    pub(crate) sym_count: u32,
}

include!("elf/link_map.inc.rs");
include!("elf/tables.inc.rs");
include!("elf/scan.inc.rs");
