// 测试用合成模块构造：字符串表、符号表、hash 表、动态段与 link_map 节点全部驻留内存
use crate::elf::{DT_GNU_HASH, DT_HASH, DT_NULL, DT_STRTAB, DT_SYMTAB, ElfDyn, ElfSym, LinkMap};
use crate::elf::{ElfSxword, ElfXword};
use std::mem;
use std::ptr;

// 合成模块，持有全部后备存储，link_map 节点指向自身内部
// 字段在构造后不得增删，否则表指针失效
pub(crate) struct SyntheticModule {
    strtab: Vec<u8>,
    symtab: Vec<ElfSym>,
    hashtab: Vec<u32>,
    dynamic: Vec<ElfDyn>,
    pub(crate) lmap: Box<LinkMap>,
}

impl SyntheticModule {
    pub(crate) fn head(&self) -> *const LinkMap {
        &*self.lmap
    }

    pub(crate) fn load_bias(&self) -> usize {
        self.lmap.l_addr
    }

    // 串接到下一模块
    pub(crate) fn chain_to(&mut self, next: &mut SyntheticModule) {
        self.lmap.l_next = &mut *next.lmap;
    }

    // 事后改写 st_value，各表地址保持不变
    pub(crate) fn set_symbol_value(&mut self, index: usize, st_value: usize) {
        let st_name = self.symtab[index].st_name;
        self.symtab[index] = sym_entry(st_name, st_value);
    }
}

pub(crate) fn dyn_entry(tag: ElfSxword, value: usize) -> ElfDyn {
    ElfDyn {
        d_tag: tag,
        d_un: value as ElfXword,
    }
}

#[cfg(target_pointer_width = "64")]
fn sym_entry(st_name: u32, st_value: usize) -> ElfSym {
    ElfSym {
        st_name,
        st_info: 0x12, // GLOBAL FUNC
        st_other: 0,
        st_shndx: 1,
        st_value: st_value as u64,
        st_size: 0,
    }
}

#[cfg(target_pointer_width = "32")]
fn sym_entry(st_name: u32, st_value: usize) -> ElfSym {
    ElfSym {
        st_name,
        st_value: st_value as u32,
        st_size: 0,
        st_info: 0x12, // GLOBAL FUNC
        st_other: 0,
        st_shndx: 1,
    }
}

// 首符号固定为空符号，与真实符号表一致
fn build_symtab(syms: &[(&str, usize)]) -> (Vec<u8>, Vec<ElfSym>) {
    let mut strtab = vec![0u8];
    let mut symtab = vec![sym_entry(0, 0)];
    for (name, value) in syms {
        let st_name = strtab.len() as u32;
        strtab.extend_from_slice(name.as_bytes());
        strtab.push(0);
        symtab.push(sym_entry(st_name, *value));
    }
    (strtab, symtab)
}

// 布局：nbucket | nchain | bucket[] | chain[]；线性扫描只消费 nchain
fn build_sysv_hashtab(total: u32) -> Vec<u32> {
    let mut table = vec![1u32, total, 0u32];
    table.extend(std::iter::repeat(0u32).take(total as usize));
    table
}

// 单桶 GNU hash 表，symoffset=1（空符号不入桶），链尾最低位置 1
fn build_gnu_hashtab(total: u32) -> Vec<u32> {
    let symoffset = 1u32;
    let bloom_words = mem::size_of::<usize>() / 4;
    let mut table = vec![1u32, symoffset, 1u32, 6u32];
    table.extend(std::iter::repeat(0u32).take(bloom_words));
    table.push(if total > symoffset { symoffset } else { 0 });
    for index in symoffset..total {
        let mut value = index << 1;
        if index == total - 1 {
            value |= 1;
        }
        table.push(value);
    }
    table
}

fn finish_module(
    load_bias: usize,
    offsets: bool,
    strtab: Vec<u8>,
    symtab: Vec<ElfSym>,
    hashtab: Vec<u32>,
    gnu: bool,
) -> SyntheticModule {
    let strtab_addr = strtab.as_ptr() as usize;
    let symtab_addr = symtab.as_ptr() as usize;
    let hashtab_addr = hashtab.as_ptr() as usize;

    // 偏移表示：存 link 期地址，解析时须加回加载偏移
    let encode = |addr: usize| if offsets { addr - load_bias } else { addr };

    let hash_tag = if gnu { DT_GNU_HASH } else { DT_HASH };
    let dynamic = vec![
        dyn_entry(DT_STRTAB, encode(strtab_addr)),
        dyn_entry(DT_SYMTAB, encode(symtab_addr)),
        dyn_entry(hash_tag, encode(hashtab_addr)),
        dyn_entry(DT_NULL, 0),
    ];

    let lmap = Box::new(LinkMap {
        l_addr: load_bias,
        l_name: ptr::null(),
        l_ld: dynamic.as_ptr(),
        l_next: ptr::null_mut(),
        l_prev: ptr::null_mut(),
    });

    SyntheticModule {
        strtab,
        symtab,
        hashtab,
        dynamic,
        lmap,
    }
}

// SysV hash 风格模块，动态段值为绝对地址
pub(crate) fn sysv_module(load_bias: usize, syms: &[(&str, usize)]) -> SyntheticModule {
    let (strtab, symtab) = build_symtab(syms);
    let hashtab = build_sysv_hashtab(symtab.len() as u32);
    finish_module(load_bias, false, strtab, symtab, hashtab, false)
}

// SysV hash 风格模块，动态段值为偏移量
// 加载偏移取各表地址下界，保证所有偏移都落在偏移判定阈值之下
pub(crate) fn sysv_module_biased(syms: &[(&str, usize)]) -> SyntheticModule {
    let (strtab, symtab) = build_symtab(syms);
    let hashtab = build_sysv_hashtab(symtab.len() as u32);
    let min_addr = [
        strtab.as_ptr() as usize,
        symtab.as_ptr() as usize,
        hashtab.as_ptr() as usize,
    ]
    .into_iter()
    .min()
    .unwrap_or(0);
    let load_bias = min_addr - 0x1000;
    finish_module(load_bias, true, strtab, symtab, hashtab, false)
}

// GNU hash 风格模块，符号总数需由 bucket/chain 重建
pub(crate) fn gnu_module(load_bias: usize, syms: &[(&str, usize)]) -> SyntheticModule {
    let (strtab, symtab) = build_symtab(syms);
    let hashtab = build_gnu_hashtab(symtab.len() as u32);
    finish_module(load_bias, false, strtab, symtab, hashtab, true)
}
