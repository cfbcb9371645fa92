// 动态段表定位与符号计数，通过 include! 嵌入 elf.rs

// checked 路径动态段条目扫描上限，缺 DT_NULL 的损坏段靠它止损
const DYN_SCAN_LIMIT: usize = 4096;

impl Module {
    pub(crate) fn new(lmap: *const LinkMap) -> Self {
        Self { lmap }
    }

    // 模块加载偏移（link 期地址与运行期地址之差）
    pub(crate) unsafe fn load_bias(&self) -> usize {
        (*self.lmap).l_addr
    }

    pub(crate) unsafe fn next(&self) -> *const LinkMap {
        (*self.lmap).l_next
    }

    // 动态段值有时是偏移而非裸指针：低于加载偏移的按偏移处理
    // 该幅值比较是按平台验证过的假设，并非普适规则
    unsafe fn transform_address(&self, value: usize) -> usize {
        if value < self.load_bias() {
            value.wrapping_add(self.load_bias())
        } else {
            value
        }
    }

    // checked 动态段查找：DT_NULL 或超限即止，None 表示标签不存在
    unsafe fn dynamic_value(&self, tag: ElfSxword) -> Result<Option<usize>, Errno> {
        let mut entry = (*self.lmap).l_ld;
        if entry.is_null() {
            return Err(Errno::Format);
        }
        for _ in 0..DYN_SCAN_LIMIT {
            if (*entry).d_tag == tag {
                return Ok(Some(self.transform_address((*entry).d_un as usize)));
            }
            if (*entry).d_tag == DT_NULL {
                return Ok(None);
            }
            entry = entry.add(1);
        }
        Err(Errno::Format)
    }

    // unchecked 动态段查找：标签缺失时返回 0，不判空、不设上限
    unsafe fn dynamic_lookup(&self, tag: ElfSxword) -> usize {
        let mut entry = (*self.lmap).l_ld;
        loop {
            if (*entry).d_tag == tag {
                return self.transform_address((*entry).d_un as usize);
            }
            if (*entry).d_tag == DT_NULL {
                return 0;
            }
            entry = entry.add(1);
        }
    }

    // checked 取表：字符串表与符号表必须齐备，符号总数取自任一 hash 表
    pub(crate) unsafe fn tables(&self) -> Result<ModuleTables, Errno> {
        let strtab = self.dynamic_value(DT_STRTAB)?.ok_or(Errno::Format)?;
        let symtab = self.dynamic_value(DT_SYMTAB)?.ok_or(Errno::Format)?;
        let sym_count = match self.dynamic_value(DT_HASH)? {
            Some(hashtab) => sysv_symbol_count(hashtab as *const u32),
            None => {
                let hashtab = self.dynamic_value(DT_GNU_HASH)?.ok_or(Errno::Format)?;
                gnu_symbol_count(hashtab as *const u32)
            }
        };
        Ok(ModuleTables {
            strtab: strtab as *const c_char,
            symtab: symtab as *const ElfSym,
            sym_count,
        })
    }

    // unchecked 取表：DT_HASH 缺失时必有 DT_GNU_HASH
    // 两者皆缺即 ABI 假设被破坏，后续解引用空值，属设计内致命路径
    pub(crate) unsafe fn tables_unchecked(&self) -> ModuleTables {
        let strtab = self.dynamic_lookup(DT_STRTAB);
        let symtab = self.dynamic_lookup(DT_SYMTAB);
        let hashtab = self.dynamic_lookup(DT_HASH);
        let sym_count = if hashtab != 0 {
            sysv_symbol_count(hashtab as *const u32)
        } else {
            gnu_symbol_count(self.dynamic_lookup(DT_GNU_HASH) as *const u32)
        };
        ModuleTables {
            strtab: strtab as *const c_char,
            symtab: symtab as *const ElfSym,
            sym_count,
        }
    }
}

// SysV hash 表第二个字即符号总数
unsafe fn sysv_symbol_count(hashtab: *const u32) -> u32 {
    *hashtab.add(1)
}

// GNU hash 表不存符号总数，按 FreeBSD rtld 方式沿 bucket/chain 重建：
// 链尾以最低位 1 标记，数完所有非空桶后再加上未入桶的前缀符号数
// 布局：nbuckets | symoffset | bloom_sz | bloom_shift | bloom[] | buckets[] | chains[]
pub(crate) unsafe fn gnu_symbol_count(hashtab: *const u32) -> u32 {
    let nbuckets = *hashtab;
    let symoffset = *hashtab.add(1);
    let bloom_words = (mem::size_of::<usize>() / 4) * *hashtab.add(2) as usize;
    let buckets = hashtab.add(4 + bloom_words);
    let chains = buckets.add(nbuckets as usize);

    let mut count = 0u32;
    for ii in 0..nbuckets {
        let bucket = *buckets.add(ii as usize);
        if bucket == 0 {
            continue;
        }
        // chains 以 symoffset 为起始下标
        let mut index = bucket - symoffset;
        loop {
            count += 1;
            let value = *chains.add(index as usize);
            index += 1;
            if value & 1 != 0 {
                break;
            }
        }
    }
    count + symoffset
}
