// 模块内符号扫描，通过 include! 嵌入 elf.rs

impl Module {
    // checked 扫描：按符号总数线性遍历，首个哈希命中即返回运行期地址
    pub(crate) unsafe fn scan(&self, hash: u32) -> Result<Option<usize>, Errno> {
        let tables = self.tables()?;
        Ok(self.scan_tables(&tables, hash))
    }

    // unchecked 扫描：表定位不做缺失检查
    pub(crate) unsafe fn scan_unchecked(&self, hash: u32) -> Option<usize> {
        let tables = self.tables_unchecked();
        self.scan_tables(&tables, hash)
    }

    // 命中判定只比较 32 位哈希，从不校验符号名本身
    unsafe fn scan_tables(&self, tables: &ModuleTables, hash: u32) -> Option<usize> {
        for index in 0..tables.sym_count {
            let sym = &*tables.symtab.add(index as usize);
            let name = tables.strtab.add(sym.st_name as usize);
            if sdbm_hash_cstr(name) == hash {
                return Some((sym.st_value as usize).wrapping_add(self.load_bias()));
            }
        }
        None
    }
}
