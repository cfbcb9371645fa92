// SDBM 字符串哈希，构建期预计算的表常量与运行期扫描结果必须逐位一致

use std::ffi::c_char;

#[cfg(test)]
mod tests;

// 对字节串计算 SDBM 哈希（不含 NUL 终止符），u32 回绕运算
pub fn sdbm_hash(name: &[u8]) -> u32 {
    let mut hash: u32 = 0;
    for &ch in name {
        hash = hash.wrapping_mul(65599).wrapping_add(ch as u32);
    }
    hash
}

// 从 C 字符串指针计算哈希，遇 NUL 终止
// 调用方保证指针指向有效的 NUL 终止字符串
pub(crate) unsafe fn sdbm_hash_cstr(name: *const c_char) -> u32 {
    let mut hash: u32 = 0;
    let mut cursor = name as *const u8;
    loop {
        let ch = *cursor;
        if ch == 0 {
            return hash;
        }
        hash = hash.wrapping_mul(65599).wrapping_add(ch as u32);
        cursor = cursor.add(1);
    }
}
