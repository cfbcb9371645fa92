use crate::errno::Errno;
use crate::hash;
use crate::log;
use crate::runtime;
use crate::version;
use std::ffi::c_void;

pub use crate::runtime::SymbolSlot;

// 计算导出名的 SDBM 哈希，与构建期生成的表常量一致
pub fn sdbm_hash(name: &str) -> u32 {
    hash::sdbm_hash(name.as_bytes())
}

// checked 解析：在进程所有已加载模块中按哈希查找符号
pub fn resolve(hash: u32) -> Result<*mut c_void, Errno> {
    runtime::resolve(hash).map(|addr| addr as *mut c_void)
}

// checked 解析便捷入口：运行期现算哈希
pub fn resolve_name(name: &str) -> Result<*mut c_void, Errno> {
    if name.is_empty() {
        return Err(Errno::InvalidArg);
    }
    resolve(sdbm_hash(name))
}

// unchecked 解析：固定基址路径，符号缺失时扫描不会终止
// 仅用于尺寸敏感的非 PIE 场景
pub unsafe fn resolve_unchecked(hash: u32) -> *mut c_void {
    runtime::resolve_unchecked(hash) as *mut c_void
}

// 单次初始化遍历，将槽位表中的哈希逐个解析为可调用地址
// 必须在读取任何槽位之前调用，且只调用一次
pub fn bind_slots(slots: &[SymbolSlot]) -> Errno {
    match runtime::bind_slots(slots) {
        Ok(()) => Errno::Ok,
        Err(err) => err,
    }
}

// unchecked 版初始化遍历
pub unsafe fn bind_slots_unchecked(slots: &[SymbolSlot]) {
    runtime::bind_slots_unchecked(slots)
}

pub fn set_debug(debug: bool) {
    log::set_debug_enabled(debug);
}

pub fn get_version() -> String {
    version::version_str_full()
}
