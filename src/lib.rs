#![allow(dead_code)]
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::missing_safety_doc)]

#[cfg(all(not(target_os = "linux"), not(any(clippy, test, doc))))]
compile_error!("symres supports Linux only (use cargo clippy/test/doc on host for development)");

#[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
compile_error!("symres supports only x86 and x86_64");

// 公共 API 层，提供哈希计算、符号解析与槽位绑定
mod api;
// ELF 解析核心，处理 link map、动态段、符号表
mod elf;
// 错误码定义
mod errno;
// SDBM 哈希，构建期预计算与运行期扫描共用
mod hash;
// 日志输出，写 stderr
mod log;
// 运行时状态管理：链遍历解析器与槽位表
mod runtime;
// 版本信息
mod version;

pub use api::{
    SymbolSlot, bind_slots, bind_slots_unchecked, get_version, resolve, resolve_name,
    resolve_unchecked, sdbm_hash, set_debug,
};
pub use errno::Errno as SymresErrno;
