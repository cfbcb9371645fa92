// 实进程场景：经 checked 解析路径在真实 libc 中查找并调用符号
use std::ffi::c_char;
use symres::{SymbolSlot, SymresErrno, bind_slots, resolve_name, sdbm_hash};

// 构建期工具预计算的哈希常量
const HASH_PUTS: u32 = 0x950c_8684;
const HASH_RAND: u32 = 0xe83a_f065;
const HASH_SRAND: u32 = 0x6b69_9dd8;

type PutsFn = unsafe extern "C" fn(*const c_char) -> libc::c_int;
type RandFn = unsafe extern "C" fn() -> libc::c_int;
type SrandFn = unsafe extern "C" fn(libc::c_uint);

// 槽位表：声明顺序即初始化遍历顺序
static SLOTS: [SymbolSlot; 3] = [
    SymbolSlot::new(HASH_PUTS),
    SymbolSlot::new(HASH_RAND),
    SymbolSlot::new(HASH_SRAND),
];

pub unsafe fn run_all() {
    scenario_hash_constants();
    scenario_bind_and_call();
    scenario_resolve_name_matches_dlsym();
    scenario_missing_symbol();
}

// 预计算常量与运行期哈希必须一致
fn scenario_hash_constants() {
    assert_eq!(sdbm_hash("puts"), HASH_PUTS);
    assert_eq!(sdbm_hash("rand"), HASH_RAND);
    assert_eq!(sdbm_hash("srand"), HASH_SRAND);
}

// 单次绑定后，槽位即为普通函数指针
unsafe fn scenario_bind_and_call() {
    let err = bind_slots(&SLOTS);
    assert!(err.is_ok(), "bind_slots failed: {err:?}");

    let srand: SrandFn = SLOTS[2].get();
    let rand: RandFn = SLOTS[1].get();
    srand(7);
    let first = rand();
    srand(7);
    assert_eq!(first, rand(), "same seed must replay the same sequence");

    let puts: PutsFn = SLOTS[0].get();
    let msg = b"resolve_test: puts resolved by hash\0";
    assert!(puts(msg.as_ptr() as *const c_char) >= 0);
}

// 便捷入口与 dlsym 给出同一地址
unsafe fn scenario_resolve_name_matches_dlsym() {
    let resolved = resolve_name("rand").expect("rand should resolve");
    let via_dlsym = libc::dlsym(libc::RTLD_DEFAULT, c"rand".as_ptr());
    assert!(!via_dlsym.is_null());
    assert_eq!(resolved as usize, via_dlsym as usize);
}

fn scenario_missing_symbol() {
    let err = resolve_name("resolve_test_no_such_export").unwrap_err();
    assert_eq!(err, SymresErrno::NoSym);
}
