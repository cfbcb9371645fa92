use super::{sdbm_hash, sdbm_hash_cstr};

#[test]
fn empty_string_hashes_to_zero() {
    assert_eq!(sdbm_hash(b""), 0);
}

// 生成工具写入符号表的字面常量，作为回归基准
#[test]
fn known_vectors_match_generated_tables() {
    assert_eq!(sdbm_hash(b"puts"), 0x950c_8684);
    assert_eq!(sdbm_hash(b"rand"), 0xe83a_f065);
    assert_eq!(sdbm_hash(b"glCreateProgram"), 0x0787_21c3);
    assert_eq!(sdbm_hash(b"SDL_Init"), 0x070d_6574);
    assert_eq!(sdbm_hash(b"SDL_Quit"), 0x7eb6_57f3);
}

#[test]
fn deterministic_across_calls() {
    for name in [&b"glCompileShader"[..], b"SDL_OpenAudio", b"srand"] {
        assert_eq!(sdbm_hash(name), sdbm_hash(name));
    }
}

// 弱属性：单字节变化大概率改变哈希，但无保证，仅作参考样本
#[test]
fn single_byte_change_alters_hash() {
    assert_ne!(sdbm_hash(b"foo"), sdbm_hash(b"foa"));
    assert_ne!(sdbm_hash(b"puts"), sdbm_hash(b"putt"));
    assert_ne!(sdbm_hash(b"rand"), sdbm_hash(b"rend"));
}

#[test]
fn cstr_variant_matches_slice_variant() {
    let name = b"SDL_PollEvent\0";
    let hashed = unsafe { sdbm_hash_cstr(name.as_ptr() as *const _) };
    assert_eq!(hashed, sdbm_hash(b"SDL_PollEvent"));
}

#[test]
fn cstr_variant_stops_at_terminator() {
    let name = b"exit\0trailing-garbage\0";
    let hashed = unsafe { sdbm_hash_cstr(name.as_ptr() as *const _) };
    assert_eq!(hashed, sdbm_hash(b"exit"));
}
