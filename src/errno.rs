// 解析操作错误码，0 表示成功
#[repr(i32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Errno {
    Ok = 0,         // 成功
    Uninit = 1,     // 槽位尚未绑定
    InvalidArg = 2, // 参数无效
    NoSym = 3,      // 所有模块中均未找到符号
    BadLinkMap = 4, // link map 不可用、过长或成环
    Format = 5,     // 动态段缺表或格式错误
    Dup = 6,        // 槽位重复绑定
    Max = 255,      // 保留上界
}

impl Errno {
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl From<Errno> for i32 {
    fn from(value: Errno) -> Self {
        value as i32
    }
}
