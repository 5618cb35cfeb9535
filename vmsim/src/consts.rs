//! 常量定义 Constants

/// Swap offset of a page never written to swap
/// 从未写入交换区的页面的偏移量
pub const INVALID_SWAP: u64 = u64::MAX;

/// Byte offset of the vaddr stamp inside a frame
/// 帧内虚拟地址标记的字节偏移
pub const STAMP_OFF: usize = 4;

/// 默认页位移 Default page shift (4 KiB)
pub const PAGE_SHIFT: u32 = 12;

/// 默认二级表索引位数 Default table index bits
pub const TBL_BITS: u32 = 12;

/// 默认页目录索引位数 Default directory index bits
pub const DIR_BITS: u32 = 12;

// PTE flag bits
// 页表项标志位
// [0]: Valid
// [1]: Dirty
// [2]: On swap
pub const VALID: u8 = 1;
pub const DIRTY: u8 = 1 << 1;
pub const ON_SWAP: u8 = 1 << 2;
