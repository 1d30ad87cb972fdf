//! Integer alignment helpers used throughout layout computation.
//!
//! All `align_*` functions taking a power-of-two alignment assume the caller already checked
//! it; [`align_up_np2`] accepts any non-zero alignment.

/// Rounds `value` up to the next multiple of `alignment`, which must be a power of two.
#[inline]
pub const fn align_up(value: u64, alignment: u64) -> u64 {
    debug_assert!(alignment.is_power_of_two());
    (value + alignment - 1) & !(alignment - 1)
}

/// [`align_up`] for `u32` values.
#[inline]
pub const fn align_up_u32(value: u32, alignment: u32) -> u32 {
    debug_assert!(alignment.is_power_of_two());
    (value + alignment - 1) & !(alignment - 1)
}

/// Rounds `value` up to the next multiple of `alignment`, which may be any non-zero value.
#[inline]
pub const fn align_up_np2(value: u64, alignment: u64) -> u64 {
    value.div_ceil(alignment) * alignment
}

/// Rounds `value` down to a multiple of `alignment`, which must be a power of two.
#[inline]
pub const fn align_down(value: u64, alignment: u64) -> u64 {
    debug_assert!(alignment.is_power_of_two());
    value & !(alignment - 1)
}

/// Returns true if `value` is a multiple of `alignment`, which must be a power of two.
#[inline]
pub const fn is_aligned(value: u64, alignment: u64) -> bool {
    value & (alignment - 1) == 0
}

/// Floor of log2; `0` maps to `0`.
#[inline]
pub const fn log2(value: u64) -> u32 {
    if value == 0 {
        0
    } else {
        63 - value.leading_zeros()
    }
}
