//! Copy loops.
//!
//! Both loops walk the copy in runs of bytes that are contiguous on both sides, so they work for
//! any pair of linear and swizzled geometries.

use crate::address::{address, contiguous_run};
use core::ptr::copy_nonoverlapping;
use surface_layout_common::SurfaceGeometry;

/// Copies `rows` rows of `width` bytes between two surfaces with packed elements.
///
/// # Safety
///
/// - dest_ptr must be valid for writes of every byte the copy touches on the dest side
/// - src_ptr must be valid for reads of every byte the copy touches on the src side
/// - the two buffers must not overlap
#[inline]
pub(crate) unsafe fn copy_packed(
    dest_ptr: *mut u8,
    dest: &SurfaceGeometry,
    src_ptr: *const u8,
    src: &SurfaceGeometry,
    width: u32,
    rows: u32,
) {
    for row in 0..rows {
        copy_span(dest_ptr, dest, dest.offset_x, row, src_ptr, src, src.offset_x, width);
    }
}

/// Copies `rows` rows of `elements` elements, stepping each side by its own element pitch and
/// copying the smaller of the two element sizes.
///
/// # Safety
///
/// - dest_ptr must be valid for writes of every byte the copy touches on the dest side
/// - src_ptr must be valid for reads of every byte the copy touches on the src side
/// - the two buffers must not overlap
#[inline]
pub(crate) unsafe fn copy_elements(
    dest_ptr: *mut u8,
    dest: &SurfaceGeometry,
    src_ptr: *const u8,
    src: &SurfaceGeometry,
    elements: u32,
    rows: u32,
) {
    let size = dest.element_size.min(src.element_size);
    for row in 0..rows {
        let mut dest_x = dest.offset_x;
        let mut src_x = src.offset_x;
        for _ in 0..elements {
            copy_span(dest_ptr, dest, dest_x, row, src_ptr, src, src_x, size);
            dest_x += dest.element_pitch;
            src_x += src.element_pitch;
        }
    }
}

/// Copies `len` bytes of row `row` (relative to each side's Y offset) starting at the given
/// byte columns.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
unsafe fn copy_span(
    dest_ptr: *mut u8,
    dest: &SurfaceGeometry,
    dest_x: u32,
    row: u32,
    src_ptr: *const u8,
    src: &SurfaceGeometry,
    src_x: u32,
    len: u32,
) {
    let dest_y = dest.offset_y + row;
    let src_y = src.offset_y + row;
    let mut done = 0;
    while done < len {
        let dx = dest_x + done;
        let sx = src_x + done;
        let run = contiguous_run(dest, dx)
            .min(contiguous_run(src, sx))
            .min(len - done);
        let d = address(dest, dx, dest_y, dest.offset_z) as usize;
        let s = address(src, sx, src_y, src.offset_z) as usize;
        copy_nonoverlapping(src_ptr.add(s), dest_ptr.add(d), run as usize);
        done += run;
    }
}
