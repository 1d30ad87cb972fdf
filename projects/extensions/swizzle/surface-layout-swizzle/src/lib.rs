#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
pub mod test_prelude;

mod address;
mod copy;

use address::{required_len, CopyExtent};
use surface_layout_common::{
    SurfaceGeometry, SwizzleBlt, SwizzleError, SwizzleSurface, SwizzleSurfaceMut,
};

/// Swizzles and unswizzles on the CPU, one contiguous run of bytes at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuSwizzleBlt;

impl SwizzleBlt for CpuSwizzleBlt {
    fn blt(
        &self,
        dest: SwizzleSurfaceMut<'_>,
        src: SwizzleSurface<'_>,
        copy_width_bytes: u32,
        copy_height: u32,
    ) -> Result<(), SwizzleError> {
        let dest_geometry = dest.geometry;
        let src_geometry = src.geometry;
        // The copy width is counted in elements of the unswizzled side.
        let measured = if src_geometry.pattern.is_none() {
            &src_geometry
        } else {
            &dest_geometry
        };
        if measured.element_pitch == 0 {
            return Err(SwizzleError::ZeroElement);
        }
        let extent = CopyExtent {
            elements: copy_width_bytes / measured.element_pitch,
            rows: copy_height,
        };

        check_len(&dest_geometry, extent, dest.data.len())?;
        check_len(&src_geometry, extent, src.data.len())?;
        if extent.elements == 0 || extent.rows == 0 {
            return Ok(());
        }

        let packed = is_packed(&dest_geometry) && is_packed(&src_geometry);
        let same_elements = dest_geometry.element_pitch == src_geometry.element_pitch;
        // SAFETY: check_len verified that every byte either side touches lies inside its
        // buffer, and the shared and exclusive borrows cannot alias.
        unsafe {
            if packed && same_elements {
                copy::copy_packed(
                    dest.data.as_mut_ptr(),
                    &dest_geometry,
                    src.data.as_ptr(),
                    &src_geometry,
                    extent.elements * dest_geometry.element_pitch,
                    extent.rows,
                );
            } else {
                copy::copy_elements(
                    dest.data.as_mut_ptr(),
                    &dest_geometry,
                    src.data.as_ptr(),
                    &src_geometry,
                    extent.elements,
                    extent.rows,
                );
            }
        }
        Ok(())
    }
}

fn is_packed(geometry: &SurfaceGeometry) -> bool {
    geometry.element_pitch == geometry.element_size
}

fn check_len(
    geometry: &SurfaceGeometry,
    extent: CopyExtent,
    actual: usize,
) -> Result<(), SwizzleError> {
    let needed = required_len(geometry, extent)?;
    if needed > actual as u64 {
        return Err(SwizzleError::OutOfBounds {
            needed: usize::try_from(needed).unwrap_or(usize::MAX),
            actual,
        });
    }
    Ok(())
}
