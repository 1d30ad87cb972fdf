#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
pub mod test_prelude;

pub mod context;
pub mod cpu_blt;
pub mod error;
pub mod mapping;
pub mod params;
pub mod resource;

mod aux;
mod offset;
mod padding;
mod planes;
mod sys_mem;
mod validate;

pub use context::SurfaceContext;
pub use cpu_blt::{BltBuffers, BltExtent, CpuBltDesc, GpuSubresource, SysMemLayout};
pub use error::{
    BltError, BltResult, Status, SurfaceError, SurfaceKind, SurfaceResult, ValidationError,
};
pub use mapping::{MappingCursor, MappingSpan, MappingSpans, MappingType};
pub use padding::MipPacking;
pub use params::{CreateParams, CreateParamsBuilder, ExistingSysMemRegion};
pub use resource::ResourceInfo;
pub use sys_mem::ExistingSysMem;

pub use surface_layout_common as common;
