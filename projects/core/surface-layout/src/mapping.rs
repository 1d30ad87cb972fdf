//! Splitting a standard-swizzle Ys resource into page mapping spans.
//!
//! The OS lays out a standard-swizzle resource in its own page order (the physical side), while
//! the hardware addresses it through the render layout (the virtual side). Each [`MappingSpan`] is
//! a run of 64KB tiles that is contiguous on both sides, so a caller can map the whole resource
//! with one mapping call per span.
//!
//! The traversal is, from outermost to innermost: plane, mip level, row of tiles, array slice.
//! 3D resources walk their depth slices inside each mip level instead of array slices.
//!
//! Iteration state lives in a caller-owned [`MappingCursor`], so a traversal can be suspended and
//! resumed at any point. [`MappingSpans`] wraps the same state as an [`Iterator`].

use crate::error::SurfaceResult;
use crate::resource::ResourceInfo;
use surface_layout_common::math::align_down;
use surface_layout_common::{
    OffsetKind, OffsetRequest, Plane, ResourceType, TextureInfo, SIZE_64KB,
};
use tracing::trace;

/// How a resource is split into spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MappingType {
    /// Gen9 Ys render layout onto the standard swizzle page order.
    #[default]
    Gen9YsToStdSwizzle,
}

/// A run of bytes that is contiguous in both layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MappingSpan {
    /// Offset in the standard swizzle (OS page) order.
    pub physical_offset: u64,
    /// Offset in the render layout.
    pub virtual_offset: u64,
    /// Length in bytes; always a multiple of 64KB.
    pub size: u64,
}

/// Position of a mapping traversal.
///
/// [`MappingCursor::default`] starts a new traversal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MappingCursor {
    started: bool,
    done: bool,
    plane: Option<Plane>,
    last_plane: Option<Plane>,
    next_plane_pending: bool,
    lod: u32,
    effective_lod_max: u32,
    row: u32,
    rows: u32,
    slice: u32,
    slices: u32,
    element_width: u32,
    element_depth: u32,
    tile_width: u64,
    tile_height: u32,
    tile_depth: u32,
    row_pitch_virtual: u64,
    slice_pitch_physical: u64,
    slice_pitch_virtual: u64,
    slice0_physical: u64,
    slice0_virtual: u64,
    next: MappingSpan,
}

impl MappingCursor {
    /// Returns true once the last span was handed out.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Plane the traversal is in, for resources with redescribed planes.
    pub fn plane(&self) -> Option<Plane> {
        self.plane
    }

    /// Mip level the traversal is in.
    pub fn mip_level(&self) -> u32 {
        self.lod
    }
}

impl ResourceInfo {
    /// Emits the span at `cursor` and advances the cursor.
    ///
    /// Returns `Ok(None)` once every span was emitted.
    ///
    /// Only Ys resources with a standard swizzle and no aux surface can be split.
    ///
    /// # Errors
    ///
    /// Returns an error if a plane or mip offset cannot be resolved.
    pub fn get_mapping_span_desc(
        &self,
        kind: MappingType,
        cursor: &mut MappingCursor,
    ) -> SurfaceResult<Option<MappingSpan>> {
        let MappingType::Gen9YsToStdSwizzle = kind;
        debug_assert!(self.surf.flags.uses_std_swizzle());
        debug_assert!(self.surf.tile_mode.is_ys());
        debug_assert!(matches!(
            self.surf.resource_type,
            ResourceType::Texture2D | ResourceType::Texture3D | ResourceType::Cube
        ));
        debug_assert!(!self.surf.flags.is_depth() && !self.surf.flags.is_separate_stencil());
        debug_assert!(self.aux_surf.size == 0);
        debug_assert!(!self.surf.flags.is_mmc());

        if cursor.done {
            return Ok(None);
        }

        let tex = self.mapping_target(cursor)?;
        if !cursor.started {
            self.start_level_walk(tex, cursor);
        }

        let span = cursor.next;
        self.advance_cursor(tex, cursor, span)?;
        trace!(
            physical_offset = span.physical_offset,
            virtual_offset = span.virtual_offset,
            size = span.size,
            lod = cursor.lod,
            done = cursor.done,
            "mapping span"
        );
        Ok(Some(span))
    }

    /// A lazy iterator over every span of the resource.
    pub fn mapping_spans(&self, kind: MappingType) -> MappingSpans<'_> {
        MappingSpans::resume(self, kind, MappingCursor::default())
    }

    /// Selects the plane the cursor is in, switching planes when the previous one is exhausted.
    fn mapping_target(&self, cursor: &mut MappingCursor) -> SurfaceResult<&TextureInfo> {
        if !self.surf.flags.has_redescribed_planes() {
            return Ok(&self.surf);
        }

        match cursor.plane {
            None => {
                cursor.plane = Some(Plane::Y);
                cursor.last_plane = Some(if self.surf.plane_count() == 3 {
                    Plane::V
                } else {
                    Plane::U
                });
            }
            Some(current) if cursor.next_plane_pending => {
                let plane = match current {
                    Plane::Y => Plane::U,
                    _ => Plane::V,
                };
                let physical = self
                    .get_offset(&OffsetRequest::new(OffsetKind::StdLayout).plane(plane))?
                    .offset;
                let virtual_offset = self
                    .get_offset(&OffsetRequest::new(OffsetKind::Render).plane(plane))?
                    .offset;

                *cursor = MappingCursor {
                    plane: Some(plane),
                    last_plane: cursor.last_plane,
                    slice0_physical: physical,
                    slice0_virtual: virtual_offset,
                    next: MappingSpan {
                        physical_offset: physical,
                        virtual_offset,
                        size: 0,
                    },
                    ..MappingCursor::default()
                };
            }
            Some(_) => {}
        }

        Ok(match cursor.plane {
            Some(plane) => self.plane(plane),
            None => &self.surf,
        })
    }

    /// Computes the tile geometry, slice pitches and first span of the current plane.
    fn start_level_walk(&self, tex: &TextureInfo, cursor: &mut MappingCursor) {
        let platform = self.platform();
        let block = self
            .context
            .texture_calc()
            .compression_block_dimensions(tex.format);
        let bytes_per_element = tex.pixel_pitch().max(1) as u64;
        let tile = tex.tile_info(platform);

        cursor.started = true;
        cursor.effective_lod_max = tex
            .alignment
            .mip_tail_start_lod
            .map_or(tex.max_lod, |start| start.min(tex.max_lod));
        cursor.element_width = block.width;
        cursor.element_depth = block.depth;
        cursor.tile_width =
            (tile.logical_tile_width as u64 / bytes_per_element) * block.width as u64;
        cursor.tile_height = tile.logical_tile_height * block.height;
        cursor.tile_depth = tile.logical_tile_depth * block.depth;
        cursor.row_pitch_virtual =
            tex.pitch * tile.logical_tile_height as u64 * tile.logical_tile_depth as u64;

        let array_qpitch = if cursor.plane.is_some() {
            self.surf.offset_info.plane.array_qpitch
        } else {
            tex.offset_info.array_qpitch_render
        };
        cursor.slice_pitch_virtual =
            array_qpitch * (cursor.tile_depth / cursor.element_depth.max(1)) as u64;

        // 3D standard swizzle walks the depth slices before the mips.
        let lods_per_slice = match tex.resource_type {
            ResourceType::Texture3D => 1,
            _ => cursor.effective_lod_max + 1,
        };
        cursor.slice_pitch_physical = (0..lods_per_slice)
            .map(|lod| self.mip_tiles(tex, cursor, lod) * SIZE_64KB)
            .sum();

        cursor.slices = match tex.resource_type {
            ResourceType::Texture3D => tex.depth.div_ceil(cursor.tile_depth.max(1)),
            _ => tex.array_slices(),
        };

        let cols = tex.base_width.div_ceil(cursor.tile_width.max(1));
        let rows = tex.base_height.div_ceil(cursor.tile_height.max(1));
        let full_tile_rows_pitch = tex.base_width.next_multiple_of(cursor.tile_width.max(1))
            / cursor.element_width.max(1) as u64
            * bytes_per_element;
        if tex.pitch == full_tile_rows_pitch {
            // The whole mip 0 is one contiguous mapping row.
            cursor.rows = 1;
            cursor.next.size = cols * rows as u64 * SIZE_64KB;
        } else {
            cursor.rows = rows;
            cursor.next.size = cols * SIZE_64KB;
        }
    }

    fn advance_cursor(
        &self,
        tex: &TextureInfo,
        cursor: &mut MappingCursor,
        span: MappingSpan,
    ) -> SurfaceResult<()> {
        cursor.slice += 1;
        if cursor.slice < cursor.slices {
            cursor.next.physical_offset += cursor.slice_pitch_physical;
            cursor.next.virtual_offset += cursor.slice_pitch_virtual;
            return Ok(());
        }
        cursor.slice = 0;

        cursor.row += 1;
        if cursor.row < cursor.rows {
            cursor.slice0_physical += span.size;
            cursor.slice0_virtual += cursor.row_pitch_virtual;
            cursor.next.physical_offset = cursor.slice0_physical;
            cursor.next.virtual_offset = cursor.slice0_virtual;
            return Ok(());
        }

        cursor.lod += 1;
        if cursor.lod <= cursor.effective_lod_max {
            let lod = cursor.lod;
            let cols = tex.mip_width(lod).div_ceil(cursor.tile_width.max(1));
            cursor.row = 0;
            cursor.rows = tex.mip_height(lod).div_ceil(cursor.tile_height.max(1));

            if tex.resource_type == ResourceType::Texture3D {
                cursor.next.physical_offset += span.size;
                cursor.slice0_physical = cursor.next.physical_offset;
                cursor.slices = tex.mip_depth(lod).div_ceil(cursor.tile_depth.max(1));
                cursor.slice_pitch_physical = cols * cursor.rows as u64 * SIZE_64KB;
            } else {
                cursor.slice0_physical += span.size;
                cursor.next.physical_offset = cursor.slice0_physical;
            }

            let render = self.get_offset(&OffsetRequest::new(OffsetKind::Render).mip(lod))?;
            // Mips in the packed tail share the tail's tile.
            cursor.slice0_virtual = align_down(render.offset, SIZE_64KB);
            cursor.next.virtual_offset = cursor.slice0_virtual;
            cursor.next.size = cols * SIZE_64KB;
            return Ok(());
        }

        if cursor.plane == cursor.last_plane {
            cursor.done = true;
        } else {
            cursor.next_plane_pending = true;
        }
        Ok(())
    }

    fn mip_tiles(&self, tex: &TextureInfo, cursor: &MappingCursor, lod: u32) -> u64 {
        let cols = tex.mip_width(lod).div_ceil(cursor.tile_width.max(1));
        let rows = tex.mip_height(lod).div_ceil(cursor.tile_height.max(1)) as u64;
        cols * rows
    }
}

/// Iterator over the mapping spans of a resource.
///
/// Stops after the last span or after the first error.
#[derive(Debug)]
pub struct MappingSpans<'a> {
    resource: &'a ResourceInfo,
    kind: MappingType,
    cursor: MappingCursor,
    failed: bool,
}

impl<'a> MappingSpans<'a> {
    /// Continues a traversal from a saved cursor.
    pub fn resume(resource: &'a ResourceInfo, kind: MappingType, cursor: MappingCursor) -> Self {
        Self {
            resource,
            kind,
            cursor,
            failed: false,
        }
    }

    /// Suspends the traversal, returning its cursor.
    pub fn into_cursor(self) -> MappingCursor {
        self.cursor
    }
}

impl Iterator for MappingSpans<'_> {
    type Item = SurfaceResult<MappingSpan>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self
            .resource
            .get_mapping_span_desc(self.kind, &mut self.cursor)
        {
            Ok(span) => span.map(Ok),
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

impl core::iter::FusedIterator for MappingSpans<'_> {}
