//! Sub-resource offset resolution.

use crate::error::{SurfaceError, SurfaceResult};
use crate::resource::ResourceInfo;
use surface_layout_common::{OffsetKind, OffsetRequest, Plane, ResolvedOffset, TextureInfo};

impl ResourceInfo {
    /// Resolves the offset of a sub-resource.
    ///
    /// Lock and render views always resolve against the whole surface; the plane selector picks
    /// the plane origin. On surfaces with redescribed planes the standard layout is built plane
    /// after plane, so [`OffsetKind::StdLayout`] needs a plane and [`OffsetKind::StdLayoutSize`]
    /// sums every plane when none is given.
    ///
    /// # Errors
    ///
    /// - [`SurfaceError::MipOutOfRange`] if the mip level exceeds the max mip level.
    /// - [`SurfaceError::PlaneRequired`] for a standard layout offset of a redescribed surface
    ///   without a plane.
    /// - [`SurfaceError::Offset`] if the calculator cannot resolve the offset.
    pub fn get_offset(&self, request: &OffsetRequest) -> SurfaceResult<ResolvedOffset> {
        if request.mip_level > self.surf.max_lod {
            return Err(SurfaceError::MipOutOfRange {
                mip: request.mip_level,
                max_lod: self.surf.max_lod,
            });
        }

        if !self.surf.flags.has_redescribed_planes() {
            return self.resolve(&self.surf, request);
        }

        match request.kind {
            OffsetKind::Lock | OffsetKind::Render => self.resolve(&self.surf, request),
            OffsetKind::StdLayout => {
                let plane = self.stored_plane(request.plane.ok_or(SurfaceError::PlaneRequired)?);
                let plane_request = OffsetRequest {
                    plane: None,
                    ..*request
                };
                let mut resolved = self.resolve(self.plane(plane), &plane_request)?;
                for &previous in Plane::first(plane.index()) {
                    resolved.offset += self.std_layout_size(previous)?;
                }
                Ok(resolved)
            }
            OffsetKind::StdLayoutSize => {
                let size = match request.plane {
                    Some(plane) => self.std_layout_size(self.stored_plane(plane))?,
                    None => {
                        let mut size = 0;
                        for &plane in Plane::first(self.stored_plane_count()) {
                            size += self.std_layout_size(plane)?;
                        }
                        size
                    }
                };
                Ok(ResolvedOffset {
                    offset: size,
                    ..ResolvedOffset::default()
                })
            }
        }
    }

    fn resolve(&self, tex: &TextureInfo, request: &OffsetRequest) -> SurfaceResult<ResolvedOffset> {
        self.context
            .texture_calc()
            .mip_map_offset(self.platform(), tex, request)
            .map_err(SurfaceError::Offset)
    }

    fn std_layout_size(&self, plane: Plane) -> SurfaceResult<u64> {
        let request = OffsetRequest::new(OffsetKind::StdLayoutSize);
        Ok(self.resolve(self.plane(plane), &request)?.offset)
    }

    /// Number of plane descriptors that carry their own memory. UV-packed formats store U and V
    /// in one plane.
    fn stored_plane_count(&self) -> usize {
        if self.surf.format.is_uv_packed() {
            2
        } else {
            self.surf.plane_count()
        }
    }

    fn stored_plane(&self, plane: Plane) -> Plane {
        match plane {
            Plane::V if self.surf.format.is_uv_packed() => Plane::U,
            plane => plane,
        }
    }
}
