//! Sub-resource offset requests and their results.

static PLANES: [Plane; 3] = [Plane::Y, Plane::U, Plane::V];

/// One plane of a planar surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    /// Luma.
    Y,
    /// First chroma plane; also the interleaved UV plane of UV-packed formats.
    U,
    /// Second chroma plane.
    V,
}

impl Plane {
    /// Every plane, in layout order.
    pub const ALL: [Plane; 3] = [Plane::Y, Plane::U, Plane::V];

    /// Position of the plane in per-plane arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Planes in layout order, limited to `count` planes.
    pub fn first(count: usize) -> &'static [Plane] {
        &PLANES[..count.min(PLANES.len())]
    }
}

/// Face of a cube map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CubeFace {
    /// +X.
    #[default]
    PositiveX,
    /// -X.
    NegativeX,
    /// +Y.
    PositiveY,
    /// -Y.
    NegativeY,
    /// +Z.
    PositiveZ,
    /// -Z.
    NegativeZ,
}

impl CubeFace {
    /// Number of faces of a cube.
    pub const COUNT: u32 = 6;

    const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// Face index in `0..6`.
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Face for an index in `0..6`.
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// The address view an offset is resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OffsetKind {
    /// Linear CPU view.
    #[default]
    Lock,
    /// Hardware (tiled) view: tile-aligned offset plus intra-tile X/Y/Z.
    Render,
    /// Standard-swizzle (OS defined) view.
    StdLayout,
    /// Total size of the standard-swizzle view of one plane, or of all planes.
    StdLayoutSize,
}

/// A sub-resource whose offset should be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OffsetRequest {
    /// Address view.
    pub kind: OffsetKind,
    /// Mip level.
    pub mip_level: u32,
    /// Array index (1D/2D/cube).
    pub array_index: u32,
    /// Depth slice (3D). For Yf/Ys this counts groups of tile-depth slices.
    pub slice: u32,
    /// Cube face.
    pub cube_face: CubeFace,
    /// Plane of a planar surface.
    pub plane: Option<Plane>,
}

impl OffsetRequest {
    /// A request for mip 0, slice 0 in the given view.
    pub fn new(kind: OffsetKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Sets the mip level.
    pub fn mip(mut self, mip_level: u32) -> Self {
        self.mip_level = mip_level;
        self
    }

    /// Sets the array index.
    pub fn array(mut self, array_index: u32) -> Self {
        self.array_index = array_index;
        self
    }

    /// Sets the 3D slice.
    pub fn slice(mut self, slice: u32) -> Self {
        self.slice = slice;
        self
    }

    /// Sets the cube face.
    pub fn face(mut self, cube_face: CubeFace) -> Self {
        self.cube_face = cube_face;
        self
    }

    /// Selects a plane.
    pub fn plane(mut self, plane: Plane) -> Self {
        self.plane = Some(plane);
        self
    }
}

/// A resolved offset.
///
/// Which fields are meaningful depends on the request's [`OffsetKind`]:
/// - `Lock`: `offset` and `row_pitch`.
/// - `Render`: `offset` (tile aligned), `x_offset` in bytes, `y_offset` in rows, `z_offset` in
///   slices.
/// - `StdLayout`: `offset`, `row_pitch` (one row of tiles) and `depth_pitch` (one slice).
/// - `StdLayoutSize`: `offset` holds the size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResolvedOffset {
    /// Byte offset, or size for [`OffsetKind::StdLayoutSize`].
    pub offset: u64,
    /// Intra-tile X offset in bytes.
    pub x_offset: u32,
    /// Intra-tile Y offset in rows.
    pub y_offset: u32,
    /// Intra-tile Z offset in slices.
    pub z_offset: u32,
    /// Bytes between rows of the view.
    pub row_pitch: u64,
    /// Bytes between depth slices of the view.
    pub depth_pitch: u64,
}
