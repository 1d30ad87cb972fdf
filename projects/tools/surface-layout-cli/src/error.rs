use surface_layout::SurfaceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("only standard swizzle Ys surfaces without aux surfaces can be split into spans")]
    NotMappable,
}
