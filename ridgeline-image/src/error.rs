use ridgeline_scenegraph::error::RidgelineSceneGraphError;

#[derive(Debug, thiserror::Error)]
pub enum RidgelineImageError {
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Raster scale must be finite and positive, received {0}")]
    InvalidScale(f32),

    #[error("Invalid scene graph: {0}")]
    InvalidSceneGraph(#[from] RidgelineSceneGraphError),

    #[error("image error")]
    ImageError(#[from] image::ImageError),

    #[error("svg write error")]
    FmtError(#[from] std::fmt::Error),

    #[error("usvg error: {0}")]
    UsvgError(#[from] usvg::Error),

    #[error("roxml Error: {0}")]
    RoxmlError(#[from] usvg::roxmltree::Error),
}
