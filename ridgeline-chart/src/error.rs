use arrow::error::ArrowError;
use lowess::prelude::LowessError;
use ridgeline_guides::error::RidgelineGuidesError;
use ridgeline_image::error::RidgelineImageError;
use ridgeline_scales::error::RidgelineScaleError;
use ridgeline_scenegraph::error::RidgelineSceneGraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RidgelineChartError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid dataset: {0}")]
    DataShape(String),

    #[error("Normalization reference maximum is zero for {0}")]
    ZeroReference(String),

    #[error("Unsupported output format: `{0}`")]
    UnsupportedFormat(String),

    #[error("Smoothing error: `{0}`")]
    LowessError(#[from] LowessError),

    #[error("Scale error: `{0}`")]
    ScaleError(#[from] RidgelineScaleError),

    #[error("SceneGraph error: `{0}`")]
    SceneGraphError(#[from] RidgelineSceneGraphError),

    #[error("Guides error: `{0}`")]
    GuidesError(#[from] RidgelineGuidesError),

    #[error("Image error: `{0}`")]
    ImageError(#[from] RidgelineImageError),

    #[error("Arrow error: `{0}`")]
    ArrowError(#[from] ArrowError),

    #[error("IO error: `{0}`")]
    IoError(#[from] std::io::Error),
}
