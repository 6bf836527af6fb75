use ridgeline_scales::error::RidgelineScaleError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RidgelineGuidesError {
    #[error("Invalid scale: {0}")]
    InvalidScale(#[from] RidgelineScaleError),
}
