#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RidgelineScaleError {
    #[error("Empty domain")]
    EmptyDomain,

    #[error("Unknown colormap: `{0}`")]
    UnknownColormap(String),

    #[error("Color range must satisfy 0 <= lo < hi <= 1, received ({lo}, {hi})")]
    InvalidColorRange { lo: f32, hi: f32 },

    #[error("Invalid date format pattern: `{0}`")]
    InvalidDateFormat(String),

    #[error("Day offset {0} is outside the representable date range")]
    DateOutOfRange(f64),
}
