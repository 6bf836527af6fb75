use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RidgelineSceneGraphError {
    #[error("Internal error: `{0}`")]
    InternalError(String),

    #[error("Mark `{name}` has {actual} values for `{channel}`, expected {expected}")]
    EncodingLengthMismatch {
        name: String,
        channel: &'static str,
        expected: usize,
        actual: usize,
    },
}
