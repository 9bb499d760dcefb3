use thiserror::Error;

pub type AxisLabelResult<T> = Result<T, AxisLabelError>;

#[derive(Debug, Error)]
pub enum AxisLabelError {
    #[error("invalid viewport: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid axis box: left={left}, top={top}, width={width}, height={height}")]
    InvalidBox {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("backend failure: {0}")]
    Backend(String),

    #[error("plugin with name `{0}` is already registered")]
    DuplicatePlugin(String),
}
