use thiserror::Error;

pub type AxisResult<T> = Result<T, AxisError>;

#[derive(Debug, Error)]
pub enum AxisError {
    #[error("invalid client size: width={width}, height={height}")]
    InvalidClientSize { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unsupported axis scale type: {0}")]
    UnsupportedScaleType(String),

    #[error("tick search did not settle after {iterations} iterations (last desired count {last_desired})")]
    TickSearchExhausted {
        iterations: usize,
        last_desired: usize,
    },

    #[error("render backend failure: {0}")]
    Backend(String),
}
