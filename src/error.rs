use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Errors raised at configuration and backend boundaries.
///
/// Primitive queries and mutations never fail; "no result" is `None`.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
