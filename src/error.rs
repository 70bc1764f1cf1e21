use thiserror::Error;

/// Construction-time failures raised while building a region tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("invalid geometry: region size {width}x{height} must be positive")]
    InvalidGeometry { width: i32, height: i32 },

    #[error("{child} does not fit in {container}")]
    Containment { child: String, container: String },

    #[error("children can only be added to a container region")]
    NotAContainer,

    #[error("insufficient input: {0}")]
    InsufficientInput(String),

    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),

    #[error("image pool depleted: requested {requested}, {remaining} remaining")]
    PoolDepleted { requested: usize, remaining: usize },
}

pub type LayoutResult<T> = Result<T, LayoutError>;
