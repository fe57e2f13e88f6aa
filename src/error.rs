use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum PathError {
    #[error("Path parse error in '{0}': {1}")]
    PathParse(String, String),

    #[error("Type error: {0}")]
    TypeError(String),

    #[error("No resolver registered for component '{0}'")]
    NoResolver(String),

    #[error("Internal invariant violated: {0}")]
    Invariant(String),
}
