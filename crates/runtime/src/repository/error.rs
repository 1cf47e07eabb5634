use thiserror::Error;

/// Failures from the durable map store.
///
/// These are the one class of hard error in the system: losing map memory
/// silently would cause systematically wrong navigation with no surfaced
/// signal, so repository failures always propagate.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("map store I/O failed")]
    Io(#[from] std::io::Error),

    #[error("map store serialization failed: {0}")]
    Serialization(String),
}
