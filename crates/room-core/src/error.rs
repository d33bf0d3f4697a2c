use thiserror::Error;

/// Failures the room core reports to its frontend.
///
/// Missing scene nodes are not errors: features tied to them simply do nothing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoomError {
    #[error("asset failed to load: {0}")]
    AssetLoad(String),
    #[error("room is not ready to enter (phase: {0})")]
    NotReady(&'static str),
    #[error("unknown modal id `{0}`")]
    UnknownModal(String),
}

pub type Result<T> = std::result::Result<T, RoomError>;
