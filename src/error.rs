use thiserror::Error;

/// Errors raised while building or rendering a scene.
#[derive(Debug, Error)]
pub enum Error {
    #[error("matrix is not invertible (determinant is zero)")]
    SingularMatrix,

    #[error("obj error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("a render worker panicked")]
    WorkerPanicked,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
