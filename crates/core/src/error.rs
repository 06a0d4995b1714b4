/// Domain errors raised while interpreting upstream data.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The upstream had nothing usable for the requested identifier.
    #[error("{0}")]
    NotFound(String),
}
