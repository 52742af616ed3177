/// Result alias used at every collaborator seam.
///
/// Creator, scanner, cache and platform failures travel as `anyhow::Error`
/// so adapters can attach context; typed failures live in [`super::error`].
pub type Result<T> = std::result::Result<T, anyhow::Error>;
