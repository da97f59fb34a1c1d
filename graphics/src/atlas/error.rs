/// An error that can occur while placing fragments in an [`Atlas`].
///
/// [`Atlas`]: crate::atlas::Atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A row or a map has no room left for the request.
    ///
    /// The [`Atlas`](crate::atlas::Atlas) recovers from this by trying the
    /// next map or creating a new one.
    #[error("not enough space left")]
    OutOfSpace,

    /// No map could hold the fragment and the map-count limit forbids
    /// creating another one.
    #[error("fragment allocation failed: map limit reached")]
    AllocationFailed,

    /// The request itself is malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The atlas [`Settings`](crate::atlas::Settings) are unusable.
    #[error("invalid atlas settings: {0}")]
    InvalidSettings(&'static str),
}
