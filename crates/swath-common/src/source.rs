//! The loader interface consumed by the matchup core.

use crate::error::SwathResult;
use crate::swath::Swath;

/// Something that can turn a granule identifier into a loaded [`Swath`].
///
/// Loading either yields the whole swath or an error; there is no partial
/// result. Implementations must be shareable across threads so that
/// independent matchups can run concurrently.
pub trait SwathSource: Send + Sync {
    /// Load the swath for `granule`.
    fn load(&self, granule: &str) -> SwathResult<Swath>;
}

impl<T: SwathSource + ?Sized> SwathSource for &T {
    fn load(&self, granule: &str) -> SwathResult<Swath> {
        (**self).load(granule)
    }
}

impl<T: SwathSource + ?Sized> SwathSource for Box<T> {
    fn load(&self, granule: &str) -> SwathResult<Swath> {
        (**self).load(granule)
    }
}
