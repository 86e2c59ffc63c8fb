//! Template asset providers.
//!
//! - [`FilesystemResourceProvider`]: reads template assets from a directory
//! - [`InMemoryResourceProvider`]: re-exported from `labelgrid-traits` for fixtures

mod filesystem;

pub use filesystem::FilesystemResourceProvider;
pub use labelgrid_traits::InMemoryResourceProvider;
