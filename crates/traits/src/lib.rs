pub mod lineage;
pub mod resource;

pub use lineage::{InMemoryLineageStore, LineageLookup, LookupError, NoLineageLookup, StrainInfo};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
