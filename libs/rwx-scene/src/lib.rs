//! # RWX Scene
//!
//! Statement-driven scene construction for the RWX loading pipeline.
//!
//! ## Architecture
//!
//! ```text
//! RwxLoader (configuration, fetch, delivery)
//!       ↓
//! ParseContext (clump / transform / prototype stack machine)
//!       ↓
//! Group tree (groups, mesh nodes, wireframe line sets)
//!       ↓
//! flatten_group (optional single-mesh merge)
//! ```
//!
//! Parsing is single-threaded and line-at-a-time; the only asynchronous
//! activity is texture resolution, collected as futures on the returned
//! [`RwxObject`] and joined on demand.

pub mod error;
pub mod flatten;
pub mod graph;
pub mod loader;
pub mod machine;
pub mod ratio;

pub use error::{FetchError, LoadError};
pub use flatten::flatten_group;
pub use graph::{Group, LineSet, MeshNode, Node};
pub use loader::{FileFetcher, ResourceFetcher, RwxLoader, RwxObject};
