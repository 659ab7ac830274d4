//! # proxymesh
//!
//! Approximation of triangle meshes by a small set of planar proxies.
//!
//! This is the umbrella crate that provides convenient access to all proxymesh
//! functionality. You can use this crate to get everything in one place, or use
//! individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Mesh access trait, indexed triangle mesh, vector utilities and facet adjacency
//! - **I/O**: Binary STL reading and writing
//! - **Simplification**: Variational shape approximation and anchor vertex extraction
//!
//! ## Quick Start
//!
//! ```rust
//! use proxymesh::prelude::*;
//!
//! let cube = shapes::basic_cube();
//! let config = VsaConfig::new().with_error_threshold(0.01).with_seed(1);
//! let result = approximate_and_extract(&cube, config).unwrap();
//!
//! assert_eq!(result.field.proxy_count(), 6);
//! assert_eq!(result.anchors.len(), 8);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables io and simplification
//! - `io`: Binary STL support
//! - `simplification`: Planar proxy approximation
//! - `all`: Enables all features

// Re-export core functionality
pub use proxymesh_core::*;

// Re-export sub-crates
#[cfg(feature = "io")]
pub use proxymesh_io as io;

#[cfg(feature = "simplification")]
pub use proxymesh_simplification as simplification;

/// Convenient imports for common use cases
pub mod prelude {
    pub use proxymesh_core::*;

    #[cfg(feature = "io")]
    pub use proxymesh_io::*;

    #[cfg(feature = "simplification")]
    pub use proxymesh_simplification::*;
}
