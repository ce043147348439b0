//! # Configuration Constants
//!
//! Centralized constants for the RWX loading pipeline. Parsing defaults,
//! geometry preconditions and material defaults are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Units**: Source-format to engine-unit scaling
//! - **Geometry**: Minimum tessellation parameters
//! - **Materials**: Default texture and shading parameters

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Geometry buffers are `f32` end to end (the consumer contract is GPU
/// vertex buffers), so the tolerance is sized for single precision.
pub const EPSILON: f32 = 1e-6;

// =============================================================================
// UNIT CONSTANTS
// =============================================================================

/// Uniform scale applied to the finished root group before delivery.
///
/// The source format's native unit is one-tenth of the target engine's
/// world unit, so the whole graph is scaled up on the way out.
pub const UNIT_SCALE: f32 = 10.0;

// =============================================================================
// GEOMETRY CONSTANTS
// =============================================================================

/// Minimum number of sides required to build a vertex circle.
///
/// Primitive statements below this count are silently skipped; internal
/// callers passing a smaller count are violating a construction
/// precondition and get a hard error instead.
pub const MIN_CIRCLE_SIDES: u32 = 3;

/// Minimum density parameter for sphere and hemisphere primitives.
pub const MIN_SPHERE_DENSITY: u32 = 2;

// =============================================================================
// MATERIAL CONSTANTS
// =============================================================================

/// Face tag value that marks a sign face.
///
/// A face carrying this tag triggers aspect-ratio inference so a sign
/// texture can be fitted to the face without distortion.
pub const SIGN_TAG: u32 = 100;

/// Default texture file extension when a `texture` statement does not
/// embed one.
pub const DEFAULT_TEXTURE_EXTENSION: &str = "jpg";

/// Default mask archive extension.
///
/// Masks are conventionally packaged as a single bitmap inside a zip
/// archive; a non-archive extension makes the resolver load the mask
/// file directly.
pub const DEFAULT_MASK_EXTENSION: &str = "zip";

/// Default alpha-test threshold applied to masked materials.
pub const DEFAULT_ALPHA_TEST: f32 = 0.2;

/// Default shininess for lit renderer materials.
pub const DEFAULT_SHININESS: f32 = 30.0;
