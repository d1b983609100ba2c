//! Scene graph and primitive emission
//!
//! The scene is an append-only store of primitive instances plus the
//! animation tracks, LOD descriptors and door mechanisms that refer to them.
//!
//! ## Architecture
//!
//! ```text
//! Layout Graph / Mechanisms / Scatter
//!      ↓
//! Primitive Emitter (shapes + transforms + material handles)
//!      ↓
//! Scene Graph (handed to the external exporter)
//! ```

mod primitive;
mod scene_graph;
mod emitter;

pub use primitive::{InstanceId, PrimitiveInstance, Shape};
pub use scene_graph::SceneGraph;
pub use emitter::PrimitiveEmitter;
