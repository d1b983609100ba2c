//! Append-only scene graph
//!
//! Instances are never removed or mutated once emitted. Tracks describe
//! change over time by reference to an instance id; LOD descriptors and door
//! mechanisms group instances by id.

use serde::Serialize;

use super::{InstanceId, PrimitiveInstance, Shape};
use crate::animation::{AnimationTrack, TrackError};
use crate::foundation::math::Transform;
use crate::lod::{LodDescriptor, LodError};
use crate::materials::MaterialHandle;
use crate::mechanisms::DoorMechanism;

/// In-memory scene produced by the compiler
#[derive(Debug, Default, Serialize)]
pub struct SceneGraph {
    /// Emitted primitives in emission order
    instances: Vec<PrimitiveInstance>,
    /// Animation tracks in attachment order
    tracks: Vec<AnimationTrack>,
    /// Level-of-detail groups
    lod_groups: Vec<LodDescriptor>,
    /// Door mechanisms
    doors: Vec<DoorMechanism>,
}

impl SceneGraph {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new instance and return its id
    pub(crate) fn push_instance(
        &mut self,
        name: String,
        shape: Shape,
        transform: Transform,
        material: MaterialHandle,
    ) -> InstanceId {
        let id = InstanceId(u32::try_from(self.instances.len()).unwrap_or(u32::MAX));
        self.instances.push(PrimitiveInstance {
            id,
            name,
            shape,
            transform,
            material,
        });
        id
    }

    /// Get an instance by id
    pub fn instance(&self, id: InstanceId) -> Option<&PrimitiveInstance> {
        self.instances.get(id.0 as usize)
    }

    /// Check whether an id refers to an emitted instance
    pub fn contains(&self, id: InstanceId) -> bool {
        (id.0 as usize) < self.instances.len()
    }

    /// Find the first instance with the given name
    pub fn find(&self, name: &str) -> Option<&PrimitiveInstance> {
        self.instances.iter().find(|i| i.name == name)
    }

    /// All instances in emission order
    pub fn instances(&self) -> &[PrimitiveInstance] {
        &self.instances
    }

    /// Attach a track to the instance it targets
    ///
    /// # Errors
    /// `TrackError::UnknownTarget` if the target was never emitted.
    pub fn attach_track(&mut self, track: AnimationTrack) -> Result<(), TrackError> {
        if !self.contains(track.target()) {
            return Err(TrackError::UnknownTarget(track.target()));
        }
        self.tracks.push(track);
        Ok(())
    }

    /// All tracks in attachment order
    pub fn tracks(&self) -> &[AnimationTrack] {
        &self.tracks
    }

    /// Tracks targeting one instance
    pub fn tracks_for(&self, id: InstanceId) -> impl Iterator<Item = &AnimationTrack> {
        self.tracks.iter().filter(move |t| t.target() == id)
    }

    /// Attach a level-of-detail descriptor
    ///
    /// # Errors
    /// `LodError::UnknownInstance` if any listed instance was never emitted.
    pub fn attach_lod(&mut self, descriptor: LodDescriptor) -> Result<(), LodError> {
        if let Some(missing) = descriptor.instance_ids().find(|id| !self.contains(*id)) {
            return Err(LodError::UnknownInstance(missing));
        }
        self.lod_groups.push(descriptor);
        Ok(())
    }

    /// All LOD descriptors
    pub fn lod_groups(&self) -> &[LodDescriptor] {
        &self.lod_groups
    }

    pub(crate) fn push_door(&mut self, door: DoorMechanism) {
        self.doors.push(door);
    }

    /// All door mechanisms
    pub fn doors(&self) -> &[DoorMechanism] {
        &self.doors
    }

    /// Number of emitted instances
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Number of attached tracks
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}
