//! GPU Module - spawn point record layout and the device buffer seam.
//!
//! Data flow:
//! - Host: RingBufferStore owns the mirror (Vec<SpawnPoint>)
//! - Host → device: one full upload at init, then one-element uploads per write
//! - Device: consumers read the structured buffer through a handle, never write it

pub mod ring;
pub mod wgpu_buffer;

use bevy::math::Vec3;
use bytemuck::{Pod, Zeroable};

use crate::constants::STRIDE;

pub use ring::RingBufferStore;
pub use wgpu_buffer::{WgpuAllocator, WgpuSpawnBuffer};

// =============================================================================
// RECORD
// =============================================================================

/// One spawn point as laid out on the device: vec4<f32>(x, y, z, w).
/// `w` is free for the consumer; spawns store the time they were written.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

// Partial uploads index the device buffer by STRIDE; the host layout must match exactly.
const _: () = assert!(std::mem::size_of::<SpawnPoint>() == STRIDE);

impl SpawnPoint {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn at(position: Vec3, w: f32) -> Self {
        Self::new(position.x, position.y, position.z, w)
    }
}

// =============================================================================
// DEVICE SEAM
// =============================================================================

/// A fixed-size structured buffer on the device.
pub trait DeviceBuffer {
    /// What consumers bind. Cloning shares the buffer, it does not copy it.
    type Handle: Clone;

    fn handle(&self) -> Self::Handle;

    /// Copy `points` into the buffer starting at element `first`.
    fn upload(&mut self, first: usize, points: &[SpawnPoint]);

    /// Free device memory. Called exactly once by the owner.
    fn release(&mut self);
}

/// Creates device buffers. One allocation per store lifetime.
pub trait DeviceAllocator {
    type Buffer: DeviceBuffer;

    fn create_structured(&self, label: &str, count: usize, stride: usize) -> Self::Buffer;
}

// =============================================================================
// TEST SPIES
// =============================================================================
