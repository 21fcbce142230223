//! wgpu-backed spawn point buffer.
//!
//! STORAGE | COPY_DST so effects can read it as `array<vec4<f32>>`.
//! Uploads go through `Queue::write_buffer`; partial writes start at byte `first * STRIDE`.

use bevy::prelude::Resource;
use bevy::render::renderer::{RenderDevice, RenderQueue};
use std::ops::Range;
use tracing::info;

use super::{DeviceAllocator, DeviceBuffer, SpawnPoint};
use crate::constants::STRIDE;

/// Byte range covered by `count` spawn points starting at element `first`.
pub fn upload_span(first: usize, count: usize) -> Range<wgpu::BufferAddress> {
    let start = (first * STRIDE) as wgpu::BufferAddress;
    start..start + (count * STRIDE) as wgpu::BufferAddress
}

/// Device + queue pair used to create spawn point buffers.
/// Insert as a resource for `SpawnPointsPlugin<WgpuAllocator, _>`.
#[derive(Resource, Clone)]
pub struct WgpuAllocator {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl WgpuAllocator {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }
}

/// Share Bevy's render device and queue, e.g. in a Startup system:
/// `commands.insert_resource(WgpuAllocator::from((&*device, &*queue)))`.
impl From<(&RenderDevice, &RenderQueue)> for WgpuAllocator {
    fn from((device, queue): (&RenderDevice, &RenderQueue)) -> Self {
        let queue: &wgpu::Queue = &queue.0;
        Self::new(device.wgpu_device().clone(), queue.clone())
    }
}

impl DeviceAllocator for WgpuAllocator {
    type Buffer = WgpuSpawnBuffer;

    fn create_structured(&self, label: &str, count: usize, stride: usize) -> WgpuSpawnBuffer {
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (count * stride) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        info!("{label}: allocated {count} x {stride} bytes");
        WgpuSpawnBuffer {
            buffer,
            queue: self.queue.clone(),
        }
    }
}

/// Structured buffer holding the ring of spawn points.
pub struct WgpuSpawnBuffer {
    buffer: wgpu::Buffer,
    queue: wgpu::Queue,
}

impl DeviceBuffer for WgpuSpawnBuffer {
    type Handle = wgpu::Buffer;

    fn handle(&self) -> wgpu::Buffer {
        self.buffer.clone()
    }

    fn upload(&mut self, first: usize, points: &[SpawnPoint]) {
        let span = upload_span(first, points.len());
        let bytes: &[u8] = bytemuck::cast_slice(points);
        debug_assert_eq!(bytes.len() as wgpu::BufferAddress, span.end - span.start);
        self.queue.write_buffer(&self.buffer, span.start, bytes);
    }

    fn release(&mut self) {
        self.buffer.destroy();
    }
}
