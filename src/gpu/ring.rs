//! Fixed-capacity ring of spawn points mirrored on host and device.
//!
//! The device buffer is created once and never resized. Each write overwrites
//! the oldest slot and uploads exactly that one element.

use bevy::math::Vec2;
use tracing::{debug, info, warn};

use super::{DeviceAllocator, DeviceBuffer, SpawnPoint};
use crate::constants::{SEED_STEP, SEED_Y_OFFSET, STRIDE};
use crate::coord::{WorldRange, ground_extent};

const BUFFER_LABEL: &str = "spawn_points";

/// Shape of a store: capacity, world rectangle, and where the seeded line sits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoreLayout {
    pub capacity: usize,
    pub x_range: WorldRange,
    pub y_range: WorldRange,
    pub world_z: f32,
    pub seed_step: f32,
    pub seed_y_offset: f32,
}

impl StoreLayout {
    pub fn new(capacity: usize, x_range: WorldRange, y_range: WorldRange, world_z: f32) -> Self {
        Self {
            capacity,
            x_range,
            y_range,
            world_z,
            seed_step: SEED_STEP,
            seed_y_offset: SEED_Y_OFFSET,
        }
    }

    /// Capacity as a store will use it: at least 1, and slot ids must fit the u32 event payload.
    pub fn clamped_capacity(&self) -> usize {
        self.capacity.clamp(1, u32::MAX as usize)
    }

    /// Initial contents of slot `i`: a line along X, parked below the world.
    pub fn seed(&self, i: usize) -> SpawnPoint {
        SpawnPoint::new(
            self.x_range.min + i as f32 * self.seed_step,
            self.y_range.min - self.seed_y_offset,
            self.world_z,
            0.0,
        )
    }
}

pub struct RingBufferStore<D: DeviceBuffer> {
    layout: StoreLayout,
    mirror: Vec<SpawnPoint>,
    /// None once released.
    device: Option<D>,
    /// Total writes so far. Active slot = write_cursor % capacity.
    write_cursor: u64,
}

impl<D: DeviceBuffer> RingBufferStore<D> {
    /// Allocate mirror + device buffer, seed every slot, upload the whole mirror once.
    /// Capacity is clamped to [1, u32::MAX].
    pub fn initialize<A>(allocator: &A, mut layout: StoreLayout) -> Self
    where
        A: DeviceAllocator<Buffer = D>,
    {
        let capacity = layout.clamped_capacity();
        if capacity != layout.capacity {
            warn!("spawn point capacity {} clamped to {}", layout.capacity, capacity);
            layout.capacity = capacity;
        }

        let mirror: Vec<SpawnPoint> = (0..layout.capacity).map(|i| layout.seed(i)).collect();
        let mut device = allocator.create_structured(BUFFER_LABEL, layout.capacity, STRIDE);
        device.upload(0, &mirror);

        info!("spawn point store ready: capacity={}", layout.capacity);
        Self {
            layout,
            mirror,
            device: Some(device),
            write_cursor: 0,
        }
    }

    /// Overwrite the next slot and upload only that element.
    /// Returns the slot, or None if the store was already torn down.
    pub fn write(&mut self, value: SpawnPoint) -> Option<usize> {
        let Some(device) = self.device.as_mut() else {
            warn!("spawn point write after teardown ignored");
            return None;
        };

        let slot = (self.write_cursor % self.layout.capacity as u64) as usize;
        self.mirror[slot] = value;
        self.write_cursor += 1;
        device.upload(slot, &self.mirror[slot..=slot]);

        debug!("spawn slot {} at {}", slot, value.w);
        Some(slot)
    }

    /// Release the device buffer and discard the mirror. Safe to call any number of times.
    pub fn teardown(&mut self) {
        if let Some(mut device) = self.device.take() {
            device.release();
            self.mirror = Vec::new();
            info!("spawn point store released");
        }
    }

    pub fn is_released(&self) -> bool {
        self.device.is_none()
    }

    /// Handle consumers bind to; None after teardown.
    pub fn device_handle(&self) -> Option<D::Handle> {
        self.device.as_ref().map(|d| d.handle())
    }

    pub fn capacity(&self) -> usize {
        self.layout.capacity
    }

    /// Capacity as pushed to consumers. Lossless: `initialize` keeps it within u32.
    pub fn capacity_u32(&self) -> u32 {
        u32::try_from(self.layout.capacity).unwrap_or(u32::MAX)
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub fn ground_extent(&self) -> Vec2 {
        ground_extent(self.layout.x_range, self.layout.y_range)
    }

    pub fn write_cursor(&self) -> u64 {
        self.write_cursor
    }

    /// Host copy of the device contents. Empty after teardown.
    pub fn mirror(&self) -> &[SpawnPoint] {
        &self.mirror
    }

    pub fn get(&self, slot: usize) -> Option<SpawnPoint> {
        self.mirror.get(slot).copied()
    }
}

impl<D: DeviceBuffer> Drop for RingBufferStore<D> {
    fn drop(&mut self) {
        self.teardown();
    }
}
