//! Orchestrator - wires frame input to the ring buffer and the event fan-out.
//!
//! Per tick, in order:
//! 1. random-spawn signal → random point in the world rectangle → write → notify
//! 2. pointer-spawn signal → screen_to_world → write → notify
//!
//! A write always finishes its device upload before the notify for that slot runs.

use bevy::math::Vec2;
use rand::Rng;
use tracing::info;

use crate::binding::{BindingConfig, ConsumerBinding};
use crate::broadcast::EventBroadcaster;
use crate::consumer::SpawnConsumer;
use crate::coord::screen_to_world;
use crate::diagnostics::SpawnDiagnostic;
use crate::gpu::{DeviceAllocator, DeviceBuffer, RingBufferStore, SpawnPoint};
use crate::settings::SpawnSettings;

/// Discrete input for one frame. Pointer uses a bottom-left origin, in viewport units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub random_spawn: bool,
    pub pointer_spawn: bool,
    pub pointer: Vec2,
    pub viewport: Vec2,
    /// Seconds since start; stored in the record's w.
    pub now: f32,
}

pub struct SpawnOrchestrator<D: DeviceBuffer, C: SpawnConsumer> {
    settings: SpawnSettings,
    store: Option<RingBufferStore<D>>,
    broadcaster: EventBroadcaster<C>,
}

impl<D, C> SpawnOrchestrator<D, C>
where
    D: DeviceBuffer,
    C: SpawnConsumer<Buffer = D::Handle>,
{
    /// Pair each configured binding with a consumer, in order.
    /// Extra configs get no consumer (inert); extra consumers get the default config.
    pub fn new(settings: SpawnSettings, consumers: Vec<C>) -> Self {
        let count = settings.bindings.len().max(consumers.len());
        let mut consumers = consumers.into_iter();
        let bindings = (0..count)
            .map(|i| {
                let config = settings.bindings.get(i).cloned().unwrap_or_else(BindingConfig::default);
                ConsumerBinding::new(config, consumers.next())
            })
            .collect();

        Self {
            settings,
            store: None,
            broadcaster: EventBroadcaster::new(bindings),
        }
    }

    /// Add one more consumer. Bound immediately if the store is running.
    pub fn add_consumer(&mut self, config: BindingConfig, consumer: Option<C>) -> Vec<SpawnDiagnostic> {
        let index = self.broadcaster.register(ConsumerBinding::new(config, consumer));
        let params = self.settings.effect_params();
        match self.store.as_ref() {
            Some(store) => self.broadcaster.bindings_mut()[index].bind(index, store, &params),
            None => Vec::new(),
        }
    }

    /// Allocate the store and bind every consumer. A running store is kept as is.
    pub fn start<A>(&mut self, allocator: &A) -> Vec<SpawnDiagnostic>
    where
        A: DeviceAllocator<Buffer = D>,
    {
        if self.is_running() {
            return Vec::new();
        }
        let store = RingBufferStore::initialize(allocator, self.settings.layout());
        let diagnostics = self.broadcaster.bind_all(&store, &self.settings.effect_params());
        info!(
            "spawn points started: capacity={} bindings={}",
            store.capacity(),
            self.broadcaster.bindings().len()
        );
        self.store = Some(store);
        diagnostics
    }

    /// Recreate every binding's runtime state against the live store.
    pub fn rebind(&mut self) -> Vec<SpawnDiagnostic> {
        let Some(store) = self.store.as_ref() else {
            return Vec::new();
        };
        self.broadcaster.bind_all(store, &self.settings.effect_params())
    }

    /// Release the device buffer. Safe to call any number of times.
    pub fn stop(&mut self) {
        if let Some(mut store) = self.store.take() {
            store.teardown();
        }
    }

    pub fn is_running(&self) -> bool {
        self.store.as_ref().is_some_and(|s| !s.is_released())
    }

    /// Write one point and notify consumers. None when stopped.
    pub fn spawn(&mut self, point: SpawnPoint) -> Option<usize> {
        let slot = self.store.as_mut()?.write(point)?;
        self.broadcaster.notify(slot);
        Some(slot)
    }

    /// Uniform point inside the world rectangle.
    pub fn spawn_random<R: Rng + ?Sized>(&mut self, rng: &mut R, now: f32) -> Option<usize> {
        let x = self.settings.world_x_range.lerp(rng.random::<f32>());
        let y = self.settings.world_y_range.lerp(rng.random::<f32>());
        self.spawn(SpawnPoint::new(x, y, self.settings.world_z, now))
    }

    pub fn spawn_at_pointer(&mut self, pointer: Vec2, viewport: Vec2, now: f32) -> Option<usize> {
        let s = &self.settings;
        let position = screen_to_world(pointer, viewport, s.world_x_range, s.world_y_range, s.world_z);
        self.spawn(SpawnPoint::at(position, now))
    }

    /// Process one frame of input. Returns the slots written, in order.
    pub fn tick<R: Rng + ?Sized>(&mut self, input: &FrameInput, rng: &mut R) -> Vec<usize> {
        let mut written = Vec::new();
        if !self.is_running() {
            return written;
        }
        if input.random_spawn {
            written.extend(self.spawn_random(rng, input.now));
        }
        if input.pointer_spawn {
            written.extend(self.spawn_at_pointer(input.pointer, input.viewport, input.now));
        }
        written
    }

    pub fn settings(&self) -> &SpawnSettings {
        &self.settings
    }

    pub fn store(&self) -> Option<&RingBufferStore<D>> {
        self.store.as_ref()
    }

    pub fn broadcaster(&self) -> &EventBroadcaster<C> {
        &self.broadcaster
    }
}

impl<D: DeviceBuffer, C: SpawnConsumer> Drop for SpawnOrchestrator<D, C> {
    fn drop(&mut self) {
        if let Some(mut store) = self.store.take() {
            store.teardown();
        }
    }
}
