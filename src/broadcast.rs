//! Event fan-out - tells every enabled consumer which slot just changed.
//!
//! Best effort per consumer: a missing attribute or an inert binding is
//! skipped, and the next binding is processed regardless.

use crate::binding::{ConsumerBinding, EffectParams};
use crate::consumer::SpawnConsumer;
use crate::diagnostics::{SpawnDiagnostic, report};
use crate::gpu::{DeviceBuffer, RingBufferStore};

/// Registered bindings, in registration order.
pub struct EventBroadcaster<C: SpawnConsumer> {
    bindings: Vec<ConsumerBinding<C>>,
}

impl<C: SpawnConsumer> Default for EventBroadcaster<C> {
    fn default() -> Self {
        Self { bindings: Vec::new() }
    }
}

impl<C: SpawnConsumer> EventBroadcaster<C> {
    pub fn new(bindings: Vec<ConsumerBinding<C>>) -> Self {
        Self { bindings }
    }

    /// Add a binding. It stays inert until `bind_all` runs.
    pub fn register(&mut self, binding: ConsumerBinding<C>) -> usize {
        self.bindings.push(binding);
        self.bindings.len() - 1
    }

    pub fn bindings(&self) -> &[ConsumerBinding<C>] {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut [ConsumerBinding<C>] {
        &mut self.bindings
    }

    /// (Re)bind every registered consumer against `store`.
    pub fn bind_all<D>(&mut self, store: &RingBufferStore<D>, params: &EffectParams) -> Vec<SpawnDiagnostic>
    where
        D: DeviceBuffer,
        C: SpawnConsumer<Buffer = D::Handle>,
    {
        self.bindings
            .iter_mut()
            .enumerate()
            .flat_map(|(i, b)| b.bind(i, store, params))
            .collect()
    }

    /// Send the spawn event for `slot` to every enabled binding.
    /// Returns the number of events sent plus any diagnostics raised.
    pub fn notify(&mut self, slot: usize) -> (usize, Vec<SpawnDiagnostic>) {
        let mut diagnostics = Vec::new();
        let mut sent = 0;

        for (i, binding) in self.bindings.iter_mut().enumerate() {
            let cfg = &binding.config;
            let (Some(consumer), Some(runtime)) = (binding.consumer.as_mut(), binding.runtime.as_mut()) else {
                continue;
            };
            if !cfg.send_event {
                continue;
            }

            let fields = [
                (&cfg.spawn_count_attribute, cfg.payload_count),
                (&cfg.slot_id_attribute, u32::try_from(slot).unwrap_or(u32::MAX)),
            ];
            for (name, value) in fields {
                if name.is_empty() {
                    continue;
                }
                if consumer.attribute_has_int(&runtime.scratch, name) {
                    consumer.attribute_set_int(&mut runtime.scratch, name, value);
                } else {
                    report(
                        &mut diagnostics,
                        SpawnDiagnostic::MissingEventAttribute { binding: i, name: name.clone() },
                    );
                }
            }

            // Never send an unnamed default event.
            if runtime.event_id.is_none() && cfg.event_name.is_empty() {
                continue;
            }

            consumer.send_event(runtime.event_id, &runtime.scratch);
            sent += 1;
        }

        (sent, diagnostics)
    }
}
