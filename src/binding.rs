//! Consumer bindings - per-consumer configuration plus the runtime state built at bind time.
//!
//! `BindingConfig` is plain data (serialized with the settings).
//! `BindingRuntime` is created by `ConsumerBinding::bind` and reused for every event.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::consumer::{EventId, SpawnConsumer};
use crate::diagnostics::{SpawnDiagnostic, report};
use crate::gpu::{DeviceBuffer, RingBufferStore};

/// Names and event settings for one consumer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    // Properties pushed at bind time
    pub buffer_property: String,
    pub count_property: String,
    pub ground_size_property: String,
    // Optional float parameters, empty name = don't push
    pub lifetime_property: String,
    pub fade_out_property: String,
    pub particle_size_property: String,
    // Event
    pub event_name: String,
    pub spawn_count_attribute: String,
    pub slot_id_attribute: String,
    pub send_event: bool,
    pub payload_count: u32,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            buffer_property: BUFFER_PROPERTY.into(),
            count_property: COUNT_PROPERTY.into(),
            ground_size_property: GROUND_SIZE_PROPERTY.into(),
            lifetime_property: LIFETIME_PROPERTY.into(),
            fade_out_property: FADE_OUT_PROPERTY.into(),
            particle_size_property: PARTICLE_SIZE_PROPERTY.into(),
            event_name: SPAWN_EVENT.into(),
            spawn_count_attribute: SPAWN_COUNT_ATTRIBUTE.into(),
            slot_id_attribute: SLOT_ID_ATTRIBUTE.into(),
            send_event: true,
            payload_count: 1,
        }
    }
}

/// Static effect parameters shared by every binding of one store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectParams {
    pub lifetime: f32,
    pub fade_out_duration: f32,
    pub particle_size: f32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            lifetime: DEFAULT_LIFETIME,
            fade_out_duration: DEFAULT_FADE_OUT_DURATION,
            particle_size: DEFAULT_PARTICLE_SIZE,
        }
    }
}

/// Built once per bind, overwritten on every dispatch.
pub struct BindingRuntime<S> {
    pub event_id: EventId,
    pub scratch: S,
}

pub struct ConsumerBinding<C: SpawnConsumer> {
    pub config: BindingConfig,
    /// None = inert binding.
    pub consumer: Option<C>,
    pub(crate) runtime: Option<BindingRuntime<C::Scratch>>,
}

impl<C: SpawnConsumer> ConsumerBinding<C> {
    pub fn new(config: BindingConfig, consumer: Option<C>) -> Self {
        Self {
            config,
            consumer,
            runtime: None,
        }
    }

    /// Resolve the event, create the payload object, and push buffer, count,
    /// ground size and float parameters into whichever properties the consumer has.
    /// Missing properties are reported, never fatal. Rebinding replaces the runtime state.
    pub fn bind<D>(
        &mut self,
        index: usize,
        store: &RingBufferStore<D>,
        params: &EffectParams,
    ) -> Vec<SpawnDiagnostic>
    where
        D: DeviceBuffer,
        C: SpawnConsumer<Buffer = D::Handle>,
    {
        let mut diagnostics = Vec::new();
        self.runtime = None;

        let cfg = &self.config;
        let Some(consumer) = self.consumer.as_mut() else {
            report(&mut diagnostics, SpawnDiagnostic::NoConsumer { binding: index });
            return diagnostics;
        };

        // Event identity + payload scratch
        let event_id = EventId::from_name(&cfg.event_name);
        if event_id.is_none() {
            report(&mut diagnostics, SpawnDiagnostic::EmptyEventName { binding: index });
        }

        match consumer.create_event_attribute() {
            Some(scratch) => {
                for name in [&cfg.spawn_count_attribute, &cfg.slot_id_attribute] {
                    if !name.is_empty() && !consumer.attribute_has_int(&scratch, name) {
                        report(
                            &mut diagnostics,
                            SpawnDiagnostic::MissingEventAttribute { binding: index, name: name.clone() },
                        );
                    }
                }
                self.runtime = Some(BindingRuntime { event_id, scratch });
            }
            None => report(&mut diagnostics, SpawnDiagnostic::NoScratch { binding: index }),
        }

        // Buffer + layout properties
        if let Some(handle) = store.device_handle() {
            if consumer.has_buffer_property(&cfg.buffer_property) {
                consumer.set_buffer_property(&cfg.buffer_property, &handle);
            } else {
                report(
                    &mut diagnostics,
                    SpawnDiagnostic::MissingBufferProperty { binding: index, name: cfg.buffer_property.clone() },
                );
            }
        }

        if consumer.has_int_property(&cfg.count_property) {
            consumer.set_int_property(&cfg.count_property, store.capacity_u32());
        } else {
            report(
                &mut diagnostics,
                SpawnDiagnostic::MissingIntProperty { binding: index, name: cfg.count_property.clone() },
            );
        }

        if consumer.has_vector2_property(&cfg.ground_size_property) {
            consumer.set_vector2_property(&cfg.ground_size_property, store.ground_extent());
        } else {
            report(
                &mut diagnostics,
                SpawnDiagnostic::MissingVector2Property { binding: index, name: cfg.ground_size_property.clone() },
            );
        }

        let floats = [
            (&cfg.lifetime_property, params.lifetime),
            (&cfg.fade_out_property, params.fade_out_duration),
            (&cfg.particle_size_property, params.particle_size),
        ];
        for (name, value) in floats {
            if name.is_empty() {
                continue;
            }
            if consumer.has_float_property(name) {
                consumer.set_float_property(name, value);
            } else {
                report(
                    &mut diagnostics,
                    SpawnDiagnostic::MissingFloatProperty { binding: index, name: name.clone() },
                );
            }
        }

        diagnostics
    }

    /// Inert bindings never dispatch: no consumer, or no payload object.
    pub fn is_inert(&self) -> bool {
        self.consumer.is_none() || self.runtime.is_none()
    }

    pub fn event_id(&self) -> EventId {
        self.runtime.as_ref().map(|r| r.event_id).unwrap_or(EventId::NONE)
    }
}
