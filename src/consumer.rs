//! Consumer interface - what a rendering effect must expose to receive spawn points.
//!
//! Property lookups are typed capability queries: a consumer says whether it has
//! a property of a given kind under a given name, then accepts the value.

use bevy::math::Vec2;

/// Resolved event identity. 0 means "no event".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EventId(pub u32);

impl EventId {
    pub const NONE: EventId = EventId(0);

    /// FNV-1a over the name bytes. Empty names resolve to NONE; a hash of 0 is bumped to 1.
    pub fn from_name(name: &str) -> Self {
        if name.is_empty() {
            return Self::NONE;
        }
        let mut hash: u32 = 0x811c_9dc5;
        for byte in name.bytes() {
            hash ^= byte as u32;
            hash = hash.wrapping_mul(0x0100_0193);
        }
        EventId(hash.max(1))
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

/// A rendering effect that reads the spawn point buffer and receives spawn events.
pub trait SpawnConsumer {
    /// Device buffer handle type this consumer can bind.
    type Buffer;
    /// Reusable event payload object.
    type Scratch;

    fn has_buffer_property(&self, name: &str) -> bool;
    fn set_buffer_property(&mut self, name: &str, buffer: &Self::Buffer);

    fn has_int_property(&self, name: &str) -> bool;
    fn set_int_property(&mut self, name: &str, value: u32);

    fn has_float_property(&self, name: &str) -> bool;
    fn set_float_property(&mut self, name: &str, value: f32);

    fn has_vector2_property(&self, name: &str) -> bool;
    fn set_vector2_property(&mut self, name: &str, value: Vec2);

    /// None if the consumer cannot build event payloads; the binding stays inert.
    fn create_event_attribute(&mut self) -> Option<Self::Scratch>;
    fn attribute_has_int(&self, scratch: &Self::Scratch, name: &str) -> bool;
    fn attribute_set_int(&self, scratch: &mut Self::Scratch, name: &str, value: u32);

    fn send_event(&mut self, event: EventId, scratch: &Self::Scratch);
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    use crate::gpu::testing::SpyHandle;

    /// A sent event with the payload as it was at send time.
    #[derive(Clone, Debug, PartialEq)]
    pub struct SentEvent {
        pub event: EventId,
        pub payload: HashMap<String, u32>,
    }

    #[derive(Default, Debug)]
    pub struct ConsumerLog {
        pub buffers: HashMap<String, SpyHandle>,
        pub ints: HashMap<String, u32>,
        pub floats: HashMap<String, f32>,
        pub vectors: HashMap<String, Vec2>,
        pub scratch_created: usize,
        pub events: Vec<SentEvent>,
    }

    /// Consumer spy. Exposes only the names it was built with.
    #[derive(Clone, Default)]
    pub struct RecordingConsumer {
        pub buffer_props: HashSet<String>,
        pub int_props: HashSet<String>,
        pub float_props: HashSet<String>,
        pub vector_props: HashSet<String>,
        pub attributes: HashSet<String>,
        pub no_scratch: bool,
        pub log: Arc<Mutex<ConsumerLog>>,
    }

    fn names(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    impl RecordingConsumer {
        /// Exposes every default property and attribute.
        pub fn full() -> Self {
            use crate::constants::*;
            Self {
                buffer_props: names(&[BUFFER_PROPERTY]),
                int_props: names(&[COUNT_PROPERTY]),
                float_props: names(&[LIFETIME_PROPERTY, FADE_OUT_PROPERTY, PARTICLE_SIZE_PROPERTY]),
                vector_props: names(&[GROUND_SIZE_PROPERTY]),
                attributes: names(&[SPAWN_COUNT_ATTRIBUTE, SLOT_ID_ATTRIBUTE]),
                ..Default::default()
            }
        }

        pub fn with_attributes(mut self, list: &[&str]) -> Self {
            self.attributes = names(list);
            self
        }

        pub fn events(&self) -> Vec<SentEvent> {
            self.log.lock().unwrap().events.clone()
        }
    }

    impl SpawnConsumer for RecordingConsumer {
        type Buffer = SpyHandle;
        type Scratch = HashMap<String, u32>;

        fn has_buffer_property(&self, name: &str) -> bool {
            self.buffer_props.contains(name)
        }

        fn set_buffer_property(&mut self, name: &str, buffer: &SpyHandle) {
            self.log.lock().unwrap().buffers.insert(name.into(), *buffer);
        }

        fn has_int_property(&self, name: &str) -> bool {
            self.int_props.contains(name)
        }

        fn set_int_property(&mut self, name: &str, value: u32) {
            self.log.lock().unwrap().ints.insert(name.into(), value);
        }

        fn has_float_property(&self, name: &str) -> bool {
            self.float_props.contains(name)
        }

        fn set_float_property(&mut self, name: &str, value: f32) {
            self.log.lock().unwrap().floats.insert(name.into(), value);
        }

        fn has_vector2_property(&self, name: &str) -> bool {
            self.vector_props.contains(name)
        }

        fn set_vector2_property(&mut self, name: &str, value: Vec2) {
            self.log.lock().unwrap().vectors.insert(name.into(), value);
        }

        fn create_event_attribute(&mut self) -> Option<Self::Scratch> {
            if self.no_scratch {
                return None;
            }
            self.log.lock().unwrap().scratch_created += 1;
            Some(HashMap::new())
        }

        fn attribute_has_int(&self, _scratch: &Self::Scratch, name: &str) -> bool {
            self.attributes.contains(name)
        }

        fn attribute_set_int(&self, scratch: &mut Self::Scratch, name: &str, value: u32) {
            scratch.insert(name.into(), value);
        }

        fn send_event(&mut self, event: EventId, scratch: &Self::Scratch) {
            self.log.lock().unwrap().events.push(SentEvent {
                event,
                payload: scratch.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_resolves_to_none() {
        assert!(EventId::from_name("").is_none());
    }

    #[test]
    fn event_ids_are_stable_and_distinct() {
        let a = EventId::from_name("SpawnOnce");
        assert_eq!(a, EventId::from_name("SpawnOnce"));
        assert!(!a.is_none());
        assert_ne!(a, EventId::from_name("SpawnTwice"));
    }
}
