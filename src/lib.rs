//! Spawn Points - fixed-capacity ring of spawn positions shared with GPU effects.
//!
//! Host mirror + device structured buffer, kept in sync one slot at a time.
//! Every write is followed by a per-consumer spawn event naming the slot.

// ============================================================================
// MODULES
// ============================================================================

pub mod binding;
pub mod broadcast;
pub mod constants;
pub mod consumer;
pub mod coord;
pub mod diagnostics;
pub mod gpu;
pub mod orchestrator;
pub mod plugin;
pub mod settings;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use binding::{BindingConfig, ConsumerBinding, EffectParams};
pub use broadcast::EventBroadcaster;
pub use consumer::{EventId, SpawnConsumer};
pub use coord::{WorldRange, ground_extent, screen_to_world};
pub use diagnostics::SpawnDiagnostic;
pub use gpu::ring::StoreLayout;
pub use gpu::{DeviceAllocator, DeviceBuffer, RingBufferStore, SpawnPoint, WgpuAllocator, WgpuSpawnBuffer};
pub use orchestrator::{FrameInput, SpawnOrchestrator};
pub use plugin::{SpawnPoints, SpawnPointsPlugin};
pub use settings::{SpawnSettings, load_settings, save_settings};
