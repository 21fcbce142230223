//! Constants - Buffer layout and default binding names

/// Bytes per spawn point on the device: vec4<f32>.
pub const STRIDE: usize = 16;

/// Default ring capacity (spawn points kept alive on the device).
pub const DEFAULT_CAPACITY: usize = 1024;

/// Spacing along X between seeded slots.
pub const SEED_STEP: f32 = 0.25;

/// Seeded slots sit this far below the bottom of the world range (off-stage).
pub const SEED_Y_OFFSET: f32 = 5.5;

// Static effect parameters pushed once at bind time
pub const DEFAULT_LIFETIME: f32 = 25.0;
pub const DEFAULT_FADE_OUT_DURATION: f32 = 5.0;
pub const DEFAULT_PARTICLE_SIZE: f32 = 1.5;

// Consumer property names
pub const BUFFER_PROPERTY: &str = "SpawnPoints";
pub const COUNT_PROPERTY: &str = "SpawnPointsCount";
pub const GROUND_SIZE_PROPERTY: &str = "GroundSize";
pub const LIFETIME_PROPERTY: &str = "Lifetime";
pub const FADE_OUT_PROPERTY: &str = "FadeOutDuration";
pub const PARTICLE_SIZE_PROPERTY: &str = "ParticlesSize";

// Event + payload attribute names
pub const SPAWN_EVENT: &str = "SpawnOnce";
pub const SPAWN_COUNT_ATTRIBUTE: &str = "OnceSpawnCount";
pub const SLOT_ID_ATTRIBUTE: &str = "SpawnBufferId";
