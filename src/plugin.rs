//! Bevy plugin - drives a `SpawnOrchestrator` from Bevy input, window and time.
//!
//! - Startup: allocate the store with the allocator resource, bind consumers
//! - Update: Space → random spawn, left click → spawn under the cursor
//! - Last: release the device buffer on AppExit

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::marker::PhantomData;

use crate::consumer::SpawnConsumer;
use crate::gpu::{DeviceAllocator, DeviceBuffer};
use crate::orchestrator::{FrameInput, SpawnOrchestrator};

/// The orchestrator as a Bevy resource. Insert it before the plugin's Startup runs.
#[derive(Resource)]
pub struct SpawnPoints<D, C>(pub SpawnOrchestrator<D, C>)
where
    D: DeviceBuffer + Send + Sync + 'static,
    C: SpawnConsumer + Send + Sync + 'static,
    C::Scratch: Send + Sync;

pub struct SpawnPointsPlugin<A, C> {
    _marker: PhantomData<fn() -> (A, C)>,
}

impl<A, C> Default for SpawnPointsPlugin<A, C> {
    fn default() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<A, C> Plugin for SpawnPointsPlugin<A, C>
where
    A: DeviceAllocator + Resource,
    A::Buffer: Send + Sync + 'static,
    C: SpawnConsumer<Buffer = <A::Buffer as DeviceBuffer>::Handle> + Send + Sync + 'static,
    C::Scratch: Send + Sync,
{
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, start_spawn_points::<A, C>)
            .add_systems(Update, spawn_from_input::<A::Buffer, C>)
            .add_systems(Last, stop_on_exit::<A::Buffer, C>);
        info!("Spawn points plugin initialized");
    }
}

fn start_spawn_points<A, C>(allocator: Res<A>, points: Option<ResMut<SpawnPoints<A::Buffer, C>>>)
where
    A: DeviceAllocator + Resource,
    A::Buffer: Send + Sync + 'static,
    C: SpawnConsumer<Buffer = <A::Buffer as DeviceBuffer>::Handle> + Send + Sync + 'static,
    C::Scratch: Send + Sync,
{
    let Some(mut points) = points else {
        warn!("SpawnPoints resource missing - spawn points disabled");
        return;
    };
    let diagnostics = points.0.start(&*allocator);
    if !diagnostics.is_empty() {
        warn!("Spawn points bound with {} diagnostics", diagnostics.len());
    }
}

/// Gather this frame's signals and hand them to the orchestrator.
fn spawn_from_input<D, C>(
    points: Option<ResMut<SpawnPoints<D, C>>>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
) where
    D: DeviceBuffer + Send + Sync + 'static,
    C: SpawnConsumer<Buffer = D::Handle> + Send + Sync + 'static,
    C::Scratch: Send + Sync,
{
    let Some(mut points) = points else { return };

    let mut input = FrameInput {
        random_spawn: keys.is_some_and(|k| k.just_pressed(KeyCode::Space)),
        now: time.elapsed_secs(),
        ..default()
    };

    let clicked = mouse.is_some_and(|m| m.just_pressed(MouseButton::Left));
    if clicked {
        // Window cursor is top-left origin; the mapper wants bottom-left.
        if let Ok(window) = windows.single() {
            if let Some(cursor) = window.cursor_position() {
                input.pointer_spawn = true;
                input.viewport = Vec2::new(window.width(), window.height());
                input.pointer = Vec2::new(cursor.x, window.height() - cursor.y);
            }
        }
    }

    if !input.random_spawn && !input.pointer_spawn {
        return;
    }
    points.0.tick(&input, &mut rand::rng());
}

fn stop_on_exit<D, C>(mut exits: MessageReader<AppExit>, points: Option<ResMut<SpawnPoints<D, C>>>)
where
    D: DeviceBuffer + Send + Sync + 'static,
    C: SpawnConsumer<Buffer = D::Handle> + Send + Sync + 'static,
    C::Scratch: Send + Sync,
{
    if exits.read().next().is_none() {
        return;
    }
    if let Some(mut points) = points {
        points.0.stop();
    }
}
