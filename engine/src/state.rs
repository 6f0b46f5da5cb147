//! Reader/writer lock around the authoritative world.

use std::{
    ops::Deref,
    sync::{PoisonError, RwLock, RwLockReadGuard},
};

use maze_chase_world::World;

/// World guarded by a reader/writer lock with scoped acquisition helpers.
///
/// The world is plain data, so a panic while a guard was held cannot leave it
/// half-borrowed. Poisoned locks are therefore recovered instead of propagated.
#[derive(Debug, Default)]
pub struct SharedState {
    world: RwLock<World>,
}

impl SharedState {
    /// Wraps the provided world.
    #[must_use]
    pub fn new(world: World) -> Self {
        Self {
            world: RwLock::new(world),
        }
    }

    /// Runs `f` with shared access to the world and returns its result.
    pub fn with_read<T>(&self, f: impl FnOnce(&World) -> T) -> T {
        let snapshot = self.read();
        f(&snapshot)
    }

    /// Runs `f` with exclusive access to the world and returns its result.
    pub fn with_write<T>(&self, f: impl FnOnce(&mut World) -> T) -> T {
        let mut world = self
            .world
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut world)
    }

    /// Acquires a shared lock that is released when the snapshot is dropped.
    pub fn read(&self) -> Snapshot<'_> {
        Snapshot {
            guard: self.world.read().unwrap_or_else(PoisonError::into_inner),
        }
    }
}

/// Read-locked view of the world; ticks wait until it is dropped.
#[derive(Debug)]
pub struct Snapshot<'a> {
    guard: RwLockReadGuard<'a, World>,
}

impl Deref for Snapshot<'_> {
    type Target = World;

    fn deref(&self) -> &World {
        &self.guard
    }
}
