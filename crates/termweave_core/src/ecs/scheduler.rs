//! # Frame Scheduler
//!
//! One `run` call is one tick: every phase in fixed order, systems inside
//! a phase in ascending priority, registration order breaking ties. The
//! ordering is fully deterministic run-to-run.
//!
//! # Failure semantics
//!
//! A failing system aborts the tick: its error propagates out of `run`
//! and the remaining systems and phases do not execute, cleanup included.
//! That is a deliberate simplicity trade for a single-threaded runtime -
//! the caller decides whether to tick again.

use tracing::{debug, trace};

use super::world::World;
use crate::error::CoreError;

/// The fixed, totally ordered stages of a frame.
///
/// Widgets register at documented relative priorities within a phase
/// (movement before collision before camera) and rely on this order.
#[repr(usize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Input dispatch: keyboard/mouse state into components.
    Input = 0,
    /// Timelines and transitions advance.
    Animation = 1,
    /// Simulation: movement, collision, widget logic.
    Update = 2,
    /// Size and position resolution.
    Layout = 3,
    /// Frame buffer production.
    Render = 4,
    /// End-of-frame bookkeeping and deferred destruction.
    Cleanup = 5,
}

impl Phase {
    /// Number of phases.
    pub const COUNT: usize = 6;

    /// All phases in execution order.
    pub const ORDER: [Self; Self::COUNT] = [
        Self::Input,
        Self::Animation,
        Self::Update,
        Self::Layout,
        Self::Render,
        Self::Cleanup,
    ];
}

/// A system: one unit of per-tick behavior.
///
/// Systems mutate the world directly and report failure through the
/// result; the per-tick delta is read from [`World::delta_time`].
pub type SystemFn = Box<dyn FnMut(&mut World) -> Result<(), CoreError>>;

/// Identifier of a registered system, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemId(u64);

impl SystemId {
    /// The registration sequence number behind this id.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

struct SystemEntry {
    priority: i32,
    /// Registration sequence number; the stable sort key's tiebreaker.
    seq: u64,
    run: SystemFn,
}

/// Phase-ordered, priority-sorted system executor.
pub struct Scheduler {
    phases: [Vec<SystemEntry>; Phase::COUNT],
    next_seq: u64,
    /// Set when a registration may have broken sort order.
    dirty: bool,
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phases: Default::default(),
            next_seq: 0,
            dirty: false,
        }
    }

    /// Registers a system in a phase at the given priority.
    ///
    /// Lower priority runs earlier. Systems with equal priority keep
    /// their registration order.
    pub fn register_system<F>(&mut self, phase: Phase, priority: i32, system: F) -> SystemId
    where
        F: FnMut(&mut World) -> Result<(), CoreError> + 'static,
    {
        let seq = self.next_seq;
        self.next_seq += 1;
        debug!(?phase, priority, seq, "system registered");

        self.phases[phase as usize].push(SystemEntry {
            priority,
            seq,
            run: Box::new(system),
        });
        self.dirty = true;
        SystemId(seq)
    }

    /// Registers a system at the default priority (0).
    pub fn add_system<F>(&mut self, phase: Phase, system: F) -> SystemId
    where
        F: FnMut(&mut World) -> Result<(), CoreError> + 'static,
    {
        self.register_system(phase, 0, system)
    }

    /// Number of registered systems across all phases.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.phases.iter().map(Vec::len).sum()
    }

    /// Executes one tick.
    ///
    /// Stamps `delta` into the world's frame clock first, so every system
    /// of this tick observes the same fresh value, then walks the phases.
    ///
    /// # Errors
    ///
    /// The first system error aborts the tick and is returned; remaining
    /// systems and phases do not run.
    pub fn run(&mut self, world: &mut World, delta: f32) -> Result<(), CoreError> {
        if self.dirty {
            for systems in &mut self.phases {
                // Ties resolve by registration order, explicitly.
                systems.sort_by_key(|entry| (entry.priority, entry.seq));
            }
            self.dirty = false;
        }

        world.begin_frame(delta);

        for phase in Phase::ORDER {
            let systems = &mut self.phases[phase as usize];
            if systems.is_empty() {
                continue;
            }
            trace!(?phase, count = systems.len(), "phase start");
            for entry in systems.iter_mut() {
                (entry.run)(world)?;
            }
        }
        Ok(())
    }

    /// Drops every registered system.
    pub fn reset(&mut self) {
        for systems in &mut self.phases {
            systems.clear();
        }
        self.dirty = false;
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
