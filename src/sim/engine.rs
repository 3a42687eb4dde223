//! Grid that owns participants and drives ticks and link transfers.

use tracing::{debug, info};

use crate::devices::{DeviceContext, Participant};
use crate::energy::{EnergyAmount, transfer};

use super::clock::Clock;
use super::snapshot::{Snapshot, SnapshotEntry, SnapshotError};
use super::types::{Link, SimConfig, StepResult};

/// Simulation grid owning every participant and the links between them.
///
/// Participants are heterogeneous trait objects addressed by insertion index
/// or by unique name. The grid holds them exclusively and runs every transfer
/// sequentially, which is what the simulate/commit protocol needs: nothing
/// touches a participant between its probe and its commit.
pub struct Grid {
    config: SimConfig,
    names: Vec<String>,
    participants: Vec<Box<dyn Participant>>,
    links: Vec<Link>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            names: Vec::new(),
            participants: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Adds a participant and returns its index.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already in use.
    pub fn add(&mut self, name: impl Into<String>, participant: Box<dyn Participant>) -> usize {
        let name = name.into();
        assert!(
            self.index_of(&name).is_none(),
            "duplicate participant name \"{name}\""
        );
        self.names.push(name);
        self.participants.push(participant);
        self.participants.len() - 1
    }

    /// Declares a link transferring up to `rate` units per step.
    ///
    /// Links run in declaration order.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range or both are the same.
    pub fn link(&mut self, source: usize, destination: usize, rate: EnergyAmount) -> usize {
        assert!(source < self.participants.len(), "unknown source {source}");
        assert!(
            destination < self.participants.len(),
            "unknown destination {destination}"
        );
        assert_ne!(source, destination, "a participant cannot link to itself");
        self.links.push(Link {
            source,
            destination,
            rate,
        });
        self.links.len() - 1
    }

    /// Looks up a participant index by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Returns the named participant.
    pub fn participant(&self, name: &str) -> Option<&dyn Participant> {
        self.index_of(name).map(|i| self.participants[i].as_ref())
    }

    /// Iterates over `(name, participant)` in insertion order.
    pub fn participants(&self) -> impl Iterator<Item = (&str, &dyn Participant)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.participants.iter().map(|p| p.as_ref()))
    }

    /// Returns the declared links.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Labels each link as `source->destination`, in declaration order.
    pub fn link_labels(&self) -> Vec<String> {
        self.links
            .iter()
            .map(|l| format!("{}->{}", self.names[l.source], self.names[l.destination]))
            .collect()
    }

    /// Returns a reference to the simulation configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Energy currently held across all participants, saturating at
    /// `EnergyAmount::MAX`.
    pub fn total_stored(&self) -> EnergyAmount {
        self.participants
            .iter()
            .fold(0, |total: EnergyAmount, p| total.saturating_add(p.energy()))
    }

    /// Executes one timestep and returns its record.
    ///
    /// Every participant ticks first (production and consumption), then each
    /// link transfers once, in declaration order. Totals in the record
    /// saturate at `EnergyAmount::MAX`.
    pub fn step(&mut self, context: &DeviceContext) -> StepResult {
        let mut generated: EnergyAmount = 0;
        let mut consumed: EnergyAmount = 0;
        let mut unmet: EnergyAmount = 0;
        for participant in &mut self.participants {
            participant.tick(context);
            generated = generated.saturating_add(participant.last_generated());
            consumed = consumed.saturating_add(participant.last_consumed());
            unmet = unmet.saturating_add(participant.last_unmet());
        }

        let stored_before_transfers = self.total_stored();
        let mut link_moved = Vec::with_capacity(self.links.len());
        for link in &self.links {
            let (source, destination) =
                pair_mut(&mut self.participants, link.source, link.destination);
            link_moved.push(transfer(source.as_mut(), destination.as_mut(), link.rate));
        }
        let stored = self.total_stored();
        debug_assert_eq!(stored, stored_before_transfers, "transfers must conserve energy");

        let transferred = link_moved
            .iter()
            .fold(0, |total: EnergyAmount, &m| total.saturating_add(m));
        debug!(
            timestep = context.timestep,
            generated, consumed, unmet, transferred, stored, "step complete"
        );

        StepResult {
            timestep: context.timestep,
            time_hr: context.timestep as f32 * self.config.dt_hours,
            generated,
            consumed,
            unmet,
            transferred,
            stored,
            link_moved,
        }
    }

    /// Executes all timesteps and returns the complete step record vector.
    pub fn run(&mut self) -> Vec<StepResult> {
        let mut clock = Clock::for_config(&self.config);
        info!(
            steps = clock.remaining(),
            participants = self.participants.len(),
            links = self.links.len(),
            "grid run starting"
        );

        let mut results = Vec::with_capacity(clock.remaining());
        clock.run(|context| results.push(self.step(context)));

        info!(stored = self.total_stored(), "grid run finished");
        results
    }

    /// Captures every participant's held amount.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entries: self
                .participants()
                .map(|(name, p)| SnapshotEntry {
                    name: name.to_string(),
                    energy: p.energy(),
                })
                .collect(),
        }
    }

    /// Restores held amounts from a snapshot through `set_energy`.
    ///
    /// Participants missing from the snapshot keep their current amount.
    /// Nothing is written unless every entry names a known participant.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::UnknownParticipant`] for the first entry whose
    /// name is not in the grid.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let targets = snapshot
            .entries
            .iter()
            .map(|entry| {
                self.index_of(&entry.name)
                    .map(|i| (i, entry.energy))
                    .ok_or_else(|| SnapshotError::UnknownParticipant(entry.name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (i, energy) in targets {
            self.participants[i].set_energy(energy);
        }
        info!(entries = snapshot.entries.len(), "grid restored from snapshot");
        Ok(())
    }
}

/// Borrows two distinct elements of a slice mutably.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    assert_ne!(a, b);
    if a < b {
        let (head, tail) = items.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}
