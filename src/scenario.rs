//! Construction of a runnable [`Grid`] from a validated scenario.

use tracing::debug;

use crate::config::{ConfigError, ParticipantConfig, ScenarioConfig};
use crate::devices::{Buffer, Conduit, Consumer, Generator, Participant};
use crate::energy::EnergyAmount;
use crate::sim::engine::Grid;
use crate::sim::types::SimConfig;

/// Seed stride between participants so their noise streams are uncorrelated.
const PARTICIPANT_SEED_STRIDE: u64 = 57;

/// Validates `cfg` and builds the grid it describes.
///
/// Participants are added in declaration order and each gets its own seed
/// derived from `simulation.seed`.
///
/// # Errors
///
/// Returns every validation error if the scenario is invalid.
pub fn build_grid(cfg: &ScenarioConfig) -> Result<Grid, Vec<ConfigError>> {
    let errors = cfg.validate();
    if !errors.is_empty() {
        return Err(errors);
    }

    let s = &cfg.simulation;
    let mut grid = Grid::new(SimConfig::new(s.steps_per_day, s.days, s.seed));

    for (i, p) in cfg.participants.iter().enumerate() {
        let seed = s
            .seed
            .wrapping_add(PARTICIPANT_SEED_STRIDE.wrapping_mul(i as u64 + 1));
        grid.add(p.name(), build_participant(p, seed));
    }

    for l in &cfg.links {
        // Validation guarantees both names resolve.
        if let (Some(source), Some(destination)) =
            (grid.index_of(&l.source), grid.index_of(&l.destination))
        {
            grid.link(source, destination, l.rate);
        }
    }

    debug!(
        participants = cfg.participants.len(),
        links = cfg.links.len(),
        "grid built from scenario"
    );
    Ok(grid)
}

fn build_participant(p: &ParticipantConfig, seed: u64) -> Box<dyn Participant> {
    match p {
        ParticipantConfig::Buffer {
            capacity,
            energy,
            max_input,
            max_output,
            ..
        } => Box::new(Buffer::with_rates(
            *capacity,
            *energy,
            max_input.unwrap_or(EnergyAmount::MAX),
            max_output.unwrap_or(EnergyAmount::MAX),
        )),
        ParticipantConfig::Generator {
            rate,
            capacity,
            noise_std,
            sunrise_idx,
            sunset_idx,
            ..
        } => {
            let generator = Generator::new(*rate, *capacity, *noise_std, seed);
            let generator = match (sunrise_idx, sunset_idx) {
                (Some(rise), Some(set)) => generator.with_daylight(*rise, *set),
                _ => generator,
            };
            Box::new(generator)
        }
        ParticipantConfig::Consumer {
            base,
            amp,
            phase_rad,
            noise_std,
            capacity,
            ..
        } => Box::new(Consumer::new(
            *base, *amp, *phase_rad, *noise_std, *capacity, seed,
        )),
        ParticipantConfig::Conduit {
            capacity,
            throughput,
            ..
        } => Box::new(Conduit::new(*capacity, *throughput)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_every_preset() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name).expect("preset should load");
            let grid = build_grid(&cfg).expect("preset should build");
            assert_eq!(grid.participants().count(), cfg.participants.len());
            assert_eq!(grid.links().len(), cfg.links.len());
        }
    }

    #[test]
    fn participant_kinds_follow_config() {
        let grid = build_grid(&ScenarioConfig::baseline()).expect("baseline should build");
        let kinds: Vec<&str> = grid.participants().map(|(_, p)| p.device_type()).collect();
        assert_eq!(kinds, vec!["Generator", "Conduit", "Buffer", "Consumer"]);
        assert_eq!(grid.participant("battery").map(|p| p.energy()), Some(250));
    }

    #[test]
    fn oversized_run_is_rejected_before_building() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.days = usize::MAX / 2;
        let errors = build_grid(&cfg).err().unwrap_or_default();
        assert!(errors.iter().any(|e| e.field == "simulation.days"));
    }

    #[test]
    fn invalid_scenario_is_rejected_with_all_errors() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.days = 0;
        cfg.links[0].rate = 0;
        let errors = build_grid(&cfg).err().unwrap_or_default();
        assert_eq!(errors.len(), 2);
    }
}
