use tracing::{trace, warn};

use super::{Energy, EnergyAmount};

/// Moves up to `requested` units from `source` into `destination`.
///
/// Runs in two phases. The simulate phase asks the source what it would give
/// and the destination what it would take of that offer; neither is mutated.
/// The commit phase then withdraws exactly the accepted amount and deposits
/// it. Nothing is ever rolled back because nothing is withdrawn that the
/// destination has not already agreed to take.
///
/// Returns the amount that changed hands, which may be less than requested or
/// zero. A non-positive request, a source that cannot output, or a destination
/// that cannot input short-circuits to 0 without calling any mutation
/// operation.
///
/// Both participants must not be touched by anything else for the duration of
/// the call.
///
/// # Examples
///
/// ```
/// use fl_energy::devices::Buffer;
/// use fl_energy::energy::{Energy, transfer};
///
/// let mut source = Buffer::new(100, 100);
/// let mut destination = Buffer::new(50, 0);
///
/// assert_eq!(transfer(&mut source, &mut destination, 1000), 50);
/// assert_eq!(source.energy(), 50);
/// assert_eq!(destination.energy(), 50);
/// ```
pub fn transfer<S, D>(source: &mut S, destination: &mut D, requested: EnergyAmount) -> EnergyAmount
where
    S: Energy + ?Sized,
    D: Energy + ?Sized,
{
    if requested <= 0 || !source.can_output_energy() || !destination.can_input_energy() {
        return 0;
    }

    let offered = source.output_energy(requested, true);
    let accepted = destination.input_energy(offered, true);
    trace!(requested, offered, accepted, "transfer simulated");
    if accepted <= 0 {
        return 0;
    }

    let withdrawn = source.output_energy(accepted, false);
    let deposited = destination.input_energy(withdrawn, false);
    if withdrawn != accepted || deposited != withdrawn {
        warn!(
            accepted,
            withdrawn, deposited, "participant commit diverged from its simulation"
        );
    }
    deposited
}
