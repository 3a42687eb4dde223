//! Post-hoc run summary computed from step results.

use std::fmt;

use crate::energy::EnergyAmount;

use super::types::StepResult;

/// Aggregate figures derived from a complete grid run.
///
/// Computed post-hoc from `Vec<StepResult>` so the summary always agrees with
/// the per-step records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Number of steps summarised.
    pub steps: usize,
    /// Energy created across the run.
    pub total_generated: EnergyAmount,
    /// Energy used up across the run.
    pub total_consumed: EnergyAmount,
    /// Demand left unserved across the run.
    pub total_unmet: EnergyAmount,
    /// Sum of all link transfers across the run.
    pub total_transferred: EnergyAmount,
    /// Percentage of demand that was served.
    pub served_pct: f32,
    /// Largest total held after any step.
    pub peak_stored: EnergyAmount,
    /// Total held after the last step.
    pub final_stored: EnergyAmount,
    /// Link-steps where a link moved nothing.
    pub idle_link_steps: usize,
}

impl RunReport {
    /// Summarises the complete step record vector.
    ///
    /// Energy totals saturate at `EnergyAmount::MAX`.
    pub fn from_results(results: &[StepResult]) -> Self {
        let Some(last) = results.last() else {
            return Self::default();
        };

        let mut report = Self {
            steps: results.len(),
            final_stored: last.stored,
            ..Self::default()
        };
        for r in results {
            report.total_generated = report.total_generated.saturating_add(r.generated);
            report.total_consumed = report.total_consumed.saturating_add(r.consumed);
            report.total_unmet = report.total_unmet.saturating_add(r.unmet);
            report.total_transferred = report.total_transferred.saturating_add(r.transferred);
            report.peak_stored = report.peak_stored.max(r.stored);
            report.idle_link_steps += r.link_moved.iter().filter(|&&m| m == 0).count();
        }

        let demand = report.total_consumed as f64 + report.total_unmet as f64;
        report.served_pct = if demand > 0.0 {
            (100.0 * report.total_consumed as f64 / demand) as f32
        } else {
            100.0
        };
        report
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Report ({} steps) ---", self.steps)?;
        writeln!(f, "Generated:         {}", self.total_generated)?;
        writeln!(f, "Consumed:          {}", self.total_consumed)?;
        writeln!(
            f,
            "Unmet demand:      {} ({:.1}% served)",
            self.total_unmet, self.served_pct
        )?;
        writeln!(f, "Transferred:       {}", self.total_transferred)?;
        writeln!(
            f,
            "Stored:            {} final, {} peak",
            self.final_stored, self.peak_stored
        )?;
        write!(f, "Idle link-steps:   {}", self.idle_link_steps)
    }
}
