use std::io::Write;

use crate::core::WorkloadPoint;
use crate::formatting::{percent, predictive};
use crate::io::output::{EvaluationReport, OutputWriter};
use crate::optimizer::PolicyOutcome;
use crate::sweep::SweepResult;
use crate::workload::StaffingStatus;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_evaluation(&mut self, report: &EvaluationReport<'_>) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_current(report.current, report.staffing)?;
        self.write_recommendations(report)?;
        if let Some(sweep) = report.sweep {
            writeln!(self.writer, "## Threshold Sweep")?;
            writeln!(self.writer)?;
            self.write_sweep_table(sweep)?;
        }
        Ok(())
    }

    fn write_sweep(&mut self, sweep: &SweepResult) -> anyhow::Result<()> {
        self.write_sweep_table(sweep)
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &EvaluationReport<'_>) -> anyhow::Result<()> {
        let setting = &report.request.setting;
        writeln!(self.writer, "# Sepsis Alert Threshold Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Version: {}", report.version)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Setting: {} beds, {:.1} day average stay, {:.1} min per alert, {:.1} staff hours/day, prevalence {}",
            setting.bed_count(),
            setting.average_stay_days(),
            setting.minutes_per_alert(),
            setting.available_staff_hours(),
            percent(report.request.prevalence)
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_current(
        &mut self,
        point: &WorkloadPoint,
        staffing: &StaffingStatus,
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "## Current Threshold ({:.2})", point.threshold())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Sensitivity | {:.2} |", point.sensitivity())?;
        writeln!(self.writer, "| Specificity | {:.2} |", point.specificity())?;
        writeln!(self.writer, "| PPV | {} |", predictive(point.ppv(), 2))?;
        writeln!(self.writer, "| NPV | {} |", predictive(point.npv(), 2))?;
        writeln!(self.writer, "| Alert rate | {} |", percent(point.alert_rate()))?;
        writeln!(self.writer, "| Alerts per day | {:.1} |", point.alerts_per_day())?;
        writeln!(
            self.writer,
            "| Staff hours needed | {:.1} |",
            point.staff_hours_needed()
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", staffing_line(staffing))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendations(&mut self, report: &EvaluationReport<'_>) -> anyhow::Result<()> {
        writeln!(self.writer, "## Recommended Thresholds")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Policy | Threshold | Sensitivity | Specificity | Staff hours |"
        )?;
        writeln!(
            self.writer,
            "|--------|-----------|-------------|-------------|-------------|"
        )?;
        for outcome in report.recommendations.iter() {
            match outcome {
                PolicyOutcome::Recommended(r) => writeln!(
                    self.writer,
                    "| {} | {:.2} | {:.2} | {:.2} | {:.1} |",
                    r.policy,
                    r.threshold,
                    r.metrics.sensitivity(),
                    r.metrics.specificity(),
                    r.metrics.staff_hours_needed()
                )?,
                PolicyOutcome::Infeasible(i) => {
                    writeln!(self.writer, "| {} | _{}_ | | | |", i.policy, i.reason)?
                }
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_sweep_table(&mut self, sweep: &SweepResult) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "| Threshold | Sensitivity | Specificity | PPV | NPV | Alert rate | Alerts/day | Staff hours |"
        )?;
        writeln!(
            self.writer,
            "|-----------|-------------|-------------|-----|-----|------------|------------|-------------|"
        )?;
        for p in sweep {
            writeln!(
                self.writer,
                "| {:.4} | {:.4} | {:.4} | {} | {} | {:.4} | {:.2} | {:.2} |",
                p.threshold(),
                p.sensitivity(),
                p.specificity(),
                predictive(p.ppv(), 4),
                predictive(p.npv(), 4),
                p.alert_rate(),
                p.alerts_per_day(),
                p.staff_hours_needed()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

fn staffing_line(staffing: &StaffingStatus) -> String {
    match staffing {
        StaffingStatus::Feasible {
            spare_hours,
            utilization,
        } => format!(
            "**Feasible**: {spare_hours:.1} staff hours to spare ({} utilization)",
            percent(*utilization)
        ),
        StaffingStatus::Overloaded {
            excess_hours,
            utilization,
        } => format!(
            "**Over capacity**: alert burden exceeds available staff hours by {excess_hours:.1} hours ({} utilization)",
            percent(*utilization)
        ),
    }
}
