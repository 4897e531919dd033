use comfy_table::{presets::UTF8_FULL, Cell, Table};
use std::io::Write;

use crate::core::WorkloadPoint;
use crate::formatting::{
    percent, predictive, ColoredFormatter, FormattingConfig, OutputFormatter,
};
use crate::io::output::{EvaluationReport, OutputWriter};
use crate::optimizer::PolicyOutcome;
use crate::sweep::SweepResult;
use crate::workload::StaffingStatus;

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: ColoredFormatter,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self {
            writer,
            formatter: ColoredFormatter::new(formatting),
        }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_evaluation(&mut self, report: &EvaluationReport<'_>) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}",
            self.formatter.header("Sepsis Alert Threshold Optimization")
        )?;
        writeln!(self.writer)?;
        self.write_current(report.current)?;
        self.write_staffing(report.staffing)?;
        self.write_recommendations(report)?;
        if let Some(sweep) = report.sweep {
            self.write_sweep(sweep)?;
        }
        Ok(())
    }

    fn write_sweep(&mut self, sweep: &SweepResult) -> anyhow::Result<()> {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec![
            "Threshold",
            "Sensitivity",
            "Specificity",
            "PPV",
            "NPV",
            "Alert rate",
            "Alerts/day",
            "Staff hours",
        ]);
        for p in sweep {
            table.add_row(vec![
                Cell::new(format!("{:.2}", p.threshold())),
                Cell::new(format!("{:.3}", p.sensitivity())),
                Cell::new(format!("{:.3}", p.specificity())),
                Cell::new(predictive(p.ppv(), 3)),
                Cell::new(predictive(p.npv(), 3)),
                Cell::new(format!("{:.3}", p.alert_rate())),
                Cell::new(format!("{:.1}", p.alerts_per_day())),
                Cell::new(format!("{:.1}", p.staff_hours_needed())),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_current(&mut self, point: &WorkloadPoint) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} {:.2}",
            self.formatter.bold("Threshold:"),
            point.threshold()
        )?;
        writeln!(
            self.writer,
            "  Sensitivity {:.2}  Specificity {:.2}  PPV {}  NPV {}",
            point.sensitivity(),
            point.specificity(),
            predictive(point.ppv(), 2),
            predictive(point.npv(), 2)
        )?;
        writeln!(
            self.writer,
            "  Alert rate {}  Alerts per day {:.1}  Staff hours needed {:.1}",
            percent(point.alert_rate()),
            point.alerts_per_day(),
            point.staff_hours_needed()
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_staffing(&mut self, staffing: &StaffingStatus) -> anyhow::Result<()> {
        let line = match staffing {
            StaffingStatus::Feasible { spare_hours, .. } => self.formatter.success(&format!(
                "✓ Current threshold is feasible with {spare_hours:.1} staff hours to spare"
            )),
            StaffingStatus::Overloaded { excess_hours, .. } => self.formatter.error(&format!(
                "✗ Alert burden exceeds available staff hours by {excess_hours:.1} hours"
            )),
        };
        writeln!(self.writer, "{line}")?;
        writeln!(
            self.writer,
            "  Staff utilization: {}",
            percent(staffing.utilization())
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendations(&mut self, report: &EvaluationReport<'_>) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", self.formatter.header("Recommended Thresholds"))?;
        for outcome in report.recommendations.iter() {
            match outcome {
                PolicyOutcome::Recommended(r) => {
                    writeln!(
                        self.writer,
                        "  {:<24} {}",
                        r.policy.label(),
                        self.formatter.success(&format!("{:.2}", r.threshold))
                    )?;
                    writeln!(
                        self.writer,
                        "  {:<24} sensitivity {:.2}, specificity {:.2}, requiring {:.1} staff hours",
                        "",
                        r.metrics.sensitivity(),
                        r.metrics.specificity(),
                        r.metrics.staff_hours_needed()
                    )?;
                }
                PolicyOutcome::Infeasible(i) => writeln!(
                    self.writer,
                    "  {:<24} {}",
                    i.policy.label(),
                    self.formatter.warning(&i.reason.to_string())
                )?,
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{evaluate, EvaluationRequest};

    #[test]
    fn plain_report_lists_policies() {
        let request = EvaluationRequest::default();
        let evaluation = evaluate(&request).unwrap();
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer, FormattingConfig::plain())
            .write_evaluation(&EvaluationReport::new(&request, &evaluation, false))
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Maximum sensitivity"));
        assert!(text.contains("Balanced (Youden's J)"));
        assert!(text.contains("Resource efficient"));
        assert!(text.contains("staff hours to spare"));
    }

    #[test]
    fn sweep_table_has_a_row_per_threshold() {
        let request = EvaluationRequest {
            grid_size: 9,
            ..Default::default()
        };
        let evaluation = evaluate(&request).unwrap();
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer, FormattingConfig::plain())
            .write_sweep(&evaluation.sweep)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("0.10"));
        assert!(text.contains("0.90"));
    }
}
