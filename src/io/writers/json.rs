use std::io::Write;

use crate::io::output::{EvaluationReport, OutputWriter};
use crate::sweep::SweepResult;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_evaluation(&mut self, report: &EvaluationReport<'_>) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_sweep(&mut self, sweep: &SweepResult) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, sweep)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
