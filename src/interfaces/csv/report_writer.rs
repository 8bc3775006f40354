use crate::domain::payout::BatchResult;
use crate::error::Result;
use std::io::Write;

/// Writes a batch result as CSV, one row per outcome, input order preserved.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_report(&mut self, result: &BatchResult) -> Result<()> {
        self.writer
            .write_record(["recipient", "amount", "success", "reference", "error"])?;
        for outcome in result.outcomes() {
            self.writer.write_record([
                outcome.recipient.as_str(),
                &outcome.amount.to_string(),
                if outcome.success { "true" } else { "false" },
                outcome.reference.as_deref().unwrap_or(""),
                outcome.error.as_deref().unwrap_or(""),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
