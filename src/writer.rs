//! This module provides the record sinks that realize the per-machine output
//! stream: CSV in the classic `machine_results.csv` layout, JSON lines for
//! downstream tooling, and an in-memory sink for tests.

use crate::types::{BeaverError, MachineRecord};
use std::io::Write;

/// Consumes one record per simulated machine, in visitation order.
pub trait RecordSink {
    fn emit(&mut self, record: &MachineRecord) -> Result<(), BeaverError>;

    /// Flushes any buffered output. The default is a no-op for sinks with
    /// nothing to buffer.
    fn flush(&mut self) -> Result<(), BeaverError> {
        Ok(())
    }
}

/// Writes records as delimited text:
/// `state_count,symbol_count,machine_id,steps_to_halt,halting_probability`,
/// header line included, non-halting machines as -1.
pub struct CsvWriter<W: Write> {
    inner: W,
    wrote_header: bool,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            wrote_header: false,
        }
    }
}

impl<W: Write> RecordSink for CsvWriter<W> {
    fn emit(&mut self, record: &MachineRecord) -> Result<(), BeaverError> {
        if !self.wrote_header {
            writeln!(
                self.inner,
                "state_count,symbol_count,machine_id,steps_to_halt,halting_probability"
            )
            .map_err(to_file_error)?;
            self.wrote_header = true;
        }

        writeln!(
            self.inner,
            "{},{},{},{},{}",
            record.state_count,
            record.symbol_count,
            record.machine_id,
            record.steps_to_halt,
            record.halting_probability
        )
        .map_err(to_file_error)
    }

    fn flush(&mut self) -> Result<(), BeaverError> {
        self.inner.flush().map_err(to_file_error)
    }
}

/// Writes one JSON object per line.
pub struct JsonLinesWriter<W: Write> {
    inner: W,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> RecordSink for JsonLinesWriter<W> {
    fn emit(&mut self, record: &MachineRecord) -> Result<(), BeaverError> {
        let line = serde_json::to_string(record)
            .map_err(|e| BeaverError::FileError(format!("failed to serialize record: {e}")))?;
        writeln!(self.inner, "{line}").map_err(to_file_error)
    }

    fn flush(&mut self) -> Result<(), BeaverError> {
        self.inner.flush().map_err(to_file_error)
    }
}

/// In-memory sink, mainly for tests and small programmatic runs.
impl RecordSink for Vec<MachineRecord> {
    fn emit(&mut self, record: &MachineRecord) -> Result<(), BeaverError> {
        self.push(record.clone());
        Ok(())
    }
}

fn to_file_error(e: std::io::Error) -> BeaverError {
    BeaverError::FileError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::fs::File;
    use tempfile::tempdir;

    fn sample_record() -> MachineRecord {
        MachineRecord {
            state_count: 1,
            symbol_count: 2,
            machine_id: 7,
            steps_to_halt: 1,
            halting_probability: 12.5,
        }
    }

    #[test]
    fn test_csv_header_and_line() {
        let mut buffer = Vec::new();
        let mut writer = CsvWriter::new(&mut buffer);
        writer.emit(&sample_record()).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "state_count,symbol_count,machine_id,steps_to_halt,halting_probability"
        );
        assert_eq!(lines.next().unwrap(), "1,2,7,1,12.5");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_header_written_once() {
        let mut buffer = Vec::new();
        let mut writer = CsvWriter::new(&mut buffer);
        writer.emit(&sample_record()).unwrap();
        let mut second = sample_record();
        second.machine_id = 8;
        second.steps_to_halt = -1;
        writer.emit(&second).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(2).unwrap().contains(",8,-1,"));
    }

    #[test]
    fn test_csv_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("machine_results.csv");

        {
            let file = File::create(&path).unwrap();
            let mut writer = CsvWriter::new(file);
            writer.emit(&sample_record()).unwrap();
            writer.flush().unwrap();
        }

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("state_count,"));
        assert!(text.contains("1,2,7,1,12.5"));
    }

    #[test]
    fn test_json_lines_round_trip() {
        let mut buffer = Vec::new();
        let mut writer = JsonLinesWriter::new(&mut buffer);
        writer.emit(&sample_record()).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let back: MachineRecord = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(back, sample_record());
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<MachineRecord> = Vec::new();
        sink.emit(&sample_record()).unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0], sample_record());
    }
}
