use std::io::{BufWriter, Write};

use coalsynth_core::InsertStatement;

/// Appends statements to a writer, one per line.
pub struct StatementSink<W: Write> {
    writer: BufWriter<CountingWriter<W>>,
    statements: u64,
}

impl<W: Write> StatementSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::new(CountingWriter::new(inner)),
            statements: 0,
        }
    }

    pub fn write_statement(&mut self, statement: &InsertStatement) -> std::io::Result<()> {
        writeln!(self.writer, "{statement}")?;
        self.statements += 1;
        Ok(())
    }

    pub fn statements_written(&self) -> u64 {
        self.statements
    }

    /// Flush buffered output and hand back the writer with the byte count.
    pub fn finish(self) -> std::io::Result<(W, u64)> {
        let mut counting = self.writer.into_inner().map_err(|err| err.into_error())?;
        counting.flush()?;
        let bytes = counting.bytes_written();
        Ok((counting.inner, bytes))
    }
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use coalsynth_core::{COAL_MOVEMENT_TABLE, SqlValue};

    use super::*;

    #[test]
    fn counts_statements_and_bytes() {
        let statement = InsertStatement::new(
            &COAL_MOVEMENT_TABLE,
            vec![
                SqlValue::text("A"),
                SqlValue::text("Truck1"),
                SqlValue::text("2024-01-01 12:00:00"),
            ],
        );
        let mut sink = StatementSink::new(Vec::new());
        sink.write_statement(&statement).unwrap();
        sink.write_statement(&statement).unwrap();
        assert_eq!(sink.statements_written(), 2);

        let (buffer, bytes) = sink.finish().unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(bytes, text.len() as u64);
        assert!(text.ends_with(");\n"));
    }
}
