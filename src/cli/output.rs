/// Output formatting for the symbol-outline CLI
///
/// - Text: one block per file, one indented line per symbol
/// - Json: a single pretty-printed array of `{ path, symbols }`
use crate::cli::FileOutline;
use crate::extractors::SymbolRecord;
use anyhow::Result;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// `  <1-based line>: <qualified name> [kind]`
pub fn format_symbol(symbol: &SymbolRecord) -> String {
    let mut line = format!("  {}: {}", symbol.line + 1, symbol.qualified_name());
    if let Some(kind) = symbol.kind {
        line.push_str(&format!(" [{}]", kind));
    }
    line
}

pub fn render_text(file: &FileOutline) -> String {
    let mut out = format!("{}\n", file.path);
    for symbol in &file.symbols {
        out.push_str(&format_symbol(symbol));
        out.push('\n');
    }
    out
}

pub struct OutputWriter {
    format: OutputFormat,
    writer: Box<dyn Write>,
    buffer: Vec<FileOutline>,
}

impl OutputWriter {
    /// Writer targeting stdout
    pub fn new(format: OutputFormat) -> Self {
        Self::with_writer(format, Box::new(io::stdout()))
    }

    pub fn with_writer(format: OutputFormat, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            writer,
            buffer: Vec::new(),
        }
    }

    /// Text is written immediately; JSON is buffered until `flush`
    pub fn write_file(&mut self, file: FileOutline) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                write!(self.writer, "{}", render_text(&file))?;
                self.writer.flush()?;
            }
            OutputFormat::Json => self.buffer.push(file),
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if self.format == OutputFormat::Json {
            writeln!(self.writer, "{}", serde_json::to_string_pretty(&self.buffer)?)?;
            self.buffer.clear();
        }
        self.writer.flush()?;
        Ok(())
    }
}
