//! Output writers for simulation results.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::metrics::{CsvSummaryRow, EpisodeMetrics};
use crate::types::OutputFormat;

/// Episode sink. Gzip output keeps the concrete encoder so the trailer is
/// written, and its errors surfaced, by `finish`.
enum JsonSink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Write for JsonSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            JsonSink::Plain(w) => w.write(buf),
            JsonSink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            JsonSink::Plain(w) => w.flush(),
            JsonSink::Gzip(w) => w.flush(),
        }
    }
}

impl JsonSink {
    fn finish(self) -> io::Result<()> {
        match self {
            JsonSink::Plain(mut w) => w.flush(),
            JsonSink::Gzip(w) => w.finish()?.flush(),
        }
    }
}

pub struct OutputWriter {
    json_writer: JsonSink,
    format: OutputFormat,
    /// Episodes held back for the single-array `json` format.
    pending: Vec<EpisodeMetrics>,
    csv_writer: csv::Writer<BufWriter<File>>,
    json_path: PathBuf,
    csv_path: PathBuf,
}

fn create_truncated(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

impl OutputWriter {
    pub fn new(
        output_dir: &str,
        format: &OutputFormat,
        compress: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");

        let extension = match format {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Json => "json",
        };
        let filename = format!("simulation_{timestamp}.{extension}");
        let (json_writer, json_path) = if compress {
            let gz_path = dir.join(format!("{filename}.gz"));
            let file = BufWriter::new(create_truncated(&gz_path)?);
            (
                JsonSink::Gzip(GzEncoder::new(file, Compression::default())),
                gz_path,
            )
        } else {
            let path = dir.join(&filename);
            (JsonSink::Plain(BufWriter::new(create_truncated(&path)?)), path)
        };

        // Always create CSV summary
        let csv_path = dir.join(format!("simulation_{timestamp}_summary.csv"));
        let csv_writer = csv::Writer::from_writer(BufWriter::new(create_truncated(&csv_path)?));

        Ok(Self {
            json_writer,
            format: format.clone(),
            pending: Vec::new(),
            csv_writer,
            json_path,
            csv_path,
        })
    }

    pub fn write_episode(
        &mut self,
        metrics: &EpisodeMetrics,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match self.format {
            OutputFormat::Jsonl => {
                let json = serde_json::to_string(metrics)?;
                writeln!(self.json_writer, "{json}")?;
                self.json_writer.flush()?;
            }
            OutputFormat::Json => self.pending.push(metrics.clone()),
        }

        let row: CsvSummaryRow = metrics.into();
        self.csv_writer.serialize(&row)?;
        self.csv_writer.flush()?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), Box<dyn std::error::Error>> {
        if matches!(self.format, OutputFormat::Json) {
            serde_json::to_writer_pretty(&mut self.json_writer, &self.pending)?;
            writeln!(self.json_writer)?;
        }
        self.json_writer.finish()?;
        self.csv_writer.flush()?;
        Ok(())
    }

    pub fn output_paths(&self) -> (&Path, &Path) {
        (&self.json_path, &self.csv_path)
    }
}
