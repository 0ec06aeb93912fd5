//! Event dumps: one JSON-encoded [Event] per line
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{error::Error, event::Event, source::EventSource};

/// Events read lazily from a dump file
#[derive(Debug)]
pub struct DumpSource {
    path: PathBuf,
    entries: Option<u64>,
    lines: Lines<BufReader<File>>,
    line: usize,
}

impl DumpSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_owned();
        let file = File::open(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            entries: None,
            lines: BufReader::new(file).lines(),
            line: 0,
        })
    }

    fn io_err(&self, source: std::io::Error) -> Error {
        Error::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn count_entries(&self) -> Result<u64, Error> {
        let file = File::open(&self.path).map_err(|err| self.io_err(err))?;
        let mut entries = 0;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|err| self.io_err(err))?;
            if !line.trim().is_empty() {
                entries += 1;
            }
        }
        debug!(path = %self.path.display(), entries, "counted dump entries");
        Ok(entries)
    }
}

impl EventSource for DumpSource {
    fn entries(&mut self) -> Result<u64, Error> {
        if let Some(entries) = self.entries {
            return Ok(entries);
        }
        let entries = self.count_entries()?;
        self.entries = Some(entries);
        Ok(entries)
    }

    fn next_event(&mut self) -> Option<Result<Event, Error>> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(self.io_err(err))),
            };
            self.line += 1;
            if line.trim().is_empty() {
                continue;
            }
            let event = serde_json::from_str(&line).map_err(|source| Error::Dump {
                path: self.path.clone(),
                line: self.line,
                source,
            });
            return Some(event);
        }
    }
}

/// Write events in the format read by [DumpSource]
pub fn write_dump<'a, W: Write>(
    mut out: W,
    events: impl IntoIterator<Item = &'a Event>,
) -> std::io::Result<()> {
    for event in events {
        serde_json::to_writer(&mut out, event)?;
        writeln!(out)?;
    }
    Ok(())
}
