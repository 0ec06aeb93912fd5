use std::path::Path;

use tracing::debug;

use crate::{error::Error, event::Event};

/// Access to a sequence of stored collision events
pub trait EventSource {
    /// Total number of entries in the source
    fn entries(&mut self) -> Result<u64, Error>;

    /// The next event in storage order, `None` once exhausted
    fn next_event(&mut self) -> Option<Result<Event, Error>>;
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn entries(&mut self) -> Result<u64, Error> {
        (**self).entries()
    }

    fn next_event(&mut self) -> Option<Result<Event, Error>> {
        (**self).next_event()
    }
}

/// Events held in memory
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    entries: u64,
    events: std::vec::IntoIter<Event>,
}

impl MemorySource {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            entries: events.len() as u64,
            events: events.into_iter(),
        }
    }
}

impl From<Vec<Event>> for MemorySource {
    fn from(events: Vec<Event>) -> Self {
        Self::new(events)
    }
}

impl FromIterator<Event> for MemorySource {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self::new(Vec::from_iter(iter))
    }
}

impl EventSource for MemorySource {
    fn entries(&mut self) -> Result<u64, Error> {
        Ok(self.entries)
    }

    fn next_event(&mut self) -> Option<Result<Event, Error>> {
        self.events.next().map(Ok)
    }
}

/// Several sources read back to back
#[derive(Default)]
pub struct ChainSource {
    sources: Vec<Box<dyn EventSource>>,
    current: usize,
}

impl ChainSource {
    pub fn new(sources: Vec<Box<dyn EventSource>>) -> Self {
        Self {
            sources,
            current: 0,
        }
    }
}

impl std::fmt::Debug for ChainSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainSource")
            .field("sources", &self.sources.len())
            .field("current", &self.current)
            .finish()
    }
}

impl EventSource for ChainSource {
    fn entries(&mut self) -> Result<u64, Error> {
        let mut total = 0;
        for source in &mut self.sources {
            total += source.entries()?;
        }
        Ok(total)
    }

    fn next_event(&mut self) -> Option<Result<Event, Error>> {
        while let Some(source) = self.sources.get_mut(self.current) {
            if let Some(event) = source.next_event() {
                return Some(event);
            }
            self.current += 1;
        }
        None
    }
}

/// Whether `path` names a ROOT file or a remote XRootD reference
pub fn needs_framework(path: &str) -> bool {
    path.starts_with("root://")
        || Path::new(path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("root"))
}

/// Open the event source named by `path`
pub fn open(path: &str) -> Result<Box<dyn EventSource>, Error> {
    if needs_framework(path) {
        return Err(Error::FrameworkRequired(path.to_owned()));
    }
    debug!(path, "opening event dump");
    #[cfg(feature = "dump")]
    {
        let source = crate::dump::DumpSource::open(path)?;
        Ok(Box::new(source))
    }
    #[cfg(not(feature = "dump"))]
    {
        Err(Error::Unsupported(path.to_owned()))
    }
}

/// Open all sources and read them in the given order
pub fn open_all<S: AsRef<str>>(paths: &[S]) -> Result<Box<dyn EventSource>, Error> {
    match paths {
        [path] => open(path.as_ref()),
        paths => {
            let sources = paths
                .iter()
                .map(|path| open(path.as_ref()))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Box::new(ChainSource::new(sources)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(source: &mut dyn EventSource) -> Vec<u64> {
        std::iter::from_fn(|| source.next_event())
            .map(|ev| ev.unwrap().id.event)
            .collect()
    }

    #[test]
    fn memory_source() {
        let mut source: MemorySource =
            (1..=3).map(|n| Event::new(1, 1, n)).collect();
        assert_eq!(source.entries().unwrap(), 3);
        assert_eq!(ids(&mut source), [1, 2, 3]);
        // the entry count does not shrink while iterating
        assert_eq!(source.entries().unwrap(), 3);
    }

    #[test]
    fn chain_in_order() {
        let first = MemorySource::new(vec![Event::new(1, 1, 1), Event::new(1, 1, 2)]);
        let empty = MemorySource::default();
        let last = MemorySource::new(vec![Event::new(2, 1, 7)]);
        let sources: Vec<Box<dyn EventSource>> =
            vec![Box::new(first), Box::new(empty), Box::new(last)];
        let mut chain = ChainSource::new(sources);
        assert_eq!(chain.entries().unwrap(), 3);
        assert_eq!(ids(&mut chain), [1, 2, 7]);
        assert!(chain.next_event().is_none());
    }

    #[test]
    fn framework_paths() {
        assert!(needs_framework(
            "root://cms-xrd-global.cern.ch//store/mc/file.root"
        ));
        assert!(needs_framework("/data/miniaod.ROOT"));
        assert!(!needs_framework("events.jsonl"));
        assert!(matches!(
            open("local.root"),
            Err(Error::FrameworkRequired(path)) if path == "local.root"
        ));
    }

    #[test]
    fn open_all_fails_on_any_path() {
        let res = open_all(&["a.jsonl", "root://host//b.root"][..]);
        assert!(res.is_err());
    }
}
