use super::burn::{Noun14, Noun33, Noun40, Noun95};
use super::navigation::{Noun17, Noun36, Noun43, Noun44, Noun50, Noun62};
use super::status::{Noun09, Noun25, Noun30, Noun31, Noun38};
use super::{Noun, NounCode, NounContext, NounError, NounPayload, NounReadout};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

type NounFactory = fn() -> Box<dyn Noun>;

fn build<N: Noun + Default + 'static>() -> Box<dyn Noun> {
    Box::new(N::default())
}

// Every formatter type is listed once; its code is the last two characters of
// the type name.
macro_rules! noun_table {
    ($($noun:ident),* $(,)?) => {
        &[$((stringify!($noun), build::<$noun> as NounFactory)),*]
    };
}

static NOUN_TABLE: &[(&str, NounFactory)] = noun_table![
    Noun09, Noun14, Noun17, Noun25, Noun30, Noun31, Noun33, Noun36, Noun38, Noun40, Noun43,
    Noun44, Noun50, Noun62, Noun95,
];

/// Placeholder for codes that have no formatter yet.
#[derive(Debug, Default)]
pub struct UndefinedNoun;

impl Noun for UndefinedNoun {
    fn description(&self) -> &str {
        "Undefined"
    }

    fn return_data(&self, _ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        Ok(NounReadout::Display(NounPayload::blank()))
    }
}

/// A formatter bound to the code it is registered under.
pub struct NounEntry {
    code: NounCode,
    noun: Box<dyn Noun>,
    synthesized: bool,
}

impl NounEntry {
    pub fn code(&self) -> NounCode {
        self.code
    }

    pub fn description(&self) -> &str {
        self.noun.description()
    }

    pub fn is_synthesized(&self) -> bool {
        self.synthesized
    }

    pub fn accepts_data(&self) -> bool {
        self.noun.accepts_data()
    }

    pub fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        debug!("Noun {} requested", self.code);
        self.noun.return_data(ctx)
    }

    pub fn receive_data(
        &self,
        ctx: &mut NounContext<'_>,
        data: Vec<String>,
    ) -> Result<(), NounError> {
        debug!("Noun {} received {:?}", self.code, data);
        self.noun.receive_data(self.code, ctx, data)
    }
}

impl core::fmt::Debug for NounEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NounEntry")
            .field("code", &self.code)
            .field("description", &self.description())
            .field("synthesized", &self.synthesized)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum Resolution {
    Known(Arc<NounEntry>),
    Synthesized(Arc<NounEntry>),
}

impl Resolution {
    pub fn entry(&self) -> &Arc<NounEntry> {
        match self {
            Resolution::Known(entry) | Resolution::Synthesized(entry) => entry,
        }
    }

    pub fn into_entry(self) -> Arc<NounEntry> {
        match self {
            Resolution::Known(entry) | Resolution::Synthesized(entry) => entry,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        matches!(self, Resolution::Synthesized(_))
    }
}

/// Code-indexed noun table.
///
/// Lookups never fail: an unknown code gets an `Undefined` placeholder, which
/// is cached so later lookups return the same entry. Codes iterate in
/// insertion order.
#[derive(Debug)]
pub struct NounRegistry {
    entries: Vec<Arc<NounEntry>>,
    index: HashMap<NounCode, usize>,
}

impl NounRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(NOUN_TABLE.len()),
            index: HashMap::with_capacity(NOUN_TABLE.len()),
        };

        for (type_name, factory) in NOUN_TABLE {
            match NounCode::from_type_name(type_name) {
                Some(code) if registry.index.contains_key(&code) => {
                    warn!("Duplicate noun code {} from {}, skipping", code, type_name);
                }
                Some(code) => {
                    registry.insert(code, factory(), false);
                }
                None => warn!("Formatter {} has no numeric code suffix", type_name),
            }
        }

        registry
    }

    pub fn resolve(&mut self, code: NounCode) -> Resolution {
        if let Some(&slot) = self.index.get(&code) {
            let entry = Arc::clone(&self.entries[slot]);
            return if entry.synthesized {
                Resolution::Synthesized(entry)
            } else {
                Resolution::Known(entry)
            };
        }

        debug!("Noun {} undefined, synthesizing placeholder", code);
        Resolution::Synthesized(self.insert(code, Box::new(UndefinedNoun), true))
    }

    pub fn codes(&self) -> impl Iterator<Item = NounCode> + '_ {
        self.entries.iter().map(|entry| entry.code)
    }

    pub fn entries(&self) -> &[Arc<NounEntry>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, code: NounCode, noun: Box<dyn Noun>, synthesized: bool) -> Arc<NounEntry> {
        let entry = Arc::new(NounEntry {
            code,
            noun,
            synthesized,
        });
        self.index.insert(code, self.entries.len());
        self.entries.push(Arc::clone(&entry));
        entry
    }
}

impl Default for NounRegistry {
    fn default() -> Self {
        Self::new()
    }
}
