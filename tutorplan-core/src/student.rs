//! Students on the tutor's roster and the colour palette used to tell them apart.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed palette. Entries are opaque identifiers handed to the renderer.
pub const PALETTE: [&str; 20] = [
    "bg-blue-100 text-blue-800 border-blue-200",
    "bg-emerald-100 text-emerald-800 border-emerald-200",
    "bg-amber-100 text-amber-800 border-amber-200",
    "bg-rose-100 text-rose-800 border-rose-200",
    "bg-indigo-100 text-indigo-800 border-indigo-200",
    "bg-purple-100 text-purple-800 border-purple-200",
    "bg-cyan-100 text-cyan-800 border-cyan-200",
    "bg-fuchsia-100 text-fuchsia-800 border-fuchsia-200",
    "bg-orange-100 text-orange-800 border-orange-200",
    "bg-lime-100 text-lime-800 border-lime-200",
    "bg-pink-100 text-pink-800 border-pink-200",
    "bg-sky-100 text-sky-800 border-sky-200",
    "bg-violet-100 text-violet-800 border-violet-200",
    "bg-teal-100 text-teal-800 border-teal-200",
    "bg-yellow-100 text-yellow-800 border-yellow-200",
    "bg-red-100 text-red-800 border-red-200",
    "bg-slate-200 text-slate-800 border-slate-300",
    "bg-stone-200 text-stone-800 border-stone-300",
    "bg-zinc-200 text-zinc-800 border-zinc-300",
    "bg-neutral-200 text-neutral-800 border-neutral-300",
];

/// Palette slot used for new events (a neutral grey).
const DEFAULT_EVENT_SLOT: usize = 16;

/// A palette colour. Stored as the palette string so data written by other
/// clients with colours outside the palette still round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Color(value.into())
    }

    /// Colour in palette slot `index` (wrapping).
    pub fn from_palette(index: usize) -> Self {
        Color(PALETTE[index % PALETTE.len()].to_string())
    }

    pub fn default_event() -> Self {
        Color::from_palette(DEFAULT_EVENT_SLOT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn palette_index(&self) -> Option<usize> {
        PALETTE.iter().position(|c| *c == self.0)
    }

    /// The palette entry after this one. Colours outside the palette restart
    /// at the first slot.
    pub fn next_in_palette(&self) -> Self {
        match self.palette_index() {
            Some(i) => Color::from_palette(i + 1),
            None => Color::from_palette(0),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::from_palette(0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn new(value: impl Into<String>) -> Self {
        StudentId(value.into())
    }

    pub fn generate() -> Self {
        StudentId(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub color: Color,
}

impl Student {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Student {
            id: StudentId::generate(),
            name: name.into(),
            color,
        }
    }
}

/// Roster a fresh planner starts with.
pub fn seed_roster() -> Vec<Student> {
    ["Alice Chen", "Bob Smith", "Charlie Davis"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| Student {
            id: StudentId::new((i + 1).to_string()),
            name: name.to_string(),
            color: Color::from_palette(i),
        })
        .collect()
}
