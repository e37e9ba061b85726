//! The `.r2int` rule file format.
//!
//! One line per canonical transition that is on, 25 characters of `0`/`1`.
//! Characters are written center first and then ring by ring (see
//! [`FILE_ORDER`]), not row-major. Loading expands every line to its full
//! symmetry orbit.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use thiserror::Error;

use crate::automaton::neighborhood::{Neighborhood, CENTER, NEIGHBORHOOD_CELLS, RULE_SPACE};
use crate::automaton::rule::RuleTable;
use crate::automaton::symmetry::is_canonical;
use crate::error::{Error, Result};

/// Row-major neighborhood position written at each character of a line.
pub const FILE_ORDER: [usize; NEIGHBORHOOD_CELLS] = [
    12, 7, 8, 13, 18, 17, 16, 11, 6, 2, 3, 4, 9, 14, 19, 24, 23, 22, 21, 20, 15, 10, 5, 0, 1,
];

/// Extension used for saved rule files.
pub const EXTENSION: &str = "r2int";

const NAME_WORDS: [&str; 32] = [
    "R2INT",
    "Rule",
    "State",
    "Phase",
    "Transition",
    "Cell",
    "Pattern",
    "Toroid",
    "Ruletable",
    "Neighborhood",
    "Moore",
    "Radius",
    "Symmetry",
    "Decay",
    "Birth",
    "Survival",
    "Editor",
    "Viewer",
    "Palette",
    "Scroll",
    "Zoom",
    "Grid",
    "Cursor",
    "Step",
    "Oscillator",
    "StillLife",
    "Spaceship",
    "Gun",
    "Emitter",
    "Reflector",
    "Eater",
    "Glider",
];

/// Why a single rule line was skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleLineError {
    #[error("line {line}: expected 25 characters, found {len}")]
    WrongLength { line: usize, len: usize },

    #[error("line {line}: invalid character {found:?} at column {column}")]
    InvalidChar {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("line {line}: center cell must be 0 or 1, found {found:?}")]
    InvalidCenter { line: usize, found: char },
}

/// Outcome of parsing a rule file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Lines that were applied.
    pub loaded: usize,
    /// Lines that were skipped, in file order.
    pub skipped: Vec<RuleLineError>,
}

/// Encode `n` as one rule line.
pub fn encode_line(n: &Neighborhood) -> String {
    FILE_ORDER
        .iter()
        .map(|&pos| if n[pos] != 0 { '1' } else { '0' })
        .collect()
}

/// Decode one (already trimmed) rule line. `line` is only used for diagnostics.
pub fn decode_line(text: &str, line: usize) -> std::result::Result<Neighborhood, RuleLineError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != NEIGHBORHOOD_CELLS {
        return Err(RuleLineError::WrongLength {
            line,
            len: chars.len(),
        });
    }

    let mut n = Neighborhood::default();
    for (column, (&ch, &pos)) in chars.iter().zip(FILE_ORDER.iter()).enumerate() {
        let value = match ch {
            '0' => 0,
            '1' => 1,
            found if pos == CENTER => return Err(RuleLineError::InvalidCenter { line, found }),
            found => {
                return Err(RuleLineError::InvalidChar {
                    line,
                    column: column + 1,
                    found,
                })
            }
        };
        n[pos] = value;
    }
    Ok(n)
}

/// Replace the contents of `table` with the transitions listed in `text`.
///
/// The table is cleared first. Malformed lines are skipped, logged, and
/// returned in the report.
pub fn parse_rules(text: &str, table: &mut RuleTable) -> LoadReport {
    table.clear();
    let mut report = LoadReport::default();

    for (i, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        match decode_line(trimmed, i + 1) {
            Ok(n) => {
                table.set_isotropic(&n, true);
                report.loaded += 1;
            }
            Err(err) => {
                tracing::warn!("skipping rule line: {err}");
                report.skipped.push(err);
            }
        }
    }

    report
}

/// Load a rule file into `table`.
pub fn load(path: impl AsRef<Path>, table: &mut RuleTable) -> Result<LoadReport> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::rule_file(path, e))?;
    let report = parse_rules(&text, table);
    tracing::info!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "loaded rule file"
    );
    Ok(report)
}

/// Canonical indices that are on, ascending.
pub fn canonical_transitions(table: &RuleTable) -> Vec<u32> {
    (0..RULE_SPACE as u32)
        .into_par_iter()
        .filter(|&index| table.get(u64::from(index)) && is_canonical(index))
        .collect()
}

/// Write one line per canonical transition that is on.
///
/// # Returns
/// Number of lines written.
pub fn write_rules<W: Write>(table: &RuleTable, out: W) -> io::Result<usize> {
    let mut out = BufWriter::new(out);
    let transitions = canonical_transitions(table);
    for &index in &transitions {
        writeln!(out, "{}", encode_line(&Neighborhood::from_index(index)))?;
    }
    out.flush()?;
    Ok(transitions.len())
}

/// Save `table` to `path`, overwriting it.
pub fn save(path: impl AsRef<Path>, table: &RuleTable) -> Result<usize> {
    let path = path.as_ref();
    let file = fs::File::create(path).map_err(|e| Error::rule_file(path, e))?;
    let lines = write_rules(table, file).map_err(|e| Error::rule_file(path, e))?;
    tracing::info!(path = %path.display(), lines, "saved rule file");
    Ok(lines)
}

/// Save `table` into `dir` under a freshly suggested name.
pub fn save_in<R: Rng + ?Sized>(
    dir: impl AsRef<Path>,
    table: &RuleTable,
    rng: &mut R,
) -> Result<PathBuf> {
    let path = dir.as_ref().join(suggest_file_name(rng));
    save(&path, table)?;
    Ok(path)
}

/// A random `Word_Word_Word_.r2int` file name.
pub fn suggest_file_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut name = String::new();
    for _ in 0..3 {
        if let Some(word) = NAME_WORDS.choose(rng) {
            name.push_str(word);
        }
        name.push('_');
    }
    name.push('.');
    name.push_str(EXTENSION);
    name
}
