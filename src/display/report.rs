//! Renders the scan results as a nested JSON document and writes it to disk.
use crate::compute::Ledger;
use crate::error::ScanError;
use crate::store::{Dataset, VariableId};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// `{ effect: { cause: PairResult } }`, keys in variable order.
pub struct ResultDocument<'a> {
    dataset: &'a Dataset,
    ledger: &'a Ledger,
}

struct EffectRow<'a> {
    dataset: &'a Dataset,
    ledger: &'a Ledger,
    effect: VariableId,
}

impl<'a> ResultDocument<'a> {
    pub fn new(dataset: &'a Dataset, ledger: &'a Ledger) -> Self {
        Self { dataset, ledger }
    }

    /// Pretty-printed with 4-space indentation and no trailing newline.
    pub fn to_json(&self) -> Result<Vec<u8>, ScanError> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}

impl Serialize for ResultDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.dataset.count()))?;
        for effect in self.dataset.ids() {
            let row = EffectRow { dataset: self.dataset, ledger: self.ledger, effect };
            map.serialize_entry(self.dataset.name(effect), &row)?;
        }
        map.end()
    }
}

impl Serialize for EffectRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (cause, result) in self.ledger.row(self.effect) {
            map.serialize_entry(self.dataset.name(cause), result)?;
        }
        map.end()
    }
}

/// Replaces `path` with `contents` in one rename.
///
/// The bytes go to a temporary file in the destination directory first, so
/// readers see either the old file or the complete new one.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ScanError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ScanError::io(dir, e))?;
    tmp.write_all(contents).map_err(|e| ScanError::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| ScanError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| ScanError::Persist { path: path.to_path_buf(), source: e.error })?;
    Ok(())
}

pub fn write_report(path: &Path, dataset: &Dataset, ledger: &Ledger) -> Result<(), ScanError> {
    let bytes = ResultDocument::new(dataset, ledger).to_json()?;
    write_atomic(path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "Results written");
    Ok(())
}
