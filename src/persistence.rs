// File: src/persistence.rs
use crate::core::lexicon::Lexicon;
use crate::core::mapping::PartialMapping;
use crate::core::solver::SearchObserver;
use crate::core::tokenizer::{Corpus, Tokenizer};
use crate::error::{DecipherError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Reads a cipher text file into a corpus. A missing or unreadable file is fatal.
pub fn load_corpus(path: &Path, tokenizer: &Tokenizer) -> Result<Corpus> {
    let text = fs::read_to_string(path).map_err(|e| DecipherError::io(path, e))?;
    Ok(tokenizer.corpus(text.lines()))
}

/// Writes `contents` to a temp file beside `path` and renames it into place.
fn write_atomically<F>(path: &Path, contents: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
{
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|e| DecipherError::io(parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| DecipherError::io(parent_dir, e))?;
    {
        let mut writer = BufWriter::new(&temp_file);
        contents(&mut writer)?;
        writer.flush().map_err(|e| DecipherError::io(path, e))?;
    }
    temp_file
        .persist(path)
        .map_err(|e| DecipherError::io(path, e.error))?;
    Ok(())
}

/// Saves every solution as a JSON array of `{symbol: letter}` objects.
pub fn save_solutions(path: &Path, solutions: &[PartialMapping]) -> Result<()> {
    write_atomically(path, |writer| {
        serde_json::to_writer_pretty(writer, solutions)?;
        Ok(())
    })
}

pub fn load_solutions(path: &Path) -> Result<Vec<PartialMapping>> {
    let file = File::open(path).map_err(|e| DecipherError::io(path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Loads a frequency model, picking the format from the extension: `.bin`
/// is a snapshot from [`save_lexicon`], `.json` a `{word: count}` object and
/// anything else a `word count` list.
pub fn load_lexicon(path: &Path) -> Result<Lexicon> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("bin") => {
            let file = File::open(path).map_err(|e| DecipherError::io(path, e))?;
            Ok(bincode::deserialize_from(BufReader::new(file))?)
        }
        Some("json") => {
            let text = fs::read_to_string(path).map_err(|e| DecipherError::io(path, e))?;
            Lexicon::from_json_str(&text)
        }
        _ => {
            let text = fs::read_to_string(path).map_err(|e| DecipherError::io(path, e))?;
            Lexicon::parse_frequency_list(&text)
        }
    }
}

pub fn save_lexicon(path: &Path, lexicon: &Lexicon) -> Result<()> {
    write_atomically(path, |writer| {
        bincode::serialize_into(writer, lexicon)?;
        Ok(())
    })
}

/// Append-only trace of every decoded attempt, one per line.
///
/// Write failures are logged and otherwise ignored: the trace is a debugging
/// aid and must not abort a search.
pub struct AttemptLog {
    path: PathBuf,
    writer: BufWriter<File>,
    failed: bool,
}

impl AttemptLog {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| DecipherError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            failed: false,
        })
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| DecipherError::io(&self.path, e))
    }
}

impl SearchObserver for AttemptLog {
    fn on_attempt(&mut self, text: &str) {
        if self.failed {
            return;
        }
        if let Err(e) = writeln!(self.writer, "{text}") {
            tracing::warn!(path = %self.path.display(), error = %e, "attempt log write failed, disabling");
            self.failed = true;
        }
    }
}

impl Drop for AttemptLog {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
