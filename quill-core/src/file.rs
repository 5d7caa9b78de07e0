//! File bridge, document loading and incremental saving

use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::EngineResult;
use crate::line::Line;
use crate::state::{Document, Position};
use crate::text;

/// Host file access: picking paths and moving bytes.
pub trait FileBridge {
    fn pick_file_for_open(&mut self) -> Option<PathBuf>;

    fn pick_file_for_save(&mut self) -> Option<PathBuf>;

    fn read_file(&mut self, path: &Path) -> io::Result<Vec<u8>>;

    /// Writes `bytes` at `offset`. With `overwrite` the existing file is
    /// patched in place and cut off after the written bytes; otherwise a
    /// fresh file is created.
    fn write_file(&mut self, path: &Path, bytes: &[u8], offset: u64, overwrite: bool)
        -> io::Result<()>;
}

/// Filesystem bridge whose "picker" hands out paths chosen ahead of time by
/// the host (a prompt, a command-line argument, a test).
#[derive(Debug, Clone, Default)]
pub struct FsFiles {
    next_open: Option<PathBuf>,
    next_save: Option<PathBuf>,
}

impl FsFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_for_open(&mut self, path: impl Into<PathBuf>) {
        self.next_open = Some(path.into());
    }

    pub fn select_for_save(&mut self, path: impl Into<PathBuf>) {
        self.next_save = Some(path.into());
    }
}

impl FileBridge for FsFiles {
    fn pick_file_for_open(&mut self) -> Option<PathBuf> {
        self.next_open.take()
    }

    fn pick_file_for_save(&mut self) -> Option<PathBuf> {
        self.next_save.take()
    }

    fn read_file(&mut self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write_file(
        &mut self,
        path: &Path,
        bytes: &[u8],
        offset: u64,
        overwrite: bool,
    ) -> io::Result<()> {
        if overwrite {
            let mut file = OpenOptions::new().write(true).open(path)?;
            file.seek(SeekFrom::Start(offset))?;
            file.write_all(bytes)?;
            file.set_len(offset + bytes.len() as u64)?;
            file.flush()
        } else {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let mut file = File::create(path)?;
            file.write_all(bytes)?;
            file.flush()
        }
    }
}

/// What a save has to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    pub bytes: Vec<u8>,
    pub offset: u64,
    pub overwrite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing changed since the last save; nothing was written.
    Unchanged,
    Written { path: PathBuf, bytes: usize },
}

impl Document {
    /// Replaces the whole content with `blob`, resetting cursor, highlight
    /// and dirty tracking. Line slots are reused where they exist. Fails
    /// without touching the document when the blob has too many lines.
    pub fn load_bytes(&mut self, blob: &[u8], file_name: Option<PathBuf>) -> EngineResult<()> {
        let fragments = text::split_lines(blob);
        if fragments.len() > self.config.max_lines {
            return Err(self.capacity_error());
        }

        for (index, fragment) in fragments.iter().enumerate() {
            match self.lines.get_mut(index) {
                Some(line) => line.set_text(fragment),
                None => self.lines.push(Line::from_bytes_with_capacity(
                    fragment,
                    self.config.initial_line_capacity,
                )),
            }
        }
        self.num_lines = fragments.len();
        self.cursor = Position::zero();
        self.anchor = None;
        self.dirty = None;
        self.rewrite_whole_file = !text::is_crlf_layout(blob);
        self.file_name = file_name;
        debug!(lines = self.num_lines, bytes = blob.len(), "loaded document");
        Ok(())
    }

    /// Byte offset of the start of `line` in the saved CRLF layout.
    pub fn byte_offset_of_line(&self, line: usize) -> u64 {
        self.lines[..line.min(self.num_lines)]
            .iter()
            .map(|line| (line.len() + text::LINE_SEPARATOR.len()) as u64)
            .sum()
    }

    /// Plans a save to `target`. Saving back to the document's own file only
    /// rewrites from the dirty mark onward; any other target gets the whole
    /// document. Returns `None` when a same-file save has nothing to write.
    pub fn save_plan(&self, target: &Path) -> Option<SavePlan> {
        let same_file = self.file_name.as_deref() == Some(target);
        if !same_file {
            return Some(SavePlan {
                bytes: self.to_crlf_bytes(),
                offset: 0,
                overwrite: false,
            });
        }

        let mark = self.dirty?;
        let start = if self.rewrite_whole_file {
            0
        } else {
            mark.min(self.num_lines - 1)
        };
        Some(SavePlan {
            bytes: text::join_crlf(self.lines[start..self.num_lines].iter().map(Line::as_bytes)),
            offset: self.byte_offset_of_line(start),
            overwrite: start > 0,
        })
    }

    pub(crate) fn mark_saved(&mut self, path: PathBuf) {
        self.dirty = None;
        self.rewrite_whole_file = false;
        self.file_name = Some(path);
    }
}
