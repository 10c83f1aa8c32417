//! JSON file implementation of the task API.
//!
//! The file holds the same `{ "data": [...] }` envelope the remote API returns,
//! so a payload captured from the server can be dropped in as-is.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::api::{Envelope, TaskApi};
use crate::board::reconcile::apply_move;
use crate::board::MoveIntent;
use crate::error::{BoardError, Result};
use crate::task::Task;

#[derive(Debug, Clone)]
pub struct FileTaskApi {
    path: PathBuf,
    recent_limit: usize,
}

impl FileTaskApi {
    /// `recent_limit` must match the board's, so drop positions in the
    /// completed lane index the same cards the user saw.
    pub fn new(path: impl Into<PathBuf>, recent_limit: usize) -> Self {
        FileTaskApi { path: path.into(), recent_limit }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the collection. A missing file is an empty board.
    pub fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "task file missing, starting empty");
            return Ok(Vec::new());
        }
        let buf = fs::read_to_string(&self.path).map_err(|e| BoardError::io(&self.path, e))?;
        let envelope: Envelope<Vec<Task>> = serde_json::from_str(&buf)?;
        Ok(envelope.data)
    }

    /// Write the collection using atomic write (temp file + rename).
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| BoardError::io(dir, e))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(&Envelope { data: tasks })?;
        let write = || -> std::io::Result<()> {
            let mut f = File::create(&tmp)?;
            f.write_all(data.as_bytes())?;
            f.flush()?;
            fs::rename(&tmp, &self.path)
        };
        write().map_err(|e| BoardError::io(&self.path, e))
    }
}

impl TaskApi for FileTaskApi {
    fn get_tasks(&self) -> Result<Vec<Task>> {
        self.load().map_err(|e| BoardError::Fetch { reason: e.to_string() })
    }

    fn update_task_status(&mut self, intent: &MoveIntent) -> Result<Vec<Task>> {
        let persist_err = |e: BoardError| match e {
            BoardError::TaskNotFound(_) => e,
            other => BoardError::Persist {
                task_id: intent.task_id.clone(),
                reason: other.to_string(),
            },
        };
        let mut tasks = self.load().map_err(persist_err)?;
        apply_move(&mut tasks, intent, self.recent_limit, Utc::now()).map_err(persist_err)?;
        self.save(&tasks).map_err(persist_err)?;
        tracing::info!(
            task = %intent.task_id,
            lane = %intent.new_status,
            position = intent.new_position,
            "persisted move"
        );
        Ok(tasks)
    }
}
