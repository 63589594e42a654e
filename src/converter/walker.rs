use std::{
    collections::VecDeque,
    ffi::OsString,
    path::{Path, PathBuf},
};

use log::debug;

#[derive(Debug)]
pub(crate) struct WalkError {
    pub directory: PathBuf,
    pub error: anyhow::Error,
}

// breadth-first; a directory is read only when the walk reaches it
pub(crate) struct ArticleWalker {
    extension: OsString,
    directories: VecDeque<PathBuf>,
    files: VecDeque<PathBuf>,
}

impl ArticleWalker {
    pub fn new(article_dir: &Path, extension: &str) -> Self {
        let mut directories = VecDeque::new();
        if article_dir.is_dir() {
            directories.push_back(article_dir.to_path_buf());
        }
        Self {
            extension: OsString::from(extension),
            directories,
            files: VecDeque::new(),
        }
    }

    fn read_directory(&mut self, path: &Path) -> anyhow::Result<()> {
        debug!("Searching {path:?}...");
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let file_path = entry.path();

            // symlinked directories are not entered
            if entry.file_type()?.is_dir() {
                self.directories.push_back(file_path);
            } else if file_path.extension() == Some(self.extension.as_os_str())
                && std::fs::metadata(&file_path).is_ok_and(|meta| meta.is_file())
            {
                self.files.push_back(file_path);
            }
        }
        Ok(())
    }
}

impl Iterator for ArticleWalker {
    type Item = Result<PathBuf, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(file) = self.files.pop_front() {
                return Some(Ok(file));
            }
            let directory = self.directories.pop_front()?;
            // an unreadable directory is reported once; the rest of the queue goes on
            if let Err(error) = self.read_directory(&directory) {
                return Some(Err(WalkError {
                    error: error.context(format!("while reading {directory:?}")),
                    directory,
                }));
            }
        }
    }
}
