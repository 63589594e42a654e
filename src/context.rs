use std::path::PathBuf;

#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub article_dir: PathBuf,
    pub out_dir: PathBuf,
    // without the leading dot
    pub extension: String,
}

impl Context {
    pub fn new(article_dir: PathBuf, out_dir: PathBuf, extension: String) -> Self {
        Self {
            article_dir,
            out_dir,
            extension,
        }
    }

    pub fn out_path_of(&self, source: &std::path::Path) -> Option<PathBuf> {
        source
            .strip_prefix(&self.article_dir)
            .ok()
            .map(|rel| self.out_dir.join(rel))
    }
}
