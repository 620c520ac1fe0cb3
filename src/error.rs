use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("table line {line}: cannot parse `{text}`")]
    Parse { line: usize, text: String },
    #[error(transparent)]
    Table(#[from] pll_q30::TableError),
    #[error("setting `{path}`: {reason}")]
    Setting { path: String, reason: String },
    #[error("probe: {0}")]
    Probe(String),
}
