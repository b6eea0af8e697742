//! Metadata loading errors
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("YAML/{0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("IO/{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("THRESHOLD/attribute {id}: bucket {low}..{high} is inverted")]
    InvertedBucket { id: i32, low: i64, high: i64 },

    #[error("THRESHOLD/attribute {id}: failure rate {rate} outside 0..=1")]
    InvalidFailureRate { id: i32, rate: f64 },

    #[error("DUPLICATE/attribute {0} defined more than once")]
    DuplicateAttribute(i32),
}
