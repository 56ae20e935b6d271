use std::path::PathBuf;

use thiserror::Error;

// failures that abort a whole load, everything else goes to Diagnostics
#[derive(Debug, Error)]
pub enum SrdfError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("malformed XML: {0}")]
    MalformedXml(String),

    #[error("could not open file {path:?} for parsing: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("URDF error: {0}")]
    Urdf(#[from] urdf_rs::UrdfError),

    #[error("invalid kinematic model: {0}")]
    InvalidKinematicModel(String),

    #[error("could not find the 'robot' element in the xml document")]
    MissingRobotElement,

    #[error("expected root element 'robot', found '{0}'")]
    UnexpectedRoot(String),
}

pub type Result<T> = std::result::Result<T, SrdfError>;
