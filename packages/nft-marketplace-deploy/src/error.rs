//! Error types for deployments.

use std::fmt;

/// Deployment error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration could not be loaded or is inconsistent.
    Config(String),
    /// Module definition is malformed (empty id, duplicate futures, ...).
    Module(String),
    /// A parameter is missing or has the wrong shape.
    Parameter(String),
    /// Contract wasm could not be located or read.
    Artifact(String),
    /// Account creation, code deployment or initialization failed.
    Deploy(String),
    /// Deployment journal could not be read or written.
    Journal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Module(msg) => write!(f, "module error: {msg}"),
            Error::Parameter(msg) => write!(f, "parameter error: {msg}"),
            Error::Artifact(msg) => write!(f, "artifact error: {msg}"),
            Error::Deploy(msg) => write!(f, "deploy error: {msg}"),
            Error::Journal(msg) => write!(f, "journal error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
