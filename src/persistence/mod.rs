use crate::roster::RosterError;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    Csv(csv::Error),
    Roster(RosterError),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::Roster(err) => write!(f, "invalid roster: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Serialization(err) => Some(err),
            PersistenceError::Io(err) => Some(err),
            PersistenceError::Csv(err) => Some(err),
            PersistenceError::Roster(err) => Some(err),
            PersistenceError::InvalidData(_) => None,
        }
    }
}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<RosterError> for PersistenceError {
    fn from(value: RosterError) -> Self {
        Self::Roster(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub mod file;
pub mod roster_csv;

pub use file::{save_schedule_to_csv, save_schedule_to_json, write_schedule_csv};
pub use roster_csv::{load_roster_from_csv, read_roster_csv};
