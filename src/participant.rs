use serde::{Deserialize, Serialize};
use std::fmt;

/// A league member: either a forecaster (tournament mode) or a side in the
/// simulated fixtures (championship mode).
///
/// Ids are expected to be unique within a league; display names are only
/// carried along into fixtures for rendering.
#[cfg_attr(feature = "python", pyo3::pyclass)]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,

    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}
