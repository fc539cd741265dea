//! Resource type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of an uploaded resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Lecture notes.
    Notes,
    /// Previous-year question papers.
    Pyqs,
    /// Assignment sheets.
    Assignments,
    /// Lab manuals.
    LabManual,
    /// Slide decks.
    Presentation,
}

impl ResourceKind {
    /// Return the kind as its snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Pyqs => "pyqs",
            Self::Assignments => "assignments",
            Self::LabManual => "lab_manual",
            Self::Presentation => "presentation",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = campusvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "notes" => Ok(Self::Notes),
            "pyqs" => Ok(Self::Pyqs),
            "assignments" => Ok(Self::Assignments),
            "lab_manual" => Ok(Self::LabManual),
            "presentation" => Ok(Self::Presentation),
            _ => Err(campusvault_core::AppError::validation(format!(
                "Invalid resource type: '{s}'. Expected one of: notes, pyqs, assignments, lab_manual, presentation"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("notes".parse::<ResourceKind>().unwrap(), ResourceKind::Notes);
        assert_eq!(
            "LAB_MANUAL".parse::<ResourceKind>().unwrap(),
            ResourceKind::LabManual
        );
        assert!("quiz".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_round_trip() {
        for kind in [
            ResourceKind::Notes,
            ResourceKind::Pyqs,
            ResourceKind::Assignments,
            ResourceKind::LabManual,
            ResourceKind::Presentation,
        ] {
            assert_eq!(kind.as_str().parse::<ResourceKind>().unwrap(), kind);
        }
    }
}
