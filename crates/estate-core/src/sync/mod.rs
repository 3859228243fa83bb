//! Selection shared between the list and the spatial view

use serde::{Deserialize, Serialize};

use crate::model::PropertyId;

/// At most one highlighted listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(PropertyId),
}

impl Selection {
    pub fn id(&self) -> Option<&PropertyId> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(id) => Some(id),
        }
    }

    pub fn is_selected(&self, id: &PropertyId) -> bool {
        self.id() == Some(id)
    }
}

/// What happens to the selection when a filter update hides the selected listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionPolicy {
    /// Keep it until explicitly cleared
    #[default]
    Persist,
    /// Drop it as soon as it leaves the result set
    ClearWhenFilteredOut,
}

/// Selection plus a revision counter.
///
/// The revision moves on every accepted change, including re-selecting the
/// listing that is already selected, so views can tell repeat selections apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selection: Selection,
    revision: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn select(&mut self, id: PropertyId) -> u64 {
        self.selection = Selection::Selected(id);
        self.bump()
    }

    /// Returns the new revision, or `None` if nothing was selected
    pub fn clear(&mut self) -> Option<u64> {
        match self.selection {
            Selection::Unselected => None,
            Selection::Selected(_) => {
                self.selection = Selection::Unselected;
                Some(self.bump())
            }
        }
    }

    fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }
}
