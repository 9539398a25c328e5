use crate::types::YearRange;

/// Where the selection state machine is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// No time range chosen yet; nothing has been pushed to the charts.
    Unselected,
    /// A time range is active (department filter optional). Re-entered on every brush or
    /// click.
    Selected,
}

/// The active filters.
///
/// Transitions return a new value instead of mutating in place, so the controller swaps
/// the whole state in one assignment and a reader never sees half of an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    years: Option<YearRange>,
    department: Option<String>,
}

impl FilterState {
    /// No time range, no department restriction.
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn years(&self) -> Option<YearRange> {
        self.years
    }

    /// `None` means "no department restriction".
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn phase(&self) -> SelectionPhase {
        match self.years {
            Some(_) => SelectionPhase::Selected,
            None => SelectionPhase::Unselected,
        }
    }

    /// Same department restriction, new time range.
    pub fn with_years(&self, years: YearRange) -> Self {
        Self {
            years: Some(years),
            department: self.department.clone(),
        }
    }

    /// Clicking the active department clears it; clicking any other department selects it.
    pub fn toggled_department(&self, department: &str) -> Self {
        let department = match self.department() {
            Some(active) if active == department => None,
            _ => Some(department.to_string()),
        };
        Self {
            years: self.years,
            department,
        }
    }

    pub fn without_department(&self) -> Self {
        Self {
            years: self.years,
            department: None,
        }
    }
}
