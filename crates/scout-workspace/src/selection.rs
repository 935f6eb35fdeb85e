//! Team selection state
//!
//! An ordered row of team selectors. Every chart in the workspace plots the
//! distinct selected teams in selector order.

/// Ordered team selectors (empty slots allowed)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamSelection {
    selectors: Vec<Option<u32>>,
    max: usize,
}

impl TeamSelection {
    /// One blank selector
    pub fn new(max: usize) -> Self {
        Self {
            selectors: vec![None],
            max: max.max(1),
        }
    }

    /// One selector per saved team, or one blank selector when none were saved
    pub fn from_saved(teams: &[u32], max: usize) -> Self {
        let mut selection = Self::new(max);
        if teams.is_empty() {
            return selection;
        }
        selection.selectors = teams.iter().take(selection.max).map(|&t| Some(t)).collect();
        selection
    }

    /// Append a blank selector. Returns false once the maximum is reached.
    pub fn add_selector(&mut self) -> bool {
        if self.selectors.len() >= self.max {
            return false;
        }
        self.selectors.push(None);
        true
    }

    /// Set or clear one selector. Returns whether the selected teams changed.
    pub fn set(&mut self, index: usize, team: Option<u32>) -> bool {
        let before = self.selected();
        match self.selectors.get_mut(index) {
            Some(slot) => *slot = team,
            None => return false,
        }
        self.selected() != before
    }

    /// Remove one selector; the last remaining selector is cleared instead
    pub fn remove_selector(&mut self, index: usize) -> bool {
        if index >= self.selectors.len() {
            return false;
        }
        let before = self.selected();
        if self.selectors.len() == 1 {
            self.selectors[0] = None;
        } else {
            self.selectors.remove(index);
        }
        self.selected() != before
    }

    /// Raw selector values
    pub fn selectors(&self) -> &[Option<u32>] {
        &self.selectors
    }

    /// Distinct selected teams in selector order
    pub fn selected(&self) -> Vec<u32> {
        let mut teams: Vec<u32> = Vec::with_capacity(self.selectors.len());
        for team in self.selectors.iter().flatten() {
            if !teams.contains(team) {
                teams.push(*team);
            }
        }
        teams
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.iter().all(Option::is_none)
    }

    pub fn max(&self) -> usize {
        self.max
    }
}
