//! Headless rule editor: a 5x5 editing neighborhood and the operations a
//! front end binds to keys and clicks.

use rand::Rng;

use crate::automaton::neighborhood::{Cell, Neighborhood};
use crate::automaton::rule::RuleTable;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleEditor {
    neighborhood: Neighborhood,
}

impl RuleEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn neighborhood(&self) -> &Neighborhood {
        &self.neighborhood
    }

    pub fn set_neighborhood(&mut self, n: Neighborhood) {
        self.neighborhood = n;
    }

    /// Flip the cell at column `x`, row `y` (both 0..5). Out of range is ignored.
    pub fn toggle_cell(&mut self, x: usize, y: usize) {
        if x < 5 && y < 5 {
            let cell = &mut self.neighborhood[5 * y + x];
            *cell = if *cell == 0 { 1 } else { 0 };
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x < 5 && y < 5 {
            self.neighborhood[5 * y + x]
        } else {
            0
        }
    }

    /// Move the pattern one step; cells pushed off the edge are lost.
    pub fn shift(&mut self, dx: i32, dy: i32) {
        self.neighborhood = self.neighborhood.shift(dx, dy);
    }

    /// Each cell becomes live with probability 2/7.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut cells = [0; 25];
        for cell in cells.iter_mut() {
            *cell = Cell::from(rng.gen_range(0..7) > 4);
        }
        self.neighborhood = Neighborhood::new(cells);
    }

    pub fn clear_neighborhood(&mut self) {
        self.neighborhood = Neighborhood::default();
    }

    /// What `rules` does with the editing neighborhood.
    pub fn outcome(&self, rules: &RuleTable) -> bool {
        rules.apply_neighborhood(&self.neighborhood)
    }

    /// Flip the editing neighborhood's transition across its symmetry orbit.
    ///
    /// # Returns
    /// The new outcome.
    pub fn toggle_transition(&self, rules: &mut RuleTable) -> bool {
        rules.toggle_isotropic(&self.neighborhood);
        self.outcome(rules)
    }

    /// Turn every transition off.
    pub fn clear_rules(&self, rules: &mut RuleTable) {
        rules.clear();
        tracing::info!("cleared rule table");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::symmetry::symmetry_orbit;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_toggle_cell() {
        let mut editor = RuleEditor::new();
        editor.toggle_cell(4, 0);
        assert_eq!(editor.neighborhood()[4], 1);
        assert_eq!(editor.cell(4, 0), 1);
        editor.toggle_cell(4, 0);
        assert_eq!(editor.neighborhood(), &Neighborhood::default());
        editor.toggle_cell(5, 0);
        assert_eq!(editor.neighborhood(), &Neighborhood::default());
    }

    #[test]
    fn test_shift_moves_and_drops() {
        let mut editor = RuleEditor::new();
        editor.toggle_cell(3, 2);
        editor.shift(1, 0);
        assert_eq!(editor.cell(4, 2), 1);
        editor.shift(1, 0);
        assert_eq!(editor.neighborhood().count_total_cells(), 0);
    }

    #[test]
    fn test_randomize_is_binary() {
        let mut editor = RuleEditor::new();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut live = 0;
        for _ in 0..200 {
            editor.randomize(&mut rng);
            assert!(editor.neighborhood().cells().iter().all(|&c| c <= 1));
            live += editor.neighborhood().count_total_cells();
        }
        // 200 * 25 cells at 2/7 is about 1429.
        assert!((1200..1650).contains(&live), "live = {live}");
    }

    #[test]
    fn test_toggle_transition_covers_orbit() {
        let mut rules = RuleTable::new();
        let mut editor = RuleEditor::new();
        editor.toggle_cell(0, 1);
        editor.toggle_cell(2, 2);

        assert!(!editor.outcome(&rules));
        assert!(editor.toggle_transition(&mut rules));
        for index in symmetry_orbit(editor.neighborhood()) {
            assert!(rules.get(index));
        }

        editor.clear_rules(&mut rules);
        assert_eq!(rules.count_set(), 0);
    }
}
