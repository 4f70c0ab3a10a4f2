use crate::game::Game;

use super::AppState;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    DealMode,
    Seed,
}

const MENU_ITEMS: [MenuItem; 2] = [MenuItem::DealMode, MenuItem::Seed];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::DealMode => {
                format!("Deal: {}", if app.cfg_seeded { "Seeded" } else { "Random" })
            }
            MenuItem::Seed if app.cfg_seeded => format!("Seed: {}", app.cfg_seed),
            MenuItem::Seed => format!("Seed: {} (unused)", app.cfg_seed),
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::DealMode => app.cfg_seeded = !app.cfg_seeded,
            MenuItem::Seed => app.cfg_seed = app.cfg_seed.wrapping_add(1),
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::DealMode => app.cfg_seeded = !app.cfg_seeded,
            MenuItem::Seed => app.cfg_seed = app.cfg_seed.wrapping_sub(1),
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_overlays();
        self.scene = match self.scene {
            super::Scene::Menu => super::Scene::Table,
            _ => {
                self.open_menu();
                super::Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_overlays();
        self.menu_index = 0;
        if let Some(seed) = self.game.seed() {
            self.cfg_seed = seed;
        }
        self.scene = super::Scene::Menu;
    }

    /// Deals a new game with the menu settings and switches to the table.
    pub fn apply_menu(&mut self) {
        self.game = if self.cfg_seeded { Game::with_seed(self.cfg_seed) } else { Game::new() };
        self.clear_action_error();
        self.status = None;
        self.history_offset = 0;
        self.scene = super::Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = super::Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
