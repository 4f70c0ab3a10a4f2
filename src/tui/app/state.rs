use crate::command::{Command, Outcome};
use crate::config::Config;
use crate::game::{Game, PILE_COUNT};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// A move started from the keyboard that still waits for pile digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// `f` pressed; next digit picks the pile.
    Foundation,
    /// `p` pressed; next digit picks the source pile.
    PileFrom,
    /// Source chosen; next digit picks the destination.
    PileTo(usize),
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewDeal,
    Draw,
    SelectFoundation,
    SelectPile,
    PileDigit(usize),
    CancelSelection,
    CommandOpen,
    CommandChar(char),
    CommandBackspace,
    CommandSubmit,
    CommandCancel,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub started: Instant,
    // Core game engine instance
    pub game: Game,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_seeded: bool,
    pub cfg_seed: u64,
    pub(crate) status: Option<String>,
    pub(crate) history_offset: usize,
    pending: Option<Pending>,
    help_open: bool,
    history_open: bool,
    quit_requested: bool,
    command_entry: Option<String>,
    command_entry_error: Option<String>,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);
    const COMMAND_MAX_LEN: usize = 16;

    pub fn new(config: &Config) -> Self {
        let game = match config.seed() {
            Some(seed) => Game::with_seed(seed),
            None => Game::new(),
        };
        Self {
            scene: Scene::Menu,
            started: Instant::now(),
            cfg_seeded: config.seed().is_some(),
            cfg_seed: game.seed().unwrap_or_default(),
            game,
            menu_index: 0,
            status: None,
            history_offset: 0,
            pending: None,
            help_open: false,
            history_open: false,
            quit_requested: false,
            command_entry: None,
            command_entry_error: None,
            action_error: None,
            action_error_at: None,
        }
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn command_entry_active(&self) -> bool {
        self.command_entry.is_some()
    }

    pub fn command_entry_text(&self) -> Option<&str> {
        self.command_entry.as_deref()
    }

    pub fn command_entry_error(&self) -> Option<&str> {
        self.command_entry_error.as_deref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    pub(crate) fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_overlays(&mut self) {
        self.help_open = false;
        self.history_open = false;
        self.pending = None;
        self.command_entry = None;
        self.command_entry_error = None;
    }

    /// Applies `cmd` to the game and records the result for the status bar.
    fn run(&mut self, cmd: Command) -> bool {
        if self.scene != Scene::Table {
            return false;
        }
        match cmd.apply(&mut self.game) {
            Outcome::Applied(mv) => {
                self.clear_action_error();
                self.status = Some(mv.to_string());
                true
            }
            Outcome::Rejected(err) => {
                tracing::debug!(%err, "move rejected");
                self.action_error = Some(err.to_string());
                self.action_error_at = Some(Instant::now());
                false
            }
            Outcome::Quit => {
                self.quit_requested = true;
                false
            }
        }
    }

    fn select(&mut self, pending: Pending) {
        if self.scene == Scene::Table {
            self.pending = Some(pending);
        }
    }

    fn pile_digit(&mut self, pile: usize) -> bool {
        if pile >= PILE_COUNT {
            return false;
        }
        match self.pending.take() {
            Some(Pending::Foundation) => self.run(Command::Foundation(pile)),
            Some(Pending::PileFrom) => {
                self.pending = Some(Pending::PileTo(pile));
                false
            }
            Some(Pending::PileTo(from)) => self.run(Command::Pile(from, pile)),
            None => false,
        }
    }

    fn open_command_entry(&mut self) -> bool {
        if self.scene != Scene::Table {
            return false;
        }
        self.pending = None;
        self.command_entry = Some(String::new());
        self.command_entry_error = None;
        true
    }

    fn command_entry_push(&mut self, c: char) {
        if let Some(buf) = self.command_entry.as_mut() {
            if buf.len() < Self::COMMAND_MAX_LEN {
                buf.push(c);
            }
        }
        self.command_entry_error = None;
    }

    fn command_entry_backspace(&mut self) {
        if let Some(buf) = self.command_entry.as_mut() {
            buf.pop();
        }
        self.command_entry_error = None;
    }

    fn command_entry_submit(&mut self) -> bool {
        let Some(buf) = self.command_entry.as_ref() else {
            return false;
        };
        let cmd = match buf.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(err) => {
                self.command_entry_error = Some(err.to_string());
                return false;
            }
        };
        self.command_entry = None;
        self.command_entry_error = None;
        self.run(cmd)
    }

    fn command_entry_cancel(&mut self) {
        self.command_entry = None;
        self.command_entry_error = None;
    }

    /// Returns true when the action changed the game.
    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.game.history_len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::NewDeal => {
                if self.scene == Scene::Table {
                    self.new_deal();
                }
                false
            }
            InputAction::Draw => self.run(Command::Draw),
            InputAction::SelectFoundation => {
                self.select(Pending::Foundation);
                false
            }
            InputAction::SelectPile => {
                self.select(Pending::PileFrom);
                false
            }
            InputAction::PileDigit(pile) => self.pile_digit(pile),
            InputAction::CancelSelection => {
                self.pending = None;
                false
            }
            InputAction::CommandOpen => self.open_command_entry(),
            InputAction::CommandChar(c) => {
                self.command_entry_push(c);
                false
            }
            InputAction::CommandBackspace => {
                self.command_entry_backspace();
                false
            }
            InputAction::CommandSubmit => self.command_entry_submit(),
            InputAction::CommandCancel => {
                self.command_entry_cancel();
                false
            }
        }
    }

    /// Redeals using the menu settings: seeded mode replays `cfg_seed`,
    /// random mode draws a fresh seed.
    pub fn new_deal(&mut self) {
        if self.cfg_seeded {
            self.game.deal_seeded(self.cfg_seed);
        } else {
            self.game.deal();
        }
        self.close_overlays();
        self.history_offset = 0;
        self.status = None;
        self.clear_action_error();
    }

    /// Periodic housekeeping: expires stale error messages.
    pub fn on_tick(&mut self) {
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
    }
}
