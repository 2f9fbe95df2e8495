use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::export;
use crate::state::{AppState, ProviderCommand, Tab};

pub struct App {
    pub state: AppState,
    pub should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
    export_dir: PathBuf,
}

impl App {
    pub fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>, export_dir: PathBuf) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
            export_dir,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.state.search_active {
            self.on_search_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.set_tab(Tab::Dashboard),
            KeyCode::Char('2') => self.state.set_tab(Tab::Players),
            KeyCode::Tab => self.state.toggle_tab(),
            KeyCode::Char('l') => {
                let next = self.state.filter.league.next();
                if self.state.set_league(next) {
                    self.request_stats();
                }
            }
            KeyCode::Char('L') => {
                let prev = self.state.filter.league.prev();
                if self.state.set_league(prev) {
                    self.request_stats();
                }
            }
            KeyCode::Char('/') => self.state.search_active = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.request_stats(),
            KeyCode::Char('x') | KeyCode::Char('X') => self.export_table(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.state.search_active = false,
            KeyCode::Backspace => {
                if self.state.pop_search_char() {
                    self.request_stats();
                }
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.state.clear_search() {
                    self.request_stats();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.push_search_char(c);
                self.request_stats();
            }
            _ => {}
        }
    }

    /// Issues one fetch for the current filter.
    pub fn request_stats(&mut self) {
        let request = self.state.begin_request();
        let Some(tx) = &self.cmd_tx else {
            self.state.loading = false;
            self.state.push_log("[INFO] Stats fetch unavailable");
            return;
        };
        let seq = request.seq;
        if tx.send(ProviderCommand::FetchStats(request)).is_err() {
            self.state.loading = false;
            self.state.push_log(format!("[WARN] Stats request #{seq} could not be sent"));
        }
    }

    fn export_table(&mut self) {
        let Some(data) = self.state.data.as_ref() else {
            self.state.push_log("[INFO] Nothing to export yet");
            return;
        };
        match export::export_player_table(&self.export_dir, self.state.filter.league, &data.table)
        {
            Ok(path) => {
                let rows = data.table.len();
                self.state
                    .push_log(format!("[INFO] Exported {rows} rows to {}", path.display()));
            }
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err:#}")),
        }
    }
}
