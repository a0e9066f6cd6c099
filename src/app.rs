// App state and main event loop.
// Manages the side lists, tab dispatch, and keyboard input handling.

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;

use crate::error::Result;
use crate::gh::{CommandRunner, ShellFetcher};
use crate::pipeline::{Pipeline, TabData};
use crate::prefetch::Inventory;
use crate::state::{LoadingState, SelectableList};
use crate::ui;

/// Active tab in the main pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Issues,
    PullRequests,
    Actions,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Issues => "Issues",
            Tab::PullRequests => "PullRequests",
            Tab::Actions => "Actions",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Overview => Tab::Issues,
            Tab::Issues => Tab::PullRequests,
            Tab::PullRequests => Tab::Actions,
            Tab::Actions => Tab::Overview,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Overview => Tab::Actions,
            Tab::Issues => Tab::Overview,
            Tab::PullRequests => Tab::Issues,
            Tab::Actions => Tab::PullRequests,
        }
    }

    /// Table columns for the data tabs; Overview renders prose instead.
    pub fn columns(&self) -> Option<[&'static str; 5]> {
        match self {
            Tab::Overview => None,
            Tab::Issues => Some(["Issue", "Author", "Age", "Updated @", "Description"]),
            Tab::PullRequests => Some(["Number", "Age", "State", "Author", "Title"]),
            Tab::Actions => Some(["Number", "Attempt", "Event", "Result", "Name"]),
        }
    }
}

/// Which side list has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Owners,
    Repos,
}

/// A tab load deferred by one frame so the loading state gets drawn
/// before the blocking fetch starts.
#[derive(Debug, Clone, Copy)]
struct PendingLoad {
    bypass: bool,
}

/// Main application state.
pub struct App<F = ShellFetcher> {
    pipeline: Pipeline<F>,
    inventory: Inventory,
    /// Organizations and account owners, left pane.
    pub owners: SelectableList,
    /// Repositories of the selected owner.
    pub repos: SelectableList,
    pub focus: Pane,
    pub active_tab: Tab,
    pub content: LoadingState<TabData>,
    pub show_help: bool,
    should_quit: bool,
    pending_load: Option<PendingLoad>,
}

impl<F: CommandRunner> App<F> {
    pub fn new(pipeline: Pipeline<F>, inventory: Inventory) -> Self {
        let owners: Vec<String> = inventory.keys().cloned().collect();
        let repos = owners
            .first()
            .and_then(|owner| inventory.get(owner))
            .cloned()
            .unwrap_or_default();

        let mut app = Self {
            pipeline,
            inventory,
            owners: SelectableList::new(owners),
            repos: SelectableList::new(repos),
            focus: Pane::default(),
            active_tab: Tab::default(),
            content: LoadingState::Idle,
            show_help: false,
            should_quit: false,
            pending_load: None,
        };
        // First frame shows the Overview of the first repository.
        app.request_load(Tab::Overview, false);
        app
    }

    /// Main event loop. Draws, then either services a pending load or
    /// polls for input.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            if self.pending_load.is_some() {
                self.perform_load();
            } else {
                self.handle_events()?;
            }
        }
        Ok(())
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.request_load(self.active_tab.next(), false),
            KeyCode::BackTab => self.request_load(self.active_tab.prev(), false),
            KeyCode::Char('O') => self.request_load(Tab::Overview, false),
            KeyCode::Char('I') => self.request_load(Tab::Issues, false),
            KeyCode::Char('P') => self.request_load(Tab::PullRequests, false),
            KeyCode::Char('A') => self.request_load(Tab::Actions, false),
            KeyCode::Char('r') => self.request_load(self.active_tab, true),
            KeyCode::Down | KeyCode::Char('j') => match self.focus {
                Pane::Owners => self.owners.select_next(),
                Pane::Repos => self.repos.select_next(),
            },
            KeyCode::Up | KeyCode::Char('k') => match self.focus {
                Pane::Owners => self.owners.select_prev(),
                Pane::Repos => self.repos.select_prev(),
            },
            KeyCode::Left | KeyCode::Char('h') => self.focus = Pane::Owners,
            KeyCode::Right | KeyCode::Char('l') => self.focus = Pane::Repos,
            KeyCode::Enter => self.select_current(),
            _ => {}
        }
    }

    /// Enter on an owner repopulates the repository list; Enter on a
    /// repository loads its Overview.
    fn select_current(&mut self) {
        match self.focus {
            Pane::Owners => {
                if let Some(owner) = self.owners.selected() {
                    let repos = self.inventory.get(owner).cloned().unwrap_or_default();
                    self.repos.replace(repos);
                    self.focus = Pane::Repos;
                }
            }
            Pane::Repos => {
                if self.repos.selected().is_some() {
                    self.request_load(Tab::Overview, false);
                }
            }
        }
    }

    /// Switch tabs and queue the (blocking) load for the next frame.
    fn request_load(&mut self, tab: Tab, bypass: bool) {
        self.active_tab = tab;
        self.content = LoadingState::Loading;
        self.pending_load = Some(PendingLoad { bypass });
    }

    /// Run the queued fetch. Blocks until the external command and any
    /// cache I/O finish; switching tabs never cancels this.
    fn perform_load(&mut self) {
        let Some(load) = self.pending_load.take() else {
            return;
        };
        let (Some(owner), Some(repo)) = (self.owners.selected(), self.repos.selected()) else {
            self.content = LoadingState::Error("no repository selected".to_string());
            return;
        };
        let (owner, repo) = (owner.to_string(), repo.to_string());

        let result = match self.active_tab {
            Tab::Overview => self.pipeline.overview(&owner, &repo, load.bypass),
            Tab::Issues => self.pipeline.issues(&owner, &repo, load.bypass),
            Tab::PullRequests => self.pipeline.pull_requests(&owner, &repo, load.bypass),
            Tab::Actions => self.pipeline.actions(&owner, &repo, load.bypass),
        };
        self.content = match result {
            Ok(data) => LoadingState::Loaded(data),
            Err(e) => LoadingState::Error(e.to_string()),
        };
    }
}
