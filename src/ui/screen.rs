use minetype::session::Phase;
use ratatui::Frame;

use crate::{
    ui::{render_loading, render_menu, render_playing, render_results},
    App,
};

/// A UI Screen boundary: responsible for rendering one session phase
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Title screen shown while idle
pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_menu(app, f);
    }
}

pub struct LoadingScreen;

impl Screen for LoadingScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_loading(app, f);
    }
}

/// Typing screen - word panel, score, time
pub struct PlayingScreen;

impl Screen for PlayingScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_playing(app, f);
    }
}

/// Results screen - overlays the final stats on the last word
pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_playing(app, f);
        render_results(app, f);
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Idle => Box::new(MenuScreen),
        Phase::Loading => Box::new(LoadingScreen),
        Phase::Active => Box::new(PlayingScreen),
        Phase::Ended => Box::new(ResultsScreen),
    }
}
