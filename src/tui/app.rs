use std::time::{Duration, Instant};

/// Which panel set fills the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dash,
    Ranks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
    shown_at: Instant,
}

/// Screen-only state. Everything about the user lives in the session.
pub struct App {
    pub view: View,
    pub status: Option<StatusLine>,
    pub show_share: bool,
    pub should_quit: bool,
    status_ttl: Duration,
}

impl Default for App {
    fn default() -> Self {
        Self {
            view: View::Dash,
            status: None,
            show_share: false,
            should_quit: false,
            status_ttl: Duration::from_secs(4),
        }
    }
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Dash => View::Ranks,
            View::Ranks => View::Dash,
        };
    }

    pub fn toggle_share(&mut self) {
        self.show_share = !self.show_share;
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            kind: StatusKind::Info,
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            kind: StatusKind::Error,
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    /// Drop the status line once it has been visible long enough.
    pub fn expire_status(&mut self) {
        if self
            .status
            .as_ref()
            .is_some_and(|s| s.shown_at.elapsed() >= self.status_ttl)
        {
            self.status = None;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_toggles() {
        let mut app = App::new();
        assert_eq!(app.view, View::Dash);
        app.toggle_view();
        assert_eq!(app.view, View::Ranks);
        app.toggle_view();
        assert_eq!(app.view, View::Dash);
    }

    #[test]
    fn test_status_expiry() {
        let mut app = App {
            status_ttl: Duration::ZERO,
            ..App::default()
        };
        app.set_error("Ineligible.");
        assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
        app.expire_status();
        assert!(app.status.is_none());

        let mut app = App::new();
        app.set_status("NFT Claimed!");
        app.expire_status();
        assert_eq!(app.status.as_ref().map(|s| s.text.as_str()), Some("NFT Claimed!"));
    }
}
