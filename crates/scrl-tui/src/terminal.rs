//! Terminal ownership: setup, suspension while a silent mirror runs, and
//! restoration on exit or panic.

use ratatui::DefaultTerminal;

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// The alternate screen, present only while the launcher is visible.
pub struct Screen {
    terminal: Option<DefaultTerminal>,
}

impl Screen {
    /// Enter raw mode and the alternate screen
    pub fn enter() -> Self {
        Self {
            terminal: Some(ratatui::init()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.terminal.is_some()
    }

    /// Hand the terminal back to the shell. Returns `false` if it already was.
    pub fn suspend(&mut self) -> bool {
        match self.terminal.take() {
            Some(_) => {
                ratatui::restore();
                true
            }
            None => false,
        }
    }

    /// The live terminal, re-entering the alternate screen if suspended
    pub fn terminal(&mut self) -> &mut DefaultTerminal {
        self.terminal.get_or_insert_with(ratatui::init)
    }
}
