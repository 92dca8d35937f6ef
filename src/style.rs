//! Semantic output roles mapped onto terminal styling.

use console::{Style, StyledObject};

/// What a piece of output means, independent of how a terminal renders it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Role {
    Header,
    Accent,
    Warning,
    Success,
}

impl Role {
    fn style(self) -> Style {
        let style = Style::new();
        match self {
            Role::Header => style.blue().bright(),
            // There is no orange in the basic ANSI palette.
            Role::Accent => style.yellow().bright(),
            Role::Warning => style.red().bright(),
            Role::Success => style.green().bright(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Colors only when both the caller and the attached terminal allow it.
    pub fn detect(allow_color: bool) -> Self {
        Self::new(allow_color && console::colors_enabled())
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn paint<D>(&self, role: Role, text: D) -> StyledObject<D> {
        role.style().force_styling(self.enabled).apply_to(text)
    }
}
