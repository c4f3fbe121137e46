use console::{Style, StyledObject};

/// Applies terminal styling unless colors are disabled.
///
/// Styling is forced on when enabled so the output is the same whether or not
/// stdout is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    no_color: bool,
}

impl Painter {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.no_color {
            return text.to_string();
        }
        let styled: StyledObject<&str> = style.apply_to(text).force_styling(true);
        styled.to_string()
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(text, Style::new().bold())
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(text, Style::new().dim())
    }

    pub fn red(&self, text: &str) -> String {
        self.paint(text, Style::new().red())
    }

    pub fn green(&self, text: &str) -> String {
        self.paint(text, Style::new().green())
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint(text, Style::new().yellow())
    }
}
