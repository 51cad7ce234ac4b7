use std::fmt::Display;
use std::io::Write;

const RULE_WIDTH: usize = 60;

/// Human-readable progress log. Write errors are ignored, like `println!`
/// output to a closed pipe would be in a one-shot tool.
pub struct Console<W: Write> {
    out: W,
}

impl Console<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&mut self, text: impl Display) {
        let _ = writeln!(self.out, "{}", text);
    }

    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    fn rule(&mut self, ch: char) {
        let rule: String = std::iter::repeat(ch).take(RULE_WIDTH).collect();
        self.line(rule);
    }

    /// Title framed by `=` rules.
    pub fn banner(&mut self, title: impl Display) {
        self.rule('=');
        self.line(title);
        self.rule('=');
    }

    /// Blank line, step title, `-` rule.
    pub fn section(&mut self, title: impl Display) {
        self.blank();
        self.line(title);
        self.rule('-');
    }

    pub fn success(&mut self, text: impl Display) {
        self.line(format_args!("✅ {}", text));
    }

    pub fn failure(&mut self, text: impl Display) {
        self.line(format_args!("❌ {}", text));
    }

    pub fn warning(&mut self, text: impl Display) {
        self.line(format_args!("⚠️  {}", text));
    }

    /// Blank line, heading, then the items numbered from 1.
    pub fn numbered(&mut self, heading: impl Display, items: &[impl Display]) {
        self.blank();
        self.line(heading);
        for (index, item) in items.iter().enumerate() {
            self.line(format_args!("{}. {}", index + 1, item));
        }
    }

    pub fn flush(&mut self) {
        let _ = self.out.flush();
    }
}
