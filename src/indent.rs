/// Options shared by both renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Expressions nested deeper than this render as a sentinel instead of
    /// recursing further.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            indent_width: 2,
            max_depth: 256,
        }
    }
}

/// Computes whitespace prefixes from a nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    width: usize,
}

impl Indent {
    pub fn new(width: usize) -> Self {
        Indent { width }
    }

    pub fn prefix(&self, level: usize) -> String {
        " ".repeat(self.width * level)
    }

    pub fn line(&self, level: usize, text: &str) -> String {
        let mut output = self.prefix(level);
        output.push_str(text);
        output
    }

    /// Whitespace for `level + delta`, clamped at zero. Used where the
    /// prefix must be a fragment of its own rather than glued to text.
    pub fn raw(&self, level: usize, delta: isize) -> String {
        self.prefix(level.saturating_add_signed(delta))
    }

    pub fn write(&self, output: &mut String, level: usize) {
        for _ in 0..self.width * level {
            output.push(' ');
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::new(RenderOptions::default().indent_width)
    }
}

impl From<&RenderOptions> for Indent {
    fn from(options: &RenderOptions) -> Self {
        Indent::new(options.indent_width)
    }
}
