use std::fmt::{self, Display};

#[derive(Debug)]
pub struct Diagnostic {
    line: usize,
    message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error: {}", self.line, self.message)
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates a new diagnostic bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new diagnostic.
    pub fn diagnose(&mut self, line: usize, message: impl Into<String>) {
        let message = message.into();
        self.diagnostics.push(Diagnostic { line, message });
    }

    /// Checks if there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Reports all diagnostics to stderr.
    pub fn report_all(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!("{}", diagnostic);
        }
    }
}
