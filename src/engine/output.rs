#[derive(Debug, Clone, PartialEq)]
pub enum OutputBlock {
    /// A plain log line.
    Text(String),
    /// The rendered map panel; at most one per output, always last writer.
    MapPanel(String),
    /// The pending input prompt; at most one, kept at the end.
    Prompt(String),
    /// A fixed delay in milliseconds before reading further input.
    Pause(u64),
}

#[derive(Default, Debug)]
pub struct Output {
    pub blocks: Vec<OutputBlock>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Text(s));
        }
    }

    pub fn map_panel(&mut self, s: impl Into<String>) {
        let s = s.into();
        if s.trim().is_empty() {
            return;
        }

        // ensure only one MapPanel block exists
        self.blocks
            .retain(|b| !matches!(b, OutputBlock::MapPanel(_)));
        self.blocks.push(OutputBlock::MapPanel(s));
    }

    pub fn prompt(&mut self, s: impl Into<String>) {
        let s = s.into();
        if s.trim().is_empty() {
            return;
        }

        // ensure only one Prompt block exists, always last
        self.blocks.retain(|b| !matches!(b, OutputBlock::Prompt(_)));
        self.blocks.push(OutputBlock::Prompt(s));
    }

    pub fn pause(&mut self, millis: u64) {
        self.blocks.push(OutputBlock::Pause(millis));
    }

    /// Collected text lines, for assertions in tests.
    pub fn lines(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                OutputBlock::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}
