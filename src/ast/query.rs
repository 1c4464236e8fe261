use crate::ast::Command;

/// One parsed pipeline stage together with its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub text: String,
    pub command: Command,
}

/// A complete pipeline. Every stage has already parsed successfully.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub stages: Vec<Stage>,
}

impl Query {
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.stages.iter().map(|s| &s.command)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
