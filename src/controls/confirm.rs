use crate::host::Host;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    Idle,
    ConfirmPending,
    Submitted,
}

/// Submit button guarded by a yes/no question
#[derive(Debug, Clone)]
pub struct ConfirmFlow {
    state: ConfirmState,
    question: String,
}

impl ConfirmFlow {
    pub fn new(question: impl Into<String>) -> Self {
        Self { state: ConfirmState::Idle, question: question.into() }
    }

    pub fn state(&self) -> ConfirmState {
        self.state
    }

    /// Submit clicked: ask the question. Ignored unless idle.
    pub fn request(&mut self, host: &mut dyn Host) -> bool {
        if self.state != ConfirmState::Idle {
            return false;
        }
        host.confirm(&self.question);
        self.state = ConfirmState::ConfirmPending;
        true
    }

    pub fn cancel(&mut self) -> bool {
        if self.state != ConfirmState::ConfirmPending {
            return false;
        }
        self.state = ConfirmState::Idle;
        true
    }

    pub fn accept(&mut self) -> bool {
        if self.state != ConfirmState::ConfirmPending {
            return false;
        }
        self.state = ConfirmState::Submitted;
        true
    }
}
