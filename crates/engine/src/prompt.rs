//! Blocking yes/no confirmation

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

/// A fixed answer, for `--yes` and scripted callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}
