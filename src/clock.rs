/// Whole-second race clock.
///
/// Advances one second per tick while running. With a ceiling set, elapsed
/// time is clamped there and never passes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    elapsed: u32,
    running: bool,
    ceiling: Option<u32>,
}

impl Clock {
    pub fn new(ceiling: Option<u32>) -> Self {
        Self {
            elapsed: 0,
            running: false,
            ceiling,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn ceiling(&self) -> Option<u32> {
        self.ceiling
    }

    /// Advance by one second. Returns false when stopped.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let next = self.elapsed.saturating_add(1);
        self.elapsed = match self.ceiling {
            Some(ceiling) if next >= ceiling => ceiling,
            _ => next,
        };
        true
    }

    pub fn ceiling_reached(&self) -> bool {
        self.ceiling.is_some_and(|ceiling| self.elapsed >= ceiling)
    }

    pub fn seconds_remaining(&self) -> Option<u32> {
        self.ceiling.map(|ceiling| ceiling.saturating_sub(self.elapsed))
    }
}
