use std::collections::BTreeSet;

/// What the user has typed so far plus the positions typed wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    text: Vec<char>,
    mistakes: BTreeSet<usize>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &[char] {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn mistakes(&self) -> &BTreeSet<usize> {
        &self.mistakes
    }

    pub fn mistake_count(&self) -> usize {
        self.mistakes.len()
    }

    pub fn is_mistake(&self, idx: usize) -> bool {
        self.mistakes.contains(&idx)
    }
}

/// Fold the full current input string into the previous state.
///
/// Shrinking drops every mistake at or past the new length. Growing checks
/// only the last character against the reference, so a multi-character
/// paste validates its final character alone. Same-length edits replace the
/// buffer and leave the mistakes untouched.
pub fn apply_input(previous: &InputState, next: &str, reference: &[char]) -> InputState {
    let text: Vec<char> = next.chars().collect();
    let mut mistakes = previous.mistakes.clone();

    if text.len() < previous.len() {
        mistakes.retain(|&idx| idx < text.len());
    } else if text.len() > previous.len() {
        let last_idx = text.len() - 1;
        if reference.get(last_idx) != text.last() {
            mistakes.insert(last_idx);
        }
    }

    InputState { text, mistakes }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharacterStatus {
    Pending,
    Correct,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterCell {
    pub ch: char,
    pub status: CharacterStatus,
}

/// One cell per reference character, derived fresh from the input.
pub fn character_statuses(input: &InputState, reference: &[char]) -> Vec<CharacterCell> {
    reference
        .iter()
        .enumerate()
        .map(|(idx, &ch)| {
            let status = if idx >= input.len() {
                CharacterStatus::Pending
            } else if input.is_mistake(idx) {
                CharacterStatus::Error
            } else {
                CharacterStatus::Correct
            };
            CharacterCell { ch, status }
        })
        .collect()
}
