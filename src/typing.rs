#[derive(Clone, Debug, PartialEq)]
pub struct TypingConfig {
    pub texts: Vec<String>,
    pub type_delay_ms: u32,
    pub delete_delay_ms: u32,
    pub pause_full_ms: u32,
    pub pause_empty_ms: u32,
    pub start_delay_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            texts: vec!["Rafael Mota".to_string(), "Criando Soluções".to_string()],
            type_delay_ms: 100,
            delete_delay_ms: 50,
            pause_full_ms: 2_000,
            pause_empty_ms: 500,
            start_delay_ms: 1_000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    PausedFull,
    Deleting,
    PausedEmpty,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypingEngine {
    config: TypingConfig,
    text_index: usize,
    char_count: usize,
    phase: TypingPhase,
    next_delay_ms: Option<u32>,
}

impl TypingEngine {
    pub fn new(config: TypingConfig) -> Self {
        let next_delay_ms = (!config.texts.is_empty()).then_some(config.start_delay_ms);

        Self {
            config,
            text_index: 0,
            char_count: 0,
            phase: TypingPhase::Typing,
            next_delay_ms,
        }
    }

    pub fn text_index(&self) -> usize {
        self.text_index
    }

    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    /// Delay before the next tick, `None` when there is nothing to type.
    pub fn next_delay_ms(&self) -> Option<u32> {
        self.next_delay_ms
    }

    pub fn current_text(&self) -> &str {
        self.config
            .texts
            .get(self.text_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    fn current_len(&self) -> usize {
        self.current_text().chars().count()
    }

    pub fn visible_text(&self) -> &str {
        let text = self.current_text();
        let end = text
            .char_indices()
            .nth(self.char_count)
            .map(|(index, _)| index)
            .unwrap_or(text.len());
        &text[..end]
    }

    pub fn tick(&mut self) -> Option<u32> {
        if self.config.texts.is_empty() {
            self.next_delay_ms = None;
            return None;
        }

        let delay = match self.phase {
            TypingPhase::Typing => self.type_step(),
            TypingPhase::PausedFull => {
                self.phase = TypingPhase::Deleting;
                self.delete_step()
            }
            TypingPhase::Deleting => self.delete_step(),
            TypingPhase::PausedEmpty => {
                self.phase = TypingPhase::Typing;
                self.type_step()
            }
        };

        self.next_delay_ms = Some(delay);
        Some(delay)
    }

    fn type_step(&mut self) -> u32 {
        if self.char_count < self.current_len() {
            self.char_count += 1;
            self.config.type_delay_ms
        } else {
            self.phase = TypingPhase::PausedFull;
            self.config.pause_full_ms
        }
    }

    fn delete_step(&mut self) -> u32 {
        if self.char_count > 0 {
            self.char_count -= 1;
            self.config.delete_delay_ms
        } else {
            self.text_index = (self.text_index + 1) % self.config.texts.len();
            self.phase = TypingPhase::PausedEmpty;
            self.config.pause_empty_ms
        }
    }
}

impl Default for TypingEngine {
    fn default() -> Self {
        Self::new(TypingConfig::default())
    }
}
