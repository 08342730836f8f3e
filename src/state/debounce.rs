/// Generation counter for debouncing bursts of input
///
/// Every input bumps the generation and schedules a delayed check with the
/// new value. When the check fires, only the newest generation is acted on.
#[derive(Debug, Default)]
pub struct Debounce {
    generation: u64,
}

impl Debounce {
    /// Register new input and return its generation
    pub fn bump(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Whether `generation` is still the newest input
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}
