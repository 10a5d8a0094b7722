/// Pipeline configuration.
///
/// The capture system tracks at most two people per recording; that limit
/// used to be an assumption baked into the readers and is an explicit
/// setting here. The split fractions place the train/validation boundary at
/// `round(train_frac * N)` slots and the validation/test boundary at
/// `round((train_frac + val_frac) * N)`.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Person slots tracked per recording. Detections beyond this count in a
    /// single frame are ignored (with a warning).
    pub person_slots: usize,
    /// Fraction of slots used for training.
    pub train_frac: f64,
    /// Fraction of slots used for validation; the remainder is the test set.
    pub val_frac: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            person_slots: 2,
            train_frac: 0.67,
            val_frac: 0.18,
        }
    }
}

impl PipelineConfig {
    /// Set the number of person slots per recording (builder pattern).
    pub fn with_person_slots(mut self, slots: usize) -> Self {
        self.person_slots = slots;
        self
    }

    /// Set the train/validation split fractions (builder pattern).
    pub fn with_split(mut self, train_frac: f64, val_frac: f64) -> Self {
        self.train_frac = train_frac;
        self.val_frac = val_frac;
        self
    }
}
