// src/progress.rs

/// Empfänger für Fortschrittsmeldungen mit kooperativem Abbruch.
/// `advance` liefert `false`, wenn der Aufrufer abbrechen möchte; die
/// Algorithmen prüfen das einmal pro Punkt (GridBuilder) bzw. einmal pro
/// Level (ContourExtractor) und niemals mitten in inneren Schleifen.
pub trait ProgressSink {
    /// Kündigt die Gesamtzahl der Schritte an.
    fn begin(&mut self, _total: u64) {}

    /// Ein Schritt ist abgeschlossen. `false` fordert den Abbruch an.
    fn advance(&mut self) -> bool;
}

/// Fortschritts-Senke, die nichts meldet und nie abbricht.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn advance(&mut self) -> bool {
        true
    }
}

/// Zählt Schritte mit und kann nach einer festen Anzahl abbrechen.
#[derive(Debug, Default)]
pub struct CountingProgress {
    pub total: u64,
    pub steps: u64,
    pub cancel_after: Option<u64>,
}

impl CountingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancelling_after(steps: u64) -> Self {
        Self {
            cancel_after: Some(steps),
            ..Self::default()
        }
    }
}

impl ProgressSink for CountingProgress {
    fn begin(&mut self, total: u64) {
        self.total = total;
        self.steps = 0;
    }

    fn advance(&mut self) -> bool {
        self.steps += 1;
        match self.cancel_after {
            Some(limit) => self.steps < limit,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_progress_cancels() {
        let mut progress = CountingProgress::cancelling_after(3);
        progress.begin(10);
        assert!(progress.advance());
        assert!(progress.advance());
        assert!(!progress.advance());
        assert_eq!(progress.steps, 3);
    }
}
