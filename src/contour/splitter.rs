// src/contour/splitter.rs

/// Teilstück einer aufgetrennten Konturlinie in Gitterkoordinaten.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitFragment {
    pub vertices: Vec<(f64, f64)>,
    pub closed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitState {
    /// Kein Teilstück in Arbeit.
    Idle,
    /// Puffer sammelt Innen-Stützpunkte.
    Accumulating,
}

/// Trennt eine rohe Konturlinie an Stützpunkten im äußersten Zellring auf.
///
/// Explizite Zustandsmaschine statt loser Flags: `push_inside` sammelt,
/// `push_outside` schließt das laufende Teilstück ab (sofern es mindestens
/// zwei Stützpunkte hat) oder verwirft einen einzelnen Stützpunkt.
/// Abgetrennte Teilstücke sind grundsätzlich offen; nur eine nie
/// beschnittene Linie behält am Ende ihren Geschlossen-Status.
#[derive(Debug)]
pub struct BorderSplitter {
    state: SplitState,
    buffer: Vec<(f64, f64)>,
    truncated: bool,
    fragments: Vec<SplitFragment>,
}

impl Default for BorderSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl BorderSplitter {
    pub fn new() -> Self {
        Self {
            state: SplitState::Idle,
            buffer: Vec::new(),
            truncated: false,
            fragments: Vec::new(),
        }
    }

    /// Ein Stützpunkt innerhalb des zulässigen Bereichs.
    pub fn push_inside(&mut self, vertex: (f64, f64)) {
        self.buffer.push(vertex);
        self.state = SplitState::Accumulating;
    }

    /// Ein Stützpunkt im äußersten Zellring; er wird verworfen und die
    /// Linie an dieser Stelle aufgetrennt.
    pub fn push_outside(&mut self) {
        self.truncated = true;
        match self.state {
            SplitState::Idle => {}
            SplitState::Accumulating => {
                if self.buffer.len() >= 2 {
                    self.fragments.push(SplitFragment {
                        vertices: std::mem::take(&mut self.buffer),
                        closed: false,
                    });
                } else {
                    // Ein einzelner Stützpunkt trägt keine Linie.
                    self.buffer.clear();
                }
                self.state = SplitState::Idle;
            }
        }
    }

    /// Schließt die Linie ab. `raw_closed` ist der Geschlossen-Status der
    /// unbeschnittenen Eingangslinie.
    pub fn finish(mut self, raw_closed: bool) -> Vec<SplitFragment> {
        if self.buffer.len() >= 2 {
            let closed = raw_closed && !self.truncated;
            self.fragments.push(SplitFragment {
                vertices: std::mem::take(&mut self.buffer),
                closed,
            });
        }
        self.fragments
    }
}
