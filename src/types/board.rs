//! The five-light start board

use serde::{Deserialize, Serialize};
use crate::LIGHT_COUNT;

/// Lights in illumination order, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LightBoard {
    cells: [bool; LIGHT_COUNT],
    /// Number of lights switched on since the last reset
    lit: usize,
}

impl LightBoard {
    /// All lights off
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch on the next light. Returns its index, or `None` once all are lit.
    pub fn light_next(&mut self) -> Option<usize> {
        if self.lit >= LIGHT_COUNT {
            return None;
        }
        let index = self.lit;
        self.cells[index] = true;
        self.lit += 1;
        Some(index)
    }

    /// Switch every light off
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn cells(&self) -> [bool; LIGHT_COUNT] {
        self.cells
    }

    pub fn lit(&self) -> usize {
        self.lit
    }

    pub fn is_full(&self) -> bool {
        self.lit == LIGHT_COUNT
    }

    pub fn is_dark(&self) -> bool {
        self.cells.iter().all(|c| !c)
    }

    /// Render as a row of circles for the terminal
    pub fn render(&self, no_color: bool) -> String {
        self.cells
            .iter()
            .map(|&on| match (on, no_color) {
                (true, true) => "(O)",
                (false, true) => "( )",
                (true, false) => "\x1b[31m●\x1b[0m",
                (false, false) => "\x1b[90m○\x1b[0m",
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
