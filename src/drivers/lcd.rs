//! 16x2 character display driver (I²C serial backpack at 0x3C).
//!
//! Thin wrapper over the backpack's command set: the core only needs
//! `clear`, `move_to` and `put_str`. A shadow buffer of both lines is kept
//! on all targets so tests and diagnostics can inspect what the display
//! shows.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: forwards bytes over the I²C bus via hw_init. On host/test:
//! shadow buffer only.

use heapless::String;

use crate::drivers::hw_init;
use crate::pins;

/// Degree symbol in the display's character ROM.
pub const DEG: char = '\u{df}';

// Backpack command set: a 0xFE prefix escapes the next byte as a command.
const CMD_PREFIX: u8 = 0xFE;
const CMD_CLEAR: u8 = 0x51;
const CMD_SET_CURSOR: u8 = 0x45;

pub struct Lcd {
    col: usize,
    row: usize,
    lines: [String<{ pins::LCD_COLS }>; pins::LCD_ROWS],
}

impl Lcd {
    pub fn new() -> Self {
        Self {
            col: 0,
            row: 0,
            lines: [String::new(), String::new()],
        }
    }

    /// Blank the display and home the cursor.
    pub fn clear(&mut self) {
        hw_init::i2c_write(pins::LCD_I2C_ADDR, &[CMD_PREFIX, CMD_CLEAR]);
        self.col = 0;
        self.row = 0;
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Move the cursor. Out-of-range positions are clamped to the grid.
    pub fn move_to(&mut self, col: usize, row: usize) {
        self.col = col.min(pins::LCD_COLS - 1);
        self.row = row.min(pins::LCD_ROWS - 1);
        // Row 1 starts at DDRAM address 0x40 on this controller.
        let addr = (self.row as u8) * 0x40 + self.col as u8;
        hw_init::i2c_write(pins::LCD_I2C_ADDR, &[CMD_PREFIX, CMD_SET_CURSOR, addr]);
    }

    /// Write text at the cursor; anything past the row edge is dropped.
    pub fn put_str(&mut self, text: &str) {
        let row = self.row;
        for ch in text.chars() {
            if self.col >= pins::LCD_COLS {
                break;
            }
            // Shadow mirrors the written cells; cells skipped over by a
            // cursor move read back as blanks.
            while self.lines[row].len() < self.col {
                let _ = self.lines[row].push(' ');
            }
            if self.lines[row].len() == self.col {
                let _ = self.lines[row].push(ch);
            }
            // The backpack takes raw 8-bit codepoints (degree glyph at
            // 0xDF); anything wider has no glyph in the character ROM.
            if (ch as u32) <= 0xFF {
                hw_init::i2c_write(pins::LCD_I2C_ADDR, &[ch as u8]);
            }
            self.col += 1;
        }
    }

    /// Shadow copy of a display line (host inspection / tests).
    pub fn line(&self, row: usize) -> &str {
        self.lines[row.min(pins::LCD_ROWS - 1)].as_str()
    }
}
