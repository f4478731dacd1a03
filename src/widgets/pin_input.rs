//! Six-box verification code entry.
//!
//! Renders a [`PinCode`] as a row of single-character cells. The box
//! under the focus cursor gets the highlighted border; focus movement
//! itself lives in `PinCode`.

use crate::utils::{focused_border_style, unfocused_border_style};
use crate::wizard::{PinCode, PIN_LEN};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

const BOX_WIDTH: u16 = 5;
const BOX_GAP: u16 = 1;

pub struct PinInputWidget<'a> {
    pin: &'a PinCode,
    focused: bool,
}

impl<'a> PinInputWidget<'a> {
    pub fn new(pin: &'a PinCode) -> Self {
        Self { pin, focused: false }
    }

    /// Whether the PIN row currently owns keyboard focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Width needed to draw all six boxes.
    pub fn width() -> u16 {
        PIN_LEN as u16 * BOX_WIDTH + (PIN_LEN as u16 - 1) * BOX_GAP
    }
}

impl Widget for PinInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let total = Self::width().min(area.width);
        let mut x = area.x + (area.width.saturating_sub(total)) / 2;

        for (i, digit) in self.pin.digits().iter().enumerate() {
            if x + BOX_WIDTH > area.x + area.width {
                break;
            }
            let cell = Rect::new(x, area.y, BOX_WIDTH, area.height.min(3));

            let border = if self.focused && i == self.pin.active() {
                focused_border_style()
            } else {
                unfocused_border_style()
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border);

            let text = digit.map(|d| d.to_string()).unwrap_or_default();
            Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center)
                .render(cell, buf);

            x += BOX_WIDTH + BOX_GAP;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_width_fits_six_boxes() {
        assert_eq!(PinInputWidget::width(), 35);
    }

    #[test]
    fn renders_digits_and_highlights_active_box() {
        let mut pin = PinCode::default();
        pin.enter('4');
        pin.enter('2');

        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        PinInputWidget::new(&pin).focused(true).render(area, &mut buf);

        let content: String = (0..40)
            .map(|x| buf.cell((x, 1)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect();
        assert!(content.contains('4'));
        assert!(content.contains('2'));
    }
}
