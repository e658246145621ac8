use crate::ui::backend::{Backend, Canvas};
use crate::ui::core::style::{Color, Style};
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as RRect;
use ratatui::style::{Color as RColor, Style as RStyle};
use ratatui::widgets::Widget;
use ratatui::Terminal;
use std::io;

/// Opaque terminal wrapper so the rest of the crate does not need to reference `ratatui` types.
pub struct RatatuiTerminal {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl RatatuiTerminal {
    pub fn new(stdout: io::Stdout) -> io::Result<Self> {
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Backend for RatatuiTerminal {
    fn size(&self) -> io::Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }

    fn present(&mut self, frame: &Canvas) -> io::Result<()> {
        self.terminal.draw(|f| {
            let area = f.area();
            f.render_widget(CanvasWidget { canvas: frame }, area);
        })?;
        Ok(())
    }
}

struct CanvasWidget<'a> {
    canvas: &'a Canvas,
}

impl Widget for CanvasWidget<'_> {
    fn render(self, area: RRect, buf: &mut Buffer) {
        let width = area.width.min(self.canvas.width());
        let height = area.height.min(self.canvas.height());
        for y in 0..height {
            for x in 0..width {
                let Some(target) = buf.cell_mut((area.x + x, area.y + y)) else {
                    continue;
                };
                match self.canvas.cell(x as i32, y as i32) {
                    Some(cell) => {
                        target
                            .set_symbol(&cell.symbol)
                            .set_style(to_ratatui_style(cell.style));
                    }
                    None => {
                        target.reset();
                    }
                }
            }
        }
    }
}

fn to_ratatui_style(s: Style) -> RStyle {
    let mut out = RStyle::default();
    if let Some(fg) = s.fg {
        out = out.fg(to_ratatui_color(fg));
    }
    if let Some(bg) = s.bg {
        out = out.bg(to_ratatui_color(bg));
    }
    out
}

fn to_ratatui_color(c: Color) -> RColor {
    match c {
        Color::Reset => RColor::Reset,
        Color::Rgb(r, g, b) => RColor::Rgb(r, g, b),
        Color::Indexed(i) => RColor::Indexed(i),
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/backend/terminal.rs"]
mod tests;
