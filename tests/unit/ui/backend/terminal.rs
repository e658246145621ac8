use super::*;
use crate::ui::core::geom::Aabb;
use crate::ui::core::painter::PaintCmd;

#[test]
fn colors_map_one_to_one() {
    assert_eq!(to_ratatui_color(Color::Reset), RColor::Reset);
    assert_eq!(to_ratatui_color(Color::Rgb(1, 2, 3)), RColor::Rgb(1, 2, 3));
    assert_eq!(to_ratatui_color(Color::RED), RColor::Indexed(1));
}

#[test]
fn style_keeps_unset_channels_unset() {
    let style = to_ratatui_style(Style::default().fg(Color::BLACK));
    assert_eq!(style.fg, Some(RColor::Indexed(0)));
    assert_eq!(style.bg, None);
}

#[test]
fn canvas_widget_blits_opaque_cells_and_resets_transparent_ones() {
    let mut canvas = Canvas::new(3, 1);
    canvas.apply(&[
        PaintCmd::FillRect {
            rect: Aabb::new(0, 0, 2, 1),
            color: Color::WHITE,
        },
        PaintCmd::Text {
            x: 0,
            y: 0,
            text: "Li".to_string(),
            color: Color::RED,
        },
    ]);

    let area = RRect::new(0, 0, 3, 1);
    let mut buf = Buffer::empty(area);
    if let Some(cell) = buf.cell_mut((2, 0)) {
        cell.set_symbol("z");
    }
    CanvasWidget { canvas: &canvas }.render(area, &mut buf);

    assert_eq!(buf.cell((0, 0)).map(|c| c.symbol()), Some("L"));
    assert_eq!(buf.cell((1, 0)).map(|c| c.fg), Some(RColor::Indexed(1)));
    assert_eq!(buf.cell((1, 0)).map(|c| c.bg), Some(RColor::Indexed(15)));
    assert_eq!(buf.cell((2, 0)).map(|c| c.symbol()), Some(" "));
}
