use super::*;
use crate::ui::backend::Canvas;
use crate::ui::core::painter::{PaintCmd, Painter};
use std::cell::Cell;
use std::rc::Rc;

const W: i32 = 16;
const H: i32 = 3;

fn menu_with(labels: &[&str]) -> Menu {
    let mut menu = Menu::new(W, H);
    for label in labels {
        let item = menu.item(*label, MenuColors::default());
        menu.add_item(item);
    }
    menu
}

fn item_center(menu: &Menu, index: usize) -> (i32, i32) {
    let (x, y) = menu.item_position(index);
    (x + W / 2, y + 1)
}

#[test]
fn items_stack_vertically_at_fixed_height() {
    let menu = menu_with(&["a", "b", "c"]);
    assert_eq!(menu.item_position(0), (0, 0));
    assert_eq!(menu.item_position(2), (0, 2 * H));
    assert_eq!(menu.base().aabb(), Aabb::new(0, 0, W, 3 * H));
    assert!(menu.hit_region().contains(W, 3 * H));
    assert!(!menu.hit_region().contains(W + 1, 0));
}

#[test]
fn clicking_an_item_activates_it_and_consumes() {
    let mut menu = menu_with(&["a", "b"]);
    let (x, y) = item_center(&menu, 1);
    assert!(menu.on_click(x, y));
    assert_eq!(menu.active_index(), Some(1));
    assert!(!menu.is_active());
}

#[test]
fn at_most_one_item_is_active_after_any_click_sequence() {
    let mut menu = menu_with(&["a", "b", "c", "d"]);
    let sequence = [0usize, 2, 2, 1, 3, 3, 0, 1, 1, 2, 0];
    for index in sequence {
        let (x, y) = item_center(&menu, index);
        menu.on_click(x, y);
        assert!(menu.active_count() <= 1);
    }
}

#[test]
fn clicking_active_item_again_deactivates_it() {
    let mut menu = menu_with(&["a", "b"]);
    let (x, y) = item_center(&menu, 0);
    menu.on_click(x, y);
    assert!(menu.on_click(x, y));
    assert_eq!(menu.active_index(), None);
}

#[test]
fn click_outside_every_item_is_not_consumed() {
    let mut menu = menu_with(&["a"]);
    assert!(!menu.on_click(W + 5, 1));
    assert_eq!(menu.active_index(), None);
}

#[test]
fn dirty_is_or_of_items_and_writes_broadcast() {
    let mut menu = menu_with(&["a", "b"]);
    assert!(menu.is_dirty());
    menu.set_dirty(false);
    assert!(!menu.is_dirty());

    let (x, y) = item_center(&menu, 1);
    menu.on_click(x, y);
    assert!(menu.is_dirty());
    assert!(!menu.item_at(0).is_some_and(|i| i.is_dirty()));
    assert!(menu.item_at(1).is_some_and(|i| i.is_dirty()));

    menu.set_dirty(true);
    assert!(menu.item_at(0).is_some_and(|i| i.is_dirty()));
}

#[test]
fn redraw_clears_only_dirty_items() {
    let mut menu = menu_with(&["a", "b", "c"]);
    menu.set_dirty(false);
    let (x, y) = item_center(&menu, 2);
    menu.on_click(x, y);

    let mut painter = Painter::new();
    menu.clear_render_area(&mut painter);
    menu.render(&mut painter);

    let clears: Vec<_> = painter
        .cmds()
        .iter()
        .filter_map(|c| match c {
            PaintCmd::Clear { rect } => Some(*rect),
            _ => None,
        })
        .collect();
    assert_eq!(clears, vec![Aabb::new(-1, 2 * H - 1, W + 2, H + 2)]);
    assert!(painter.cmds().contains(&PaintCmd::FillRect {
        rect: Aabb::new(0, 2 * H, W, H),
        color: MenuColors::default().active,
    }));
    assert!(!menu.is_dirty());
}

fn paint(menu: &mut Menu, canvas: &mut Canvas) {
    let mut painter = Painter::new();
    draw_at(&mut painter, 1, 1, |s| {
        menu.clear_render_area(s);
        menu.render(s);
    });
    canvas.apply(painter.cmds());
}

fn rows(canvas: &Canvas) -> Vec<String> {
    (0..canvas.height() as i32).map(|y| canvas.row_text(y)).collect()
}

#[test]
fn clearing_an_item_repaints_the_borders_it_shares() {
    let mut menu = menu_with(&["a", "b", "c"]);
    let mut canvas = Canvas::new(W as u16 + 4, 3 * H as u16 + 4);
    paint(&mut menu, &mut canvas);
    let before = rows(&canvas);
    assert!(before[H as usize].contains('└'));

    for _ in 0..2 {
        let (x, y) = item_center(&menu, 1);
        menu.on_click(x, y);
        paint(&mut menu, &mut canvas);
        assert_eq!(rows(&canvas), before);
    }
    assert!(!menu.is_dirty());
}

#[test]
fn activation_callback_decides_consumption() {
    let fired = Rc::new(Cell::new(0));
    let counter = fired.clone();
    let mut menu = Menu::new(W, H);
    let item = menu
        .item("Covalent", MenuColors::default())
        .on_activate(move || {
            counter.set(counter.get() + 1);
            false
        });
    menu.add_item(item);

    assert!(!menu.on_click(1, 1));
    assert_eq!(fired.get(), 1);
    assert_eq!(menu.active_index(), Some(0));
}

#[test]
fn set_nothing_active_clears_every_item() {
    let mut menu = menu_with(&["a", "b"]);
    let (x, y) = item_center(&menu, 0);
    menu.on_click(x, y);
    menu.set_nothing_active();
    assert_eq!(menu.active_index(), None);
}

fn dropdown_with_submenu() -> DropdownMenuItem {
    let mut dropdown = DropdownMenuItem::new(MenuItem::new(W, H, "New Bond", MenuColors::default()));
    let wide = dropdown.menu().item("Covalent", MenuColors::default());
    dropdown.menu_mut().add_item(wide);
    dropdown
        .menu_mut()
        .add_item(MenuItem::new(4, H, "Ion", MenuColors::default()));
    dropdown
}

#[test]
fn dropdown_region_includes_submenu_only_while_active() {
    let mut dropdown = dropdown_with_submenu();
    let inside_submenu = (W + 2, 1);

    assert!(!dropdown.hit_region().contains(inside_submenu.0, inside_submenu.1));
    assert!(dropdown.on_click(1, 1));
    assert!(dropdown.is_active());
    assert!(dropdown.hit_region().contains(inside_submenu.0, inside_submenu.1));
}

#[test]
fn submenu_click_closes_dropdown_and_cascades() {
    let mut dropdown = dropdown_with_submenu();
    dropdown.on_click(1, 1);

    assert!(dropdown.on_click(W + 2, 1));
    assert!(!dropdown.is_active());
    assert_eq!(dropdown.menu().active_index(), None);
    assert!(dropdown.is_dirty());
}

#[test]
fn deactivating_dropdown_clears_submenu_state() {
    let mut dropdown = dropdown_with_submenu();
    dropdown.on_click(1, 1);
    dropdown.menu_mut().on_click(1, 1);
    assert_eq!(dropdown.menu().active_index(), Some(0));

    dropdown.store_active(false);
    assert_eq!(dropdown.menu().active_index(), None);
}

#[test]
fn click_in_submenu_bounds_but_outside_items_toggles_dropdown() {
    let mut dropdown = dropdown_with_submenu();
    dropdown.on_click(1, 1);

    // Second submenu row, right of the narrow item but inside the submenu box.
    let (x, y) = (W + 10, H + 1);
    assert!(dropdown.hit_region().contains(x, y));
    assert!(dropdown.on_click(x, y));
    assert!(!dropdown.is_active());
}

#[test]
fn closed_dropdown_renders_without_submenu() {
    let mut dropdown = dropdown_with_submenu();
    let mut painter = Painter::new();
    dropdown.render(&mut painter);
    assert!(painter.cmds().iter().all(|c| match c {
        PaintCmd::FillRect { rect, .. } => rect.x < W,
        _ => true,
    }));

    dropdown.on_click(1, 1);
    painter.clear();
    dropdown.render(&mut painter);
    assert!(painter.cmds().iter().any(|c| matches!(
        c,
        PaintCmd::FillRect { rect, .. } if rect.x == W
    )));
}
