use super::*;
use crate::ui::core::geom::Aabb;
use crate::ui::core::painter::{PaintCmd, Painter};
use crate::ui::core::style::Color;
use crate::ui::widgets::grid::{GridCell, GridPos, GridProvider, SparseGrid};
use std::rc::Rc;

fn sequencer() -> Sequencer<u8> {
    let mut grid = SparseGrid::new(4, 2);
    for (col, row) in [(0u16, 0u16), (1, 0), (2, 1), (3, 1)] {
        let value = (row * 10 + col) as u8;
        grid.insert(
            GridPos::new(col, row),
            GridCell {
                value,
                label: value.to_string(),
                category: Color::WHITE,
                phase: Color::BLACK,
            },
        );
    }
    let provider: Rc<dyn GridProvider<u8>> = Rc::new(grid);
    Sequencer::new(DialogTemplate::new(provider), SequenceLabels::default())
}

fn click_cell(seq: &mut Sequencer<u8>, col: u16, row: u16) -> bool {
    let Some((x, y)) = seq.active_dialog().map(|d| d.cell_center(GridPos::new(col, row))) else {
        return false;
    };
    seq.handle_click(x, y)
}

fn click_rect(seq: &mut Sequencer<u8>, rect: impl Fn(&SelectDialog<u8>) -> Aabb) -> bool {
    let Some(r) = seq.active_dialog().map(rect) else {
        return false;
    };
    seq.handle_click(r.x + 1, r.y + 1)
}

fn press_ok(seq: &mut Sequencer<u8>) -> bool {
    click_rect(seq, |d| d.ok_rect())
}

fn press_cancel(seq: &mut Sequencer<u8>) -> bool {
    click_rect(seq, |d| d.cancel_rect())
}

fn pass(seq: &mut Sequencer<u8>) -> Painter {
    let mut painter = Painter::new();
    seq.draw(&mut painter);
    painter
}

#[test]
fn idle_request_becomes_active_immediately() {
    let mut seq = sequencer();
    assert_eq!(seq.state(), SlotState::Idle);
    let _rx = seq.select_one();
    assert_eq!(seq.state(), SlotState::Active);
    assert_eq!(seq.live_dialog_count(), 1);
    assert_eq!(seq.active_dialog().map(|d| d.labels().ok.as_str()), Some("Ok"));
}

#[test]
fn second_request_waits_for_first_to_settle() {
    let mut seq = sequencer();
    let mut first = seq.select_one();
    let mut second = seq.select_one();
    assert_eq!(seq.pending_requests(), 1);
    assert_eq!(seq.live_dialog_count(), 1);

    click_cell(&mut seq, 1, 0);
    assert!(press_ok(&mut seq));
    assert!(matches!(first.try_recv(), Ok(Ok(1))));
    assert_eq!(seq.state(), SlotState::Clearing);
    assert_eq!(seq.live_dialog_count(), 0);
    assert_eq!(seq.pending_requests(), 1);

    pass(&mut seq);
    assert_eq!(seq.state(), SlotState::Active);
    assert_eq!(seq.pending_requests(), 0);
    assert!(second.try_recv().is_err());
}

#[test]
fn clearing_pass_erases_only_once() {
    let mut seq = sequencer();
    let _rx = seq.select_one();
    pass(&mut seq);
    press_cancel(&mut seq);

    let painter = pass(&mut seq);
    assert!(!painter.cmds().is_empty());
    assert!(painter
        .cmds()
        .iter()
        .all(|c| matches!(c, PaintCmd::Clear { .. })));
    assert_eq!(seq.state(), SlotState::Idle);
    assert!(pass(&mut seq).cmds().is_empty());
}

#[test]
fn clean_dialog_is_not_redrawn() {
    let mut seq = sequencer();
    let _rx = seq.select_one();
    assert!(!pass(&mut seq).cmds().is_empty());
    assert!(pass(&mut seq).cmds().is_empty());
    click_cell(&mut seq, 0, 0);
    assert!(!pass(&mut seq).cmds().is_empty());
}

#[test]
fn clicks_outside_dialog_are_not_consumed() {
    let mut seq = sequencer();
    assert!(!seq.handle_click(0, 0));
    let _rx = seq.select_one();
    assert!(!seq.handle_click(-5, -5));
}

#[test]
fn select_many_labels_last_step_complete() {
    let mut seq = sequencer();
    let mut rx = seq.select_many(3);
    assert_eq!(seq.pending_requests(), 2);
    let steps = [("Next", (0, 0)), ("Next", (1, 0)), ("Complete", (2, 1))];
    for (expected, (col, row)) in steps {
        let labels = seq.active_dialog().map(|d| d.labels().clone());
        assert_eq!(labels, Some(DialogLabels::new(expected, "Cancel")));
        click_cell(&mut seq, col, row);
        press_ok(&mut seq);
        pass(&mut seq);
    }
    assert!(matches!(rx.try_recv(), Ok(Ok(v)) if v == vec![0, 1, 12]));
    assert_eq!(seq.live_flows(), 0);
}

#[test]
fn select_many_cancel_withdraws_remaining_steps() {
    let mut seq = sequencer();
    let mut rx = seq.select_many(3);
    click_cell(&mut seq, 0, 0);
    press_ok(&mut seq);
    pass(&mut seq);

    assert!(press_cancel(&mut seq));
    assert!(matches!(
        rx.try_recv(),
        Ok(Err(SelectionError::Cancelled(_)))
    ));
    assert_eq!(seq.pending_requests(), 0);
    pass(&mut seq);
    assert_eq!(seq.state(), SlotState::Idle);
}

#[test]
fn cancelling_one_flow_keeps_other_requests_queued() {
    let mut seq = sequencer();
    let mut flow = seq.select_many(2);
    let _single = seq.select_one();
    assert_eq!(seq.pending_requests(), 2);

    press_cancel(&mut seq);
    assert!(matches!(flow.try_recv(), Ok(Err(_))));
    assert_eq!(seq.pending_requests(), 1);
    pass(&mut seq);
    assert_eq!(seq.active_dialog().map(|d| d.labels().ok.as_str()), Some("Ok"));
}

#[test]
fn zero_count_resolves_empty_without_dialog() {
    let mut seq = sequencer();
    let mut rx = seq.select_many(0);
    assert!(matches!(rx.try_recv(), Ok(Ok(v)) if v.is_empty()));
    assert_eq!(seq.state(), SlotState::Idle);
}

#[test]
fn until_cancel_keeps_pending_choice() {
    let mut seq = sequencer();
    let mut rx = seq.select_until_cancel();
    assert_eq!(
        seq.active_dialog().map(|d| d.labels().clone()),
        Some(DialogLabels::new("Next", "Submit"))
    );
    click_cell(&mut seq, 0, 0);
    press_ok(&mut seq);
    pass(&mut seq);
    click_cell(&mut seq, 3, 1);
    press_cancel(&mut seq);
    assert!(matches!(rx.try_recv(), Ok(Ok(v)) if v == vec![0, 13]));
}

#[test]
fn until_cancel_with_nothing_chosen_fails() {
    let mut seq = sequencer();
    let mut rx = seq.select_until_cancel();
    press_cancel(&mut seq);
    assert!(matches!(
        rx.try_recv(),
        Ok(Err(SelectionError::Cancelled(_)))
    ));
}

#[test]
fn until_cancel_after_submissions_without_pending_succeeds() {
    let mut seq = sequencer();
    let mut rx = seq.select_until_cancel();
    click_cell(&mut seq, 1, 0);
    press_ok(&mut seq);
    pass(&mut seq);
    press_cancel(&mut seq);
    assert!(matches!(rx.try_recv(), Ok(Ok(v)) if v == vec![1]));
}

#[test]
fn dropped_receiver_does_not_stall_the_slot() {
    let mut seq = sequencer();
    drop(seq.select_one());
    let mut next = seq.select_one();
    press_cancel(&mut seq);
    pass(&mut seq);
    assert_eq!(seq.state(), SlotState::Active);
    click_cell(&mut seq, 2, 1);
    press_ok(&mut seq);
    assert!(matches!(next.try_recv(), Ok(Ok(12))));
}
