//! Modal selection sequencing.
//!
//! The sequencer owns the single dialog slot and a queue of requests waiting
//! for it. The slot moves `Idle -> Active -> Clearing -> Idle`:
//!
//! - a request starts immediately when the slot is idle, otherwise it waits
//!   in the queue;
//! - when the active dialog settles it is swapped for a [`ClearingStandIn`];
//! - the next draw erases the stand-in once, vacates the slot and promotes
//!   the next queued request.
//!
//! Multi-step flows are bookkeeping on top of the queue: a fixed-count flow
//! enqueues all of its requests up front, an open-ended flow enqueues one
//! more request after every accepted choice.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::ui::core::painter::Surface;
use crate::ui::core::widget::Widget;
use crate::ui::widgets::select_dialog::{
    ClearingStandIn, DialogLabels, DialogTemplate, SelectDialog, SelectionError, SelectionResult,
};

new_key_type! { pub struct FlowId; }

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceLabels {
    pub ok: String,
    pub next: String,
    pub complete: String,
    pub cancel: String,
    pub submit: String,
}

impl Default for SequenceLabels {
    fn default() -> Self {
        Self {
            ok: "Ok".to_string(),
            next: "Next".to_string(),
            complete: "Complete".to_string(),
            cancel: "Cancel".to_string(),
            submit: "Submit".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Idle,
    Active,
    Clearing,
}

enum Origin<T> {
    Single(oneshot::Sender<SelectionResult<T>>),
    Flow(FlowId),
}

struct Request<T> {
    labels: DialogLabels,
    origin: Origin<T>,
}

struct ActiveDialog<T> {
    dialog: SelectDialog<T>,
    outcome: oneshot::Receiver<SelectionResult<T>>,
    origin: Origin<T>,
}

enum Slot<T> {
    Idle,
    Active(ActiveDialog<T>),
    Clearing(ClearingStandIn),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FlowKind {
    Fixed(usize),
    UntilCancel,
}

struct Flow<T> {
    kind: FlowKind,
    results: Vec<T>,
    done: Option<oneshot::Sender<SelectionResult<Vec<T>>>>,
}

pub struct Sequencer<T: Clone + 'static> {
    template: DialogTemplate<T>,
    labels: SequenceLabels,
    slot: Slot<T>,
    queue: VecDeque<Request<T>>,
    flows: SlotMap<FlowId, Flow<T>>,
}

impl<T: Clone + 'static> Sequencer<T> {
    pub fn new(template: DialogTemplate<T>, labels: SequenceLabels) -> Self {
        Self {
            template,
            labels,
            slot: Slot::Idle,
            queue: VecDeque::new(),
            flows: SlotMap::with_key(),
        }
    }

    pub fn labels(&self) -> &SequenceLabels {
        &self.labels
    }

    pub fn state(&self) -> SlotState {
        match self.slot {
            Slot::Idle => SlotState::Idle,
            Slot::Active(_) => SlotState::Active,
            Slot::Clearing(_) => SlotState::Clearing,
        }
    }

    /// Requests a single choice, labelled Ok/Cancel.
    pub fn select_one(&mut self) -> oneshot::Receiver<SelectionResult<T>> {
        let (tx, rx) = oneshot::channel();
        let labels = DialogLabels::new(self.labels.ok.clone(), self.labels.cancel.clone());
        self.request(Request {
            labels,
            origin: Origin::Single(tx),
        });
        rx
    }

    /// Requests `count` choices in a row. Any cancellation fails the whole
    /// flow; no partial results are delivered.
    pub fn select_many(&mut self, count: usize) -> oneshot::Receiver<SelectionResult<Vec<T>>> {
        let (tx, rx) = oneshot::channel();
        if count == 0 {
            let _ = tx.send(Ok(Vec::new()));
            return rx;
        }

        let id = self.flows.insert(Flow {
            kind: FlowKind::Fixed(count),
            results: Vec::with_capacity(count),
            done: Some(tx),
        });
        tracing::debug!(?id, count, "fixed-count selection started");
        for step in 0..count {
            let ok = if step + 1 == count {
                &self.labels.complete
            } else {
                &self.labels.next
            };
            let labels = DialogLabels::new(ok.clone(), self.labels.cancel.clone());
            self.request(Request {
                labels,
                origin: Origin::Flow(id),
            });
        }
        rx
    }

    /// Requests choices until the user presses Submit. A choice pending in
    /// the submitted dialog counts; an empty result fails.
    pub fn select_until_cancel(&mut self) -> oneshot::Receiver<SelectionResult<Vec<T>>> {
        let (tx, rx) = oneshot::channel();
        let id = self.flows.insert(Flow {
            kind: FlowKind::UntilCancel,
            results: Vec::new(),
            done: Some(tx),
        });
        tracing::debug!(?id, "open-ended selection started");
        self.request_next_open_ended(id);
        rx
    }

    /// Routes a click in dialog coordinates to the active dialog.
    pub fn handle_click(&mut self, x: i32, y: i32) -> bool {
        let Slot::Active(active) = &mut self.slot else {
            return false;
        };
        if !active.dialog.hit_region().contains(x, y) {
            return false;
        }
        let consumed = active.dialog.on_click(x, y);
        let outcome = match active.outcome.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return consumed,
            Err(TryRecvError::Closed) => Err(SelectionError::Abandoned),
        };
        self.settle(outcome);
        consumed
    }

    /// One pass over the slot: redraws a dirty dialog, or erases a settled
    /// one and promotes the next request.
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        match &mut self.slot {
            Slot::Idle => {}
            Slot::Active(active) => {
                if active.dialog.is_dirty() {
                    active.dialog.clear_render_area(surface);
                    active.dialog.render(surface);
                }
            }
            Slot::Clearing(stand_in) => {
                stand_in.clear_once(surface);
                tracing::debug!("selection slot idle");
                self.slot = Slot::Idle;
                self.promote();
            }
        }
    }

    /// Forces a full redraw of the active dialog on the next pass.
    pub fn invalidate(&mut self) {
        if let Slot::Active(active) = &mut self.slot {
            active.dialog.set_dirty(true);
        }
    }

    pub fn active_dialog(&self) -> Option<&SelectDialog<T>> {
        match &self.slot {
            Slot::Active(active) => Some(&active.dialog),
            _ => None,
        }
    }

    pub fn pending_requests(&self) -> usize {
        self.queue.len()
    }

    pub fn live_dialog_count(&self) -> usize {
        match self.slot {
            Slot::Active(_) => 1,
            _ => 0,
        }
    }

    pub fn live_flows(&self) -> usize {
        self.flows.len()
    }

    fn request(&mut self, request: Request<T>) {
        self.queue.push_back(request);
        if matches!(self.slot, Slot::Idle) {
            self.promote();
        }
    }

    fn request_next_open_ended(&mut self, id: FlowId) {
        let labels = DialogLabels::new(self.labels.next.clone(), self.labels.submit.clone());
        self.request(Request {
            labels,
            origin: Origin::Flow(id),
        });
    }

    fn promote(&mut self) {
        debug_assert!(matches!(self.slot, Slot::Idle));
        let Some(request) = self.queue.pop_front() else {
            return;
        };
        let (tx, rx) = oneshot::channel();
        tracing::debug!(ok = %request.labels.ok, cancel = %request.labels.cancel, "selection dialog active");
        let dialog = self.template.build(request.labels, tx);
        self.slot = Slot::Active(ActiveDialog {
            dialog,
            outcome: rx,
            origin: request.origin,
        });
    }

    fn settle(&mut self, outcome: SelectionResult<T>) {
        let Slot::Active(mut active) = std::mem::replace(&mut self.slot, Slot::Idle) else {
            return;
        };
        let pending = active.dialog.take_selected();
        self.slot = Slot::Clearing(ClearingStandIn::new(Box::new(active.dialog)));
        tracing::debug!(ok = outcome.is_ok(), "selection slot clearing");

        match active.origin {
            Origin::Single(tx) => {
                if tx.send(outcome).is_err() {
                    tracing::debug!("selection receiver dropped");
                }
            }
            Origin::Flow(id) => self.advance_flow(id, outcome, pending),
        }
    }

    fn advance_flow(&mut self, id: FlowId, outcome: SelectionResult<T>, pending: Option<T>) {
        let Some(flow) = self.flows.get_mut(id) else {
            return;
        };
        match (flow.kind, outcome) {
            (FlowKind::Fixed(count), Ok(value)) => {
                flow.results.push(value);
                if flow.results.len() == count {
                    self.finish_flow(id, None);
                }
            }
            (FlowKind::Fixed(_), Err(err)) => {
                self.queue
                    .retain(|r| !matches!(r.origin, Origin::Flow(f) if f == id));
                self.finish_flow(id, Some(err));
            }
            (FlowKind::UntilCancel, Ok(value)) => {
                flow.results.push(value);
                self.request_next_open_ended(id);
            }
            (FlowKind::UntilCancel, Err(err)) => {
                if let Some(value) = pending {
                    flow.results.push(value);
                }
                let failure = if flow.results.is_empty() {
                    Some(err)
                } else {
                    None
                };
                self.finish_flow(id, failure);
            }
        }
    }

    fn finish_flow(&mut self, id: FlowId, failure: Option<SelectionError>) {
        let Some(mut flow) = self.flows.remove(id) else {
            return;
        };
        let result = match failure {
            Some(err) => {
                tracing::info!(?id, error = %err, "selection flow failed");
                Err(err)
            }
            None => {
                tracing::info!(?id, count = flow.results.len(), "selection flow completed");
                Ok(std::mem::take(&mut flow.results))
            }
        };
        if let Some(done) = flow.done.take() {
            if done.send(result).is_err() {
                tracing::debug!(?id, "selection flow receiver dropped");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/sequencer.rs"]
mod tests;
