//! Application shell: the menu layer, the selection dialog layer and the
//! plumbing between them.
//!
//! Menu items never touch the sequencer directly. An action item pushes a
//! [`UiAction`] into a channel; [`App::tick`] drains it after each input
//! event, starts the matching selection flow and later polls its result.

use std::rc::Rc;
use std::sync::mpsc;

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::core::{InputEvent, PointerClick};
use crate::models::Element;
use crate::services::settings::{LayoutSettings, Settings};
use crate::ui::core::painter::{draw_at, Surface};
use crate::ui::core::widget::Widget;
use crate::ui::sequencer::{Sequencer, SlotState};
use crate::ui::widgets::grid::{GridPreviewItem, GridProvider};
use crate::ui::widgets::menu::{DropdownMenuItem, Menu, MenuColors};
use crate::ui::widgets::select_dialog::{DialogTemplate, SelectionError, SelectionResult};

pub mod frame;

pub use frame::{DrawError, FrameClock, FrameLoop, Scene};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    /// Pick elements until Submit.
    Covalent,
    /// Pick exactly two elements.
    Ionic,
}

impl UiAction {
    pub fn label(self) -> &'static str {
        match self {
            UiAction::Covalent => "Covalent",
            UiAction::Ionic => "Ionic",
        }
    }
}

struct PendingSelection {
    action: UiAction,
    outcome: oneshot::Receiver<SelectionResult<Vec<Element>>>,
}

pub struct App {
    layout: LayoutSettings,
    menu: Menu,
    sequencer: Sequencer<Element>,
    actions_rx: mpsc::Receiver<UiAction>,
    pending: Vec<PendingSelection>,
    status: String,
    quit: bool,
}

impl App {
    pub fn new(settings: &Settings, table: Rc<dyn GridProvider<Element>>) -> Self {
        let layout = settings.layout.clone();
        let (actions_tx, actions_rx) = mpsc::channel();
        let menu = build_menu(
            &layout,
            settings.colors.menu_colors(),
            Rc::clone(&table),
            &actions_tx,
        );

        let mut template = DialogTemplate::new(table);
        template.metrics = layout.grid_metrics();
        template.button_size = layout.button_size();
        template.colors = settings.colors.dialog_colors();

        Self {
            layout,
            menu,
            sequencer: Sequencer::new(template, settings.labels.clone()),
            actions_rx,
            pending: Vec::new(),
            status: String::new(),
            quit: false,
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn sequencer(&self) -> &Sequencer<Element> {
        &self.sequencer
    }

    pub fn layout(&self) -> &LayoutSettings {
        &self.layout
    }

    pub fn pending_selections(&self) -> usize {
        self.pending.len()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => {
                if key.is_quit() {
                    self.quit = true;
                }
            }
            InputEvent::Click(click) => {
                self.handle_click(click);
            }
            InputEvent::Resize(..) => self.invalidate(),
        }
    }

    /// Routes a screen click to the menu layer, then to the dialog layer.
    pub fn handle_click(&mut self, click: PointerClick) -> bool {
        let local = click.relative_to(self.layout.menu_origin);
        let mut consumed = false;
        if self.menu.hit_region().contains(local.x, local.y) {
            consumed = self.menu.on_click(local.x, local.y);
        }
        if !consumed {
            let local = click.relative_to(self.layout.dialog_origin);
            consumed = self.sequencer.handle_click(local.x, local.y);
        }
        self.tick();
        consumed
    }

    /// Starts flows for queued actions and collects settled selections.
    pub fn tick(&mut self) {
        while let Ok(action) = self.actions_rx.try_recv() {
            self.start(action);
        }

        let mut settled = Vec::new();
        self.pending.retain_mut(|p| match p.outcome.try_recv() {
            Err(TryRecvError::Empty) => true,
            Ok(result) => {
                settled.push((p.action, result));
                false
            }
            Err(TryRecvError::Closed) => {
                settled.push((p.action, Err(SelectionError::Abandoned)));
                false
            }
        });
        for (action, result) in settled {
            self.report(action, result);
        }
    }

    fn start(&mut self, action: UiAction) {
        tracing::debug!(?action, "ui action");
        let outcome = match action {
            UiAction::Covalent => self.sequencer.select_until_cancel(),
            UiAction::Ionic => self.sequencer.select_many(2),
        };
        self.pending.push(PendingSelection { action, outcome });
    }

    fn report(&mut self, action: UiAction, result: SelectionResult<Vec<Element>>) {
        let label = action.label();
        match result {
            Ok(elements) => {
                let names: Vec<&str> = elements.iter().map(|e| e.name.as_str()).collect();
                tracing::info!(action = label, elements = ?names, "elements selected");
                let symbols: Vec<&str> = elements.iter().map(|e| e.symbol.as_str()).collect();
                self.status = format!("{label}: {}", symbols.join(", "));
            }
            Err(e) if e.is_cancelled() => {
                tracing::debug!(action = label, "selection cancelled");
                self.status = format!("{label}: cancelled");
            }
            Err(e) => {
                tracing::warn!(action = label, error = %e, "selection failed");
                self.status = format!("{label}: {e}");
            }
        }
    }
}

impl Scene for App {
    /// The dialog is the top layer. Whenever the menu repaints, the dialog
    /// repaints over it, and a dialog leaving the screen repaints the menu
    /// underneath on the next pass.
    fn draw(&mut self, overlay: &mut dyn Surface) {
        if self.menu.is_dirty() {
            let (mx, my) = self.layout.menu_origin;
            let menu = &mut self.menu;
            draw_at(overlay, mx, my, |s| {
                menu.clear_render_area(s);
                menu.render(s);
            });
            self.menu.set_dirty(false);
            self.sequencer.invalidate();
        }

        let leaving = self.sequencer.state() == SlotState::Clearing;
        let (dx, dy) = self.layout.dialog_origin;
        let sequencer = &mut self.sequencer;
        draw_at(overlay, dx, dy, |s| sequencer.draw(s));
        if leaving {
            self.menu.set_dirty(true);
        }
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn invalidate(&mut self) {
        self.menu.set_dirty(true);
        self.sequencer.invalidate();
    }
}

fn build_menu(
    layout: &LayoutSettings,
    colors: MenuColors,
    table: Rc<dyn GridProvider<Element>>,
    actions: &mpsc::Sender<UiAction>,
) -> Menu {
    let mut menu = Menu::new(layout.menu_item_width, layout.menu_item_height);

    let mut bond = DropdownMenuItem::new(menu.item("New Bond", colors));
    for action in [UiAction::Covalent, UiAction::Ionic] {
        let tx = actions.clone();
        let item = bond
            .menu()
            .item(action.label(), colors)
            .on_activate(move || tx.send(action).is_ok());
        bond.menu_mut().add_item(item);
    }
    menu.add_item(bond);

    let preview = GridPreviewItem::new(
        menu.item("Table", colors),
        table,
        layout.grid_metrics(),
        layout.preview_offset,
    );
    menu.add_item(preview);
    menu
}

#[cfg(test)]
#[path = "../../tests/unit/app/mod.rs"]
mod tests;
