use crate::hierarchy::{ItemId, LevelId};
use crate::host::{Slide, SlideDirection};
use crate::ui::model::{ActionMenu, Nav};
use crate::ui::Msg;
use std::sync::Arc;
use tracing::{debug, warn};

pub fn handle_update<T, C>(m: &mut ActionMenu<T, C>, msg: Msg) {
    if m.closed {
        debug!(?msg, "ignoring input for a closed action menu");
        return;
    }
    match msg {
        Msg::Up => handle_move(m, Step::Up),
        Msg::Down => handle_move(m, Step::Down),
        Msg::Select => handle_select(m),
        Msg::Back => handle_back(m),
        Msg::SlideFinished { finished } => handle_slide_finished(m, finished),
    }
}

#[derive(Clone, Copy)]
enum Step {
    Up,
    Down,
}

// user input is only read while settled on a level and not frozen
fn accepts_navigation<T, C>(m: &ActionMenu<T, C>) -> bool {
    !m.frozen && m.nav == Nav::Idle
}

fn handle_move<T, C>(m: &mut ActionMenu<T, C>, step: Step) {
    if m.frozen {
        return;
    }
    let count = m.level().map_or(0, |level| level.len());
    if count == 0 {
        return;
    }
    let row = m.host.selected_row().min(count - 1);
    let next = match step {
        Step::Up => row.saturating_sub(1),
        Step::Down => (row + 1).min(count - 1),
    };
    if next != m.host.selected_row() {
        m.host.set_selected_row(next);
    }
}

fn handle_select<T, C>(m: &mut ActionMenu<T, C>) {
    if !accepts_navigation(m) {
        return;
    }
    let tree = Arc::clone(&m.tree);
    let Some(level) = tree.level(m.current_level) else {
        return;
    };
    let row = m.host.selected_row();
    let Some(item) = level.item(row) else {
        debug!(row, "selected row is out of range");
        return;
    };

    if let Some(child) = item.child() {
        begin_transition(m, child);
        return;
    }
    let Some(callback) = item.callback() else {
        debug!(row, "selected item has neither child nor action");
        return;
    };
    let Ok(index) = u16::try_from(row) else {
        return;
    };

    m.performed_action = Some(ItemId {
        level: m.current_level,
        index,
    });
    debug!(label = ?item.label(), "performing action");
    callback(&mut *m, item);

    // the callback may have frozen or closed the menu itself
    if m.frozen || m.closed {
        return;
    }
    m.close(true);
}

fn handle_back<T, C>(m: &mut ActionMenu<T, C>) {
    if !accepts_navigation(m) {
        return;
    }
    match m.level().and_then(|level| level.parent()) {
        Some(parent) => begin_transition(m, parent),
        None => m.close(true),
    }
}

fn begin_transition<T, C>(m: &mut ActionMenu<T, C>, to: LevelId) {
    if m.tree.level(to).is_none() {
        warn!(level = %to, "transition target no longer exists");
        return;
    }
    debug!(from = %m.current_level, to = %to, "sliding out");
    m.nav = Nav::Transitioning {
        to,
        phase: SlideDirection::Out,
    };
    m.host.schedule_slide(Slide::new(SlideDirection::Out));
}

fn handle_slide_finished<T, C>(m: &mut ActionMenu<T, C>, finished: bool) {
    match m.nav {
        Nav::Idle => warn!("slide completion without a transition in flight"),
        Nav::Transitioning {
            to,
            phase: SlideDirection::Out,
        } => {
            if !finished {
                debug!("slide out interrupted, committing the level switch anyway");
            }
            m.current_level = to;
            m.host.set_selected_row(0);
            m.host.reload();
            m.nav = Nav::Transitioning {
                to,
                phase: SlideDirection::In,
            };
            m.host.schedule_slide(Slide::new(SlideDirection::In));
        }
        Nav::Transitioning {
            to,
            phase: SlideDirection::In,
        } => {
            debug!(level = %to, "transition complete");
            m.nav = Nav::Idle;
        }
    }
}
