//! What the action menu needs from the windowing layer that shows it.
//!
//! The menu never draws or sleeps itself. It asks a [`Host`] for the
//! selected row, tells it when to reload and when to slide, and the host
//! later reports each finished slide back as
//! [`Msg::SlideFinished`](crate::ui::Msg::SlideFinished).

use std::time::Duration;

/// How long one half of a level transition takes.
pub const SLIDE_DURATION: Duration = Duration::from_millis(150);

/// Width of the crumb column that slides out of view during a transition.
pub const SLIDE_OFFSET: u16 = 14;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideDirection {
    /// Menu content slides out of view; the level switch happens when this completes.
    Out,
    /// Content of the new level slides back in.
    In,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slide {
    pub direction: SlideDirection,
    pub duration: Duration,
}

impl Slide {
    pub fn new(direction: SlideDirection) -> Self {
        Slide {
            direction,
            duration: SLIDE_DURATION,
        }
    }
}

/// Follow-up screen shown right after the menu closes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultWindow {
    pub title: String,
    pub body: String,
}

impl ResultWindow {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        ResultWindow {
            title: title.into(),
            body: body.into(),
        }
    }
}

pub trait Host: Send {
    /// Row currently highlighted in the visible level.
    fn selected_row(&self) -> usize;

    fn set_selected_row(&mut self, row: usize);

    /// Row count and content must be queried again on the next paint.
    fn reload(&mut self);

    /// Start a slide; the host must deliver exactly one completion for it.
    fn schedule_slide(&mut self, slide: Slide);

    fn present_menu(&mut self, animated: bool);

    fn dismiss_menu(&mut self, animated: bool);

    fn present_result(&mut self, window: ResultWindow);
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording host used by the state machine tests.

    use super::*;
    use std::sync::{Arc, Mutex, MutexGuard};

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub(crate) enum Event {
        Present,
        Dismiss,
        Reload,
        Select(usize),
        Slide(SlideDirection),
        Result(ResultWindow),
        Note(&'static str),
    }

    #[derive(Debug, Default)]
    pub(crate) struct Log {
        pub(crate) row: usize,
        pub(crate) events: Vec<Event>,
        pub(crate) slides_in_flight: usize,
    }

    /// Cloneable handle to a shared [`Log`]; one clone goes into the menu.
    #[derive(Clone, Debug, Default)]
    pub(crate) struct RecordingHost {
        log: Arc<Mutex<Log>>,
    }

    impl RecordingHost {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn log(&self) -> MutexGuard<'_, Log> {
            self.log.lock().unwrap()
        }

        pub(crate) fn boxed(&self) -> Box<dyn Host> {
            Box::new(self.clone())
        }

        pub(crate) fn note(&self, what: &'static str) {
            self.log().events.push(Event::Note(what));
        }

        pub(crate) fn events(&self) -> Vec<Event> {
            self.log().events.clone()
        }

        pub(crate) fn slides(&self) -> Vec<SlideDirection> {
            self.log()
                .events
                .iter()
                .filter_map(|e| match e {
                    Event::Slide(direction) => Some(*direction),
                    _ => None,
                })
                .collect()
        }
    }

    impl Host for RecordingHost {
        fn selected_row(&self) -> usize {
            self.log().row
        }

        fn set_selected_row(&mut self, row: usize) {
            let mut log = self.log();
            log.row = row;
            log.events.push(Event::Select(row));
        }

        fn reload(&mut self) {
            self.log().events.push(Event::Reload);
        }

        fn schedule_slide(&mut self, slide: Slide) {
            let mut log = self.log();
            log.slides_in_flight += 1;
            log.events.push(Event::Slide(slide.direction));
        }

        fn present_menu(&mut self, _animated: bool) {
            self.log().events.push(Event::Present);
        }

        fn dismiss_menu(&mut self, _animated: bool) {
            self.log().events.push(Event::Dismiss);
        }

        fn present_result(&mut self, window: ResultWindow) {
            self.log().events.push(Event::Result(window));
        }
    }
}
