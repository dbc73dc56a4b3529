use crate::error::{MenuError, RunError};
use crate::host::{Host, ResultWindow, Slide};
use crate::loader::{Command, LaunchContext, LoadedMenu, Menu};
use crate::ui::model::{ActionMenu, MenuConfig, on_close};
use crate::ui::render::{Screen, render_full};
use crate::ui::Msg;
use bubbletea_rs::{
    Program, command::Cmd, event::KeyMsg, event::WindowSizeMsg, model::Model as TeaModel,
    window_size,
};
use crossterm::event::{KeyCode, KeyModifiers};
use futures::FutureExt;
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

// bubbletea-rs builds the model through a static `init`, so the menu is parked here first
static LAUNCH: OnceCell<LoadedMenu> = OnceCell::new();

/// [`Host`] drawing into a [`Screen`] shared with the bubbletea-rs adapter.
///
/// Slides are queued on the screen; the adapter turns each into a timer and
/// reports it back to the menu when the timer fires.
#[derive(Clone, Debug, Default)]
pub struct TerminalHost {
    screen: Arc<Mutex<Screen>>,
}

impl TerminalHost {
    pub fn new(screen: Screen) -> Self {
        TerminalHost {
            screen: Arc::new(Mutex::new(screen)),
        }
    }

    pub fn screen(&self) -> MutexGuard<'_, Screen> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Host for TerminalHost {
    fn selected_row(&self) -> usize {
        self.screen().selected_row
    }

    fn set_selected_row(&mut self, row: usize) {
        self.screen().selected_row = row;
    }

    fn reload(&mut self) {
        // every frame is rendered from the menu, nothing is cached
        debug!("level reloaded");
    }

    fn schedule_slide(&mut self, slide: Slide) {
        self.screen().pending.push(slide);
    }

    fn present_menu(&mut self, _animated: bool) {
        self.screen().menu_visible = true;
    }

    fn dismiss_menu(&mut self, _animated: bool) {
        self.screen().menu_visible = false;
    }

    fn present_result(&mut self, window: ResultWindow) {
        self.screen().result = Some(window);
    }
}

/// A slide timer ran out.
#[derive(Debug)]
struct SlideDone;

/// A captured command finished; `output` is its stdout and stderr or why it failed.
#[derive(Debug)]
struct CaptureDone {
    command: Command,
    output: Result<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Menu(Msg),
    Quit,
}

fn key_input(key: &KeyCode, modifiers: KeyModifiers) -> Option<Input> {
    match key {
        KeyCode::Char('c' | 'C') if modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
        // Ctrl-C delivered as ETX
        KeyCode::Char('\u{03}') => Some(Input::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Input::Menu(Msg::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Input::Menu(Msg::Down)),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => Some(Input::Menu(Msg::Select)),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
            Some(Input::Menu(Msg::Back))
        }
        _ => None,
    }
}

fn slide_timer(slide: Slide) -> Cmd {
    async move {
        tokio::time::sleep(slide.duration).await;
        Some(Box::new(SlideDone) as bubbletea_rs::event::Msg)
    }
    .boxed()
}

// the child goes away with the program if it quits mid-run
fn captured_process(command: &Command) -> tokio::process::Command {
    let mut process = tokio::process::Command::new(&command.program);
    process.args(&command.args).kill_on_drop(true);
    process
}

fn run_captured(command: Command) -> Cmd {
    async move {
        info!(%command, "running captured command");
        let output = match captured_process(&command).output().await {
            Ok(out) => {
                let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&out.stderr));
                if out.status.success() {
                    Ok(text)
                } else {
                    Err(format!("{}\n{text}", out.status))
                }
            }
            Err(e) => Err(e.to_string()),
        };
        Some(Box::new(CaptureDone { command, output }) as bubbletea_rs::event::Msg)
    }
    .boxed()
}

// Adapter implementing the bubbletea-rs Model trait by driving an ActionMenu
struct TeaAdapter {
    menu: Option<Menu>,
    host: TerminalHost,
    // filled by did_close with the command to hand back to the caller
    outcome: Arc<Mutex<Option<Command>>>,
    error: Option<String>,
}

impl TeaAdapter {
    fn open(launch: &LoadedMenu, width: usize, height: usize) -> Self {
        let host = TerminalHost::new(Screen {
            width,
            height,
            title: launch.title.clone(),
            ..Screen::default()
        });
        let outcome = Arc::new(Mutex::new(None));

        let mut config = MenuConfig::new(
            Arc::clone(&launch.hierarchy),
            launch.root,
            LaunchContext::default(),
        );
        config.colors = launch.colors;
        config.align = launch.align;
        let slot = Arc::clone(&outcome);
        config.did_close = Some(on_close(move |_: &Menu, performed| {
            let chosen = performed
                .and_then(|item| item.action_data())
                .filter(|command| !command.capture)
                .cloned();
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = chosen;
        }));

        let (menu, error) = match ActionMenu::open(config, Box::new(host.clone())) {
            Ok(menu) => (Some(menu), None),
            Err(e) => (None, Some(e.to_string())),
        };
        TeaAdapter {
            menu,
            host,
            outcome,
            error,
        }
    }

    fn outcome(&self) -> Option<Command> {
        self.outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn handle_input(&mut self, input: Input) -> Option<Cmd> {
        let Some(menu) = self.menu.as_mut() else {
            return Some(bubbletea_rs::quit());
        };
        if input == Input::Quit {
            // still let the close callbacks see the session end
            if !menu.is_closed() {
                menu.close(false);
            }
            return Some(bubbletea_rs::quit());
        }
        // the result screen stays up until any key
        if menu.is_closed() {
            return Some(bubbletea_rs::quit());
        }
        if let Input::Menu(msg) = input {
            menu.update(msg);
        }
        self.after_update()
    }

    fn handle_slide_done(&mut self) -> Option<Cmd> {
        self.host.screen().sliding = None;
        let menu = self.menu.as_mut()?;
        menu.update(Msg::SlideFinished { finished: true });
        self.after_update()
    }

    fn handle_capture_done(&mut self, done: &CaptureDone) -> Option<Cmd> {
        let menu = self.menu.as_mut()?;
        let title = done.command.to_string();
        let window = match &done.output {
            Ok(text) => ResultWindow::new(title, text.as_str()),
            Err(reason) => {
                warn!(command = %done.command, %reason, "captured command failed");
                ResultWindow::new(format!("{title} failed"), reason.as_str())
            }
        };
        menu.set_result_window(Some(window));
        menu.close(true);
        self.after_update()
    }

    // turn what the menu asked of the host into the next command to run
    fn after_update(&mut self) -> Option<Cmd> {
        let menu = self.menu.as_mut()?;
        let mut screen = self.host.screen();
        if menu.is_closed() {
            if screen.result.is_some() {
                return None;
            }
            return Some(bubbletea_rs::quit());
        }
        if let Some(command) = menu.context_mut().and_then(|c| c.capture.take()) {
            return Some(run_captured(command));
        }
        if screen.sliding.is_none() && !screen.pending.is_empty() {
            let slide = screen.pending.remove(0);
            screen.sliding = Some(slide.direction);
            return Some(slide_timer(slide));
        }
        None
    }
}

impl TeaModel for TeaAdapter {
    fn init() -> (Self, Option<Cmd>) {
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        let Some(launch) = LAUNCH.get() else {
            let adapter = TeaAdapter {
                menu: None,
                host: TerminalHost::default(),
                outcome: Arc::default(),
                error: Some("no menu to show".to_string()),
            };
            return (adapter, Some(bubbletea_rs::quit()));
        };
        let adapter = TeaAdapter::open(launch, width as usize, height as usize);
        let cmd = if adapter.menu.is_some() {
            window_size()
        } else {
            bubbletea_rs::quit()
        };
        (adapter, Some(cmd))
    }

    fn update(&mut self, msg: bubbletea_rs::event::Msg) -> Option<Cmd> {
        if let Some(km) = msg.downcast_ref::<KeyMsg>() {
            if self.menu.as_ref().is_some_and(ActionMenu::is_closed) {
                return Some(bubbletea_rs::quit());
            }
            return key_input(&km.key, km.modifiers).and_then(|input| self.handle_input(input));
        }
        if let Some(ws) = msg.downcast_ref::<WindowSizeMsg>() {
            let mut screen = self.host.screen();
            screen.width = ws.width as usize;
            screen.height = ws.height as usize;
            return None;
        }
        if msg.downcast_ref::<SlideDone>().is_some() {
            return self.handle_slide_done();
        }
        if let Some(done) = msg.downcast_ref::<CaptureDone>() {
            return self.handle_capture_done(done);
        }
        None
    }

    fn view(&self) -> String {
        match &self.menu {
            Some(menu) => render_full(menu, &self.host.screen()),
            None => String::new(),
        }
    }
}

/// Shows `menu` full-screen until it closes.
///
/// Returns the command the user picked, or `None` when the menu was left
/// without one or the pick was a captured command that already ran.
pub async fn run(menu: LoadedMenu) -> Result<Option<Command>, RunError> {
    if menu.hierarchy.level(menu.root).is_none() {
        return Err(MenuError::InvalidRoot(menu.root).into());
    }
    LAUNCH.set(menu).map_err(|_| RunError::AlreadyRunning)?;

    let builder = Program::<TeaAdapter>::builder()
        .alt_screen(true)
        .signal_handler(true);
    let program = builder
        .build()
        .map_err(|e| RunError::Program(format!("failed to build program: {e:?}")))?;
    let final_adapter = program
        .run()
        .await
        .map_err(|e| RunError::Program(format!("{e:?}")))?;

    if let Some(error) = &final_adapter.error {
        return Err(RunError::Program(error.clone()));
    }
    let outcome = final_adapter.outcome();
    info!(outcome = ?outcome.as_ref().map(Command::to_string), "menu finished");
    Ok(outcome)
}
