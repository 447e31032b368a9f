use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::bridge::{NavigationBridge, NavigationContext};
use crate::bus::EventBus;
use crate::config::Config;
use crate::notifications::NotificationQueue;
use crate::spool::EventSpool;
use crate::ui::{self, TerminalGuard};
use crate::workflow::{Dispatcher, NavAction, RouteMap, StepSequence, WorkflowStep};

/// One mounted screen: its dispatcher, its bus subscription, and the
/// navigation context it has accepted. Replacing the screen drops the
/// old bridge, which releases the subscription.
struct Screen {
    dispatcher: Dispatcher,
    bridge: NavigationBridge,
    context: Option<NavigationContext>,
    /// Highlight override for selections with no route (reserved steps).
    local_active: Option<usize>,
}

impl Screen {
    fn open(bus: &Arc<EventBus>, step: WorkflowStep) -> Self {
        Self {
            dispatcher: Dispatcher::new(RouteMap::canonical(), step),
            bridge: NavigationBridge::mount(bus, step),
            context: None,
            local_active: None,
        }
    }

    fn step(&self) -> WorkflowStep {
        self.dispatcher.current()
    }

    fn active_index(&self) -> usize {
        self.local_active.unwrap_or_else(|| self.step().index())
    }
}

pub struct App {
    config: Config,
    bus: Arc<EventBus>,
    spool: Option<EventSpool>,
    sequence: StepSequence,
    screen: Screen,
    /// Sidebar cursor position.
    selected: usize,
    notifications: NotificationQueue,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let bus = EventBus::new();

        let spool = if config.events.spool_enabled {
            Some(EventSpool::new(config.events_path(), Arc::clone(&bus))?)
        } else {
            None
        };

        let screen = Screen::open(&bus, WorkflowStep::Welcome);
        Ok(Self {
            config,
            bus,
            spool,
            sequence: StepSequence::canonical(),
            screen,
            selected: 0,
            notifications: NotificationQueue::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let _guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            self.tick();
        }

        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(30)])
            .split(frame.area());

        let steps = self.sequence.steps(Some(self.screen.active_index()));
        ui::sidebar::render(frame, chunks[0], &steps, self.selected);
        ui::screens::render(
            frame,
            chunks[1],
            self.screen.step(),
            &self.config.ui.user_name,
            self.screen.context.as_ref(),
        );
        ui::toast::render(frame, &self.notifications);
    }

    /// Advance non-input work: spool ingestion, bridge delivery, and
    /// the notification auto-hide deadline.
    fn tick(&mut self) {
        if let Some(ref spool) = self.spool {
            spool.poll();
        }
        if let Some(context) = self.screen.bridge.poll(&mut self.notifications) {
            self.screen.context = Some(context);
        }
        self.notifications.tick();
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                self.notifications.dismiss();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
            }
            KeyCode::Enter => {
                self.activate_selection();
            }
            KeyCode::Char(c @ '1'..='6') => {
                self.selected = (c as usize) - ('1' as usize);
                self.activate_selection();
            }
            _ => {}
        }
    }

    fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.sequence.len();
    }

    fn select_prev(&mut self) {
        self.selected = if self.selected == 0 {
            self.sequence.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Resolve the sidebar selection through the dispatcher.
    fn activate_selection(&mut self) {
        match self.screen.dispatcher.dispatch(self.selected) {
            NavAction::Stay => {
                tracing::debug!(step = self.screen.step().label(), "already on this screen");
            }
            NavAction::Navigate(target) => {
                self.navigate(target);
            }
            NavAction::SetLocalActive(index) => {
                // Reserved step with no screen yet: highlight only.
                self.screen.local_active = Some(index);
            }
        }
    }

    /// Full screen transition. The previous screen's bridge drops here,
    /// releasing its bus subscription; notifications do not survive the
    /// transition.
    fn navigate(&mut self, target: WorkflowStep) {
        tracing::info!(
            from = self.screen.step().path(),
            to = target.path(),
            "navigating"
        );
        self.screen = Screen::open(&self.bus, target);
        self.selected = target.index();
        self.notifications.dismiss();
    }
}
