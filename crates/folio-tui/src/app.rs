use std::sync::Arc;
use std::time::{Duration, Instant};

use folio_core::contact::{ContactForm, FormField, SubmitOutcome};
use folio_core::content::{self, Portfolio, Project};
use folio_core::viewport::{NavigationController, RevealController, StatCounter};
use folio_core::AppConfig;

use crate::input::Action;
use crate::page::{reveal_element, stat_element, PageLayout};
use crate::scroll::ScrollAnimator;
use crate::theme::Theme;
use crate::transition::Transition;

const TOAST_DURATION: Duration = Duration::from_secs(6);
/// Upper bound on the stagger delays the page layout assigns
const MAX_STAGGER_MS: u64 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    ProjectPicker { selected: usize },
    ProjectDetail { index: usize },
    Contact,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

/// Contact form being edited in the popup
#[derive(Debug, Clone)]
pub struct ContactState {
    pub form: ContactForm,
    pub focus: FormField,
    pub sending: bool,
    pub error: Option<String>,
}

impl Default for ContactState {
    fn default() -> Self {
        Self {
            form: ContactForm::default(),
            focus: FormField::Name,
            sending: false,
            error: None,
        }
    }
}

/// Side effects the event loop performs on behalf of the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenUrl(String),
    SendContact(ContactForm),
}

pub struct App {
    pub config: Arc<AppConfig>,
    pub portfolio: Portfolio,
    pub theme: Theme,
    pub nav: NavigationController,
    pub mode: Mode,
    pub contact: ContactState,
    pub toast: Option<Toast>,
    /// Pending key for multi-key sequences (`gg`)
    pub pending_key: Option<char>,
    /// Highlighted entry of the menu overlay
    pub menu_selected: usize,
    pub should_quit: bool,
    scroll: ScrollAnimator,
    /// One per nav section, in nav order
    reveals: Vec<RevealController>,
    /// One per About stat, in display order
    counters: Vec<StatCounter>,
    layout: Option<PageLayout>,
    transition: Transition,
    year: i32,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        portfolio: Portfolio,
        theme: Theme,
        year: i32,
    ) -> anyhow::Result<Self> {
        let viewport = &config.viewport;
        let nav = NavigationController::new(
            content::page_sections(),
            viewport.spy_threshold,
            viewport.scrolled_offset,
        )?;

        let reveals = content::NAV_ITEMS
            .iter()
            .map(|(id, _)| RevealController::mounted(reveal_element(id), viewport.reveal_threshold))
            .collect();

        let counter_duration = Duration::from_millis(viewport.counter_duration_ms);
        let counters = portfolio
            .about
            .stats()
            .into_iter()
            .enumerate()
            .map(|(i, stat)| {
                StatCounter::mount(
                    stat,
                    stat_element(i),
                    viewport.counter_threshold,
                    counter_duration,
                    viewport.counter_steps,
                )
            })
            .collect();

        let transition = Transition::new(config.ui.reveal_transition_ms, config.ui.scroll.easing);
        let scroll = ScrollAnimator::new(config.ui.scroll.clone());

        Ok(Self {
            config,
            portfolio,
            theme,
            nav,
            mode: Mode::Normal,
            contact: ContactState::default(),
            toast: None,
            pending_key: None,
            menu_selected: 0,
            should_quit: false,
            scroll,
            reveals,
            counters,
            layout: None,
            transition,
            year,
        })
    }

    pub fn layout(&self) -> Option<&PageLayout> {
        self.layout.as_ref()
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    pub fn scroll_offset(&self) -> i64 {
        self.scroll.current()
    }

    pub fn page_height(&self) -> u16 {
        self.layout.as_ref().map(PageLayout::viewport_height).unwrap_or(0)
    }

    /// Whether the nav bar collapses into the menu key
    pub fn is_compact(&self, width: u16) -> bool {
        width < self.config.ui.compact_width
    }

    pub fn is_menu_open(&self) -> bool {
        self.nav.is_menu_open()
    }

    /// Instant the section at `index` (nav order) was revealed
    pub fn revealed_at(&self, index: usize) -> Option<Instant> {
        self.reveals.get(index).and_then(RevealController::revealed_at)
    }

    pub fn stat_display(&self, index: usize, now: Instant) -> Option<String> {
        self.counters.get(index).map(|c| c.display(now))
    }

    /// Projects in picker order: featured first
    pub fn picker_projects(&self) -> Vec<&Project> {
        let mut projects = self.portfolio.featured_projects();
        projects.extend(self.portfolio.other_projects());
        projects
    }

    /// Rebuild the layout when the page area changes size
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.layout.as_ref().is_some_and(|l| l.fits(width, height)) {
            return;
        }
        let layout = PageLayout::build(&self.portfolio, width, height, self.year);
        tracing::debug!(width, height, rows = layout.height(), "page laid out");
        self.scroll.set_max_scroll(layout.max_scroll());
        self.layout = Some(layout);
    }

    /// Advance scrolling and feed the new geometry to the viewport engine
    pub fn update(&mut self, now: Instant) {
        let Some(layout) = &self.layout else {
            return;
        };

        let offset = self.scroll.update(now);
        let snapshot = layout.snapshot(offset);

        self.nav.on_scroll(&snapshot);

        for reveal in &mut self.reveals {
            reveal.update(&snapshot, now);
        }
        for counter in &mut self.counters {
            counter.update(&snapshot, now);
        }

        if self
            .toast
            .as_ref()
            .is_some_and(|t| now.saturating_duration_since(t.shown_at) >= TOAST_DURATION)
        {
            self.toast = None;
        }
    }

    /// Whether the next frame should come at animation rate
    pub fn needs_fast_update(&self, now: Instant) -> bool {
        self.scroll.needs_update()
            || self.counters.iter().any(StatCounter::is_animating)
            || self
                .reveals
                .iter()
                .filter_map(RevealController::revealed_at)
                .any(|at| !self.transition.is_settled(at, MAX_STAGGER_MS, now))
    }

    /// Smooth-scroll to a section; unknown ids are ignored
    pub fn go_to_section(&mut self, id: &str) -> bool {
        let Some(layout) = &self.layout else {
            return false;
        };
        let snapshot = layout.snapshot(self.scroll.current());
        self.nav.go_to(id, &snapshot, &mut self.scroll)
    }

    pub fn set_toast(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        kind: ToastKind,
        now: Instant,
    ) {
        self.toast = Some(Toast {
            title: title.into(),
            description: description.into(),
            kind,
            shown_at: now,
        });
    }

    /// Apply a key action. Returns work for the event loop, if any.
    pub fn handle_action(&mut self, action: Action, now: Instant) -> Option<Command> {
        if action != Action::PendingG {
            self.pending_key = None;
        }
        let viewport = self.page_height();

        match action {
            Action::Quit => self.should_quit = true,

            Action::ScrollDown => self.scroll.scroll_down(),
            Action::ScrollUp => self.scroll.scroll_up(),
            Action::HalfPageDown => self.scroll.half_page_down(viewport),
            Action::HalfPageUp => self.scroll.half_page_up(viewport),
            Action::PageDown => self.scroll.page_down(viewport),
            Action::PageUp => self.scroll.page_up(viewport),
            Action::PendingG => self.pending_key = Some('g'),
            Action::JumpToTop => {
                self.go_to_section(content::HERO);
            }
            Action::JumpToBottom => {
                let bottom = self.scroll.max_scroll();
                self.scroll.animate_to(bottom, now);
            }

            Action::GoToSection(index) => {
                if let Some((id, _)) = content::NAV_ITEMS.get(index) {
                    self.go_to_section(id);
                }
            }
            Action::HireMe => {
                self.go_to_section(content::CONTACT);
            }

            Action::ToggleMenu => {
                self.nav.toggle_menu();
                self.menu_selected = self.nav.active_section().order;
            }
            Action::MenuDown => {
                self.menu_selected = (self.menu_selected + 1) % content::NAV_ITEMS.len();
            }
            Action::MenuUp => {
                self.menu_selected =
                    (self.menu_selected + content::NAV_ITEMS.len() - 1) % content::NAV_ITEMS.len();
            }
            Action::MenuSelect => {
                let id = content::NAV_ITEMS[self.menu_selected % content::NAV_ITEMS.len()].0;
                if !self.go_to_section(id) {
                    self.nav.close_menu();
                }
            }
            Action::CloseMenu => self.nav.close_menu(),

            Action::OpenProjects => {
                if !self.portfolio.projects.is_empty() {
                    self.mode = Mode::ProjectPicker { selected: 0 };
                }
            }
            Action::ListDown | Action::ListUp => {
                if let Mode::ProjectPicker { selected } = self.mode {
                    let len = self.portfolio.projects.len().max(1);
                    let selected = if action == Action::ListDown {
                        (selected + 1) % len
                    } else {
                        (selected + len - 1) % len
                    };
                    self.mode = Mode::ProjectPicker { selected };
                }
            }
            Action::Select => {
                if let Mode::ProjectPicker { selected } = self.mode {
                    self.mode = Mode::ProjectDetail { index: selected };
                }
            }
            Action::OpenGithub | Action::OpenLive => {
                if let Mode::ProjectDetail { index } = self.mode {
                    let project = self.picker_projects().get(index).copied();
                    let link = project.and_then(|p| match action {
                        Action::OpenGithub => p.github_link(),
                        _ => p.live_link(),
                    });
                    return link.map(|url| Command::OpenUrl(url.to_string()));
                }
            }

            Action::ShowHelp => self.mode = Mode::Help,

            Action::OpenContact => {
                self.contact.error = None;
                self.mode = Mode::Contact;
            }
            Action::NextField => self.contact.focus = self.contact.focus.next(),
            Action::PrevField => self.contact.focus = self.contact.focus.prev(),
            Action::InputChar(c) => {
                self.contact.error = None;
                self.contact.form.field_mut(self.contact.focus).push(c);
            }
            Action::Newline => {
                if self.contact.focus == FormField::Message {
                    self.contact.form.message.push('\n');
                } else {
                    self.contact.focus = self.contact.focus.next();
                }
            }
            Action::Backspace => {
                self.contact.form.field_mut(self.contact.focus).pop();
            }
            Action::Submit => return self.submit_contact(),

            Action::Back => {
                self.mode = match self.mode {
                    Mode::ProjectDetail { index } => Mode::ProjectPicker { selected: index },
                    _ => Mode::Normal,
                };
            }

            Action::None => {}
        }

        None
    }

    fn submit_contact(&mut self) -> Option<Command> {
        if self.contact.sending {
            return None;
        }
        if let Some((field, reason)) = self.contact.form.validate() {
            self.contact.focus = field;
            self.contact.error = Some(reason);
            return None;
        }
        self.contact.sending = true;
        self.contact.error = None;
        Some(Command::SendContact(self.contact.form.clone()))
    }

    /// Record the outcome of a send started by `Command::SendContact`
    pub fn on_contact_result(&mut self, outcome: SubmitOutcome, now: Instant) {
        self.contact.sending = false;

        match &outcome {
            SubmitOutcome::Sent => {
                self.contact = ContactState::default();
                if self.mode == Mode::Contact {
                    self.mode = Mode::Normal;
                }
            }
            SubmitOutcome::Invalid { field, reason } => {
                self.contact.focus = *field;
                self.contact.error = Some(reason.clone());
            }
            SubmitOutcome::ConfigurationError { .. } | SubmitOutcome::TransportFailure { .. } => {}
        }

        let kind = if outcome.is_sent() {
            ToastKind::Success
        } else {
            ToastKind::Error
        };
        self.set_toast(outcome.title(), outcome.description(), kind, now);
    }

    /// Release observers and freeze counters before exit
    pub fn shutdown(&mut self, now: Instant) {
        for reveal in &mut self.reveals {
            reveal.unmount();
        }
        for counter in &mut self.counters {
            counter.unmount(now);
        }
    }
}
