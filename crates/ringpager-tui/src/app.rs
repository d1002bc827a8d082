use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use ringpager_core::{
    AppConfig, Direction, Extent, PageWindowController, SlotPosition, SlotView, Viewport,
    ViewportEvent,
};

use crate::input::Action;
use crate::page::DemoPage;
use crate::swipe::SwipeGesture;
use crate::theme::Theme;
use crate::viewport::StripViewport;

pub type Pager = PageWindowController<DemoPage, StripViewport>;

/// Page-change notifications kept for the status bar
const HISTORY_LEN: usize = 8;

/// Notifications from the pager's listener
#[derive(Debug, Default)]
struct ChangeLog {
    recent: VecDeque<usize>,
    /// Not yet taken by `take_changes()`
    pending: Vec<usize>,
}

impl ChangeLog {
    fn push(&mut self, page: usize) {
        if self.recent.len() == HISTORY_LEN {
            self.recent.pop_front();
        }
        self.recent.push_back(page);
        self.pending.push(page);
    }
}

/// What a slot shows, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Real(usize),
    Dummy(usize),
    Empty,
}

pub struct App {
    pub config: Arc<AppConfig>,
    pub pager: Pager,
    pub gesture: SwipeGesture,
    pub theme: Theme,
    pub should_quit: bool,
    pub status_message: Option<String>,
    changes: Rc<RefCell<ChangeLog>>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, pages: Rc<[DemoPage]>, size: Extent) -> Self {
        let viewport = StripViewport::new(size, config.cache_dir());
        let mut pager = PageWindowController::with_content(viewport, &config.pager, pages);

        let changes = Rc::new(RefCell::new(ChangeLog::default()));
        let sink = changes.clone();
        pager.set_page_change_listener(move |page| sink.borrow_mut().push(page));

        Self {
            gesture: SwipeGesture::new(config.ui.swipe.clone()),
            config,
            pager,
            theme: Theme::default(),
            should_quit: false,
            status_message: None,
            changes,
        }
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::SwipeLeft => {
                self.swipe(Direction::Left, now);
            }
            Action::SwipeRight => {
                self.swipe(Direction::Right, now);
            }
            Action::GoTo(page) => self.go_to(page),
            Action::None => {}
        }
    }

    /// Start or redirect a swipe; returns the events delivered to the pager
    pub fn swipe(&mut self, direction: Direction, now: Instant) -> Vec<ViewportEvent> {
        self.status_message = None;
        let events = self.gesture.swipe(direction, self.pager.viewport(), now);
        self.deliver(&events);
        events
    }

    /// Jump without animation. Ignored mid-swipe.
    pub fn go_to(&mut self, page: usize) {
        if self.gesture.is_animating() {
            return;
        }
        if page >= self.pager.len() {
            self.status_message = Some(format!(" No page {} ", page + 1));
            return;
        }
        self.status_message = None;
        self.pager.set_current_position(page);
    }

    /// Advance the swipe animation; returns the events delivered to the pager
    pub fn tick(&mut self, now: Instant) -> Vec<ViewportEvent> {
        let mut events = self.gesture.update(self.pager.viewport_mut(), now);
        self.deliver(&events);

        // Queued swipes start from the recentered strip
        let resumed = self.gesture.resume(self.pager.viewport(), now);
        self.deliver(&resumed);
        events.extend(resumed);
        events
    }

    pub fn needs_animation(&self) -> bool {
        self.gesture.needs_update()
    }

    pub fn resize(&mut self, size: Extent) {
        self.pager.viewport_mut().resize(size);
    }

    pub fn viewport(&self) -> &StripViewport {
        self.pager.viewport()
    }

    /// Most recent page-change notifications, oldest first
    pub fn recent_changes(&self) -> Vec<usize> {
        self.changes.borrow().recent.iter().copied().collect()
    }

    /// Notifications since the last call
    pub fn take_changes(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.changes.borrow_mut().pending)
    }

    pub fn slot_kind(&self, position: SlotPosition) -> SlotKind {
        match self.pager.displayable_for_slot(position) {
            SlotView::Content(page) => SlotKind::Real(page.id()),
            SlotView::Dummy(snapshot) => SlotKind::Dummy(snapshot.page()),
            SlotView::Empty => SlotKind::Empty,
        }
    }

    fn deliver(&mut self, events: &[ViewportEvent]) {
        for event in events {
            self.pager.handle_event(*event);
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("pager", &self.pager)
            .field("gesture", &self.gesture)
            .field("resting", &self.pager.viewport().current_slot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use ringpager_core::{ScrollState, SnapshotMode, WindowStrategy};

    fn config(strategy: WindowStrategy, mode: SnapshotMode, dir: &std::path::Path) -> Arc<AppConfig> {
        let mut config = AppConfig::default();
        config.general.cache_dir = dir.to_path_buf();
        config.pager.strategy = strategy;
        config.pager.snapshot_mode = mode;
        config.ui.swipe.animation_duration_ms = 100;
        Arc::new(config)
    }

    fn app(pages: usize, strategy: WindowStrategy, dir: &std::path::Path) -> App {
        App::new(
            config(strategy, SnapshotMode::OnDemand, dir),
            DemoPage::deck(pages),
            Extent::new(32, 16),
        )
    }

    /// Tick until the gesture has nothing left to do
    fn run_until_idle(app: &mut App, mut now: Instant) -> Instant {
        for _ in 0..1000 {
            app.tick(now);
            if !app.needs_animation() {
                break;
            }
            now += Duration::from_millis(16);
        }
        now
    }

    #[test]
    fn test_swipe_moves_position_and_recenters() {
        for strategy in [WindowStrategy::Indexed, WindowStrategy::Rotating] {
            let dir = tempfile::tempdir().unwrap();
            let mut app = app(5, strategy, dir.path());
            let now = Instant::now();

            app.handle_action(Action::SwipeRight, now);
            run_until_idle(&mut app, now);

            assert_eq!(app.pager.current_position(), 1);
            assert_eq!(app.recent_changes(), vec![1]);
            assert_eq!(app.viewport().current_slot(), SlotPosition::Center);
            assert_eq!(app.viewport().scroll(), 1.0);
            assert_eq!(app.pager.scroll_state(), ScrollState::Idle);
            assert_eq!(app.slot_kind(SlotPosition::Center), SlotKind::Real(1));
        }
    }

    #[test]
    fn test_left_from_first_page_wraps() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(4, WindowStrategy::Rotating, dir.path());
        let now = Instant::now();

        app.swipe(Direction::Left, now);
        run_until_idle(&mut app, now);
        assert_eq!(app.pager.current_position(), 3);
        assert_eq!(app.slot_kind(SlotPosition::Next), SlotKind::Real(0));
    }

    #[test]
    fn test_queued_swipes_run_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(5, WindowStrategy::Rotating, dir.path());
        let now = Instant::now();

        app.swipe(Direction::Right, now);
        app.swipe(Direction::Right, now);
        run_until_idle(&mut app, now);

        assert_eq!(app.recent_changes(), vec![1, 2]);
        assert_eq!(app.pager.slots().markers(), [Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_reversal_returns_to_start() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(5, WindowStrategy::Indexed, dir.path());
        let now = Instant::now();

        app.swipe(Direction::Right, now);
        // Past half way with the cubic curve
        let mid = now + Duration::from_millis(50);
        app.tick(mid);
        app.swipe(Direction::Left, mid);
        run_until_idle(&mut app, mid);

        assert_eq!(app.recent_changes(), vec![1, 0]);
        assert_eq!(app.pager.current_position(), 0);
    }

    #[test]
    fn test_single_page_neighbors_after_first_draw() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(1, WindowStrategy::Indexed, dir.path());
        // Never drawn, so there is nothing to capture yet
        assert_eq!(app.slot_kind(SlotPosition::Prev), SlotKind::Empty);

        app.pager.content()[0].layout(Extent::new(32, 16));
        let now = Instant::now();
        app.swipe(Direction::Right, now);
        run_until_idle(&mut app, now);

        assert_eq!(app.slot_kind(SlotPosition::Prev), SlotKind::Dummy(0));
        assert_eq!(app.slot_kind(SlotPosition::Center), SlotKind::Real(0));
        assert_eq!(app.recent_changes(), vec![0]);
    }

    #[test]
    fn test_go_to() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(5, WindowStrategy::Indexed, dir.path());
        app.handle_action(Action::GoTo(3), Instant::now());
        assert_eq!(app.pager.current_position(), 3);

        app.go_to(9);
        assert_eq!(app.pager.current_position(), 3);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_take_changes_drains_pending_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(12, WindowStrategy::Indexed, dir.path());
        for page in 1..=10 {
            app.go_to(page);
        }
        assert_eq!(app.take_changes(), (1..=10).collect::<Vec<_>>());
        assert!(app.take_changes().is_empty());
        assert_eq!(app.recent_changes(), (3..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_quit() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(2, WindowStrategy::Indexed, dir.path());
        app.handle_action(Action::Quit, Instant::now());
        assert!(app.should_quit);
    }
}
