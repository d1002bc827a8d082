//! Headless replay of a swipe script through the terminal strip.
//!
//! Runs the same gesture driver and pager as the interactive strip on a
//! synthetic clock, printing every page-change notification and the slot
//! layout each time a gesture settles.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use serde::Serialize;

use ringpager_core::{AppConfig, Direction, Extent, ScrollState, SlotPosition, ViewportEvent};
use ringpager_tui::{app::SlotKind, swipe::SwipeConfigExt, App, DemoPage};

/// Strip size used for captures
const EXTENT: Extent = Extent {
    width: 64,
    height: 32,
};

/// Frames allowed for a single step before giving up
const MAX_FRAMES: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Swipe and wait until the strip is idle again
    Swipe(Direction),
    /// Swipe and stop as soon as the new slot is selected
    Fling(Direction),
    /// Wait until the strip is idle
    Settle,
    /// Jump to a page index
    GoTo(usize),
}

pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    let mut chars = script.char_indices().peekable();

    while let Some((at, ch)) = chars.next() {
        let step = match ch {
            c if c.is_whitespace() || c == ',' => continue,
            'r' => Step::Swipe(Direction::Right),
            'l' => Step::Swipe(Direction::Left),
            'R' => Step::Fling(Direction::Right),
            'L' => Step::Fling(Direction::Left),
            '.' => Step::Settle,
            'g' => {
                let mut digits = String::new();
                while let Some((_, d)) = chars.peek().filter(|(_, d)| d.is_ascii_digit()) {
                    digits.push(*d);
                    chars.next();
                }
                match digits.parse() {
                    Ok(page) => Step::GoTo(page),
                    Err(_) => bail!("Expected a page number after 'g' at {}", at),
                }
            }
            other => bail!("Unknown step '{}' at {}", other, at),
        };
        steps.push(step);
    }
    Ok(steps)
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Record {
    Changed {
        position: usize,
    },
    Settled {
        position: usize,
        direction: String,
        slots: Vec<SlotRecord>,
    },
}

#[derive(Debug, Serialize, PartialEq)]
struct SlotRecord {
    slot: String,
    kind: &'static str,
    page: Option<usize>,
}

pub fn run(config: Arc<AppConfig>, script: &str, json: bool, unrealized: bool) -> Result<()> {
    let steps = parse_script(script)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    simulate(config, &steps, unrealized, json, &mut out)
}

fn simulate<W: Write>(
    config: Arc<AppConfig>,
    steps: &[Step],
    unrealized: bool,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let pages = DemoPage::deck(config.ui.page_count);
    if !unrealized {
        for page in pages.iter() {
            page.layout(EXTENT);
        }
    }

    let frame = config.ui.swipe.animation_tick_duration();
    let mut sim = Simulation {
        app: App::new(config, pages, EXTENT),
        now: Instant::now(),
        frame,
        json,
    };
    tracing::debug!("Simulating {} steps", steps.len());

    for step in steps {
        match *step {
            Step::Swipe(direction) => {
                sim.swipe(direction, out)?;
                sim.run_while(out, |app| app.needs_animation())?;
            }
            Step::Fling(direction) => {
                sim.swipe(direction, out)?;
                sim.run_while(out, |app| {
                    app.gesture.state() == ScrollState::Dragging && app.gesture.is_animating()
                })?;
            }
            Step::Settle => sim.run_while(out, |app| app.needs_animation())?,
            Step::GoTo(page) => {
                sim.run_while(out, |app| app.needs_animation())?;
                sim.app.pager.set_current_position(page);
                sim.flush_changes(out)?;
                sim.emit(out, sim.settled())?;
            }
        }
    }

    sim.run_while(out, |app| app.needs_animation())
}

struct Simulation {
    app: App,
    now: Instant,
    frame: Duration,
    json: bool,
}

impl Simulation {
    fn swipe<W: Write>(&mut self, direction: Direction, out: &mut W) -> Result<()> {
        let events = self.app.swipe(direction, self.now);
        self.report(&events, out)
    }

    /// Advance one frame at a time while `busy` holds
    fn run_while<W: Write>(&mut self, out: &mut W, busy: impl Fn(&App) -> bool) -> Result<()> {
        for _ in 0..MAX_FRAMES {
            if !busy(&self.app) {
                return Ok(());
            }
            self.now += self.frame;
            let events = self.app.tick(self.now);
            self.report(&events, out)?;
        }
        bail!("Swipe did not finish within {} frames", MAX_FRAMES)
    }

    fn report<W: Write>(&mut self, events: &[ViewportEvent], out: &mut W) -> Result<()> {
        self.flush_changes(out)?;
        let settled = events
            .iter()
            .any(|e| *e == ViewportEvent::ScrollStateChanged(ScrollState::Idle));
        if settled {
            self.emit(out, self.settled())?;
        }
        Ok(())
    }

    fn flush_changes<W: Write>(&mut self, out: &mut W) -> Result<()> {
        for position in self.app.take_changes() {
            self.emit(out, Record::Changed { position })?;
        }
        Ok(())
    }

    fn settled(&self) -> Record {
        let slots = SlotPosition::ALL
            .into_iter()
            .map(|position| {
                let (kind, page) = match self.app.slot_kind(position) {
                    SlotKind::Real(page) => ("real", Some(page)),
                    SlotKind::Dummy(page) => ("dummy", Some(page)),
                    SlotKind::Empty => ("empty", None),
                };
                SlotRecord {
                    slot: position.to_string(),
                    kind,
                    page,
                }
            })
            .collect();

        Record::Settled {
            position: self.app.pager.current_position(),
            direction: self.app.pager.direction().to_string(),
            slots,
        }
    }

    fn emit<W: Write>(&self, out: &mut W, record: Record) -> Result<()> {
        if self.json {
            writeln!(out, "{}", serde_json::to_string(&record)?)?;
            return Ok(());
        }

        match record {
            Record::Changed { position } => writeln!(out, "changed  {}", position)?,
            Record::Settled {
                position,
                direction,
                slots,
            } => {
                let slots = slots
                    .iter()
                    .map(|s| match (s.kind, s.page) {
                        ("dummy", Some(page)) => format!("{}:{}*", s.slot, page),
                        (_, Some(page)) => format!("{}:{}", s.slot, page),
                        _ => format!("{}:-", s.slot),
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(out, "settled  {} {:<5} [{}]", position, direction, slots)?;
            }
        }
        Ok(())
    }
}
