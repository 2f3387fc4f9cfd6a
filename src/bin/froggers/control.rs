//! Keyboard control loop
//!
//! Stands in for the instrument's knobs and buttons:
//!
//!   Tab          next page
//!   1-8          select knob (8 = FUEG)
//!   Up / Down    nudge the selected knob by 0.01
//!   PgUp / PgDn  nudge the selected knob by 0.1
//!   Space        step button
//!   g            gate pulse
//!   q / Esc      quit

use std::io::{stdout, Write};
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::{
    cursor::MoveToColumn,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, Clear, ClearType},
};

use froggers::{
    controls::{FUEG_INDEX, KNOBS_PER_PAGE},
    graph::{frog::DRIVE_LABELS, marbles::MARBLES_LABELS},
    ControlHandle, KnobPages, ModulationTap, PageId,
};

const FINE_STEP: f32 = 0.01;
const COARSE_STEP: f32 = 0.1;

pub struct ControlLoop {
    handle: ControlHandle,
    /// Local mirror of the knob positions sent to the engine
    knobs: KnobPages,
    filter_labels: [&'static str; 7],
    modulation: Arc<ModulationTap>,
    page: PageId,
    knob: usize,
    should_quit: bool,
}

impl ControlLoop {
    pub fn new(
        handle: ControlHandle,
        knobs: KnobPages,
        filter_labels: [&'static str; 7],
        modulation: Arc<ModulationTap>,
    ) -> Self {
        Self {
            handle,
            knobs,
            filter_labels,
            modulation,
            page: PageId::Filter,
            knob: 0,
            should_quit: false,
        }
    }

    pub fn run(mut self) -> EyreResult<()> {
        terminal::enable_raw_mode()?;
        let result = self.event_loop();
        terminal::disable_raw_mode()?;
        println!();
        result
    }

    fn event_loop(&mut self) -> EyreResult<()> {
        while !self.should_quit {
            self.draw_status()?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.page = self.page.next();
            }
            KeyCode::Char(c @ '1'..='8') => {
                self.knob = (c as usize - '1' as usize).min(KNOBS_PER_PAGE - 1);
            }
            KeyCode::Up => self.nudge(FINE_STEP),
            KeyCode::Down => self.nudge(-FINE_STEP),
            KeyCode::PageUp => self.nudge(COARSE_STEP),
            KeyCode::PageDown => self.nudge(-COARSE_STEP),
            KeyCode::Char(' ') => {
                self.handle.button(froggers::engine::STEP_BUTTON);
            }
            KeyCode::Char('g') => {
                self.handle.gate(1.0);
                self.handle.gate(0.0);
            }
            _ => {}
        }
    }

    fn nudge(&mut self, delta: f32) {
        let page = self.knobs.page_mut(self.page);
        page.set(self.knob, page.get(self.knob) + delta);
        let value = page.get(self.knob);
        self.handle.knob(self.page, self.knob, value);
    }

    fn label(&self) -> &'static str {
        if self.knob == FUEG_INDEX {
            return "FUEG";
        }
        match self.page {
            PageId::Filter => self.filter_labels[self.knob],
            PageId::Drive => DRIVE_LABELS[self.knob],
            PageId::Marbles => MARBLES_LABELS[self.knob],
        }
    }

    fn draw_status(&self) -> EyreResult<()> {
        let value = self.knobs.page(self.page).get(self.knob);
        let [mod_a, mod_b] = self.modulation.snapshot();

        let mut out = stdout();
        execute!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        write!(
            out,
            "[{}] {} = {:.2}   marbles {:.2} {:.2}",
            self.page.name(),
            self.label(),
            value,
            mod_a,
            mod_b
        )?;
        out.flush()?;
        Ok(())
    }
}
