//! Raw terminal input source with gravity.
//!
//! Waits for terminal events with a timeout equal to the time left until the gravity
//! deadline. When the deadline passes the wait ends and a single [`Input::Gravity`] is
//! returned, however long the loop was away. Key reads during a pause go through
//! [`InputSource::next_key`], which never consults the timer, so a firing that falls
//! inside a pause is delivered once the loop resumes polling.

use std::io;
use std::time::Instant;

use crossterm::event;

use crate::core::{GravityTimer, InputSource};
use crate::map::KeyMap;
use crate::types::Input;

pub struct TerminalInput {
    keys: KeyMap,
    timer: GravityTimer,
}

impl TerminalInput {
    pub fn new(keys: KeyMap) -> Self {
        Self {
            keys,
            timer: GravityTimer::new(),
        }
    }

    pub fn keys(&self) -> &KeyMap {
        &self.keys
    }

    /// Read one event and map it; unbound keys and other events map to `None`.
    fn read_mapped(&self) -> io::Result<Option<Input>> {
        let event = event::read()?;
        let mapped = self.keys.map_event(&event);
        if mapped.is_none() {
            tracing::trace!(?event, "ignored terminal event");
        }
        Ok(mapped)
    }
}

impl InputSource for TerminalInput {
    fn arm_gravity(&mut self, level: u32) {
        self.timer.arm(Instant::now(), level);
        tracing::debug!(period_us = self.timer.period_us(), "gravity armed");
    }

    fn next_input(&mut self, level: u32) -> io::Result<Input> {
        loop {
            let now = Instant::now();
            // A due firing wins over queued keys so gravity cannot be starved.
            if self.timer.poll(now, level) {
                tracing::trace!(period_us = self.timer.period_us(), "gravity tick");
                return Ok(Input::Gravity);
            }

            if let Some(timeout) = self.timer.remaining(now) {
                if !event::poll(timeout)? {
                    continue;
                }
            }

            if let Some(input) = self.read_mapped()? {
                return Ok(input);
            }
        }
    }

    fn next_key(&mut self) -> io::Result<Input> {
        loop {
            if let Some(input) = self.read_mapped()? {
                return Ok(input);
            }
        }
    }

    fn disarm_gravity(&mut self) {
        self.timer.disarm();
        tracing::debug!("gravity disarmed");
    }
}
