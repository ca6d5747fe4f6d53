// Terminal key input for any display surface
//
// A background thread blocks on the reader and forwards one key per line over
// a channel. The frame loop never waits on it: each shown frame takes at most
// one queued key.

use super::Display;
use crate::models::capture::Frame;
use crate::models::render::{DisplayResult, KeyPress};
use std::io::{BufRead, BufReader};
use std::sync::mpsc;

const ESCAPE: char = '\u{1b}';

/// Wraps a surface and reports keys typed on the terminal (key, then Enter)
pub struct KeyboardDisplay<D> {
    inner: D,
    keys: mpsc::Receiver<KeyPress>,
}

impl<D: Display> KeyboardDisplay<D> {
    pub fn new(inner: D, keys: mpsc::Receiver<KeyPress>) -> Self {
        Self { inner, keys }
    }

    /// Read keys from the process's stdin
    pub fn stdin(inner: D) -> Self {
        Self::new(inner, spawn_key_reader(BufReader::new(std::io::stdin())))
    }
}

/// First non-blank character of each line becomes a key press.
/// Blank lines are ignored; the thread ends with the input or the receiver.
pub fn spawn_key_reader<R>(reader: R) -> mpsc::Receiver<KeyPress>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        for line in reader.lines() {
            let Ok(line) = line else {
                break;
            };
            let Some(c) = line.trim().chars().next() else {
                continue;
            };
            let key = if c == ESCAPE {
                KeyPress::Escape
            } else {
                KeyPress::Char(c)
            };
            if tx.send(key).is_err() {
                break;
            }
        }
    });

    rx
}

impl<D: Display> Display for KeyboardDisplay<D> {
    fn show(&mut self, frame: &Frame) -> DisplayResult<Option<KeyPress>> {
        let surface_key = self.inner.show(frame)?;
        if surface_key.is_some() {
            return Ok(surface_key);
        }

        let key = self.keys.try_recv().ok();
        if let Some(key) = key {
            log::debug!("Key {:?} at frame {}", key, frame.index);
        }
        Ok(key)
    }
}
