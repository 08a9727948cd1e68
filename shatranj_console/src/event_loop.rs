use std::fmt;
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self as term_event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, style};


pub enum IncomingEvent<S> {
    Network(S),
    Disconnected(String),
    Terminal(term_event::Event),
    Tick,
}

pub fn spawn_terminal_input<S: Send + 'static>(tx: mpsc::Sender<IncomingEvent<S>>) {
    thread::spawn(move || {
        loop {
            let ev = match term_event::read() {
                Ok(ev) => ev,
                Err(err) => {
                    log::error!("Cannot read terminal input: {}", err);
                    return;
                }
            };
            if tx.send(IncomingEvent::Terminal(ev)).is_err() {
                return;
            }
        }
    });
}

// Drives protocol timers and periodic redraws.
pub fn spawn_ticker<S: Send + 'static>(tx: mpsc::Sender<IncomingEvent<S>>, interval: Duration) {
    thread::spawn(move || {
        loop {
            thread::sleep(interval);
            if tx.send(IncomingEvent::Tick).is_err() {
                return;
            }
        }
    });
}

pub fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes trailing new line.
    for line in s.split('\n') {
        execute!(stdout, style::Print(line), cursor::MoveToNextLine(1), cursor::Hide)?;
    }
    Ok(())
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum KeyboardAction {
    None,
    Submit(String),
    Quit,
}

// Single-line input buffer. Raw mode swallows Ctrl+C, so it is handled here.
#[derive(Default)]
pub struct KeyboardInput {
    buffer: String,
}

impl KeyboardInput {
    pub fn text(&self) -> &str { &self.buffer }

    pub fn process(&mut self, event: &term_event::Event) -> KeyboardAction {
        let term_event::Event::Key(key) = event else {
            return KeyboardAction::None;
        };
        if key.kind != KeyEventKind::Press {
            return KeyboardAction::None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyboardAction::Quit
            }
            KeyCode::Esc => KeyboardAction::Quit,
            KeyCode::Char(ch) => {
                self.buffer.push(ch);
                KeyboardAction::None
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                KeyboardAction::None
            }
            KeyCode::Enter => KeyboardAction::Submit(std::mem::take(&mut self.buffer)),
            _ => KeyboardAction::None,
        }
    }
}

// Splits "/join 17" into ("join", ["17"]). Returns `None` for non-commands.
pub fn parse_command(input: &str) -> Option<(&str, Vec<&str>)> {
    let mut words = input.trim().strip_prefix('/')?.split_whitespace();
    let name = words.next()?;
    Some((name, words.collect()))
}
