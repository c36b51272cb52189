use std::io::{self, IsTerminal, Write};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;

/// Print `message` and block until a key is pressed. Returns immediately
/// when stdin is not a terminal.
pub fn wait_for_key(message: &str) -> io::Result<()> {
    println!("{message}");
    io::stdout().flush()?;
    if !io::stdin().is_terminal() {
        return Ok(());
    }

    terminal::enable_raw_mode()?;
    let outcome = read_key_press();
    terminal::disable_raw_mode()?;
    outcome
}

fn read_key_press() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            return Ok(());
        }
    }
}
