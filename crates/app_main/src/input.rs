//! Console input: key names and pointer lines resolved to logical events

use app_core::{InputEvent, SessionEvent};
use std::collections::HashMap;
use std::io::BufRead;
use tokio::sync::mpsc::UnboundedSender;

/// Maps typed lines to input events through the key binding table.
///
/// Besides key names (`Right`, `Space`, `s`...), two pointer forms are
/// understood: `click X` and `divider X`, with X normalized to [0, 1].
pub struct InputHandler {
    /// Key bindings: key string -> command ID
    bindings: HashMap<String, String>,
}

impl InputHandler {
    pub fn new(bindings: HashMap<String, Vec<String>>) -> Self {
        // Invert the bindings map: command -> keys becomes key -> command
        let mut key_to_command = HashMap::new();

        for (command, keys) in bindings {
            for key in keys {
                key_to_command.insert(normalize_key(&key), command.clone());
            }
        }

        Self {
            bindings: key_to_command,
        }
    }

    pub fn parse_line(&self, line: &str) -> Option<InputEvent> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let mut parts = line.split_whitespace();
        let head = parts.next()?;
        match (head.to_lowercase().as_str(), parts.next()) {
            ("click", Some(x)) => return x.parse().ok().map(|x| InputEvent::Click { x }),
            ("divider", Some(x)) => return x.parse().ok().map(InputEvent::MoveDivider),
            _ => {}
        }

        let key = normalize_key(line);
        tracing::debug!("Key pressed: {}", key);

        self.bindings
            .get(&key)
            .and_then(|command| InputEvent::from_command(command))
    }
}

/// Single characters stay case-sensitive; named keys are matched case-insensitively
fn normalize_key(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_string()
    } else {
        key.to_lowercase()
    }
}

/// Read stdin on its own thread, forwarding recognized lines. End of input quits.
pub fn spawn_stdin_reader(handler: InputHandler, events: UnboundedSender<SessionEvent>) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("stdin-input".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::warn!("Failed to read input: {}", e);
                        break;
                    }
                };
                match handler.parse_line(&line) {
                    Some(event) => {
                        if events.send(SessionEvent::Input(event)).is_err() {
                            return;
                        }
                    }
                    None => tracing::debug!("Unbound input: {:?}", line),
                }
            }
            let _ = events.send(SessionEvent::Input(InputEvent::Quit));
        })?;
    Ok(())
}
