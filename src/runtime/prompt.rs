use crate::catalog::SongId;

/// Text input for song ids, e.g. `"12"` or `"3, 8, 21"`.
///
/// While it is open it owns the keyboard and global shortcuts are ignored.
#[derive(Debug, Default)]
pub struct SongPrompt {
    open: bool,
    buffer: String,
}

impl SongPrompt {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn open(&mut self) {
        self.open = true;
        self.buffer.clear();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.buffer.clear();
    }

    /// Accept digits and list separators; anything else is dropped.
    pub fn push(&mut self, c: char) {
        if c.is_ascii_digit() || c == ',' || c == ' ' {
            self.buffer.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.buffer.pop();
    }

    /// Parse the buffer into song ids.
    pub fn parse(&self) -> Result<Vec<SongId>, String> {
        let ids = self
            .buffer
            .split([',', ' '])
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<SongId>()
                    .map_err(|e| format!("invalid song id {part:?}: {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if ids.is_empty() {
            return Err("no song id entered".to_string());
        }
        Ok(ids)
    }
}
