use crate::catalog::SongId;

/// A playlist slot: the song id plus its title once the song has been loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub id: SongId,
    pub title: Option<String>,
}

impl PlaylistEntry {
    pub fn new(id: SongId) -> Self {
        Self { id, title: None }
    }
}

impl From<SongId> for PlaylistEntry {
    fn from(id: SongId) -> Self {
        Self::new(id)
    }
}

/// Ordered entries plus a cursor.
///
/// The cursor is `Some(i)` with `i < len` whenever the playlist is
/// non-empty, and `None` otherwise.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    entries: Vec<PlaylistEntry>,
    cursor: Option<usize>,
}

impl Playlist {
    /// Replace all entries. A `start` past the end is clamped to the last entry.
    pub fn replace(&mut self, entries: Vec<PlaylistEntry>, start: usize) {
        self.cursor = if entries.is_empty() {
            None
        } else {
            Some(start.min(entries.len() - 1))
        };
        self.entries = entries;
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&PlaylistEntry> {
        self.cursor.and_then(|i| self.entries.get(i))
    }

    /// Name every entry for song `id`.
    pub fn set_title(&mut self, id: SongId, title: &str) {
        for entry in self.entries.iter_mut().filter(|e| e.id == id) {
            entry.title = Some(title.to_string());
        }
    }

    /// Move the cursor to `index` and return the id there.
    pub fn select(&mut self, index: usize) -> Option<SongId> {
        let id = self.entries.get(index)?.id;
        self.cursor = Some(index);
        Some(id)
    }

    /// Advance by one, wrapping to the first entry.
    pub fn step_forward(&mut self) -> Option<SongId> {
        if self.entries.is_empty() {
            return None;
        }
        let next = match self.cursor {
            Some(i) => (i + 1) % self.entries.len(),
            None => 0,
        };
        self.select(next)
    }

    /// Step back by one, wrapping to the last entry.
    pub fn step_back(&mut self) -> Option<SongId> {
        if self.entries.is_empty() {
            return None;
        }
        let prev = match self.cursor {
            Some(0) | None => self.entries.len() - 1,
            Some(i) => i - 1,
        };
        self.select(prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: u64) -> Vec<PlaylistEntry> {
        (1..=n).map(PlaylistEntry::new).collect()
    }

    #[test]
    fn set_title_names_matching_entries_only() {
        let mut p = Playlist::default();
        p.replace(vec![1.into(), 2.into(), 1.into()], 0);
        p.set_title(1, "Intro");

        let titles: Vec<_> = p.entries().iter().map(|e| e.title.as_deref()).collect();
        assert_eq!(titles, vec![Some("Intro"), None, Some("Intro")]);
    }

    #[test]
    fn replace_clamps_start_and_handles_empty() {
        let mut p = Playlist::default();
        p.replace(entries(3), 10);
        assert_eq!(p.cursor(), Some(2));

        p.replace(Vec::new(), 0);
        assert_eq!(p.cursor(), None);
        assert!(p.current().is_none());
    }

    #[test]
    fn step_forward_and_back_wrap() {
        let mut p = Playlist::default();
        p.replace(entries(3), 2);
        assert_eq!(p.step_forward(), Some(1));
        assert_eq!(p.cursor(), Some(0));
        assert_eq!(p.step_back(), Some(3));
        assert_eq!(p.cursor(), Some(2));
        assert_eq!(p.step_back(), Some(2));
    }

    #[test]
    fn empty_playlist_never_moves() {
        let mut p = Playlist::default();
        assert_eq!(p.step_forward(), None);
        assert_eq!(p.step_back(), None);
        assert_eq!(p.select(0), None);
    }
}
