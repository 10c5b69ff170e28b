use crate::Cli;
use crate::catalog::TrackSource;
use crate::media::MediaBackend;
use crate::session::{PlayerSession, PlaylistEntry};

/// Queue the songs named on the command line.
///
/// Returns `true` when nothing was requested, so the caller can focus the
/// song-id prompt instead.
pub fn apply_launch_args<M: MediaBackend, S: TrackSource>(
    session: &mut PlayerSession<M, S>,
    cli: &Cli,
) -> bool {
    if cli.ids.is_empty() {
        return true;
    }

    let entries: Vec<PlaylistEntry> = cli.ids.iter().copied().map(PlaylistEntry::from).collect();
    log::info!(
        "starting with {} song(s), entry {}",
        entries.len(),
        cli.start
    );
    session.load_playlist(entries, cli.start);
    if cli.play {
        session.play_when_ready();
    }
    false
}
