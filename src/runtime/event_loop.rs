use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::catalog::{CatalogReply, TrackSource};
use crate::config;
use crate::keys::{Action, action_for};
use crate::media::{MediaBackend, MediaEvent};
use crate::runtime::prompt::SongPrompt;
use crate::session::{PlayerSession, PlaylistEntry};
use crate::ui;

const DEFAULT_TITLE: &str = "cantor";

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    pub prompt: SongPrompt,
    /// Last title written to the terminal.
    last_title: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Main terminal event loop: feeds worker results into the session, draws,
/// and dispatches key presses. Returns `Ok(())` when the user quits.
pub fn run<M: MediaBackend, S: TrackSource>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    session: &mut PlayerSession<M, S>,
    replies: &Receiver<CatalogReply>,
    media_events: &Receiver<MediaEvent>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(reply) = replies.try_recv() {
            session.on_track_loaded(reply);
        }
        while let Ok(event) = media_events.try_recv() {
            session.handle_media_event(event);
        }
        session.prune_notifications(Instant::now());

        let title = session.window_title();
        if title != state.last_title {
            execute!(
                terminal.backend_mut(),
                SetTitle(title.as_deref().unwrap_or(DEFAULT_TITLE))
            )?;
            state.last_title = title;
        }

        let prompt = state.prompt.is_open().then(|| state.prompt.text());
        terminal.draw(|f| ui::draw(f, session, prompt, &settings.ui))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if dispatch_key(key, settings, &mut state.prompt, session) == Flow::Quit {
            return Ok(());
        }
    }
}

/// Route a key press: the open prompt takes every key, otherwise shortcuts apply.
fn dispatch_key<M: MediaBackend, S: TrackSource>(
    key: KeyEvent,
    settings: &config::Settings,
    prompt: &mut SongPrompt,
    session: &mut PlayerSession<M, S>,
) -> Flow {
    if prompt.is_open() {
        handle_prompt_key(key, prompt, session);
        return Flow::Continue;
    }
    handle_action(key, settings, prompt, session)
}

fn handle_prompt_key<M: MediaBackend, S: TrackSource>(
    key: KeyEvent,
    prompt: &mut SongPrompt,
    session: &mut PlayerSession<M, S>,
) {
    match key.code {
        KeyCode::Esc => prompt.close(),
        KeyCode::Backspace => prompt.pop(),
        KeyCode::Char(c) => prompt.push(c),
        KeyCode::Enter => match prompt.parse() {
            Ok(ids) => {
                prompt.close();
                if let [id] = ids.as_slice() {
                    session.load_track(*id);
                } else {
                    let entries = ids.into_iter().map(PlaylistEntry::from).collect();
                    session.load_playlist(entries, 0);
                }
            }
            Err(msg) => log::warn!("ignoring prompt input: {msg}"),
        },
        _ => {}
    }
}

fn handle_action<M: MediaBackend, S: TrackSource>(
    key: KeyEvent,
    settings: &config::Settings,
    prompt: &mut SongPrompt,
    session: &mut PlayerSession<M, S>,
) -> Flow {
    let Some(action) = action_for(key) else {
        return Flow::Continue;
    };
    let step = settings.controls.volume_step;

    match action {
        Action::TogglePlayPause => session.toggle_play_pause(),
        Action::Next => session.play_next(),
        Action::Previous => session.play_previous(),
        Action::VolumeUp => session.set_volume(session.volume() + step),
        Action::VolumeDown => session.set_volume(session.volume() - step),
        Action::ToggleMute => session.toggle_mute(),
        Action::ToggleShuffle => session.toggle_shuffle(),
        Action::ToggleRepeat => session.toggle_repeat(),
        Action::Stop => session.stop(),
        Action::SeekTenths(n) => session.seek_to(f64::from(n) / 10.0),
        Action::OpenPrompt => prompt.open(),
        Action::Quit => return Flow::Quit,
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::session::fakes::{Call, fulfil, session};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn open_prompt_swallows_shortcuts() {
        let settings = config::Settings::default();
        let (mut s, media, source) = session();
        s.load_track(1);
        fulfil(&mut s, &source);
        media.take();

        let mut prompt = SongPrompt::default();
        prompt.open();
        for code in [KeyCode::Char(' '), KeyCode::Char('q'), KeyCode::Right] {
            assert_eq!(dispatch_key(press(code), &settings, &mut prompt, &mut s), Flow::Continue);
        }

        assert!(media.take().is_empty());
        assert_eq!(source.requests.borrow().len(), 1);
        assert!(prompt.is_open());
        assert_eq!(prompt.text(), " ");
    }

    #[test]
    fn prompt_enter_queues_typed_ids() {
        let settings = config::Settings::default();
        let (mut s, _media, source) = session();
        let mut prompt = SongPrompt::default();

        dispatch_key(press(KeyCode::Char('o')), &settings, &mut prompt, &mut s);
        assert!(prompt.is_open());
        for c in "3, 4".chars() {
            dispatch_key(press(KeyCode::Char(c)), &settings, &mut prompt, &mut s);
        }
        dispatch_key(press(KeyCode::Enter), &settings, &mut prompt, &mut s);

        assert!(!prompt.is_open());
        assert_eq!(s.playlist().len(), 2);
        assert_eq!(source.last_request().0, 3);
    }

    #[test]
    fn prompt_escape_discards_input() {
        let settings = config::Settings::default();
        let (mut s, _media, source) = session();
        let mut prompt = SongPrompt::default();
        prompt.open();

        dispatch_key(press(KeyCode::Char('9')), &settings, &mut prompt, &mut s);
        dispatch_key(press(KeyCode::Esc), &settings, &mut prompt, &mut s);
        assert!(!prompt.is_open());
        assert!(source.requests.borrow().is_empty());
    }

    #[test]
    fn volume_keys_step_and_clamp() {
        let settings = config::Settings::default();
        let (mut s, media, _source) = session();
        let mut prompt = SongPrompt::default();

        s.set_volume(0.95);
        dispatch_key(press(KeyCode::Up), &settings, &mut prompt, &mut s);
        assert_eq!(s.volume(), 1.0);
        assert_eq!(media.take().last(), Some(&Call::Volume(1.0)));

        dispatch_key(press(KeyCode::Down), &settings, &mut prompt, &mut s);
        assert!((s.volume() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn quit_and_space_shortcuts() {
        let settings = config::Settings::default();
        let (mut s, media, source) = session();
        s.load_track(1);
        fulfil(&mut s, &source);
        media.take();
        let mut prompt = SongPrompt::default();

        dispatch_key(press(KeyCode::Char(' ')), &settings, &mut prompt, &mut s);
        assert_eq!(media.take(), vec![Call::Play]);
        assert_eq!(
            dispatch_key(press(KeyCode::Char('q')), &settings, &mut prompt, &mut s),
            Flow::Quit
        );
    }
}
