//! Audio output: a `rodio` thread that implements the media primitive.

mod backend;
mod clock;
mod source;
mod thread;
mod types;

pub use backend::RodioBackend;

#[cfg(test)]
mod tests;
