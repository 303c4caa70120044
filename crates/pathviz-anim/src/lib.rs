//! Timed playback of search results.
//!
//! A [`Scheduler`] turns a [`Playback`] (visited order, path, outcome) into a
//! sequence of [`Tick`]s spread out according to a [`Speed`]. Every visited
//! reveal precedes every path reveal and a run ends with a single
//! [`Tick::Finished`], unless it is stopped first.

mod scheduler;
mod speed;
mod timeline;

pub use scheduler::{Ending, Finish, Phase, Playback, Scheduler, State, Tick};
pub use speed::{InvalidSpeed, Speed};
pub use timeline::Timeline;
