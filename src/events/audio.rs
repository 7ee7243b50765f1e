//! Messages exchanged with the audio thread.
//!
//! Game systems write [`AudioCmd`]s; the thread answers with
//! [`AudioMessage`]s. Sound ids are the names effects were loaded under,
//! e.g. [`MISS_SOUND`](crate::components::present::MISS_SOUND).
use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Load the sound at `path` under `id`, replacing any previous one.
    LoadFx { id: String, path: String },
    /// Play a loaded sound. Unknown ids are skipped.
    PlayFx { id: String },
    UnloadFx { id: String },
    UnloadAllFx,
    /// Free everything and stop the thread.
    Shutdown,
}

/// Messages sent *back* from the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    FxLoaded { id: String },
    FxUnloaded { id: String },
    FxUnloadedAll,
    FxLoadFailed { id: String, error: String },
    /// A sound started by `PlayFx` is no longer playing.
    FxFinished { id: String },
}
