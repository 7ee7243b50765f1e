//! Audio system implementation backed by a dedicated thread and Raylib.
//!
//! - [`audio_thread`] runs on its own OS thread, owns the Raylib audio device,
//!   and processes [`AudioCmd`] messages, emitting [`AudioMessage`] responses.
//! - [`forward_audio_cmds`] hands the commands written by game systems (for
//!   example the miss sound of a present) to the thread.
//! - [`poll_audio_messages`] drains the thread's replies into the ECS.
//!
//! Raylib audio calls stay on a single thread; the main thread talks to it
//! over lock-free channels.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::{MessageReader, MessageWriter, Messages, Res, ResMut};
use crossbeam_channel::{Receiver, Sender};
use raylib::core::audio::{RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};

/// Drain any pending messages from the audio thread into the ECS
/// [`Messages<AudioMessage>`] mailbox. Does nothing without a bridge.
pub fn poll_audio_messages(
    bridge: Option<Res<AudioBridge>>,
    mut writer: MessageWriter<AudioMessage>,
) {
    if let Some(bridge) = bridge {
        writer.write_batch(bridge.rx_msg.try_iter());
    }
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS AudioCmd messages to the audio thread via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Option<Res<AudioBridge>>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        match &bridge {
            // Ignore send error on shutdown
            Some(bridge) => {
                let _ = bridge.tx_cmd.send(cmd.clone());
            }
            None => log::debug!("[audio] muted: {:?}", cmd),
        }
    }
}

/// Advance the ECS message queue for AudioCmd so same-frame readers can observe writes.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Surface audio failures in the log.
pub fn log_audio_messages(mut reader: MessageReader<AudioMessage>) {
    for msg in reader.read() {
        match msg {
            AudioMessage::FxLoadFailed { id, error } => {
                log::warn!("[audio] could not load '{}': {}", id, error)
            }
            other => log::trace!("[audio] {:?}", other),
        }
    }
}

/// Entry point of the dedicated audio thread.
///
/// Owns every `Sound` handle, reacts to [`AudioCmd`] inputs and reports
/// state changes as [`AudioMessage`]s. Blocks until it receives
/// [`AudioCmd::Shutdown`]. When no audio device is available the thread keeps
/// draining commands so senders never pile up.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            log::warn!("[audio] no audio device, sounds disabled: {}", e);
            for cmd in rx_cmd.iter() {
                if let AudioCmd::Shutdown = cmd {
                    break;
                }
            }
            return;
        }
    };

    log::info!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();
    let mut fx_playing: FxHashSet<String> = FxHashSet::default();

    'run: loop {
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        log::debug!("[audio] fx loaded id='{}' path='{}'", id, path);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_msg.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayFx { id } => {
                    if let Some(sound) = sounds.get(&id) {
                        log::debug!("[audio] fx play id='{}'", id);
                        sound.play();
                        fx_playing.insert(id);
                    } else {
                        log::debug!("[audio] fx play skipped id='{}' reason='not loaded'", id);
                    }
                }
                AudioCmd::UnloadFx { id } => {
                    if sounds.remove(&id).is_some() {
                        fx_playing.remove(&id);
                        let _ = tx_msg.send(AudioMessage::FxUnloaded { id });
                    }
                }
                AudioCmd::UnloadAllFx => {
                    sounds.clear();
                    fx_playing.clear();
                    let _ = tx_msg.send(AudioMessage::FxUnloadedAll);
                }
                AudioCmd::Shutdown => {
                    log::info!("[audio] shutdown requested");
                    sounds.clear();
                    fx_playing.clear();
                    let _ = tx_msg.send(AudioMessage::FxUnloadedAll);
                    break 'run;
                }
            }
        }

        // Report each finished effect once.
        let fx_ended: Vec<String> = fx_playing
            .iter()
            .filter(|id| !sounds.get(*id).map(|s| s.is_playing()).unwrap_or(false))
            .cloned()
            .collect();
        for id in fx_ended {
            fx_playing.remove(&id);
            let _ = tx_msg.send(AudioMessage::FxFinished { id });
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    log::info!(
        "[audio] thread exiting (id={:?})",
        std::thread::current().id()
    );
}
