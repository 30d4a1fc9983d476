mod media_info;
mod video;

use anyhow::Result;
use crossbeam_channel::{bounded, Receiver};
use egui::Context;
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_play as gst_play;
use gstreamer_play::prelude::*;

pub use media_info::{AudioStream, MediaInfo, Stream, StreamKind, SubtitleStream, VideoStream};
pub use video::VideoFrame;

/// Notification drained from the player's message bus.
#[derive(Debug)]
pub enum PlayerEvent {
    /// Playback position in seconds.
    PositionUpdated(f64),
    /// Media duration in seconds.
    DurationChanged(f64),
    EndOfStream,
    /// Stream metadata for the current item became available or changed.
    MediaInfoUpdated(MediaInfo),
    Error(String),
    Warning(String),
}

/// Adapter around the external playback object.
///
/// Owns the `gst_play::Play` handle, its message bus and the channel the
/// video sink delivers frames on. All media handling happens inside `Play`;
/// this type only forwards controls and surfaces notifications.
pub struct Player {
    play: gst_play::Play,
    bus: gst::Bus,
    frames: Receiver<VideoFrame>,
}

impl Player {
    /// Create the player and wire its video output to the frame channel.
    pub fn new(ctx: Context) -> Result<Self> {
        let play = gst_play::Play::new(None::<gst_play::PlayVideoRenderer>);

        // The sink callback repaints `ctx` whenever a frame lands.
        let (sender, receiver) = bounded(3);
        let sink = video::frame_sink(sender, ctx)?;
        play.pipeline().set_property("video-sink", &sink);

        let bus = play.message_bus();
        Ok(Self {
            play,
            bus,
            frames: receiver,
        })
    }

    // ---- Controls ----

    pub fn set_uri(&self, uri: &str) {
        self.play.set_uri(Some(uri));
    }

    /// URI of the item the player currently holds.
    pub fn uri(&self) -> Option<String> {
        self.play.uri().map(|uri| uri.to_string())
    }

    pub fn play(&self) {
        self.play.play();
    }

    pub fn pause(&self) {
        self.play.pause();
    }

    pub fn stop(&self) {
        self.play.stop();
    }

    /// Seek to a position in seconds.
    pub fn seek(&self, seconds: f64) {
        let nanos = (seconds.max(0.0) * 1e9) as u64;
        self.play.seek(gst::ClockTime::from_nseconds(nanos));
    }

    pub fn volume(&self) -> f64 {
        self.play.volume()
    }

    pub fn set_volume(&self, volume: f64) {
        self.play.set_volume(volume.clamp(0.0, 1.0));
    }

    // ---- Track selection ----

    /// Index of the player's current selection for a stream kind, if any.
    pub fn current_track(&self, kind: StreamKind) -> Option<i32> {
        match kind {
            StreamKind::Video => self.play.current_video_track().map(|t| t.index()),
            StreamKind::Audio => self.play.current_audio_track().map(|t| t.index()),
            StreamKind::Subtitle => self.play.current_subtitle_track().map(|t| t.index()),
        }
    }

    /// Switch to the stream with the given index and enable that kind.
    pub fn select_track(&self, kind: StreamKind, index: i32) -> Result<()> {
        match kind {
            StreamKind::Video => {
                self.play.set_video_track(index)?;
                self.play.set_video_track_enabled(true);
            }
            StreamKind::Audio => {
                self.play.set_audio_track(index)?;
                self.play.set_audio_track_enabled(true);
            }
            StreamKind::Subtitle => {
                self.play.set_subtitle_track(index)?;
                self.play.set_subtitle_track_enabled(true);
            }
        }
        Ok(())
    }

    /// Turn a stream kind off entirely.
    pub fn disable_track(&self, kind: StreamKind) {
        match kind {
            StreamKind::Video => self.play.set_video_track_enabled(false),
            StreamKind::Audio => self.play.set_audio_track_enabled(false),
            StreamKind::Subtitle => self.play.set_subtitle_track_enabled(false),
        }
    }

    // ---- Notifications ----

    /// Drain pending bus messages without blocking.
    ///
    /// Called from the UI thread each frame, which keeps every state change
    /// on the main loop.
    pub fn poll_events(&self) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        while let Some(msg) = self.bus.pop() {
            let Ok(msg) = gst_play::PlayMessage::parse(&msg) else {
                continue;
            };
            match msg {
                gst_play::PlayMessage::PositionUpdated { position, .. } => {
                    if let Some(position) = position {
                        events.push(PlayerEvent::PositionUpdated(seconds_of(position)));
                    }
                }
                gst_play::PlayMessage::DurationChanged { duration, .. } => {
                    if let Some(duration) = duration {
                        events.push(PlayerEvent::DurationChanged(seconds_of(duration)));
                    }
                }
                gst_play::PlayMessage::EndOfStream => {
                    events.push(PlayerEvent::EndOfStream);
                }
                gst_play::PlayMessage::MediaInfoUpdated { info, .. } => {
                    events.push(PlayerEvent::MediaInfoUpdated(MediaInfo::from_play(&info)));
                }
                gst_play::PlayMessage::Error { error, .. } => {
                    events.push(PlayerEvent::Error(error.to_string()));
                }
                gst_play::PlayMessage::Warning { error, .. } => {
                    events.push(PlayerEvent::Warning(error.to_string()));
                }
                _ => {}
            }
        }
        events
    }

    /// Newest frame delivered by the video sink, if any arrived.
    pub fn try_take_frame(&self) -> Option<VideoFrame> {
        let mut latest = None;
        while let Ok(frame) = self.frames.try_recv() {
            latest = Some(frame);
        }
        latest
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.play.stop();
    }
}

fn seconds_of(time: gst::ClockTime) -> f64 {
    time.nseconds() as f64 / 1e9
}
