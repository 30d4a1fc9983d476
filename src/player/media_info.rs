use gstreamer::prelude::*;
use gstreamer_play as gst_play;
use gstreamer_play::prelude::*;

/// The three selectable stream families.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
}

impl StreamKind {
    /// Lowercase name shown in the info window's `Type` row.
    pub fn label(self) -> &'static str {
        match self {
            StreamKind::Video => "video",
            StreamKind::Audio => "audio",
            StreamKind::Subtitle => "subtitle",
        }
    }
}

#[derive(Clone, Debug)]
pub struct VideoStream {
    pub index: i32,
    pub codec: Option<String>,
    pub width: i32,
    pub height: i32,
    pub framerate: (i32, i32),
    pub pixel_aspect_ratio: (i32, i32),
    pub max_bitrate: i32,
}

#[derive(Clone, Debug)]
pub struct AudioStream {
    pub index: i32,
    pub codec: Option<String>,
    pub channels: i32,
    pub sample_rate: i32,
    pub language: Option<String>,
    pub max_bitrate: i32,
}

#[derive(Clone, Debug)]
pub struct SubtitleStream {
    pub index: i32,
    pub codec: Option<String>,
    pub language: Option<String>,
}

/// One selectable stream of a media item.
#[derive(Clone, Debug)]
pub enum Stream {
    Video(VideoStream),
    Audio(AudioStream),
    Subtitle(SubtitleStream),
}

impl Stream {
    /// Index used to select this stream on the player.
    pub fn index(&self) -> i32 {
        match self {
            Stream::Video(v) => v.index,
            Stream::Audio(a) => a.index,
            Stream::Subtitle(s) => s.index,
        }
    }

    pub fn kind(&self) -> StreamKind {
        match self {
            Stream::Video(_) => StreamKind::Video,
            Stream::Audio(_) => StreamKind::Audio,
            Stream::Subtitle(_) => StreamKind::Subtitle,
        }
    }

    /// Label shown in the track-selection menu.
    ///
    /// Audio: `<codec> <channels> [language]`, the language part only when
    /// known. Video: the codec. Subtitle: the language.
    pub fn menu_label(&self) -> String {
        match self {
            Stream::Video(v) => v.codec.clone().unwrap_or_default(),
            Stream::Audio(a) => {
                let codec = a.codec.as_deref().unwrap_or_default();
                let channels = channels_label(a.channels);
                match a.language.as_deref() {
                    Some(language) => format!("{codec} {channels} [{language}]"),
                    None => format!("{codec} {channels}"),
                }
            }
            Stream::Subtitle(s) => s.language.clone().unwrap_or_default(),
        }
    }

    /// Detail rows shown under the stream's section in the info window.
    /// Unknown fields and non-positive bitrates are omitted.
    pub fn info_rows(&self) -> Vec<String> {
        let mut rows = Vec::new();
        match self {
            Stream::Video(v) => {
                rows.push(format!("Resolution : {}x{}", v.width, v.height));
                let (num, den) = v.framerate;
                if den != 0 {
                    rows.push(format!("Framerate : {:.2}", num as f64 / den as f64));
                }
                let (par_n, par_d) = v.pixel_aspect_ratio;
                rows.push(format!("pixel-aspect-ratio : {par_n}:{par_d}"));
                if let Some(codec) = &v.codec {
                    rows.push(format!("Codec : {codec}"));
                }
                if v.max_bitrate > 0 {
                    rows.push(format!("Max bitrate : {}", v.max_bitrate));
                }
            }
            Stream::Audio(a) => {
                rows.push(format!("Channels : {}", channels_label(a.channels)));
                rows.push(format!("Sample rate : {}", a.sample_rate));
                if let Some(language) = &a.language {
                    rows.push(format!("Language : {language}"));
                }
                if let Some(codec) = &a.codec {
                    rows.push(format!("Codec : {codec}"));
                }
                if a.max_bitrate > 0 {
                    rows.push(format!("Max bitrate : {}", a.max_bitrate));
                }
            }
            Stream::Subtitle(s) => {
                if let Some(language) = &s.language {
                    rows.push(format!("Language : {language}"));
                }
                if let Some(codec) = &s.codec {
                    rows.push(format!("Codec : {codec}"));
                }
            }
        }
        rows
    }
}

/// Snapshot of the player's metadata for the current item.
///
/// Taken once per media-info message so the UI can build menus and the info
/// window without holding player objects.
#[derive(Clone, Debug)]
pub struct MediaInfo {
    pub uri: String,
    pub title: Option<String>,
    pub streams: Vec<Stream>,
}

impl MediaInfo {
    /// Copy the fields the UI needs out of the player's report.
    pub fn from_play(info: &gst_play::PlayMediaInfo) -> Self {
        let streams = info
            .stream_list()
            .iter()
            .filter_map(snapshot_stream)
            .collect();
        Self {
            uri: info.uri().to_string(),
            title: info.title().map(|t| t.to_string()),
            streams,
        }
    }

    pub fn streams_of(&self, kind: StreamKind) -> impl Iterator<Item = &Stream> {
        self.streams.iter().filter(move |s| s.kind() == kind)
    }

    pub fn has_streams(&self, kind: StreamKind) -> bool {
        self.streams_of(kind).next().is_some()
    }
}

fn snapshot_stream(stream: &gst_play::PlayStreamInfo) -> Option<Stream> {
    let index = stream.index();
    let codec = stream.codec().map(|c| c.to_string());

    if let Some(video) = stream.downcast_ref::<gst_play::PlayVideoInfo>() {
        let framerate = video.framerate();
        let par = video.pixel_aspect_ratio();
        return Some(Stream::Video(VideoStream {
            index,
            codec,
            width: video.width(),
            height: video.height(),
            framerate: (framerate.numer(), framerate.denom()),
            pixel_aspect_ratio: (par.numer(), par.denom()),
            max_bitrate: video.max_bitrate(),
        }));
    }
    if let Some(audio) = stream.downcast_ref::<gst_play::PlayAudioInfo>() {
        return Some(Stream::Audio(AudioStream {
            index,
            codec,
            channels: audio.channels(),
            sample_rate: audio.sample_rate(),
            language: audio.language().map(|l| l.to_string()),
            max_bitrate: audio.max_bitrate(),
        }));
    }
    if let Some(subtitle) = stream.downcast_ref::<gst_play::PlaySubtitleInfo>() {
        return Some(Stream::Subtitle(SubtitleStream {
            index,
            codec,
            language: subtitle.language().map(|l| l.to_string()),
        }));
    }
    None
}

/// Human wording for an audio channel count.
fn channels_label(channels: i32) -> &'static str {
    match channels {
        1 => "mono",
        2 => "stereo",
        n if n > 2 => "surround",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio(codec: Option<&str>, channels: i32, language: Option<&str>) -> AudioStream {
        AudioStream {
            index: 1,
            codec: codec.map(String::from),
            channels,
            sample_rate: 48_000,
            language: language.map(String::from),
            max_bitrate: 0,
        }
    }

    fn video(codec: Option<&str>, max_bitrate: i32) -> VideoStream {
        VideoStream {
            index: 0,
            codec: codec.map(String::from),
            width: 1920,
            height: 1080,
            framerate: (30000, 1001),
            pixel_aspect_ratio: (1, 1),
            max_bitrate,
        }
    }

    #[test]
    fn channel_wording_matches_count() {
        assert_eq!(channels_label(1), "mono");
        assert_eq!(channels_label(2), "stereo");
        assert_eq!(channels_label(6), "surround");
        assert_eq!(channels_label(0), "unknown");
        assert_eq!(channels_label(-3), "unknown");
    }

    #[test]
    fn audio_label_includes_language_when_known() {
        let stream = Stream::Audio(audio(Some("AAC"), 2, Some("en")));
        assert_eq!(stream.menu_label(), "AAC stereo [en]");
    }

    #[test]
    fn audio_label_without_language() {
        let stream = Stream::Audio(audio(Some("AC-3"), 6, None));
        assert_eq!(stream.menu_label(), "AC-3 surround");
    }

    #[test]
    fn video_label_is_the_codec() {
        let stream = Stream::Video(video(Some("H.264 / AVC"), 0));
        assert_eq!(stream.menu_label(), "H.264 / AVC");
        assert_eq!(Stream::Video(video(None, 0)).menu_label(), "");
    }

    #[test]
    fn subtitle_label_is_the_language() {
        let stream = Stream::Subtitle(SubtitleStream {
            index: 2,
            codec: Some("SRT".to_owned()),
            language: Some("de".to_owned()),
        });
        assert_eq!(stream.menu_label(), "de");
    }

    #[test]
    fn video_rows_follow_field_order() {
        let stream = Stream::Video(video(Some("H.264"), 0));
        assert_eq!(
            stream.info_rows(),
            vec![
                "Resolution : 1920x1080",
                "Framerate : 29.97",
                "pixel-aspect-ratio : 1:1",
                "Codec : H.264",
            ]
        );
    }

    #[test]
    fn framerate_row_skips_malformed_fractions() {
        let mut unknown = video(None, 0);
        unknown.framerate = (0, 1);
        let rows = Stream::Video(unknown).info_rows();
        assert!(rows.contains(&"Framerate : 0.00".to_owned()));

        let mut malformed = video(None, 0);
        malformed.framerate = (0, 0);
        let rows = Stream::Video(malformed).info_rows();
        assert!(!rows.iter().any(|r| r.starts_with("Framerate")));
    }

    #[test]
    fn bitrate_row_only_when_positive() {
        let without = Stream::Video(video(None, 0));
        assert!(!without.info_rows().iter().any(|r| r.contains("bitrate")));

        let with = Stream::Video(video(None, 4_000_000));
        assert!(with.info_rows().contains(&"Max bitrate : 4000000".to_owned()));
    }

    #[test]
    fn audio_rows_follow_field_order() {
        let stream = Stream::Audio(audio(Some("Vorbis"), 2, Some("en")));
        assert_eq!(
            stream.info_rows(),
            vec![
                "Channels : stereo",
                "Sample rate : 48000",
                "Language : en",
                "Codec : Vorbis",
            ]
        );
    }

    #[test]
    fn subtitle_rows_omit_unknown_language() {
        let stream = Stream::Subtitle(SubtitleStream {
            index: 0,
            codec: None,
            language: None,
        });
        assert!(stream.info_rows().is_empty());
    }

    #[test]
    fn streams_filter_by_kind() {
        let info = MediaInfo {
            uri: "file:///media/movie.mkv".to_owned(),
            title: None,
            streams: vec![
                Stream::Video(video(None, 0)),
                Stream::Audio(audio(None, 2, None)),
                Stream::Audio(audio(None, 6, Some("fr"))),
            ],
        };
        assert_eq!(info.streams_of(StreamKind::Audio).count(), 2);
        assert!(info.has_streams(StreamKind::Video));
        assert!(!info.has_streams(StreamKind::Subtitle));
    }
}
