use std::time::Duration;

use anyhow::Result;
use eframe::CreationContext;
use egui::{
    pos2, CentralPanel, Color32, ColorImage, Context, Key, Rect, Sense, TextureHandle,
    TextureOptions, TopBottomPanel, Vec2, ViewportCommand,
};
use url::Url;

use crate::player::{MediaInfo, Player, PlayerEvent};
use crate::playlist::Playlist;
use crate::ui::controls::PlayerControls;
use crate::ui::{info, menu};

/// Application state: the player handle, the playlist and the widget state
/// that is derived from player notifications.
pub struct PlayApp {
    pub(crate) player: Player,
    pub(crate) playlist: Playlist,
    /// Whether playback is active versus paused. Drives the toggle glyph.
    pub(crate) playing: bool,
    /// Playback position in seconds, fed by position messages.
    pub(crate) position: f64,
    /// Media duration in seconds, zero until the player reports it.
    pub(crate) duration: f64,
    pub(crate) volume: f64,
    /// Stream metadata for the current item, reset on every item switch.
    pub(crate) media_info: Option<MediaInfo>,
    pub(crate) info_open: bool,
    texture: Option<TextureHandle>,
}

impl PlayApp {
    /// Create the app, load the first playlist item and start playing.
    pub fn new(cc: &CreationContext<'_>, playlist: Playlist) -> Result<Self> {
        let player = Player::new(cc.egui_ctx.clone())?;
        player.set_uri(playlist.current());

        let volume = player.volume();
        let app = Self {
            player,
            playlist,
            playing: true,
            position: 0.0,
            duration: 0.0,
            volume,
            media_info: None,
            info_open: false,
            texture: None,
        };
        app.set_window_title(&cc.egui_ctx, Some(app.playlist.current()));
        app.player.play();
        Ok(app)
    }

    /// Window title: the given text, or the application name when absent.
    fn set_window_title(&self, ctx: &Context, title: Option<&str>) {
        let title = title.unwrap_or(crate::APP_NAME);
        ctx.send_viewport_cmd(ViewportCommand::Title(title.to_owned()));
    }

    pub(crate) fn play_pause(&mut self, ctx: &Context) {
        if self.playing {
            self.player.pause();
            self.playing = false;
        } else {
            self.player.play();
            let uri = self.player.uri();
            self.set_window_title(ctx, uri.as_deref());
            self.playing = true;
        }
    }

    pub(crate) fn skip_prev(&mut self, ctx: &Context) {
        let Some(uri) = self.playlist.retreat().map(String::from) else {
            return;
        };
        self.play_item(ctx, &uri);
    }

    pub(crate) fn skip_next(&mut self, ctx: &Context) {
        let Some(uri) = self.playlist.advance().map(String::from) else {
            return;
        };
        self.play_item(ctx, &uri);
    }

    /// Switch playback to `uri`. Metadata resets and the title shows the URI
    /// until the player reports something better.
    fn play_item(&mut self, ctx: &Context, uri: &str) {
        log::debug!("switching to {uri}");
        self.media_info = None;
        self.position = 0.0;
        self.playing = true;
        self.player.set_uri(uri);
        self.player.play();
        self.set_window_title(ctx, Some(uri));
    }

    /// React to the player reaching the end of the current item.
    fn handle_eos(&mut self, ctx: &Context) {
        match eos_action(self.playing, &mut self.playlist) {
            EosAction::Advance(uri) => self.play_item(ctx, &uri),
            EosAction::Finish => {
                self.player.pause();
                self.playing = false;
            }
            EosAction::Ignore => {}
        }
    }

    fn handle_media_info(&mut self, ctx: &Context, info: MediaInfo) {
        // First report for this item: pick up the media title. The info
        // button enables itself off the stored snapshot.
        if self.media_info.is_none() {
            if let Some(title) = &info.title {
                self.set_window_title(ctx, Some(title));
            }
        }
        self.media_info = Some(info);
    }

    fn process_events(&mut self, ctx: &Context) {
        for event in self.player.poll_events() {
            match event {
                PlayerEvent::PositionUpdated(position) => self.position = position,
                PlayerEvent::DurationChanged(duration) => self.duration = duration,
                PlayerEvent::EndOfStream => self.handle_eos(ctx),
                PlayerEvent::MediaInfoUpdated(info) => self.handle_media_info(ctx, info),
                PlayerEvent::Error(message) => log::warn!("player error: {message}"),
                PlayerEvent::Warning(message) => log::warn!("player warning: {message}"),
            }
        }
    }

    fn upload_frame(&mut self, ctx: &Context) {
        if let Some(frame) = self.player.try_take_frame() {
            let image = ColorImage::from_rgba_unmultiplied([frame.width, frame.height], &frame.rgba);
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                None => {
                    self.texture =
                        Some(ctx.load_texture("video_frame", image, TextureOptions::LINEAR));
                }
            }
        }
    }

    fn handle_keys(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(Key::Space)) {
            self.play_pause(ctx);
        }
        if ctx.input(|i| i.key_pressed(Key::ArrowLeft)) {
            self.player.seek((self.position - 10.0).max(0.0));
        }
        if ctx.input(|i| i.key_pressed(Key::ArrowRight)) && self.duration > 0.0 {
            self.player.seek((self.position + 10.0).min(self.duration));
        }
    }

    /// Append dropped files to the playlist and jump to the first of them.
    fn handle_dropped_files(&mut self, ctx: &Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        let mut first = None;
        for file in dropped {
            let Some(path) = file.path else { continue };
            let Ok(uri) = Url::from_file_path(&path) else {
                log::warn!("ignoring dropped file {}", path.display());
                continue;
            };
            let index = self.playlist.push(String::from(uri));
            first.get_or_insert(index);
        }
        if let Some(index) = first {
            if let Some(uri) = self.playlist.select(index).map(String::from) {
                self.play_item(ctx, &uri);
            }
        }
    }

    /// Black surface showing the latest frame, letterboxed; hosts the
    /// right-click track menu.
    fn video_surface(&mut self, ui: &mut egui::Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        ui.painter().rect_filled(rect, 0.0, Color32::BLACK);

        if let Some(texture) = &self.texture {
            let [width, height] = texture.size();
            let scale = (rect.width() / width as f32).min(rect.height() / height as f32);
            let size = Vec2::new(width as f32 * scale, height as f32 * scale);
            let image_rect = Rect::from_center_size(rect.center(), size);
            ui.painter().image(
                texture.id(),
                image_rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        menu::attach(&response, self);
    }
}

impl eframe::App for PlayApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_events(ctx);
        self.upload_frame(ctx);
        self.handle_keys(ctx);
        self.handle_dropped_files(ctx);

        TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            PlayerControls::show(ui, self);
            ui.add_space(4.0);
        });

        CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.video_surface(ui));

        info::show(ctx, self);

        if self.playing {
            ctx.request_repaint();
        } else {
            // Bus messages can still arrive while paused.
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

/// What reaching end-of-stream should do given the transport state.
#[derive(Debug, PartialEq)]
enum EosAction {
    /// Start playing this URI.
    Advance(String),
    /// Stay on the last item, paused.
    Finish,
    /// Playback was already paused, leave everything alone.
    Ignore,
}

fn eos_action(playing: bool, playlist: &mut Playlist) -> EosAction {
    if !playing {
        return EosAction::Ignore;
    }
    match playlist.advance() {
        Some(uri) => EosAction::Advance(uri.to_owned()),
        None => EosAction::Finish,
    }
}
