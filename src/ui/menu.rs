use egui::{Response, Ui};

use crate::app::PlayApp;
use crate::player::{MediaInfo, StreamKind};

/// Attach the right-click track menu to the video surface.
///
/// Video / Audio / Subtitle submenus carry one radio row per stream plus a
/// Disable row; a final entry opens the media-information window. Without
/// stream metadata there is no menu at all.
pub fn attach(response: &Response, app: &mut PlayApp) {
    let Some(info) = app.media_info.clone() else {
        return;
    };

    response.context_menu(|ui| {
        for (label, kind) in [
            ("Video", StreamKind::Video),
            ("Audio", StreamKind::Audio),
            ("Subtitle", StreamKind::Subtitle),
        ] {
            ui.add_enabled_ui(info.has_streams(kind), |ui| {
                ui.menu_button(label, |ui| tracks_menu(ui, app, &info, kind));
            });
        }

        if ui.button("Media Information").clicked() {
            app.info_open = true;
            ui.close_menu();
        }
    });
}

fn tracks_menu(ui: &mut Ui, app: &mut PlayApp, info: &MediaInfo, kind: StreamKind) {
    let current = app.player.current_track(kind);

    for stream in info.streams_of(kind) {
        let selected = current == Some(stream.index());
        if ui.radio(selected, stream.menu_label()).clicked() {
            if let Err(err) = app.player.select_track(kind, stream.index()) {
                log::warn!("changing {} track failed: {err}", kind.label());
            }
            ui.close_menu();
        }
    }

    if ui.radio(current.is_none(), "Disable").clicked() {
        app.player.disable_track(kind);
        ui.close_menu();
    }
}
