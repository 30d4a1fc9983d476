use egui::{CollapsingHeader, Context};

use crate::app::PlayApp;

/// Show the "Media information" window while it is open.
///
/// One section per stream in the player's reported order, with the current
/// selection of each kind marked, followed by the playing location.
pub fn show(ctx: &Context, app: &mut PlayApp) {
    if !app.info_open {
        return;
    }
    let Some(info) = app.media_info.clone() else {
        // The item changed and no metadata has arrived yet.
        app.info_open = false;
        return;
    };

    let mut open = app.info_open;
    egui::Window::new("Media information")
        .open(&mut open)
        .default_size([550.0, 450.0])
        .vscroll(true)
        .show(ctx, |ui| {
            ui.label(
                "Information about all the streams contained in your media.\n\
                 Current selected streams are marked as (current).",
            );

            for (n, stream) in info.streams.iter().enumerate() {
                let is_current = app.player.current_track(stream.kind()) == Some(stream.index());
                let header = if is_current {
                    format!("Stream {n} (current)")
                } else {
                    format!("Stream {n}")
                };
                CollapsingHeader::new(header)
                    .default_open(true)
                    .show(ui, |ui| {
                        ui.label(format!("Type : {}", stream.kind().label()));
                        for row in stream.info_rows() {
                            ui.label(row);
                        }
                    });
            }

            ui.label(format!("Location : {}", info.uri));
            if ui.button("Close").clicked() {
                app.info_open = false;
            }
        });
    app.info_open = app.info_open && open;
}
