use egui::{Button, Response, Slider, Ui};

use crate::app::PlayApp;

pub struct PlayerControls;

impl PlayerControls {
    pub fn show(ui: &mut Ui, app: &mut PlayApp) {
        ui.horizontal(|ui| {
            // Skip buttons follow the playlist cursor every frame.
            if ui
                .add_enabled(app.playlist.has_prev(), Button::new("⏮"))
                .clicked()
            {
                app.skip_prev(ui.ctx());
            }

            let play_pause_text = if app.playing { "⏸" } else { "▶" };
            if ui.button(play_pause_text).clicked() {
                app.play_pause(ui.ctx());
            }

            if ui
                .add_enabled(app.playlist.has_next(), Button::new("⏭"))
                .clicked()
            {
                app.skip_next(ui.ctx());
            }

            ui.separator();

            // Timeline / seek bar
            ui.label(format_time(app.position));

            // The range falls back to 0-100 until a duration is known.
            let duration = if app.duration > 0.0 { app.duration } else { 100.0 };

            // Use memory to persist the slider position during a drag, so
            // position updates from the player don't fight the user.
            let slider_id = ui.id().with("seek_slider");
            let mut position =
                ui.memory(|mem| mem.data.get_temp::<f64>(slider_id).unwrap_or(app.position));

            let slider_response = add_stretched_slider(
                ui,
                Slider::new(&mut position, 0.0..=duration)
                    .show_value(false)
                    .trailing_fill(true),
            );

            if slider_response.dragged() {
                ui.memory_mut(|mem| mem.data.insert_temp(slider_id, position));
            } else {
                ui.memory_mut(|mem| mem.data.insert_temp(slider_id, app.position));
            }

            // Only user interaction reaches the player; programmatic slider
            // updates never re-enter seek.
            if slider_response.drag_stopped() || slider_response.clicked() {
                app.player.seek(position);
            }

            ui.label(format_time(app.duration));

            ui.separator();

            // Volume control
            ui.label("🔊");
            let mut volume = app.volume;
            if ui
                .add(Slider::new(&mut volume, 0.0..=1.0).show_value(false))
                .changed()
            {
                app.volume = volume;
                app.player.set_volume(volume);
            }

            ui.separator();

            // Media information, available once the player has reported it.
            if ui
                .add_enabled(app.media_info.is_some(), Button::new("ℹ"))
                .clicked()
            {
                app.info_open = true;
            }
        });
    }
}

/// Stretch a slider over the width the trailing widgets leave free, inside a
/// scope so the spacing settings around it stay untouched.
fn add_stretched_slider(ui: &mut Ui, slider: Slider<'_>) -> Response {
    ui.scope(|ui| {
        ui.spacing_mut().slider_width = (ui.available_width() - 280.0).max(96.0);
        ui.add(slider)
    })
    .inner
}

fn format_time(seconds: f64) -> String {
    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_labels_roll_over_at_an_hour() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(65.0), "01:05");
        assert_eq!(format_time(3661.0), "01:01:01");
    }

    #[test]
    fn stretched_slider_leaves_spacing_untouched() {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.spacing_mut().slider_width = 37.0;
                let mut value = 0.5;
                add_stretched_slider(ui, Slider::new(&mut value, 0.0..=1.0));
                assert_eq!(ui.spacing().slider_width, 37.0);
            });
        });
    }
}
