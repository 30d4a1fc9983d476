pub mod app;
pub mod player;
pub mod playlist;
pub mod ui;

pub use app::PlayApp;
pub use player::{MediaInfo, Player, PlayerEvent, Stream, StreamKind};
pub use playlist::Playlist;
pub use ui::controls::PlayerControls;

/// Name used for the window title when the media has none, and for the CLI.
pub const APP_NAME: &str = "egui-play";
