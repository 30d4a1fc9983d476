pub mod controls;
pub mod info;
pub mod menu;
