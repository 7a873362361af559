//! Presentation-facing collaborators: the battle menu and the message layer

mod dialog;
mod menu;

pub use dialog::{Acknowledged, Dialog};
pub use menu::{BattleMenu, InputEvent, InputGateway, MainMenuOption, MenuChoice};
