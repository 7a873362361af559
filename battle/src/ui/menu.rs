//! Battle menu: the input gateway between raw input and the orchestrator

use crate::types::Attack;

/// Raw input delivered to the battle once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    None,
    Confirm,
    Cancel,
}

/// Main menu picks other than FIGHT, consumed by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    Switch,
    Item,
    Flee,
}

/// Main menu options in grid order (top-left, top-right, bottom-left, bottom-right)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainMenuOption {
    Fight,
    Switch,
    Item,
    Flee,
}

impl MainMenuOption {
    pub const ALL: [MainMenuOption; 4] = [
        MainMenuOption::Fight,
        MainMenuOption::Switch,
        MainMenuOption::Item,
        MainMenuOption::Flee,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MainMenuOption::Fight => "FIGHT",
            MainMenuOption::Switch => "SWITCH",
            MainMenuOption::Item => "ITEM",
            MainMenuOption::Flee => "FLEE",
        }
    }
}

/// What the orchestrator needs from a menu layer.
///
/// `selected_attack` turns `Some` once the player confirms a move slot and
/// stays set until cleared; it is the signal to leave input collection.
pub trait InputGateway: Send {
    fn selected_attack(&self) -> Option<usize>;

    fn clear_selected_attack(&mut self);

    /// Take a pending FLEE / ITEM / SWITCH pick, if any
    fn take_menu_choice(&mut self) -> Option<MenuChoice>;

    fn handle_player_input(&mut self, event: InputEvent);

    fn show_main_menu(&mut self);

    fn hide_main_menu(&mut self);

    fn show_move_submenu(&mut self);

    fn hide_move_submenu(&mut self);

    fn is_main_menu_visible(&self) -> bool;

    fn is_move_submenu_visible(&self) -> bool;

    /// Called once at encounter start with the player's active combatant
    fn set_active_monster(&mut self, name: &str, attacks: &[Attack]) {
        let _ = (name, attacks);
    }
}

/// Cursor over a 2x2 grid, slots numbered row by row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct GridCursor(usize);

impl GridCursor {
    fn step(&mut self, event: InputEvent) {
        let (row, col) = (self.0 / 2, self.0 % 2);
        let (row, col) = match event {
            InputEvent::Up => (0, col),
            InputEvent::Down => (1, col),
            InputEvent::Left => (row, 0),
            InputEvent::Right => (row, 1),
            _ => (row, col),
        };
        self.0 = row * 2 + col;
    }
}

/// Default input gateway: a FIGHT / SWITCH / ITEM / FLEE menu with a four
/// slot move submenu
#[derive(Debug, Clone, Default)]
pub struct BattleMenu {
    main_visible: bool,
    moves_visible: bool,

    main_cursor: GridCursor,
    move_cursor: GridCursor,

    active_name: String,
    attack_names: Vec<String>,

    selected_attack: Option<usize>,
    choice: Option<MenuChoice>,
}

impl BattleMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Option under the main menu cursor
    pub fn highlighted_option(&self) -> MainMenuOption {
        MainMenuOption::ALL[self.main_cursor.0]
    }

    /// Move slot under the submenu cursor
    pub fn highlighted_slot(&self) -> usize {
        self.move_cursor.0
    }

    /// Labels of the four move slots, `-` for empty ones
    pub fn move_slots(&self) -> [&str; 4] {
        std::array::from_fn(|i| self.attack_names.get(i).map(String::as_str).unwrap_or("-"))
    }

    /// The two prompt lines shown next to the main menu
    pub fn prompt(&self) -> [String; 2] {
        [
            "what should".to_string(),
            format!("{} do next?", self.active_name),
        ]
    }
}

impl InputGateway for BattleMenu {
    fn selected_attack(&self) -> Option<usize> {
        self.selected_attack
    }

    fn clear_selected_attack(&mut self) {
        self.selected_attack = None;
    }

    fn take_menu_choice(&mut self) -> Option<MenuChoice> {
        self.choice.take()
    }

    fn handle_player_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::None => {}
            InputEvent::Cancel => {
                if self.moves_visible {
                    self.hide_move_submenu();
                    self.show_main_menu();
                }
            }
            InputEvent::Confirm => {
                if self.moves_visible {
                    self.selected_attack = Some(self.move_cursor.0);
                } else if self.main_visible {
                    match self.highlighted_option() {
                        MainMenuOption::Fight => {
                            self.hide_main_menu();
                            self.show_move_submenu();
                        }
                        MainMenuOption::Switch => self.choice = Some(MenuChoice::Switch),
                        MainMenuOption::Item => self.choice = Some(MenuChoice::Item),
                        MainMenuOption::Flee => self.choice = Some(MenuChoice::Flee),
                    }
                }
            }
            direction => {
                if self.moves_visible {
                    self.move_cursor.step(direction);
                } else if self.main_visible {
                    self.main_cursor.step(direction);
                }
            }
        }
    }

    fn show_main_menu(&mut self) {
        self.main_visible = true;
    }

    fn hide_main_menu(&mut self) {
        self.main_visible = false;
    }

    fn show_move_submenu(&mut self) {
        self.moves_visible = true;
    }

    fn hide_move_submenu(&mut self) {
        self.moves_visible = false;
    }

    fn is_main_menu_visible(&self) -> bool {
        self.main_visible
    }

    fn is_move_submenu_visible(&self) -> bool {
        self.moves_visible
    }

    fn set_active_monster(&mut self, name: &str, attacks: &[Attack]) {
        self.active_name = name.to_string();
        self.attack_names = attacks.iter().map(|a| a.name.clone()).collect();
    }
}
