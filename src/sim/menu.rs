/// Scene navigation and the "How To Play" panel.

use log::{info, warn};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Scene {
    MainMenu,
    Game,
}

impl Scene {
    pub fn name(self) -> &'static str {
        match self {
            Scene::MainMenu => "MainMenu",
            Scene::Game => "GameScene",
        }
    }

    pub fn from_name(name: &str) -> Option<Scene> {
        match name {
            "MainMenu" => Some(Scene::MainMenu),
            "GameScene" => Some(Scene::Game),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MenuNavigator {
    scene: Scene,
    help_visible: bool,
}

impl MenuNavigator {
    pub fn new() -> Self {
        MenuNavigator { scene: Scene::MainMenu, help_visible: false }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Switch to the scene called `name`. Unknown names keep the current scene.
    /// Returns the newly loaded scene.
    pub fn load_scene(&mut self, name: &str) -> Option<Scene> {
        match Scene::from_name(name) {
            Some(scene) => {
                self.scene = scene;
                self.help_visible = false;
                info!("loaded scene {}", name);
                Some(scene)
            }
            None => {
                warn!("no scene named {:?}", name);
                None
            }
        }
    }

    pub fn start_game(&mut self) -> Option<Scene> {
        self.load_scene(Scene::Game.name())
    }

    pub fn back_to_menu(&mut self) -> Option<Scene> {
        self.load_scene(Scene::MainMenu.name())
    }

    pub fn show_help(&mut self) {
        self.help_visible = true;
    }

    pub fn close_help(&mut self) {
        self.help_visible = false;
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_menu_with_help_hidden() {
        let nav = MenuNavigator::new();
        assert_eq!(nav.scene(), Scene::MainMenu);
        assert!(!nav.help_visible());
    }

    #[test]
    fn start_game_loads_game_scene() {
        let mut nav = MenuNavigator::new();
        assert_eq!(nav.start_game(), Some(Scene::Game));
        assert_eq!(nav.scene(), Scene::Game);
        assert_eq!(nav.back_to_menu(), Some(Scene::MainMenu));
    }

    #[test]
    fn unknown_scene_keeps_current() {
        let mut nav = MenuNavigator::new();
        nav.start_game();
        assert_eq!(nav.load_scene("Credits"), None);
        assert_eq!(nav.scene(), Scene::Game);
    }

    #[test]
    fn help_panel_flags() {
        let mut nav = MenuNavigator::new();
        nav.show_help();
        assert!(nav.help_visible());
        nav.show_help();
        assert!(nav.help_visible());
        nav.close_help();
        assert!(!nav.help_visible());
        nav.toggle_help();
        assert!(nav.help_visible());
    }

    #[test]
    fn scene_change_hides_help() {
        let mut nav = MenuNavigator::new();
        nav.show_help();
        nav.start_game();
        assert!(!nav.help_visible());
    }
}
