use crate::game::Game;
use crate::title::Title;
use crate::util::Globals;
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Debug)]
pub(crate) struct App {
    state: AppState,
}

impl App {
    pub(crate) fn new(globals: Globals) -> App {
        App {
            state: AppState::Title(Title::new(globals)),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.state {
            AppState::Title(ref title) => {
                terminal.draw(|frame| title.draw(frame))?;
            }
            AppState::Game(ref mut game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            AppState::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        let next = match self.state {
            AppState::Title(ref mut title) => title.process_input()?,
            AppState::Game(ref mut game) => game.process_input()?,
            AppState::Quit => None,
        };
        match next {
            Some(Screen::Game) => self.start_game(),
            Some(Screen::Quit) => self.state = AppState::Quit,
            None => (),
        }
        Ok(())
    }

    fn start_game(&mut self) {
        if let AppState::Title(title) = std::mem::replace(&mut self.state, AppState::Quit) {
            self.state = AppState::Game(Game::new(title.into_globals()));
        }
    }

    fn quitting(&self) -> bool {
        matches!(self.state, AppState::Quit)
    }
}

#[derive(Debug)]
enum AppState {
    Title(Title),
    Game(Game),
    Quit,
}

/// A request from the current screen to switch to another one
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Screen {
    Game,
    Quit,
}
