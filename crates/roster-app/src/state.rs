// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    List,
    Detail(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub screen: Screen,
    pub status_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    OpenDetail(UserId),
    BackToList,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ScreenChanged(Screen),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::OpenDetail(id) => self.switch_screen(Screen::Detail(id)),
            AppCommand::BackToList => self.switch_screen(Screen::List),
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn switch_screen(&mut self, screen: Screen) -> Vec<AppEvent> {
        if self.screen == screen {
            return Vec::new();
        }
        self.screen = screen;
        vec![AppEvent::ScreenChanged(screen)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState, Screen};
    use crate::UserId;

    #[test]
    fn open_detail_and_back() {
        let mut state = AppState::default();

        let opened = state.dispatch(AppCommand::OpenDetail(UserId::new(3)));
        assert_eq!(state.screen, Screen::Detail(UserId::new(3)));
        assert_eq!(
            opened,
            vec![AppEvent::ScreenChanged(Screen::Detail(UserId::new(3)))]
        );

        let back = state.dispatch(AppCommand::BackToList);
        assert_eq!(state.screen, Screen::List);
        assert_eq!(back, vec![AppEvent::ScreenChanged(Screen::List)]);
    }

    #[test]
    fn reopening_the_same_detail_is_a_no_op() {
        let mut state = AppState {
            screen: Screen::Detail(UserId::new(1)),
            ..AppState::default()
        };
        assert!(state.dispatch(AppCommand::OpenDetail(UserId::new(1))).is_empty());

        let switched = state.dispatch(AppCommand::OpenDetail(UserId::new(2)));
        assert_eq!(
            switched,
            vec![AppEvent::ScreenChanged(Screen::Detail(UserId::new(2)))]
        );
    }

    #[test]
    fn status_set_and_clear() {
        let mut state = AppState::default();

        let set = state.dispatch(AppCommand::SetStatus("loaded 10 users".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("loaded 10 users"));
        assert_eq!(set, vec![AppEvent::StatusUpdated("loaded 10 users".to_owned())]);

        let cleared = state.dispatch(AppCommand::ClearStatus);
        assert_eq!(state.status_line, None);
        assert_eq!(cleared, vec![AppEvent::StatusCleared]);
    }
}
