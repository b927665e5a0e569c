use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Re-run autocomplete for the edited input
    RefreshSuggestions,
    /// Copy the highlighted suggestion into the input
    AcceptSuggestion,
    /// Resolve the input to its area and open the schedule view
    LookupAddress,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Down, Enter, Esc, Left, Right, Tab, Up};

    // Global quit shortcut
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::AddressSearch => match key.code {
            Up => {
                if app.suggestion_index > 0 {
                    app.suggestion_index -= 1;
                }
            }
            Down => {
                if app.suggestion_index + 1 < app.suggestions.len() {
                    app.suggestion_index += 1;
                }
            }
            Char(character) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    app.address_input.push(character);
                    action = Action::RefreshSuggestions;
                }
            }
            Backspace => {
                app.address_input.pop();
                action = Action::RefreshSuggestions;
            }
            Right | Tab => {
                action = Action::AcceptSuggestion;
            }
            Enter => {
                action = Action::LookupAddress;
            }
            Esc => {
                if app.address_input.is_empty() {
                    action = Action::Quit;
                } else {
                    app.address_input.clear();
                    action = Action::RefreshSuggestions;
                }
            }
            _ => {}
        },

        Screen::ScheduleView => match key.code {
            Left | Esc | Char('b') => {
                app.screen = Screen::AddressSearch;
            }
            Char('q') => {
                action = Action::Quit;
            }
            _ => {}
        },
    }
    action
}
