use crate::core::route::Route;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::sidebar::SIDEBAR_WIDTH;
use crate::tui::components::{AuthPrompt, LandingPage, MessageList, Sidebar, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

/// Below this width the sidebar is dropped to leave room for the chat.
const MIN_WIDTH_FOR_SIDEBAR: u16 = 80;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let area = frame.area();
    match app.route {
        Route::Landing => {
            LandingPage::new(tui.tick, &app.status_message).render(frame, area);
        }
        Route::AuthCompletion => {
            AuthPrompt::new(&app.login_url, &app.status_message, &mut tui.callback_box)
                .render(frame, area);
        }
        Route::Chat => draw_chat(frame, area, app, tui),
    }
}

fn draw_chat(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let main_area = if area.width >= MIN_WIDTH_FOR_SIDEBAR {
        let [sidebar_area, main_area] =
            Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(area);
        Sidebar::new(app.identity.as_ref(), app.recent_chats).render(frame, sidebar_area);
        main_area
    } else {
        area
    };

    tui.input_box.disabled = app.is_loading;
    let input_height = tui.input_box.calculate_height(main_area.width);
    let [title_area, list_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(main_area);

    TitleBar::new(app.status_message.clone()).render(frame, title_area);
    MessageList::new(
        &mut tui.message_list,
        &app.transcript,
        app.is_loading,
        tui.tick,
    )
    .render(frame, list_area);
    tui.input_box.render(frame, input_area);
}
