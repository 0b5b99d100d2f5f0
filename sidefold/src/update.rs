use iced::{Task, window};

use super::{App, AppEvent};
use crate::routers;

/// Thin dispatch: route each event to its owning router.
pub(super) fn update(app: &mut App, event: AppEvent) -> Task<AppEvent> {
    match event {
        AppEvent::Panel { name, intent } => {
            routers::panel::route_intent(app, &name, intent)
        },
        AppEvent::BackdropPressed(element) => {
            routers::panel::route_backdrop_press(app, element)
        },
        AppEvent::Tick(now) => routers::panel::route_tick(app, now),
        AppEvent::Window(window::Event::Resized(size)) => {
            routers::window::handle_resize(app, size)
        },
        AppEvent::Window(_) => Task::none(),
    }
}
