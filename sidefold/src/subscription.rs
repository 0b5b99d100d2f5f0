use iced::{Subscription, window};

use crate::app::{App, AppEvent};
use crate::routers::panel::FRAME_INTERVAL;

/// Build the active subscription set from current app state.
pub(super) fn subscription(app: &App) -> Subscription<AppEvent> {
    let win_subs = window::events().map(|(_id, event)| AppEvent::Window(event));

    let mut subs = vec![win_subs];

    // Frame tick only while backdrop fades or deferred hides are pending
    if app.host.is_busy() {
        subs.push(iced::time::every(FRAME_INTERVAL).map(AppEvent::Tick));
    }

    Subscription::batch(subs)
}
