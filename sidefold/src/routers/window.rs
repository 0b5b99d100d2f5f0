use iced::{Size, Task};

use crate::app::{App, AppEvent};

/// Track the window size and feed its width into the breakpoint set.
pub(crate) fn handle_resize(app: &mut App, size: Size) -> Task<AppEvent> {
    app.window_size = size;
    let result = app.host.set_viewport_width(size.width);
    super::panel::route_result(app, result, false)
}
