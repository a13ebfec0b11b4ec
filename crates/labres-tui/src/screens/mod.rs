//! Screen implementations. Each tab is a top-level Component.

pub mod current;
pub mod new_reservation;
pub mod past;

use std::sync::Arc;

use labres_core::{Tab, ViewState};

use crate::component::Component;

/// Create one screen per tab, seeded with the controller's initial state.
pub fn create_screens(state: &Arc<ViewState>) -> Vec<(Tab, Box<dyn Component>)> {
    vec![
        (
            Tab::Current,
            Box::new(current::CurrentScreen::new(Arc::clone(state))),
        ),
        (Tab::Past, Box::new(past::PastScreen::new(Arc::clone(state)))),
        (
            Tab::New,
            Box::new(new_reservation::NewReservationScreen::new(Arc::clone(
                state,
            ))),
        ),
    ]
}
