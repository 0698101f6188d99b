use crate::application::ChartProjection;
use crate::domain::gex::Currency;
use leptos::*;
use once_cell::sync::OnceCell;

/// Reactive state shared by the UI components and the log bridge
pub struct Globals {
    pub currency: RwSignal<Currency>,
    pub projection: RwSignal<Option<ChartProjection>>,
    pub logs: RwSignal<Vec<String>>,
    pub logs_paused: RwSignal<bool>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        currency: create_rw_signal(Currency::default()),
        projection: create_rw_signal(None),
        logs: create_rw_signal(Vec::new()),
        logs_paused: create_rw_signal(false),
    })
}
