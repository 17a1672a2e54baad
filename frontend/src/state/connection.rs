use leptos::*;

/// Whether the browser currently reports a network connection.
#[derive(Clone, Copy, Debug)]
pub struct ConnectionState {
    connected: RwSignal<bool>,
}

impl ConnectionState {
    pub fn new(connected: bool) -> Self {
        Self {
            connected: create_rw_signal(connected),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.get_untracked()
    }

    pub fn connected(&self) -> Signal<bool> {
        self.connected.into()
    }

    pub fn set_connected(&self, connected: bool) {
        if self.connected.get_untracked() != connected {
            log::info!(
                "network {}",
                if connected { "online" } else { "offline" }
            );
            self.connected.set(connected);
        }
    }
}

fn navigator_online() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .map(|w| w.navigator().on_line())
            .unwrap_or(true)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        true
    }
}

#[component]
pub fn ConnectionProvider(children: Children) -> impl IntoView {
    let state = ConnectionState::new(navigator_online());
    provide_context(state);

    #[cfg(target_arch = "wasm32")]
    listen_for_connectivity(state);

    view! { <>{children()}</> }
}

/// Mirrors the window's `online`/`offline` events into `state` until the
/// owner is cleaned up.
#[cfg(target_arch = "wasm32")]
fn listen_for_connectivity(state: ConnectionState) {
    let online = window_event_listener(ev::online, move |_| state.set_connected(true));
    let offline = window_event_listener(ev::offline, move |_| state.set_connected(false));
    on_cleanup(move || {
        online.remove();
        offline.remove();
    });
}

pub fn use_connection() -> ConnectionState {
    use_context::<ConnectionState>().unwrap_or_else(|| ConnectionState::new(navigator_online()))
}
