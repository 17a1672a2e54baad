use leptos::*;
use leptos_meta::provide_meta_context;
use leptos_router::*;

mod api;
mod components;
pub mod config;
mod pages;
mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use pages::{ResetPasswordForm, ResetPasswordPage, ScrollRegistration};
pub use state::accounts::AccountsMode;

use components::{layout::Layout, toast::ToastProvider};
use state::{accounts::AccountsProvider, connection::ConnectionProvider};

/// Initialises logging and runtime config, then mounts [`App`] on `<body>`.
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Debug);
        log::info!("Starting Accounts Frontend (wasm)");

        // Resolved in the background; requests await it on first use.
        wasm_bindgen_futures::spawn_local(async move {
            config::init().await;
            log::info!("runtime config initialized");
        });

        mount_to_body(App);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("accounts-frontend only runs in the browser; build it for wasm32");
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(ApiClient::new());

    view! {
        <ToastProvider>
            <ConnectionProvider>
                <AccountsProvider>
                    <Router>
                        <Layout>
                            <Routes>
                                <Route path="/" view=ResetPasswordPage/>
                                <Route path="/reset-password" view=ResetPasswordPage/>
                            </Routes>
                        </Layout>
                    </Router>
                </AccountsProvider>
            </ConnectionProvider>
        </ToastProvider>
    }
}
