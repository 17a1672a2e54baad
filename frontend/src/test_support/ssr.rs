use crate::{
    components::toast::ToastProvider,
    state::{accounts::AccountsProvider, connection::ConnectionProvider},
};
use leptos::*;

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

/// Renders `view` to HTML on a throwaway reactive runtime.
pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(|| view().into_view().render_to_string().to_string());
    leptos_reactive::suppress_resource_load(false);
    html
}

/// Like [`render_to_string`], inside the same providers `App` mounts.
pub fn render_with_providers<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    render_to_string(move || {
        view! {
            <ToastProvider>
                <ConnectionProvider>
                    <AccountsProvider>{view().into_view()}</AccountsProvider>
                </ConnectionProvider>
            </ToastProvider>
        }
    })
}
