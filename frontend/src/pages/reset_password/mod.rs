use crate::state::accounts::{self, use_accounts};
use leptos::*;
use leptos_meta::Title;
use leptos_router::use_query_map;

pub mod form;
mod panel;
mod repository;
pub mod submission;
mod view_model;

pub use panel::{ResetPasswordForm, ScrollRegistration};

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let (_accounts, set_accounts) = use_accounts();
    let query = use_query_map();
    let token = Signal::derive(move || query.with(|params| params.get("token").cloned()));

    let on_mode_change = Callback::new(move |mode| accounts::switch_mode(set_accounts, mode));
    let on_start_submitting =
        Callback::new(move |_| accounts::set_navigation_locked(set_accounts, true));
    let on_end_submitting =
        Callback::new(move |_| accounts::set_navigation_locked(set_accounts, false));

    view! {
        <Title text="Reset password" />
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">
                    "Set new password"
                </h2>
                <ResetPasswordForm
                    reset_token=token
                    on_mode_change=on_mode_change
                    on_start_submitting=on_start_submitting
                    on_end_submitting=on_end_submitting
                />
            </div>
        </div>
    }
}
