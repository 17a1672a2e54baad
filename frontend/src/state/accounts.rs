use leptos::*;

/// Which accounts screen the host is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccountsMode {
    Login,
    #[default]
    ResetPassword,
}

impl AccountsMode {
    pub fn path(&self) -> &'static str {
        match self {
            AccountsMode::Login => "/login",
            AccountsMode::ResetPassword => "/reset-password",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountsState {
    pub mode: AccountsMode,
    /// Outer navigation is disabled while a form is submitting.
    pub navigation_locked: bool,
}

type AccountsContext = (ReadSignal<AccountsState>, WriteSignal<AccountsState>);

#[component]
pub fn AccountsProvider(children: Children) -> impl IntoView {
    provide_context::<AccountsContext>(create_signal(AccountsState::default()));
    view! { <>{children()}</> }
}

pub fn use_accounts() -> AccountsContext {
    match use_context::<AccountsContext>() {
        Some(ctx) => ctx,
        None => {
            let ctx = create_signal(AccountsState::default());
            provide_context(ctx);
            ctx
        }
    }
}

pub fn set_navigation_locked(set_state: WriteSignal<AccountsState>, locked: bool) {
    set_state.update(|state| state.navigation_locked = locked);
}

/// Records the new mode and leaves the current page when the mode lives
/// elsewhere in the host application.
pub fn switch_mode(set_state: WriteSignal<AccountsState>, mode: AccountsMode) {
    set_state.update(|state| state.mode = mode);
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if let Some(target) = redirect_target(location.pathname().ok().as_deref(), mode) {
                log::info!("switching accounts mode to {}", target);
                let _ = location.set_href(target);
            }
        }
    }
}

/// Where the browser must go to show `mode`, if it is not already there.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn redirect_target(current_path: Option<&str>, mode: AccountsMode) -> Option<&'static str> {
    let target = mode.path();
    (current_path != Some(target)).then_some(target)
}


#[cfg(test)]
mod redirect_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test(unsupported = test)]
    fn redirects_only_when_leaving_current_page() {
        assert_eq!(
            redirect_target(Some("/reset-password"), AccountsMode::Login),
            Some("/login")
        );
        assert_eq!(redirect_target(Some("/login"), AccountsMode::Login), None);
        assert_eq!(
            redirect_target(None, AccountsMode::ResetPassword),
            Some("/reset-password")
        );
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn current_page_is_left_for_the_other_mode() {
        let path = AccountsMode::ResetPassword.path();
        assert_eq!(redirect_target(Some(path), AccountsMode::ResetPassword), None);
        assert!(redirect_target(Some(path), AccountsMode::Login).is_some());
    }
}
