use super::view_model::{use_reset_password_view_model, SubmittingCallbacks};
use crate::{
    components::common::{Button, ButtonVariant},
    state::accounts::AccountsMode,
};
use leptos::{ev::KeyboardEvent, html, *};

pub const SUCCESS_MESSAGE: &str = "Your password updated successfully!";

/// A field wrapper and its input, handed to the host so it can keep the
/// focused input visible above an on-screen keyboard.
#[derive(Clone, Copy)]
pub struct ScrollRegistration {
    pub view: NodeRef<html::Div>,
    pub text_input: NodeRef<html::Input>,
}

fn register_when_mounted(
    register: Callback<ScrollRegistration>,
    view: NodeRef<html::Div>,
    text_input: NodeRef<html::Input>,
) {
    text_input.on_load(move |_| {
        if view.get_untracked().is_some() {
            register.call(ScrollRegistration { view, text_input });
        }
    });
}

fn input_class(validated: bool) -> String {
    format!(
        "appearance-none block w-full h-12 px-1 border-0 border-b-2 bg-transparent text-form-control-text placeholder-form-control-placeholder focus:outline-none focus:ring-0 disabled:opacity-60 sm:text-sm {}",
        if validated {
            "border-form-control-border focus:border-action-primary-border"
        } else {
            "border-status-error-border focus:border-status-error-border"
        }
    )
}

#[component]
pub fn ResetPasswordForm(
    #[prop(optional, into)] reset_token: MaybeSignal<Option<String>>,
    #[prop(optional)] on_mode_change: Option<Callback<AccountsMode>>,
    #[prop(optional)] on_start_submitting: Option<Callback<()>>,
    #[prop(optional)] on_end_submitting: Option<Callback<()>>,
    #[prop(optional)] register_in_keyboard_aware_scroll_view: Option<Callback<ScrollRegistration>>,
) -> impl IntoView {
    let token = Signal::derive(move || reset_token.get());
    let vm = use_reset_password_view_model(
        token,
        SubmittingCallbacks {
            on_start: on_start_submitting,
            on_end: on_end_submitting,
        },
    );
    let form = vm.form;
    let can_submit = vm.can_submit;
    let editable = vm.editable;
    let submitting = Signal::derive(move || form.with(|state| state.submitting()));

    let password_view = create_node_ref::<html::Div>();
    let password_input = create_node_ref::<html::Input>();
    let confirmation_view = create_node_ref::<html::Div>();
    let confirmation_input = create_node_ref::<html::Input>();

    if let Some(register) = register_in_keyboard_aware_scroll_view {
        register_when_mounted(register, password_view, password_input);
        register_when_mounted(register, confirmation_view, confirmation_input);
    }

    let on_submit = {
        let vm = vm.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            vm.submit();
        }
    };
    let on_password_input = {
        let vm = vm.clone();
        move |ev| vm.set_password(event_target_value(&ev))
    };
    let on_confirmation_input = {
        let vm = vm.clone();
        move |ev| vm.set_password_confirmation(event_target_value(&ev))
    };
    let on_confirmation_keydown = {
        let vm = vm.clone();
        move |ev: KeyboardEvent| {
            if ev.key() == "Enter" {
                ev.prevent_default();
                vm.submit();
            }
        }
    };
    let on_password_keydown = move |ev: KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            if let Some(input) = confirmation_input.get_untracked() {
                let _ = input.focus();
            }
        }
    };
    let back_to_login = move |_| {
        if let Some(callback) = on_mode_change {
            callback.call(AccountsMode::Login);
        }
    };

    view! {
        <form class="flex flex-col items-stretch" novalidate=true on:submit=on_submit>
            <div node_ref=password_view class="flex flex-col justify-end items-stretch">
                <label for="reset-password" class="sr-only">
                    "Password"
                </label>
                <input
                    id="reset-password"
                    name="password"
                    type="password"
                    autocomplete="new-password"
                    autocapitalize="none"
                    autocorrect="off"
                    spellcheck="false"
                    enterkeyhint="next"
                    placeholder="Password"
                    node_ref=password_input
                    class=move || input_class(form.with(|state| state.password_validated))
                    disabled=move || !editable.get()
                    prop:value=move || form.with(|state| state.password.clone())
                    on:input=on_password_input
                    on:keydown=on_password_keydown
                />
                <p class="mt-1 mb-px min-h-[1rem] text-xs text-status-error-text">
                    {move || form.with(|state| state.password_error.clone()).unwrap_or_default()}
                </p>
            </div>

            <div node_ref=confirmation_view class="flex flex-col justify-end items-stretch mb-6">
                <label for="reset-password-confirmation" class="sr-only">
                    "Confirm password"
                </label>
                <input
                    id="reset-password-confirmation"
                    name="password_confirmation"
                    type="password"
                    autocomplete="new-password"
                    autocapitalize="none"
                    autocorrect="off"
                    spellcheck="false"
                    enterkeyhint="go"
                    placeholder="Confirm password"
                    node_ref=confirmation_input
                    class=move || {
                        input_class(form.with(|state| state.password_confirmation_validated))
                    }
                    disabled=move || !editable.get()
                    prop:value=move || form.with(|state| state.password_confirmation.clone())
                    on:input=on_confirmation_input
                    on:keydown=on_confirmation_keydown
                />
                <p class="mt-1 mb-px min-h-[1rem] text-xs text-status-error-text">
                    {move || {
                        form.with(|state| state.password_confirmation_error.clone())
                            .unwrap_or_default()
                    }}
                </p>
            </div>

            {move || {
                if form.with(|state| state.submitted()) {
                    view! {
                        <div class="flex flex-row items-start gap-1 text-fg" role="status">
                            <svg
                                class="h-7 w-7 -mt-1 flex-shrink-0 text-status-success-text"
                                viewBox="0 0 20 20"
                                fill="currentColor"
                                aria-hidden="true"
                            >
                                <path
                                    fill-rule="evenodd"
                                    d="M16.707 5.293a1 1 0 010 1.414l-8 8a1 1 0 01-1.414 0l-4-4a1 1 0 011.414-1.414L8 12.586l7.293-7.293a1 1 0 011.414 0z"
                                    clip-rule="evenodd"
                                ></path>
                            </svg>
                            <p class="flex-1 text-base">{SUCCESS_MESSAGE}</p>
                        </div>
                    }
                        .into_view()
                } else {
                    view! {
                        <Button
                            variant=ButtonVariant::Primary
                            class="w-full"
                            attr:type="submit"
                            disabled=Signal::derive(move || !can_submit.get())
                            loading=submitting
                        >
                            "Reset"
                        </Button>
                    }
                        .into_view()
                }
            }}

            <p class="mt-4 min-h-[1.25rem] text-sm text-center text-status-error-text whitespace-pre-line" role="alert">
                {move || form.with(|state| state.submission_error()).unwrap_or_default()}
            </p>

            <Button
                variant=ButtonVariant::Ghost
                class="mt-2 self-center"
                attr:type="button"
                on:click=back_to_login
            >
                "Back to Login"
            </Button>
        </form>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::{render_to_string, render_with_providers};

    #[test]
    fn renders_inputs_and_disabled_reset_button() {
        let html = render_to_string(|| {
            view! { <ResetPasswordForm reset_token=Some("token".to_string()) /> }
        });
        assert!(html.contains("placeholder=\"Password\""));
        assert!(html.contains("placeholder=\"Confirm password\""));
        assert!(html.contains("Reset"));
        assert!(html.contains("Back to Login"));
        assert!(html.contains("disabled"));
        assert!(!html.contains(SUCCESS_MESSAGE));
    }

    #[test]
    fn renders_inside_app_providers_without_token() {
        let html = render_with_providers(|| view! { <ResetPasswordForm /> });
        assert!(html.contains("Back to Login"));
        assert!(!html.contains("role=\"status\""));
    }

    #[test]
    fn input_class_reflects_validation() {
        assert!(input_class(true).contains("border-form-control-border"));
        assert!(input_class(false).contains("border-status-error-border"));
    }
}
