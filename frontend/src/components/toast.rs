use leptos::*;

pub const TOAST_DURATION_MS: u32 = 4000;

/// Context handle for transient notifications.
#[derive(Clone, Copy)]
pub struct Toaster {
    message: RwSignal<Option<String>>,
    #[cfg(target_arch = "wasm32")]
    dismiss_timer: StoredValue<Option<gloo_timers::callback::Timeout>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            message: create_rw_signal(None),
            #[cfg(target_arch = "wasm32")]
            dismiss_timer: store_value(None),
        }
    }

    pub fn show(&self, message: impl Into<String>) {
        let message = message.into();
        log::info!("toast: {}", message.replace('\n', " "));
        self.message.set(Some(message));

        #[cfg(target_arch = "wasm32")]
        {
            let message = self.message;
            // Replacing the stored timeout drops (and cancels) the previous one.
            self.dismiss_timer.set_value(Some(gloo_timers::callback::Timeout::new(
                TOAST_DURATION_MS,
                move || {
                    let _ = message.try_set(None);
                },
            )));
        }
    }

    pub fn dismiss(&self) {
        self.message.set(None);
        #[cfg(target_arch = "wasm32")]
        {
            self.dismiss_timer.set_value(None);
        }
    }

    pub fn current(&self) -> Signal<Option<String>> {
        self.message.into()
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toast() -> Toaster {
    use_context::<Toaster>().unwrap_or_default()
}

#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let toaster = Toaster::new();
    provide_context(toaster);
    let message = toaster.current();

    view! {
        <>
            {children()}
            <Show when=move || message.get().is_some()>
                <div class="fixed inset-x-0 bottom-6 z-[80] flex justify-center px-4">
                    <div
                        role="status"
                        aria-live="polite"
                        class="flex items-start gap-3 max-w-sm rounded-lg bg-surface-inverse text-text-inverse shadow-lg px-4 py-3 animate-pop-in"
                    >
                        <p class="text-sm whitespace-pre-line">
                            {move || message.get().unwrap_or_default()}
                        </p>
                        <button
                            type="button"
                            aria-label="Dismiss"
                            class="text-text-inverse/70 hover:text-text-inverse"
                            on:click=move |_| toaster.dismiss()
                        >
                            {"✕"}
                        </button>
                    </div>
                </div>
            </Show>
        </>
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn toast_dismisses_itself() {
        let runtime = create_runtime();
        let toaster = Toaster::new();

        toaster.show("offline");
        TimeoutFuture::new(TOAST_DURATION_MS / 2).await;
        assert_eq!(toaster.current().get_untracked().as_deref(), Some("offline"));

        TimeoutFuture::new(TOAST_DURATION_MS / 2 + 200).await;
        assert!(toaster.current().get_untracked().is_none());

        runtime.dispose();
    }

    #[wasm_bindgen_test]
    async fn newer_toast_restarts_dismiss_timer() {
        let runtime = create_runtime();
        let toaster = Toaster::new();

        toaster.show("first");
        TimeoutFuture::new(TOAST_DURATION_MS - 1000).await;
        toaster.show("second");
        TimeoutFuture::new(1500).await;
        assert_eq!(toaster.current().get_untracked().as_deref(), Some("second"));

        TimeoutFuture::new(TOAST_DURATION_MS).await;
        assert!(toaster.current().get_untracked().is_none());

        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn dismiss_cancels_pending_timer() {
        let runtime = create_runtime();
        let toaster = Toaster::new();
        toaster.show("hello");
        toaster.dismiss();
        assert!(toaster.current().get_untracked().is_none());
        runtime.dispose();
    }
}
