use crate::state::accounts::{use_accounts, AccountsMode};
use leptos::*;

fn nav_link_class(locked: bool) -> &'static str {
    if locked {
        "text-fg-muted px-3 py-2 rounded-md text-sm font-medium opacity-50 pointer-events-none"
    } else {
        "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let (accounts, _set_accounts) = use_accounts();
    let locked = create_memo(move |_| accounts.get().navigation_locked);

    // Anchors ignore `disabled`, so clicks are swallowed while locked.
    let guard = move |ev: ev::MouseEvent| {
        if locked.get_untracked() {
            ev.prevent_default();
        }
    };

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">"Accounts"</h1>
                    <nav class="flex space-x-4">
                        <a
                            href="/"
                            class=move || nav_link_class(locked.get())
                            aria-disabled=move || locked.get().to_string()
                            on:click=guard
                        >
                            "Home"
                        </a>
                        <a
                            href=AccountsMode::Login.path()
                            class=move || nav_link_class(locked.get())
                            aria-disabled=move || locked.get().to_string()
                            on:click=guard
                        >
                            "Sign in"
                        </a>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header />
            <main>{children()}</main>
        </div>
    }
}
