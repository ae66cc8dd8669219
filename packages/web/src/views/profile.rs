use dioxus::prelude::*;
use ui::use_auth;
use ui::views::ProfileView;

use crate::Route;

#[component]
pub fn Profile() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        if auth().user.is_none() {
            nav.replace(Route::Profile {}.login_then());
        }
    });

    if auth().user.is_none() {
        return rsx! {};
    }

    rsx! {
        ProfileView {}
    }
}
