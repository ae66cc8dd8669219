use dioxus::prelude::*;
use ui::use_auth;
use ui::views::FeedView;

use crate::Route;

#[component]
pub fn Feed() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        if auth().user.is_none() {
            nav.replace(Route::Feed {}.login_then());
        }
    });

    if auth().user.is_none() {
        return rsx! {};
    }

    rsx! {
        FeedView {}
    }
}
