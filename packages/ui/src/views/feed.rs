use dioxus::prelude::*;
use store::{LoadStatus, PostDraft, PostKind, SkillSet};

use crate::auth::use_client;
use crate::error_banner::ErrorBanner;
use crate::post_card::PostCard;

/// The signed-in viewer's feed: composer on top, posts newest first below.
#[component]
pub fn FeedView() -> Element {
    let client = use_client();
    let mut feed = use_signal(|| client.feed.snapshot());

    let loader = client.feed.clone();
    use_future(move || {
        let controller = loader.clone();
        async move {
            controller.fetch_posts().await;
            feed.set(controller.snapshot());
        }
    });

    let liker = client.feed.clone();
    let on_like = use_callback(move |post_id: String| {
        let controller = liker.clone();
        spawn(async move {
            controller.toggle_like(&post_id).await;
            feed.set(controller.snapshot());
        });
    });

    let refresher = client.feed.clone();
    let on_change = use_callback(move |_: ()| feed.set(refresher.snapshot()));

    let dismisser = client.feed.clone();
    let on_dismiss = use_callback(move |_: ()| {
        dismisser.dismiss_error();
        feed.set(dismisser.snapshot());
    });

    let state = feed();
    let waiting = matches!(state.status, LoadStatus::Idle | LoadStatus::Loading);
    let error = state.error;
    let posts = state.posts;
    let draft = state.draft;
    let posting = state.posting;

    rsx! {
        div {
            class: "max-w-2xl mx-auto px-4 py-8 flex flex-col gap-6",
            PostComposer { draft, posting, on_change }

            if let Some(message) = error {
                ErrorBanner { message, on_dismiss }
            }

            if waiting && posts.is_empty() {
                div {
                    class: "flex justify-center py-16",
                    div { class: "h-10 w-10 rounded-full border-4 border-red-600 border-t-transparent animate-spin" }
                }
            } else if posts.is_empty() {
                p {
                    class: "text-center text-gray-400 py-16",
                    "No posts yet. Be the first to share something!"
                }
            } else {
                for post in posts {
                    PostCard { key: "{post.id}", post, on_like }
                }
            }
        }
    }
}

/// One change to the composer draft.
#[derive(Clone, Debug, PartialEq)]
enum DraftEdit {
    Content(String),
    Kind(PostKind),
    TogglePaid,
    Location(String),
    Skills(String),
}

impl DraftEdit {
    fn apply(self, draft: &mut PostDraft) {
        match self {
            DraftEdit::Content(content) => draft.content = content,
            DraftEdit::Kind(kind) => draft.kind = kind,
            DraftEdit::TogglePaid => draft.is_paid = !draft.is_paid,
            DraftEdit::Location(location) => draft.location = location,
            DraftEdit::Skills(text) => draft.required_skills = SkillSet::from_csv(&text),
        }
    }
}

/// Post creation form over the controller's draft, which is reset only after the
/// post is accepted.
#[component]
fn PostComposer(draft: PostDraft, posting: bool, on_change: EventHandler<()>) -> Element {
    let client = use_client();
    // Raw text of the skills field; the draft holds the parsed set.
    let mut skills_text = use_signal(|| draft.required_skills.as_slice().join(", "));

    let editor = client.feed.clone();
    let edit = use_callback(move |change: DraftEdit| {
        editor.update_draft(|d| change.apply(d));
        on_change.call(());
    });

    let submitter = client.feed.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let controller = submitter.clone();
        spawn(async move {
            let pending = controller.submit_draft();
            on_change.call(());
            if pending.await {
                skills_text.set(String::new());
            }
            on_change.call(());
        });
    };

    let kinds = PostKind::ALL.map(|k| {
        let style = if k == draft.kind {
            "bg-red-600 text-white"
        } else {
            "bg-zinc-800 text-gray-300"
        };
        (k, k.as_str(), k.label(), style)
    });
    let paid_class = if draft.is_paid {
        "bg-green-700 text-white"
    } else {
        "bg-zinc-800 text-gray-300"
    };

    rsx! {
        form {
            onsubmit: handle_submit,
            class: "bg-zinc-900 border border-zinc-800 rounded-xl p-5 flex flex-col gap-3",

            textarea {
                class: "w-full min-h-24 bg-black border border-zinc-700 rounded p-3 text-white placeholder-gray-500",
                placeholder: "Share a job, a collaboration or your latest work...",
                value: draft.content.clone(),
                oninput: move |evt: FormEvent| edit.call(DraftEdit::Content(evt.value())),
            }

            div {
                class: "grid grid-cols-1 sm:grid-cols-2 gap-3",
                div {
                    class: "flex gap-2",
                    for (choice, value, label, style) in kinds {
                        button {
                            key: "{value}",
                            r#type: "button",
                            class: "flex-1 px-2 py-2 rounded text-xs {style}",
                            onclick: move |_| edit.call(DraftEdit::Kind(choice)),
                            "{label}"
                        }
                    }
                }
                input {
                    class: "bg-black border border-zinc-700 rounded p-2 text-white placeholder-gray-500",
                    r#type: "text",
                    placeholder: "Location (optional)",
                    value: draft.location.clone(),
                    oninput: move |evt: FormEvent| edit.call(DraftEdit::Location(evt.value())),
                }
            }

            input {
                class: "bg-black border border-zinc-700 rounded p-2 text-white placeholder-gray-500",
                r#type: "text",
                placeholder: "Required skills, comma separated",
                value: skills_text(),
                oninput: move |evt: FormEvent| {
                    let text = evt.value();
                    skills_text.set(text.clone());
                    edit.call(DraftEdit::Skills(text));
                },
            }

            div {
                class: "flex items-center justify-between",
                button {
                    r#type: "button",
                    class: "px-3 py-1.5 rounded text-sm {paid_class}",
                    onclick: move |_| edit.call(DraftEdit::TogglePaid),
                    if draft.is_paid { "Paid" } else { "Unpaid" }
                }
                button {
                    r#type: "submit",
                    class: "px-5 py-2 rounded bg-red-600 hover:bg-red-700 text-white font-medium disabled:opacity-50",
                    disabled: posting,
                    if posting { "Posting..." } else { "Post" }
                }
            }
        }
    }
}
