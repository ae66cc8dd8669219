use dioxus::prelude::*;
use store::format::joined_label;
use store::{LoadStatus, Profile, ProfileDraft, ProfileMode};

use crate::auth::use_client;
use crate::error_banner::ErrorBanner;
use crate::skill_tags::SkillTags;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Field {
    Name,
    Bio,
    Location,
}

/// The signed-in viewer's own profile, viewable and editable in place.
#[component]
pub fn ProfileView() -> Element {
    let client = use_client();
    let mut state = use_signal(|| client.profile.snapshot());
    let mut new_skill = use_signal(String::new);

    let loader = client.profile.clone();
    use_future(move || {
        let controller = loader.clone();
        async move {
            controller.load().await;
            state.set(controller.snapshot());
        }
    });

    let editor = client.profile.clone();
    let set_field = use_callback(move |(field, value): (Field, String)| {
        editor.update_draft(|draft| match field {
            Field::Name => draft.name = value,
            Field::Bio => draft.bio = value,
            Field::Location => draft.location = value,
        });
        state.set(editor.snapshot());
    });

    let adder = client.profile.clone();
    let add_skill = use_callback(move |_: ()| {
        if adder.add_skill(&new_skill()) {
            new_skill.set(String::new());
        }
        state.set(adder.snapshot());
    });

    let remover = client.profile.clone();
    let remove_skill = use_callback(move |skill: String| {
        remover.remove_skill(&skill);
        state.set(remover.snapshot());
    });

    let starter = client.profile.clone();
    let begin_edit = move |_| {
        starter.begin_edit();
        state.set(starter.snapshot());
    };

    let canceller = client.profile.clone();
    let cancel = move |_| {
        canceller.cancel();
        new_skill.set(String::new());
        state.set(canceller.snapshot());
    };

    let saver = client.profile.clone();
    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let controller = saver.clone();
        spawn(async move {
            let pending = controller.save();
            state.set(controller.snapshot());
            pending.await;
            state.set(controller.snapshot());
        });
    };

    let current = state();
    let saving = current.saving;
    let Some(profile) = current.profile else {
        return match current.status {
            LoadStatus::Errored => rsx! {
                div {
                    class: "max-w-2xl mx-auto px-4 py-8",
                    ErrorBanner { message: current.error.unwrap_or_default() }
                }
            },
            _ => rsx! {
                div {
                    class: "flex justify-center py-16",
                    div { class: "h-10 w-10 rounded-full border-4 border-red-600 border-t-transparent animate-spin" }
                }
            },
        };
    };

    let editing = match (current.mode, current.draft) {
        (ProfileMode::Editing, Some(draft)) => Some(draft),
        _ => None,
    };

    rsx! {
        div {
            class: "max-w-2xl mx-auto px-4 py-8 flex flex-col gap-6",
            ProfileHeader { profile: profile.clone() }

            if let Some(message) = current.error {
                ErrorBanner { message }
            }

            if let Some(draft) = editing {
                form {
                    onsubmit: save,
                    class: "bg-zinc-900 border border-zinc-800 rounded-xl p-6 flex flex-col gap-4",

                    label { class: "flex flex-col gap-1 text-sm text-gray-400",
                        "Name"
                        input {
                            class: "bg-black border border-zinc-700 rounded p-2 text-white",
                            r#type: "text",
                            value: draft.name.clone(),
                            oninput: move |evt: FormEvent| set_field.call((Field::Name, evt.value())),
                        }
                    }
                    label { class: "flex flex-col gap-1 text-sm text-gray-400",
                        "Bio"
                        textarea {
                            class: "bg-black border border-zinc-700 rounded p-2 text-white min-h-24",
                            value: draft.bio.clone(),
                            oninput: move |evt: FormEvent| set_field.call((Field::Bio, evt.value())),
                        }
                    }
                    label { class: "flex flex-col gap-1 text-sm text-gray-400",
                        "Location"
                        input {
                            class: "bg-black border border-zinc-700 rounded p-2 text-white",
                            r#type: "text",
                            value: draft.location.clone(),
                            oninput: move |evt: FormEvent| set_field.call((Field::Location, evt.value())),
                        }
                    }

                    SkillEditor { draft: draft.clone(), new_skill, add_skill, remove_skill }

                    div {
                        class: "flex justify-end gap-3",
                        button {
                            r#type: "button",
                            class: "px-4 py-2 rounded bg-zinc-800 text-gray-200 hover:bg-zinc-700",
                            onclick: cancel,
                            "Cancel"
                        }
                        button {
                            r#type: "submit",
                            class: "px-5 py-2 rounded bg-red-600 hover:bg-red-700 text-white font-medium disabled:opacity-50",
                            disabled: saving,
                            if saving { "Saving..." } else { "Save" }
                        }
                    }
                }
            } else {
                div {
                    class: "bg-zinc-900 border border-zinc-800 rounded-xl p-6 flex flex-col gap-4",
                    if let Some(bio) = profile.bio.clone() {
                        p { class: "text-gray-200 whitespace-pre-wrap", "{bio}" }
                    } else {
                        p { class: "text-gray-500 italic", "No bio yet." }
                    }
                    SkillTags { skills: profile.skills.as_slice().to_vec() }
                    button {
                        class: "self-start px-4 py-2 rounded bg-red-600 hover:bg-red-700 text-white font-medium",
                        onclick: begin_edit,
                        "Edit Profile"
                    }
                }
            }
        }
    }
}

#[component]
fn ProfileHeader(profile: Profile) -> Element {
    let initial = profile
        .name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    let joined = joined_label(profile.created_at);

    rsx! {
        div {
            class: "flex items-center gap-5",
            if let Some(url) = profile.avatar_url.clone() {
                img { class: "h-20 w-20 rounded-full object-cover", src: "{url}", alt: "{profile.name}" }
            } else {
                div {
                    class: "h-20 w-20 rounded-full bg-red-700 flex items-center justify-center text-3xl font-bold text-white",
                    "{initial}"
                }
            }
            div {
                h1 { class: "text-2xl font-bold text-white", "{profile.name}" }
                p { class: "text-red-400", "{profile.role}" }
                div {
                    class: "flex gap-4 text-sm text-gray-400",
                    if let Some(location) = profile.location.clone() {
                        span { "📍 {location}" }
                    }
                    span { "{joined}" }
                }
            }
        }
    }
}

#[component]
fn SkillEditor(
    draft: ProfileDraft,
    mut new_skill: Signal<String>,
    add_skill: Callback<()>,
    remove_skill: Callback<String>,
) -> Element {
    rsx! {
        div {
            class: "flex flex-col gap-2 text-sm text-gray-400",
            "Skills"
            SkillTags { skills: draft.skills.as_slice().to_vec(), on_remove: remove_skill }
            div {
                class: "flex gap-2",
                input {
                    class: "flex-1 bg-black border border-zinc-700 rounded p-2 text-white placeholder-gray-500",
                    r#type: "text",
                    placeholder: "Add a skill",
                    value: new_skill(),
                    oninput: move |evt: FormEvent| new_skill.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            evt.prevent_default();
                            add_skill.call(());
                        }
                    },
                }
                button {
                    r#type: "button",
                    class: "px-3 py-2 rounded bg-zinc-800 text-gray-200 hover:bg-zinc-700",
                    onclick: move |_| add_skill.call(()),
                    "Add"
                }
            }
        }
    }
}
