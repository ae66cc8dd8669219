use dioxus::prelude::*;

/// Skills rendered as chips. With `on_remove` each chip gets a remove button.
#[component]
pub fn SkillTags(skills: Vec<String>, on_remove: Option<EventHandler<String>>) -> Element {
    if skills.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "flex flex-wrap gap-2",
            for skill in skills {
                span {
                    key: "{skill}",
                    class: "inline-flex items-center gap-1 px-3 py-1 rounded-full bg-red-600/15 border border-red-600/40 text-red-300 text-xs",
                    "{skill}"
                    if let Some(on_remove) = on_remove {
                        button {
                            class: "ml-1 text-red-400 hover:text-white",
                            title: "Remove {skill}",
                            onclick: {
                                let skill = skill.clone();
                                move |_| on_remove.call(skill.clone())
                            },
                            "×"
                        }
                    }
                }
            }
        }
    }
}
