use chrono::Utc;
use dioxus::prelude::*;
use store::format::time_ago;
use store::{Post, PostKind};

use crate::skill_tags::SkillTags;

fn kind_badge(kind: PostKind) -> &'static str {
    match kind {
        PostKind::Job => "bg-red-600 text-white",
        PostKind::Collaboration => "bg-amber-500 text-black",
        PostKind::Showcase => "bg-purple-600 text-white",
    }
}

/// One feed entry. `on_like` receives the post id.
#[component]
pub fn PostCard(post: Post, on_like: EventHandler<String>) -> Element {
    let initial = post
        .author
        .name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    let posted = time_ago(post.created_at, Utc::now());
    let heart = if post.viewer_has_liked {
        "text-red-500"
    } else {
        "text-gray-400 hover:text-red-400"
    };
    let badge = kind_badge(post.kind);
    let label = post.kind.label();
    let post_id = post.id.clone();

    rsx! {
        article {
            class: "bg-zinc-900 border border-zinc-800 rounded-xl p-5 flex flex-col gap-4",
            header {
                class: "flex items-start gap-3",
                if let Some(url) = post.author.avatar_url.clone() {
                    img { class: "h-11 w-11 rounded-full object-cover", src: "{url}", alt: "{post.author.name}" }
                } else {
                    div {
                        class: "h-11 w-11 rounded-full bg-red-700 flex items-center justify-center font-bold text-white",
                        "{initial}"
                    }
                }
                div {
                    class: "flex-1",
                    p { class: "font-semibold text-white", "{post.author.name}" }
                    p { class: "text-xs text-gray-400", "{post.author.role} · {posted}" }
                }
                span {
                    class: "px-2 py-0.5 rounded text-xs font-medium {badge}",
                    "{label}"
                }
            }

            p { class: "text-gray-200 whitespace-pre-wrap", "{post.content}" }

            div {
                class: "flex flex-wrap items-center gap-3 text-xs text-gray-400",
                if let Some(location) = post.location.clone() {
                    span { "📍 {location}" }
                }
                if post.is_paid {
                    span { class: "px-2 py-0.5 rounded bg-green-700/30 text-green-300", "Paid" }
                }
            }

            SkillTags { skills: post.required_skills.clone() }

            footer {
                class: "flex items-center gap-6 pt-3 border-t border-zinc-800 text-sm",
                button {
                    class: "flex items-center gap-1.5 {heart}",
                    onclick: move |_| on_like.call(post_id.clone()),
                    if post.viewer_has_liked { "♥" } else { "♡" }
                    span { "{post.like_count}" }
                }
                span { class: "flex items-center gap-1.5 text-gray-400", "💬 {post.comment_count}" }
            }
        }
    }
}
