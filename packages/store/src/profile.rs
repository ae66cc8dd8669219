//! # Profile controller
//!
//! Loads the signed-in user's profile and drives the `Viewing ⇄ Editing` toggle of the
//! profile page. Entering edit mode snapshots the editable fields into a
//! [`ProfileDraft`]; saving sends the whole draft and only leaves edit mode once the
//! gateway confirms it. A second editor's save simply overwrites the first (there is
//! no version check).

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::ClientError;
use crate::feed::LoadStatus;
use crate::gateway::Gateway;
use crate::models::{non_blank, Profile, ProfileUpdate, SkillSet};
use crate::session::SessionStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProfileMode {
    #[default]
    Viewing,
    Editing,
}

/// Mutable copy of the editable profile fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileDraft {
    pub name: String,
    pub bio: String,
    pub location: String,
    pub skills: SkillSet,
}

impl ProfileDraft {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            bio: profile.bio.clone().unwrap_or_default(),
            location: profile.location.clone().unwrap_or_default(),
            skills: profile.skills.clone(),
        }
    }

    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.trim().to_string(),
            bio: non_blank(&self.bio),
            location: non_blank(&self.location),
            skills: self.skills.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileState {
    pub status: LoadStatus,
    pub profile: Option<Profile>,
    pub mode: ProfileMode,
    /// Present only while editing.
    pub draft: Option<ProfileDraft>,
    pub saving: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    view: ProfileState,
    /// Bumped by every load and by `clear`.
    generation: u64,
    /// Bumped by `clear` only.
    epoch: u64,
}

#[derive(Clone, Debug)]
pub struct ProfileController<G> {
    session: SessionStore<G>,
    inner: Arc<Mutex<Inner>>,
}

impl<G: Gateway> ProfileController<G> {
    pub fn new(session: SessionStore<G>) -> Self {
        Self {
            session,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ProfileState {
        self.inner().view.clone()
    }

    pub fn mode(&self) -> ProfileMode {
        self.inner().view.mode
    }

    pub fn profile(&self) -> Option<Profile> {
        self.inner().view.profile.clone()
    }

    pub fn draft(&self) -> Option<ProfileDraft> {
        self.inner().view.draft.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.inner().view.error.clone()
    }

    /// Load the signed-in user's profile. A load overtaken by a newer one or by
    /// [`clear`](Self::clear) is dropped and returns `false`.
    pub async fn load(&self) -> bool {
        let Some(identity) = self.session.identity() else {
            tracing::debug!("Not loading profile while signed out");
            return false;
        };

        let generation = {
            let mut inner = self.inner();
            inner.generation += 1;
            inner.view.status = LoadStatus::Loading;
            inner.generation
        };
        let result = self.session.gateway().read_profile(&identity.id).await;

        let mut inner = self.inner();
        if inner.generation != generation {
            tracing::debug!("Discarding stale profile load #{}", generation);
            return false;
        }
        match result {
            Ok(profile) => {
                inner.view.profile = Some(profile);
                inner.view.status = LoadStatus::Loaded;
                inner.view.error = None;
                true
            }
            Err(e) => {
                tracing::error!("Failed to load profile {}: {}", identity.id, e);
                inner.view.status = LoadStatus::Errored;
                inner.view.error = Some(ClientError::from(e).to_string());
                false
            }
        }
    }

    /// Switch to editing with a snapshot of the current profile.
    ///
    /// Does nothing (and keeps the existing draft) when already editing.
    pub fn begin_edit(&self) -> bool {
        let mut inner = self.inner();
        let state = &mut inner.view;
        if state.mode == ProfileMode::Editing {
            return true;
        }
        let Some(draft) = state.profile.as_ref().map(ProfileDraft::from_profile) else {
            return false;
        };
        state.draft = Some(draft);
        state.mode = ProfileMode::Editing;
        state.error = None;
        true
    }

    /// Apply `edit` to the draft. Returns `false` when not editing.
    pub fn update_draft(&self, edit: impl FnOnce(&mut ProfileDraft)) -> bool {
        match self.inner().view.draft.as_mut() {
            Some(draft) => {
                edit(draft);
                true
            }
            None => false,
        }
    }

    /// Add a skill to the draft; already present or blank skills leave it unchanged.
    pub fn add_skill(&self, skill: &str) -> bool {
        let mut added = false;
        self.update_draft(|d| added = d.skills.add(skill));
        added
    }

    pub fn remove_skill(&self, skill: &str) -> bool {
        let mut removed = false;
        self.update_draft(|d| removed = d.skills.remove(skill));
        removed
    }

    /// Send the draft. On success the result becomes the profile and editing ends; on
    /// failure editing continues with the draft untouched and the error shown verbatim.
    ///
    /// Validation and the `saving` flag are applied when this is called, before the
    /// returned future is polled. A save that completes after [`clear`](Self::clear)
    /// leaves the cleared state alone.
    pub fn save(&self) -> impl Future<Output = bool> + '_ {
        let prepared = self.begin_save();
        async move {
            let Some((user_id, update, epoch)) = prepared else {
                return false;
            };
            let result = self.session.gateway().update_profile(&user_id, &update).await;

            let mut inner = self.inner();
            if inner.epoch != epoch {
                tracing::debug!("Profile save for {} finished after clear", user_id);
                return result.is_ok();
            }
            let state = &mut inner.view;
            state.saving = false;
            match result {
                Ok(profile) => {
                    tracing::info!("Saved profile {}", profile.id);
                    state.profile = Some(profile);
                    state.mode = ProfileMode::Viewing;
                    state.draft = None;
                    state.error = None;
                    true
                }
                Err(e) => {
                    tracing::error!("Failed to save profile {}: {}", user_id, e);
                    state.error = Some(ClientError::from(e).to_string());
                    false
                }
            }
        }
    }

    fn begin_save(&self) -> Option<(String, ProfileUpdate, u64)> {
        let Some(identity) = self.session.identity() else {
            self.inner().view.error = Some("Sign in to edit your profile".to_string());
            return None;
        };
        let mut inner = self.inner();
        let update = inner.view.draft.as_ref()?.to_update();
        if update.name.is_empty() {
            let err = ClientError::Validation("Name is required".to_string());
            inner.view.error = Some(err.to_string());
            return None;
        }
        inner.view.saving = true;
        Some((identity.id, update, inner.epoch))
    }

    /// Drop the draft and return to viewing. No remote call.
    pub fn cancel(&self) {
        let mut inner = self.inner();
        let state = &mut inner.view;
        state.draft = None;
        state.mode = ProfileMode::Viewing;
        state.error = None;
    }

    /// Forget the loaded profile, e.g. after logout. Loads and saves still in flight
    /// are discarded when they complete.
    pub fn clear(&self) {
        let mut inner = self.inner();
        *inner = Inner {
            generation: inner.generation + 1,
            epoch: inner.epoch + 1,
            ..Inner::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, GatedGateway};
    use crate::MemoryGateway;

    async fn signed_in() -> (MemoryGateway, ProfileController<MemoryGateway>) {
        let gateway = MemoryGateway::new();
        gateway.seed_account("Alex Rodriguez", "a@b.com", "x", "Director");
        let session = SessionStore::new(gateway.clone());
        assert!(session.login("a@b.com", "x").await);
        (gateway, ProfileController::new(session))
    }

    #[tokio::test]
    async fn test_load_profile() {
        let (_gateway, profile) = signed_in().await;
        assert!(profile.load().await);
        let state = profile.snapshot();
        assert_eq!(state.status, LoadStatus::Loaded);
        assert_eq!(state.profile.unwrap().role, "Director");
        assert_eq!(state.mode, ProfileMode::Viewing);
    }

    #[tokio::test]
    async fn test_begin_edit_requires_profile() {
        let (_gateway, profile) = signed_in().await;
        assert!(!profile.begin_edit());
        assert_eq!(profile.mode(), ProfileMode::Viewing);
    }

    #[tokio::test]
    async fn test_edit_and_save() {
        let (gateway, profile) = signed_in().await;
        profile.load().await;

        assert!(profile.begin_edit());
        assert_eq!(profile.draft().unwrap().name, "Alex Rodriguez");
        profile.update_draft(|d| {
            d.bio = "Music videos and shorts.".to_string();
            d.location = "Mumbai, India".to_string();
        });
        assert!(profile.add_skill("Direction"));
        assert!(profile.add_skill("Editing"));

        assert!(profile.save().await);
        assert_eq!(profile.mode(), ProfileMode::Viewing);
        assert!(profile.draft().is_none());

        let saved = profile.profile().unwrap();
        assert_eq!(saved.bio.as_deref(), Some("Music videos and shorts."));
        assert_eq!(saved.skills.as_slice(), ["Direction", "Editing"]);
        let stored = gateway.read_profile(&saved.id).await.unwrap();
        assert_eq!(stored, saved);
    }

    #[tokio::test]
    async fn test_skill_add_and_remove_are_idempotent() {
        let (_gateway, profile) = signed_in().await;
        profile.load().await;
        profile.begin_edit();

        assert!(profile.add_skill("Storytelling"));
        assert!(!profile.add_skill("Storytelling"));
        assert!(!profile.remove_skill("Lighting"));
        assert_eq!(profile.draft().unwrap().skills.as_slice(), ["Storytelling"]);
    }

    #[tokio::test]
    async fn test_failed_save_stays_editing() {
        let (gateway, profile) = signed_in().await;
        profile.load().await;
        profile.begin_edit();
        profile.update_draft(|d| d.name = "J. Doe".to_string());
        gateway.set_offline(true);

        assert!(!profile.save().await);
        assert_eq!(profile.mode(), ProfileMode::Editing);
        assert_eq!(profile.draft().unwrap().name, "J. Doe");
        assert_eq!(profile.error().as_deref(), Some("Network error: gateway offline"));
        assert_eq!(profile.profile().unwrap().name, "Alex Rodriguez");
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_locally() {
        let (gateway, profile) = signed_in().await;
        profile.load().await;
        profile.begin_edit();
        profile.update_draft(|d| d.name = "   ".to_string());
        let writes = gateway.write_count();

        assert!(!profile.save().await);
        assert_eq!(gateway.write_count(), writes);
        assert_eq!(profile.mode(), ProfileMode::Editing);
        assert_eq!(profile.error().as_deref(), Some("Name is required"));
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let (gateway, profile) = signed_in().await;
        profile.load().await;
        profile.begin_edit();
        profile.update_draft(|d| d.name = "Someone Else".to_string());
        let calls = gateway.call_count();

        profile.cancel();
        assert_eq!(profile.mode(), ProfileMode::Viewing);
        assert!(profile.draft().is_none());
        assert_eq!(profile.profile().unwrap().name, "Alex Rodriguez");
        assert_eq!(gateway.call_count(), calls);
        assert!(!profile.update_draft(|d| d.name.clear()));
    }

    async fn gated_signed_in() -> (GatedGateway, SessionStore<GatedGateway>, ProfileController<GatedGateway>) {
        let gateway = GatedGateway::default();
        gateway.inner.seed_account("Alex Rodriguez", "a@b.com", "x", "Director");
        let session = SessionStore::new(gateway.clone());
        assert!(session.login("a@b.com", "x").await);
        let profile = ProfileController::new(session.clone());
        (gateway, session, profile)
    }

    #[tokio::test]
    async fn test_load_finished_after_clear_is_dropped() {
        let (gateway, session, profile) = gated_signed_in().await;
        let release = gateway.arm(Call::ReadProfile);

        let load = profile.load();
        let logout = async {
            session.logout();
            profile.clear();
            let _ = release.send(());
        };
        let (loaded, ()) = tokio::join!(load, logout);

        assert!(!loaded);
        assert!(!session.is_authenticated());
        assert_eq!(profile.snapshot(), ProfileState::default());
    }

    #[tokio::test]
    async fn test_save_finished_after_clear_is_dropped() {
        let (gateway, session, profile) = gated_signed_in().await;
        assert!(profile.load().await);
        let id = profile.profile().unwrap().id;
        profile.begin_edit();
        profile.update_draft(|d| d.name = "Alex R.".to_string());
        let release = gateway.arm(Call::UpdateProfile);

        let save = profile.save();
        assert!(profile.snapshot().saving);
        let logout = async {
            session.logout();
            profile.clear();
            let _ = release.send(());
        };
        let (saved, ()) = tokio::join!(save, logout);

        assert!(saved);
        assert_eq!(profile.snapshot(), ProfileState::default());
        assert_eq!(gateway.inner.read_profile(&id).await.unwrap().name, "Alex R.");
    }

    #[tokio::test]
    async fn test_stale_profile_load_is_discarded() {
        let (gateway, _session, profile) = gated_signed_in().await;
        assert!(profile.load().await);
        let id = profile.profile().unwrap().id;
        let release = gateway.arm(Call::ReadProfile);

        let slow = profile.load();
        let fast = async {
            let update = ProfileUpdate {
                name: "Alex R.".to_string(),
                bio: None,
                location: None,
                skills: SkillSet::new(),
            };
            gateway.inner.update_profile(&id, &update).await.unwrap();
            let loaded = profile.load().await;
            let _ = release.send(());
            loaded
        };
        let (slow_applied, fast_applied) = tokio::join!(slow, fast);

        assert!(!slow_applied);
        assert!(fast_applied);
        assert_eq!(profile.profile().unwrap().name, "Alex R.");
        assert_eq!(profile.snapshot().status, LoadStatus::Loaded);
    }
}
