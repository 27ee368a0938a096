//! Profile Screen Controller Module
//!
//! Turns user intents (save, select, remove, new photo) into photo store
//! calls and recomputes the display state from the store afterwards. The
//! controller never patches the display state incrementally: every applied
//! intent re-reads the store and reconciles from scratch.
//!
//! Failed intents leave the display state untouched and come back as an
//! error `Notice`. Saving is all-or-nothing: if the photo was added but could
//! not be made current, the addition is rolled back.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::capture::{Confirmation, PhotoSource, RemovalConfirmer};
use crate::core::error::{ProfileError, Result};
use crate::core::reconcile::{reconcile, DisplayState};
use crate::store::{PhotoReference, PhotoStore};
use crate::ui::events::{Notice, NoticeLevel, ProfileRoute, ScreenEvent};

// =============================================================================
// Screen Controller
// =============================================================================

/// Controller behind the profile photo screen
///
/// The store is injected by whoever composes the screen; several
/// controllers can share one store or each own an independent one.
/// Intents take `&mut self`, so two intents never interleave.
pub struct ScreenController {
    /// Injected photo store
    store: Arc<dyn PhotoStore>,
    /// Candidate delivered by the camera or the picker
    incoming: Option<PhotoReference>,
    /// Last computed display state
    display: DisplayState,
    /// Saved photos as of the last reconciliation
    photos: Vec<PhotoReference>,
    /// Removal waiting for confirmation
    pending_removal: Option<PhotoReference>,
    /// Event sender (for internal use)
    event_tx: Sender<ScreenEvent>,
    /// Event receiver for the view
    event_rx: Receiver<ScreenEvent>,
}

impl ScreenController {
    /// Create a controller over the given store
    ///
    /// The display starts empty; call [`open`](Self::open) or
    /// [`refresh`](Self::refresh) to load the store contents.
    pub fn new(store: Arc<dyn PhotoStore>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        Self {
            store,
            incoming: None,
            display: DisplayState::default(),
            photos: Vec::new(),
            pending_removal: None,
            event_tx,
            event_rx,
        }
    }

    /// Get the injected store
    pub fn store(&self) -> &Arc<dyn PhotoStore> {
        &self.store
    }

    /// Get the current display state
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Saved photos as of the last reconciliation
    pub fn photos(&self) -> &[PhotoReference] {
        &self.photos
    }

    /// The incoming candidate, if one is being shown or was handed in
    pub fn incoming(&self) -> Option<&PhotoReference> {
        self.incoming.as_ref()
    }

    /// Removal waiting for confirmation
    pub fn pending_removal(&self) -> Option<&PhotoReference> {
        self.pending_removal.as_ref()
    }

    /// Whether the save action currently applies
    pub fn can_save(&self) -> bool {
        self.display.show_save_action
    }

    /// Whether the delete action currently applies
    pub fn can_delete(&self) -> bool {
        self.display.show_delete_action
    }

    /// Try to receive the next event (non-blocking)
    pub fn try_recv_event(&self) -> Option<ScreenEvent> {
        match self.event_rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain all pending events
    pub fn drain_events(&self) -> Vec<ScreenEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv_event() {
            events.push(event);
        }
        events
    }

    // -------------------------------------------------------------------------
    // Intents
    // -------------------------------------------------------------------------

    /// Open the screen with the given route payload
    pub async fn open(&mut self, route: ProfileRoute) -> Notice {
        match route.photo_ref {
            Some(photo) => self.receive_candidate(photo).await,
            None => {
                self.incoming = None;
                self.refresh().await
            }
        }
    }

    /// Re-read the store and reconcile
    pub async fn refresh(&mut self) -> Notice {
        match self.reload().await {
            Ok(()) => self.finish(Notice::info(
                "Loaded",
                format!("{} saved photo(s).", self.photos.len()),
            )),
            Err(e) => self.finish(Notice::failure("Could not load photos", e)),
        }
    }

    /// A new photo arrived from the camera or the picker
    pub async fn receive_candidate(&mut self, photo: PhotoReference) -> Notice {
        let previous = self.incoming.replace(photo);

        if let Err(e) = self.reload().await {
            self.incoming = previous;
            return self.finish(Notice::failure("Could not load photos", e));
        }

        if self.display.is_unsaved {
            self.finish(Notice::info(
                "New photo",
                "Save this photo to add it to your collection.",
            ))
        } else {
            self.finish(Notice::info(
                "New photo",
                "This photo is already in your collection.",
            ))
        }
    }

    /// Ask a capture/pick collaborator for a new photo
    ///
    /// A cancelled capture changes nothing. A failed one is reported before
    /// any state is touched.
    pub async fn pick_new(&mut self, source: &dyn PhotoSource) -> Notice {
        debug!("Requesting a photo from {}", source.source_name());

        match source.acquire().await {
            Ok(Some(photo)) => self.receive_candidate(photo).await,
            Ok(None) => self.finish(Notice::info("Cancelled", "No photo was chosen.")),
            Err(e) => self.finish(Notice::failure("Could not get a photo", e)),
        }
    }

    /// Save the unsaved candidate and make it the current photo
    pub async fn save(&mut self) -> Notice {
        let candidate = match self.incoming.clone() {
            Some(candidate) if self.display.show_save_action => candidate,
            _ => {
                return self.finish(Notice::info(
                    "Nothing to save",
                    "There is no new photo waiting to be saved.",
                ))
            }
        };

        if let Err(e) = self.store.add_photo(&candidate).await {
            return self.finish(Notice::failure("Save failed", e));
        }

        if let Err(e) = self.store.set_current_photo(&candidate).await {
            warn!(
                "Photo {} was added but could not be made current: {}. Rolling back.",
                candidate, e
            );
            if let Err(rollback) = self.store.remove_photo(&candidate).await {
                warn!("Rollback of {} failed: {}", candidate, rollback);
            }
            if let Err(reload) = self.reload().await {
                warn!("Could not reload photos after failed save: {}", reload);
            }
            return self.finish(Notice::failure("Save failed", e));
        }

        self.incoming = None;
        if let Err(e) = self.reload().await {
            return self.finish(Notice::failure("Could not load photos", e));
        }

        info!("Saved photo {} as current", candidate);
        self.finish(Notice::success("Saved", "Photo added to your collection."))
    }

    /// Make a saved photo the current one
    pub async fn select(&mut self, photo: &PhotoReference) -> Notice {
        let photos = match self.store.load_all_photos().await {
            Ok(photos) => photos,
            Err(e) => return self.finish(Notice::failure("Could not select photo", e)),
        };

        if !photos.contains(photo) {
            return self.not_found(photo);
        }

        if let Err(e) = self.store.set_current_photo(photo).await {
            return self.finish(Notice::failure("Could not select photo", e));
        }

        self.incoming = None;
        if let Err(e) = self.reload().await {
            return self.finish(Notice::failure("Could not load photos", e));
        }

        info!("Selected photo {} as current", photo);
        self.finish(Notice::success("Selected", "This is now your current photo."))
    }

    /// First step of removal: record the request and ask for confirmation
    pub fn request_removal(&mut self, photo: PhotoReference) {
        if let Some(previous) = self.pending_removal.replace(photo.clone()) {
            debug!("Replacing pending removal of {} with {}", previous, photo);
        }
        self.emit(ScreenEvent::ConfirmationRequested { photo });
    }

    /// Second step of removal: execute or discard the pending request
    pub async fn resolve_removal(&mut self, decision: Confirmation) -> Notice {
        let Some(photo) = self.pending_removal.take() else {
            return self.finish(Notice::info(
                "Nothing to remove",
                "No removal is waiting for confirmation.",
            ));
        };

        match decision {
            Confirmation::Confirmed => self.execute_removal(photo).await,
            Confirmation::Cancelled => {
                debug!("Removal of {} cancelled", photo);
                self.finish(Notice::info("Cancelled", "The photo was kept."))
            }
        }
    }

    /// Remove a photo after asking the given confirmer
    pub async fn remove_with(
        &mut self,
        photo: PhotoReference,
        confirmer: &dyn RemovalConfirmer,
    ) -> Notice {
        self.request_removal(photo.clone());

        match confirmer.confirm(&photo) {
            Ok(decision) => self.resolve_removal(decision).await,
            Err(e) => {
                self.pending_removal = None;
                self.finish(Notice::failure("Could not remove photo", e))
            }
        }
    }

    /// Remove the photo in the main frame after asking the given confirmer
    pub async fn remove_shown(&mut self, confirmer: &dyn RemovalConfirmer) -> Notice {
        match self.display.shown_photo.clone() {
            Some(photo) => self.remove_with(photo, confirmer).await,
            None => self.finish(Notice::info("Nothing to remove", "No photo is shown.")),
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Remove a confirmed photo and bring the screen back in line with the store
    ///
    /// Removing the unsaved candidate writes nothing: the candidate is dropped
    /// and the screen falls back to the stored current photo, then to the first
    /// saved one. Removing the shown saved photo reselects the first remaining
    /// photo, or clears the current pointer when none is left.
    async fn execute_removal(&mut self, photo: PhotoReference) -> Notice {
        let saved = match self.store.load_all_photos().await {
            Ok(photos) => photos,
            Err(e) => return self.finish(Notice::failure("Could not remove photo", e)),
        };

        let is_saved = saved.contains(&photo);
        let is_candidate = self.incoming.as_ref() == Some(&photo);
        if !is_saved && !is_candidate {
            return self.not_found(&photo);
        }

        let was_shown = self.display.shown_photo.as_ref() == Some(&photo);

        if is_saved {
            if let Err(e) = self.store.remove_photo(&photo).await {
                return self.finish(Notice::failure("Could not remove photo", e));
            }
        }

        if is_candidate {
            self.incoming = None;
        }

        if is_saved && was_shown {
            if let Err(e) = self.reselect_after_removal().await {
                // The photo is already gone from the store.
                if let Err(reload) = self.reload().await {
                    warn!("Could not reload photos after failed reselect: {}", reload);
                }
                return self.finish(Notice::failure("Could not remove photo", e));
            }
        }

        if let Err(e) = self.reload().await {
            return self.finish(Notice::failure("Could not load photos", e));
        }

        info!("Removed photo {}", photo);
        self.finish(Notice::success("Removed", "Photo removed."))
    }

    /// Point the current photo at the first remaining one, or at nothing
    async fn reselect_after_removal(&self) -> Result<()> {
        let remaining = self.store.load_all_photos().await?;
        match remaining.first() {
            Some(first) => {
                debug!("Reselecting {} after removal", first);
                self.store.set_current_photo(first).await
            }
            None => {
                debug!("Collection is empty after removal, clearing current photo");
                self.store.clear_current_photo().await
            }
        }
    }

    /// Read the store and reconcile from scratch
    async fn reload(&mut self) -> Result<()> {
        let photos = self.store.load_all_photos().await?;
        let current = self.store.load_current_photo().await?;

        self.display = reconcile(&photos, current.as_ref(), self.incoming.as_ref());
        self.photos = photos;

        debug!("Display state: {:?}", self.display);
        self.emit(ScreenEvent::DisplayChanged {
            display: self.display.clone(),
            photos: self.photos.clone(),
        });
        Ok(())
    }

    fn not_found(&mut self, photo: &PhotoReference) -> Notice {
        let error = ProfileError::NotFound(photo.clone());
        debug!("{}", error);
        self.finish(Notice::info("Not found", error.user_message()))
    }

    fn finish(&mut self, notice: Notice) -> Notice {
        match notice.level {
            NoticeLevel::Error => warn!("{}", notice),
            _ => debug!("{}", notice),
        }
        self.emit(ScreenEvent::Notice(notice.clone()));
        notice
    }

    fn emit(&self, event: ScreenEvent) {
        let _ = self.event_tx.send(event);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::AutoConfirmer;
    use crate::store::InMemoryPhotoStore;
    use crate::testdb::{MockPhotoStore, ScriptedConfirmer, ScriptedPhotoSource, StoreOperation};

    fn refs(names: &[&str]) -> Vec<PhotoReference> {
        names.iter().map(|n| PhotoReference::from(*n)).collect()
    }

    fn controller_with(photos: &[&str], current: Option<&str>) -> ScreenController {
        let store = InMemoryPhotoStore::with_photos(refs(photos), current.map(PhotoReference::from));
        ScreenController::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_open_empty_store_with_candidate() {
        let mut controller = controller_with(&[], None);
        controller
            .open(ProfileRoute::with_photo("img1".into()))
            .await;

        assert_eq!(
            controller.display(),
            &DisplayState {
                shown_photo: Some("img1".into()),
                is_unsaved: true,
                show_save_action: true,
                show_delete_action: false,
            }
        );
    }

    #[tokio::test]
    async fn test_open_shows_current_photo() {
        let mut controller = controller_with(&["img1", "img2"], Some("img2"));
        let notice = controller.open(ProfileRoute::default()).await;

        assert!(!notice.is_error());
        assert_eq!(controller.display().shown_photo, Some("img2".into()));
        assert!(controller.can_delete());
        assert!(!controller.can_save());
        assert_eq!(controller.photos(), refs(&["img1", "img2"]).as_slice());
    }

    #[tokio::test]
    async fn test_save_promotes_candidate() {
        let mut controller = controller_with(&["img1"], None);
        controller.receive_candidate("img3".into()).await;
        assert!(controller.can_save());

        let notice = controller.save().await;

        assert!(notice.is_success());
        let store = controller.store().clone();
        assert_eq!(store.load_all_photos().await.unwrap(), refs(&["img1", "img3"]));
        assert_eq!(store.load_current_photo().await.unwrap(), Some("img3".into()));
        assert!(!controller.display().is_unsaved);
        assert!(!controller.can_save());
        assert!(controller.can_delete());
        assert_eq!(controller.incoming(), None);
    }

    #[tokio::test]
    async fn test_save_without_candidate_is_noop() {
        let mut controller = controller_with(&["img1"], Some("img1"));
        controller.refresh().await;

        let notice = controller.save().await;

        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(
            controller.store().load_all_photos().await.unwrap(),
            refs(&["img1"])
        );
    }

    #[tokio::test]
    async fn test_select_clears_candidate() {
        let mut controller = controller_with(&["img1", "img2"], Some("img1"));
        controller.receive_candidate("new".into()).await;

        let notice = controller.select(&"img2".into()).await;

        assert!(notice.is_success());
        assert_eq!(controller.incoming(), None);
        assert_eq!(controller.display().shown_photo, Some("img2".into()));
        assert!(!controller.display().is_unsaved);
        assert_eq!(
            controller.store().load_current_photo().await.unwrap(),
            Some("img2".into())
        );
    }

    #[tokio::test]
    async fn test_select_missing_photo_is_noop() {
        let mut controller = controller_with(&["img1"], Some("img1"));
        controller.refresh().await;

        let notice = controller.select(&"gone".into()).await;

        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.title, "Not found");
        assert_eq!(
            controller.store().load_current_photo().await.unwrap(),
            Some("img1".into())
        );
    }

    #[tokio::test]
    async fn test_remove_shown_reselects_first() {
        let mut controller = controller_with(&["img1", "img2"], Some("img2"));
        controller.refresh().await;

        let notice = controller.remove_with("img2".into(), &AutoConfirmer).await;

        assert!(notice.is_success());
        let store = controller.store().clone();
        assert_eq!(store.load_all_photos().await.unwrap(), refs(&["img1"]));
        assert_eq!(store.load_current_photo().await.unwrap(), Some("img1".into()));
        assert_eq!(controller.display().shown_photo, Some("img1".into()));
    }

    #[tokio::test]
    async fn test_remove_last_photo_clears_current() {
        let mut controller = controller_with(&["img1"], Some("img1"));
        controller.refresh().await;

        controller.remove_shown(&AutoConfirmer).await;

        assert_eq!(controller.store().load_current_photo().await.unwrap(), None);
        assert_eq!(controller.display(), &DisplayState::default());
    }

    #[tokio::test]
    async fn test_remove_not_shown_keeps_current() {
        let mut controller = controller_with(&["img1", "img2", "img3"], Some("img2"));
        controller.refresh().await;

        controller.remove_with("img3".into(), &AutoConfirmer).await;

        assert_eq!(
            controller.store().load_current_photo().await.unwrap(),
            Some("img2".into())
        );
        assert_eq!(controller.display().shown_photo, Some("img2".into()));
        assert_eq!(controller.photos(), refs(&["img1", "img2"]).as_slice());
    }

    #[tokio::test]
    async fn test_cancelled_removal_changes_nothing() {
        let mut controller = controller_with(&["img1"], Some("img1"));
        controller.refresh().await;

        let confirmer = ScriptedConfirmer::new(vec![Confirmation::Cancelled]);
        let notice = controller.remove_with("img1".into(), &confirmer).await;

        assert_eq!(notice.title, "Cancelled");
        assert_eq!(
            controller.store().load_all_photos().await.unwrap(),
            refs(&["img1"])
        );
        assert_eq!(controller.pending_removal(), None);
        assert_eq!(confirmer.asked(), refs(&["img1"]));
    }

    #[tokio::test]
    async fn test_two_step_removal_emits_confirmation_request() {
        let mut controller = controller_with(&["img1", "img2"], Some("img1"));
        controller.refresh().await;
        controller.drain_events();

        controller.request_removal("img2".into());
        assert_eq!(controller.pending_removal(), Some(&"img2".into()));
        assert_eq!(
            controller.try_recv_event(),
            Some(ScreenEvent::ConfirmationRequested {
                photo: "img2".into()
            })
        );
        // Nothing is removed until the request is resolved.
        assert_eq!(
            controller.store().load_all_photos().await.unwrap(),
            refs(&["img1", "img2"])
        );

        controller.resolve_removal(Confirmation::Confirmed).await;
        assert_eq!(
            controller.store().load_all_photos().await.unwrap(),
            refs(&["img1"])
        );
    }

    #[tokio::test]
    async fn test_resolve_without_request() {
        let mut controller = controller_with(&["img1"], None);
        let notice = controller.resolve_removal(Confirmation::Confirmed).await;
        assert_eq!(notice.title, "Nothing to remove");
    }

    #[tokio::test]
    async fn test_removing_candidate_clears_unsaved() {
        let mut controller = controller_with(&["img1"], Some("img1"));
        controller.receive_candidate("new".into()).await;
        assert!(controller.display().is_unsaved);

        let notice = controller.remove_with("new".into(), &AutoConfirmer).await;

        assert!(notice.is_success());
        assert_eq!(controller.incoming(), None);
        assert!(!controller.display().is_unsaved);
        assert_eq!(controller.display().shown_photo, Some("img1".into()));
        assert_eq!(
            controller.store().load_current_photo().await.unwrap(),
            Some("img1".into())
        );
    }

    #[tokio::test]
    async fn test_removing_candidate_writes_nothing() {
        let store = Arc::new(MockPhotoStore::with_photos(
            refs(&["img1", "img2"]),
            Some("img2".into()),
        ));
        let mut controller = ScreenController::new(store.clone());
        controller.receive_candidate("new".into()).await;
        store.clear_operations();

        let notice = controller.remove_with("new".into(), &AutoConfirmer).await;

        assert!(notice.is_success());
        assert!(!store.operations().iter().any(|op| op.is_mutation()));
        assert_eq!(controller.display().shown_photo, Some("img2".into()));
        assert_eq!(store.load_current_photo().await.unwrap(), Some("img2".into()));
    }

    #[tokio::test]
    async fn test_removing_saved_candidate_clears_it() {
        let mut controller = controller_with(&["img1", "img2"], Some("img1"));
        controller.receive_candidate("img2".into()).await;
        assert!(controller.can_delete());

        controller.remove_shown(&AutoConfirmer).await;

        assert_eq!(controller.incoming(), None);
        assert_eq!(
            controller.store().load_all_photos().await.unwrap(),
            refs(&["img1"])
        );
        assert_eq!(controller.display().shown_photo, Some("img1".into()));
    }

    #[tokio::test]
    async fn test_remove_missing_photo_is_noop() {
        let mut controller = controller_with(&["img1"], Some("img1"));
        controller.refresh().await;

        let notice = controller.remove_with("ghost".into(), &AutoConfirmer).await;

        assert_eq!(notice.title, "Not found");
        assert_eq!(
            controller.store().load_all_photos().await.unwrap(),
            refs(&["img1"])
        );
    }

    #[tokio::test]
    async fn test_cancelled_pick_changes_nothing() {
        let mut controller = controller_with(&["img1"], Some("img1"));
        controller.refresh().await;
        let before = controller.display().clone();

        let source = ScriptedPhotoSource::new(vec![Ok(None)]);
        let notice = controller.pick_new(&source).await;

        assert_eq!(notice.title, "Cancelled");
        assert_eq!(controller.display(), &before);
        assert_eq!(controller.incoming(), None);
    }

    #[tokio::test]
    async fn test_permission_denied_pick_is_reported() {
        let store = Arc::new(MockPhotoStore::new());
        let mut controller = ScreenController::new(store.clone());
        controller.refresh().await;
        store.clear_operations();

        let source = ScriptedPhotoSource::new(vec![Err(ProfileError::PermissionDenied(
            "gallery".into(),
        ))]);
        let notice = controller.pick_new(&source).await;

        assert!(notice.is_error());
        assert!(matches!(
            notice.error,
            Some(ProfileError::PermissionDenied(_))
        ));
        assert!(store.operations().is_empty());
    }

    #[tokio::test]
    async fn test_pick_new_shows_candidate() {
        let mut controller = controller_with(&["img1"], Some("img1"));
        let source = ScriptedPhotoSource::new(vec![Ok(Some("fresh".into()))]);

        controller.pick_new(&source).await;

        assert_eq!(controller.display().shown_photo, Some("fresh".into()));
        assert!(controller.can_save());
    }

    #[tokio::test]
    async fn test_save_rolls_back_when_set_current_fails() {
        let store = Arc::new(MockPhotoStore::with_photos(refs(&["img1"]), Some("img1".into())));
        let mut controller = ScreenController::new(store.clone());
        controller.receive_candidate("img3".into()).await;
        let before = controller.display().clone();

        store.fail_on(StoreOperation::SetCurrent, true);
        let notice = controller.save().await;

        assert!(notice.is_error());
        assert!(notice.is_retryable());
        store.fail_on(StoreOperation::SetCurrent, false);
        assert_eq!(store.load_all_photos().await.unwrap(), refs(&["img1"]));
        assert_eq!(store.load_current_photo().await.unwrap(), Some("img1".into()));
        assert_eq!(controller.display(), &before);
        assert!(controller.can_save());
    }

    #[tokio::test]
    async fn test_failed_add_leaves_display_unchanged() {
        let store = Arc::new(MockPhotoStore::new());
        let mut controller = ScreenController::new(store.clone());
        controller.receive_candidate("img1".into()).await;
        let before = controller.display().clone();

        store.fail_on(StoreOperation::Add, true);
        let notice = controller.save().await;

        assert!(notice.is_error());
        assert_eq!(controller.display(), &before);
        assert_eq!(controller.incoming(), Some(&"img1".into()));
    }

    #[tokio::test]
    async fn test_unavailable_store_on_refresh() {
        let store = Arc::new(MockPhotoStore::with_photos(refs(&["img1"]), None));
        let mut controller = ScreenController::new(store.clone());
        controller.refresh().await;
        let before = controller.display().clone();

        store.set_unavailable(true);
        let notice = controller.receive_candidate("img2".into()).await;

        assert!(notice.is_error());
        assert_eq!(controller.display(), &before);
        assert_eq!(controller.incoming(), None);
    }

    #[tokio::test]
    async fn test_failed_remove_leaves_display_unchanged() {
        let store = Arc::new(MockPhotoStore::with_photos(refs(&["img1"]), Some("img1".into())));
        let mut controller = ScreenController::new(store.clone());
        controller.refresh().await;
        let before = controller.display().clone();

        store.fail_on(StoreOperation::Remove, true);
        let notice = controller.remove_with("img1".into(), &AutoConfirmer).await;

        assert!(notice.is_error());
        assert_eq!(controller.display(), &before);
    }

    #[tokio::test]
    async fn test_failed_reselect_still_reflects_removal() {
        let store = Arc::new(MockPhotoStore::with_photos(
            refs(&["img1", "img2"]),
            Some("img2".into()),
        ));
        let mut controller = ScreenController::new(store.clone());
        controller.refresh().await;
        assert_eq!(controller.display().shown_photo, Some("img2".into()));

        store.fail_on(StoreOperation::SetCurrent, true);
        let notice = controller.remove_with("img2".into(), &AutoConfirmer).await;

        assert!(notice.is_error());
        store.fail_on(StoreOperation::SetCurrent, false);
        assert_eq!(store.load_all_photos().await.unwrap(), refs(&["img1"]));
        assert_eq!(store.load_current_photo().await.unwrap(), None);
        let display = controller.display();
        assert_eq!(display.shown_photo, Some("img1".into()));
        assert!(display.show_delete_action);
        assert!(!display.is_unsaved);
    }

    #[tokio::test]
    async fn test_save_issues_add_then_set_current() {
        let store = Arc::new(MockPhotoStore::new());
        let mut controller = ScreenController::new(store.clone());
        controller.receive_candidate("img1".into()).await;
        store.clear_operations();

        controller.save().await;

        let mutations: Vec<_> = store
            .operations()
            .into_iter()
            .filter(|op| op.is_mutation())
            .collect();
        assert_eq!(
            mutations,
            vec![StoreOperation::Add, StoreOperation::SetCurrent]
        );
    }

    #[tokio::test]
    async fn test_events_follow_intents() {
        let mut controller = controller_with(&[], None);
        controller.receive_candidate("img1".into()).await;

        let events = controller.drain_events();
        assert!(matches!(
            events.first(),
            Some(ScreenEvent::DisplayChanged { .. })
        ));
        assert!(matches!(events.last(), Some(ScreenEvent::Notice(_))));
        assert!(controller.try_recv_event().is_none());
    }

    #[tokio::test]
    async fn test_controllers_sharing_a_store_see_each_other() {
        let store: Arc<dyn PhotoStore> = Arc::new(InMemoryPhotoStore::new());
        let mut camera_flow = ScreenController::new(store.clone());
        let mut profile_tab = ScreenController::new(store);

        camera_flow.receive_candidate("img1".into()).await;
        camera_flow.save().await;
        profile_tab.refresh().await;

        assert_eq!(profile_tab.display().shown_photo, Some("img1".into()));
        assert!(profile_tab.can_delete());
    }
}
