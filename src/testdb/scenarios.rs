//! Predefined test scenarios for the profile photo screen
//!
//! Each scenario seeds a store, plays a sequence of intents through a
//! screen controller and states what the store and the display must look
//! like afterwards.

use super::mock_store::StoreOperation;
use crate::capture::Confirmation;
use crate::core::reconcile::DisplayState;
use crate::store::PhotoReference;
use crate::ui::NoticeLevel;

/// One step played against the controller
#[derive(Debug, Clone)]
pub enum ScenarioStep {
    /// Open the screen, optionally with a route photo
    Open(Option<PhotoReference>),
    /// A new photo arrives from the camera or the picker
    Receive(PhotoReference),
    /// The capture collaborator was closed without a photo
    CancelCapture,
    /// Save intent
    Save,
    /// Select intent
    Select(PhotoReference),
    /// Remove intent answered with the given confirmation
    Remove(PhotoReference, Confirmation),
    /// Make one store operation fail from now on
    FailOn(StoreOperation),
    /// Make the whole store unavailable from now on
    StoreUnavailable,
    /// Clear all simulated failures
    Recover,
}

/// Expected state after the last step
#[derive(Debug, Clone, Default)]
pub struct ExpectedResults {
    /// Saved photos in order
    pub photos: Vec<PhotoReference>,
    /// Current photo recorded in the store
    pub current: Option<PhotoReference>,
    /// Display state of the controller
    pub display: DisplayState,
    /// Level of the notice returned by the last intent
    pub last_notice: Option<NoticeLevel>,
}

/// A complete test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    /// Scenario name for identification
    pub name: String,
    /// Description of what this scenario tests
    pub description: String,
    /// Photos in the store before the first step
    pub initial_photos: Vec<PhotoReference>,
    /// Current photo before the first step
    pub initial_current: Option<PhotoReference>,
    /// Steps to play
    pub steps: Vec<ScenarioStep>,
    /// Expected state after the last step
    pub expected: ExpectedResults,
    /// Tags for filtering scenarios
    pub tags: Vec<String>,
}

impl TestScenario {
    /// Create a new test scenario
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            initial_photos: Vec::new(),
            initial_current: None,
            steps: Vec::new(),
            expected: ExpectedResults::default(),
            tags: Vec::new(),
        }
    }

    /// Seed the store
    pub fn with_store(mut self, photos: &[&str], current: Option<&str>) -> Self {
        self.initial_photos = refs(photos);
        self.initial_current = current.map(PhotoReference::from);
        self
    }

    /// Set the steps to play
    pub fn with_steps(mut self, steps: Vec<ScenarioStep>) -> Self {
        self.steps = steps;
        self
    }

    /// Set the expected outcome
    pub fn expecting(mut self, expected: ExpectedResults) -> Self {
        self.expected = expected;
        self
    }

    /// Add tags to the scenario
    pub fn with_tags(mut self, tags: Vec<&str>) -> Self {
        self.tags = tags.into_iter().map(String::from).collect();
        self
    }
}

fn refs(names: &[&str]) -> Vec<PhotoReference> {
    names.iter().map(|n| PhotoReference::from(*n)).collect()
}

fn photo(name: &str) -> PhotoReference {
    PhotoReference::from(name)
}

fn display(shown: Option<&str>, unsaved: bool, save: bool, delete: bool) -> DisplayState {
    DisplayState {
        shown_photo: shown.map(PhotoReference::from),
        is_unsaved: unsaved,
        show_save_action: save,
        show_delete_action: delete,
    }
}

/// Library of all predefined scenarios
pub struct ScenarioLibrary;

impl ScenarioLibrary {
    // =========================================================================
    // Display derivation
    // =========================================================================

    /// Fresh photo on an empty store
    pub fn empty_store_new_photo() -> TestScenario {
        TestScenario::new(
            "empty_store_new_photo",
            "A captured photo on an empty store is shown unsaved with a save action",
        )
        .with_steps(vec![ScenarioStep::Open(Some(photo("img1")))])
        .expecting(ExpectedResults {
            photos: vec![],
            current: None,
            display: display(Some("img1"), true, true, false),
            last_notice: Some(NoticeLevel::Info),
        })
        .with_tags(vec!["display", "quick"])
    }

    /// Stored current photo is shown
    pub fn current_photo_shown() -> TestScenario {
        TestScenario::new(
            "current_photo_shown",
            "Without a new photo the stored current photo is shown with a delete action",
        )
        .with_store(&["img1", "img2"], Some("img2"))
        .with_steps(vec![ScenarioStep::Open(None)])
        .expecting(ExpectedResults {
            photos: refs(&["img1", "img2"]),
            current: Some(photo("img2")),
            display: display(Some("img2"), false, false, true),
            last_notice: Some(NoticeLevel::Info),
        })
        .with_tags(vec!["display", "quick"])
    }

    /// First saved photo is the fallback
    pub fn first_photo_fallback() -> TestScenario {
        TestScenario::new(
            "first_photo_fallback",
            "With no current photo the first saved photo is shown",
        )
        .with_store(&["img5", "img6"], None)
        .with_steps(vec![ScenarioStep::Open(None)])
        .expecting(ExpectedResults {
            photos: refs(&["img5", "img6"]),
            current: None,
            display: display(Some("img5"), false, false, true),
            last_notice: Some(NoticeLevel::Info),
        })
        .with_tags(vec!["display", "quick"])
    }

    /// Incoming candidate wins over the stored current photo
    pub fn incoming_overrides_current() -> TestScenario {
        TestScenario::new(
            "incoming_overrides_current",
            "A new photo is shown instead of the stored current photo until saved",
        )
        .with_store(&["img1"], Some("img1"))
        .with_steps(vec![ScenarioStep::Open(None), ScenarioStep::Receive(photo("img9"))])
        .expecting(ExpectedResults {
            photos: refs(&["img1"]),
            current: Some(photo("img1")),
            display: display(Some("img9"), true, true, false),
            last_notice: Some(NoticeLevel::Info),
        })
        .with_tags(vec!["display"])
    }

    /// Picking an already saved photo offers no save
    pub fn already_saved_candidate() -> TestScenario {
        TestScenario::new(
            "already_saved_candidate",
            "A picked photo that is already saved is shown as saved",
        )
        .with_store(&["img1", "img2"], Some("img1"))
        .with_steps(vec![ScenarioStep::Receive(photo("img2"))])
        .expecting(ExpectedResults {
            photos: refs(&["img1", "img2"]),
            current: Some(photo("img1")),
            display: display(Some("img2"), false, false, true),
            last_notice: Some(NoticeLevel::Info),
        })
        .with_tags(vec!["display"])
    }

    /// Cancelled capture changes nothing
    pub fn cancelled_capture() -> TestScenario {
        TestScenario::new(
            "cancelled_capture",
            "Closing the camera or picker without a photo leaves the screen as it was",
        )
        .with_store(&["img1"], Some("img1"))
        .with_steps(vec![ScenarioStep::Open(None), ScenarioStep::CancelCapture])
        .expecting(ExpectedResults {
            photos: refs(&["img1"]),
            current: Some(photo("img1")),
            display: display(Some("img1"), false, false, true),
            last_notice: Some(NoticeLevel::Info),
        })
        .with_tags(vec!["display", "capture"])
    }

    // =========================================================================
    // Save / select
    // =========================================================================

    /// Saving an unsaved candidate
    pub fn save_unsaved_candidate() -> TestScenario {
        TestScenario::new(
            "save_unsaved_candidate",
            "Saving a new photo adds it to the collection and makes it current",
        )
        .with_store(&["img1"], None)
        .with_steps(vec![
            ScenarioStep::Receive(photo("img3")),
            ScenarioStep::Save,
        ])
        .expecting(ExpectedResults {
            photos: refs(&["img1", "img3"]),
            current: Some(photo("img3")),
            display: display(Some("img3"), false, false, true),
            last_notice: Some(NoticeLevel::Success),
        })
        .with_tags(vec!["save", "quick"])
    }

    /// Saving twice does not duplicate
    pub fn save_twice() -> TestScenario {
        TestScenario::new(
            "save_twice",
            "A second save of the same photo is a no-op",
        )
        .with_steps(vec![
            ScenarioStep::Receive(photo("img1")),
            ScenarioStep::Save,
            ScenarioStep::Receive(photo("img1")),
            ScenarioStep::Save,
        ])
        .expecting(ExpectedResults {
            photos: refs(&["img1"]),
            current: Some(photo("img1")),
            display: display(Some("img1"), false, false, true),
            last_notice: Some(NoticeLevel::Info),
        })
        .with_tags(vec!["save"])
    }

    /// Selecting a saved photo
    pub fn select_saved_photo() -> TestScenario {
        TestScenario::new(
            "select_saved_photo",
            "Selecting a thumbnail makes it current and discards the unsaved photo",
        )
        .with_store(&["img1", "img2"], Some("img1"))
        .with_steps(vec![
            ScenarioStep::Receive(photo("new")),
            ScenarioStep::Select(photo("img2")),
        ])
        .expecting(ExpectedResults {
            photos: refs(&["img1", "img2"]),
            current: Some(photo("img2")),
            display: display(Some("img2"), false, false, true),
            last_notice: Some(NoticeLevel::Success),
        })
        .with_tags(vec!["select", "quick"])
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Removing the shown photo reselects the first one
    pub fn remove_current_reselects() -> TestScenario {
        TestScenario::new(
            "remove_current_reselects",
            "Removing the shown photo makes the first remaining photo current",
        )
        .with_store(&["img1", "img2"], Some("img2"))
        .with_steps(vec![
            ScenarioStep::Open(None),
            ScenarioStep::Remove(photo("img2"), Confirmation::Confirmed),
        ])
        .expecting(ExpectedResults {
            photos: refs(&["img1"]),
            current: Some(photo("img1")),
            display: display(Some("img1"), false, false, true),
            last_notice: Some(NoticeLevel::Success),
        })
        .with_tags(vec!["remove", "quick"])
    }

    /// Removing the last photo empties the screen
    pub fn remove_last_photo() -> TestScenario {
        TestScenario::new(
            "remove_last_photo",
            "Removing the only photo clears the current photo",
        )
        .with_store(&["img1"], Some("img1"))
        .with_steps(vec![
            ScenarioStep::Open(None),
            ScenarioStep::Remove(photo("img1"), Confirmation::Confirmed),
        ])
        .expecting(ExpectedResults {
            photos: vec![],
            current: None,
            display: DisplayState::default(),
            last_notice: Some(NoticeLevel::Success),
        })
        .with_tags(vec!["remove"])
    }

    /// Cancelling a removal
    pub fn cancelled_removal() -> TestScenario {
        TestScenario::new(
            "cancelled_removal",
            "Answering no to the confirmation keeps the photo",
        )
        .with_store(&["img1", "img2"], Some("img2"))
        .with_steps(vec![
            ScenarioStep::Open(None),
            ScenarioStep::Remove(photo("img2"), Confirmation::Cancelled),
        ])
        .expecting(ExpectedResults {
            photos: refs(&["img1", "img2"]),
            current: Some(photo("img2")),
            display: display(Some("img2"), false, false, true),
            last_notice: Some(NoticeLevel::Info),
        })
        .with_tags(vec!["remove"])
    }

    /// Removing the unsaved candidate
    pub fn remove_unsaved_candidate() -> TestScenario {
        TestScenario::new(
            "remove_unsaved_candidate",
            "Removing the new photo discards it and falls back to the stored photo",
        )
        .with_store(&["img1"], Some("img1"))
        .with_steps(vec![
            ScenarioStep::Receive(photo("new")),
            ScenarioStep::Remove(photo("new"), Confirmation::Confirmed),
        ])
        .expecting(ExpectedResults {
            photos: refs(&["img1"]),
            current: Some(photo("img1")),
            display: display(Some("img1"), false, false, true),
            last_notice: Some(NoticeLevel::Success),
        })
        .with_tags(vec!["remove"])
    }

    // =========================================================================
    // Error conditions
    // =========================================================================

    /// Save rolls back when the second step fails
    pub fn save_rollback() -> TestScenario {
        TestScenario::new(
            "save_rollback",
            "If the photo cannot be made current the save is rolled back",
        )
        .with_store(&["img1"], Some("img1"))
        .with_steps(vec![
            ScenarioStep::Receive(photo("img3")),
            ScenarioStep::FailOn(StoreOperation::SetCurrent),
            ScenarioStep::Save,
            ScenarioStep::Recover,
        ])
        .expecting(ExpectedResults {
            photos: refs(&["img1"]),
            current: Some(photo("img1")),
            display: display(Some("img3"), true, true, false),
            last_notice: Some(NoticeLevel::Error),
        })
        .with_tags(vec!["error", "save"])
    }

    /// Store goes away between intents
    pub fn store_unavailable() -> TestScenario {
        TestScenario::new(
            "store_unavailable",
            "When the store cannot be reached the display is left as it was",
        )
        .with_store(&["img1", "img2"], Some("img2"))
        .with_steps(vec![
            ScenarioStep::Open(None),
            ScenarioStep::StoreUnavailable,
            ScenarioStep::Select(photo("img1")),
            ScenarioStep::Recover,
        ])
        .expecting(ExpectedResults {
            photos: refs(&["img1", "img2"]),
            current: Some(photo("img2")),
            display: display(Some("img2"), false, false, true),
            last_notice: Some(NoticeLevel::Error),
        })
        .with_tags(vec!["error", "select"])
    }

    /// Selecting a photo that was removed elsewhere
    pub fn select_missing_photo() -> TestScenario {
        TestScenario::new(
            "select_missing_photo",
            "Selecting a photo that is no longer saved does nothing",
        )
        .with_store(&["img1"], Some("img1"))
        .with_steps(vec![
            ScenarioStep::Open(None),
            ScenarioStep::Select(photo("ghost")),
        ])
        .expecting(ExpectedResults {
            photos: refs(&["img1"]),
            current: Some(photo("img1")),
            display: display(Some("img1"), false, false, true),
            last_notice: Some(NoticeLevel::Info),
        })
        .with_tags(vec!["error", "select"])
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// Get all available scenarios
    pub fn all_scenarios() -> Vec<TestScenario> {
        vec![
            Self::empty_store_new_photo(),
            Self::current_photo_shown(),
            Self::first_photo_fallback(),
            Self::incoming_overrides_current(),
            Self::already_saved_candidate(),
            Self::cancelled_capture(),
            Self::save_unsaved_candidate(),
            Self::save_twice(),
            Self::select_saved_photo(),
            Self::remove_current_reselects(),
            Self::remove_last_photo(),
            Self::cancelled_removal(),
            Self::remove_unsaved_candidate(),
            Self::save_rollback(),
            Self::store_unavailable(),
            Self::select_missing_photo(),
        ]
    }

    /// Get scenarios with a specific tag
    pub fn scenarios_by_tag(tag: &str) -> Vec<TestScenario> {
        Self::all_scenarios()
            .into_iter()
            .filter(|s| s.tags.iter().any(|t| t == tag))
            .collect()
    }

    /// Get a scenario by name
    pub fn by_name(name: &str) -> Option<TestScenario> {
        Self::all_scenarios().into_iter().find(|s| s.name == name)
    }

    /// All tags used by the library, sorted
    pub fn all_tags() -> Vec<String> {
        let mut tags: Vec<String> = Self::all_scenarios()
            .into_iter()
            .flat_map(|s| s.tags)
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_scenario_names_are_unique() {
        let scenarios = ScenarioLibrary::all_scenarios();
        let names: HashSet<_> = scenarios.iter().map(|s| s.name.clone()).collect();
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn test_every_scenario_has_steps_and_tags() {
        for scenario in ScenarioLibrary::all_scenarios() {
            assert!(!scenario.steps.is_empty(), "{} has no steps", scenario.name);
            assert!(!scenario.tags.is_empty(), "{} has no tags", scenario.name);
        }
    }

    #[test]
    fn test_filter_by_tag() {
        let quick = ScenarioLibrary::scenarios_by_tag("quick");
        assert!(!quick.is_empty());
        assert!(quick.iter().all(|s| s.tags.contains(&"quick".to_string())));
        assert!(ScenarioLibrary::scenarios_by_tag("no-such-tag").is_empty());
    }

    #[test]
    fn test_lookup_by_name() {
        assert!(ScenarioLibrary::by_name("save_rollback").is_some());
        assert!(ScenarioLibrary::by_name("missing").is_none());
        assert!(ScenarioLibrary::all_tags().contains(&"error".to_string()));
    }
}
