//! Scripted capture and confirmation collaborators
//!
//! Each collaborator replays a fixed list of outcomes, one per call, so
//! controller tests and scenarios can stand in for the camera, the gallery
//! and the confirmation dialog.

use crate::capture::{Confirmation, PhotoSource, RemovalConfirmer};
use crate::core::error::{ProfileError, Result};
use crate::store::PhotoReference;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Photo source that replays scripted outcomes
///
/// Once the script runs out, every further call is a cancellation.
#[derive(Debug, Default)]
pub struct ScriptedPhotoSource {
    outcomes: Mutex<VecDeque<Result<Option<PhotoReference>>>>,
}

impl ScriptedPhotoSource {
    /// Create a source from the outcomes to replay
    pub fn new(outcomes: Vec<Result<Option<PhotoReference>>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
        }
    }

    /// Source that always captures the given photo once
    pub fn capturing(photo: PhotoReference) -> Self {
        Self::new(vec![Ok(Some(photo))])
    }

    /// Number of outcomes not yet replayed
    pub fn remaining(&self) -> usize {
        self.outcomes.lock().map(|o| o.len()).unwrap_or(0)
    }
}

#[async_trait]
impl PhotoSource for ScriptedPhotoSource {
    async fn acquire(&self) -> Result<Option<PhotoReference>> {
        let mut outcomes = self
            .outcomes
            .lock()
            .map_err(|_| ProfileError::CaptureFailed("scripted source lock poisoned".into()))?;
        outcomes.pop_front().unwrap_or(Ok(None))
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

/// Confirmer that replays scripted answers and records what it was asked
///
/// Once the script runs out, every further question is cancelled.
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    answers: Mutex<VecDeque<Confirmation>>,
    asked: Mutex<Vec<PhotoReference>>,
}

impl ScriptedConfirmer {
    /// Create a confirmer from the answers to replay
    pub fn new(answers: Vec<Confirmation>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Photos the confirmer was asked about, in order
    pub fn asked(&self) -> Vec<PhotoReference> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl RemovalConfirmer for ScriptedConfirmer {
    fn confirm(&self, photo: &PhotoReference) -> Result<Confirmation> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(photo.clone());
        }

        let answer = self
            .answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front())
            .unwrap_or(Confirmation::Cancelled);
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_source_replays_then_cancels() {
        let source = ScriptedPhotoSource::new(vec![
            Ok(Some("a".into())),
            Err(ProfileError::PermissionDenied("camera".into())),
        ]);

        assert_eq!(source.acquire().await.unwrap(), Some("a".into()));
        assert!(source.acquire().await.is_err());
        assert_eq!(source.acquire().await.unwrap(), None);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_confirmer_replays_then_cancels() {
        let confirmer = ScriptedConfirmer::new(vec![Confirmation::Confirmed]);

        assert_eq!(
            confirmer.confirm(&"a".into()).unwrap(),
            Confirmation::Confirmed
        );
        assert_eq!(
            confirmer.confirm(&"b".into()).unwrap(),
            Confirmation::Cancelled
        );
        assert_eq!(
            confirmer.asked(),
            vec![PhotoReference::from("a"), PhotoReference::from("b")]
        );
    }
}
