//! Terminal prompts for the interactive front end

use super::picker::FilePhotoPicker;
use super::traits::{Confirmation, PhotoSource, RemovalConfirmer};
use crate::core::error::{ProfileError, Result};
use crate::store::PhotoReference;
use async_trait::async_trait;
use dialoguer::{Confirm, Input};

/// Asks "remove this photo?" on the terminal, defaulting to no
#[derive(Debug, Clone, Default)]
pub struct TerminalConfirmer;

impl RemovalConfirmer for TerminalConfirmer {
    fn confirm(&self, photo: &PhotoReference) -> Result<Confirmation> {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove photo '{}' permanently from your collection?",
                photo
            ))
            .default(false)
            .interact()
            .map_err(|e| ProfileError::IoError(format!("Failed to read input: {}", e)))?;

        Ok(Confirmation::from(confirmed))
    }
}

/// Confirms every removal without asking (`--yes`)
#[derive(Debug, Clone, Default)]
pub struct AutoConfirmer;

impl RemovalConfirmer for AutoConfirmer {
    fn confirm(&self, _photo: &PhotoReference) -> Result<Confirmation> {
        Ok(Confirmation::Confirmed)
    }
}

/// Asks for a photo path on the terminal; an empty answer cancels
#[derive(Debug, Clone, Default)]
pub struct PromptPhotoPicker;

#[async_trait]
impl PhotoSource for PromptPhotoPicker {
    async fn acquire(&self) -> Result<Option<PhotoReference>> {
        // Reading the terminal blocks, so it runs off the async workers.
        let answer = tokio::task::spawn_blocking(|| {
            Input::<String>::new()
                .with_prompt("Path of the photo to use (leave empty to cancel)")
                .allow_empty(true)
                .interact_text()
        })
        .await
        .map_err(|e| ProfileError::CaptureFailed(format!("Prompt task failed: {}", e)))?
        .map_err(|e| ProfileError::IoError(format!("Failed to read input: {}", e)))?;

        FilePhotoPicker::new(answer.trim()).acquire().await
    }

    fn source_name(&self) -> &'static str {
        "prompt-picker"
    }
}
