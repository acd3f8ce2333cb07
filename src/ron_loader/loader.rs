//! Asset loader for triggers from "trigger.ron" files.

use std::time::Duration;

use bevy::{
    asset::{io::Reader, Asset, AssetLoader, AsyncReadExt, LoadContext},
    reflect::TypePath,
    utils::BoxedFuture,
};
use serde_ron::de::from_bytes;
use thiserror::Error;

use crate::prelude::{DialogueTrigger, ReplayPolicy};

use super::types::RonTrigger;

/// A trigger definition loaded from a `.trigger.ron` file.
#[derive(Asset, TypePath, Debug, Clone)]
pub struct TriggerData {
    /// The validated trigger.
    trigger: DialogueTrigger,
}

impl TriggerData {
    /// The trigger described by the file.
    pub fn trigger(&self) -> &DialogueTrigger {
        &self.trigger
    }

    /// Takes the trigger out of the asset.
    pub fn into_trigger(self) -> DialogueTrigger {
        self.trigger
    }
}

/// Load triggers from ron assets.
#[derive(Default)]
pub struct TriggerLoader;

/// Errors when loading a trigger file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TriggerLoadError {
    /// An [IO Error](std::io::Error)
    #[error("Could not read the file: {0}")]
    Io(#[from] std::io::Error),
    /// A [RON Error](serde_ron::error::SpannedError)
    #[error("Could not parse RON: {0}")]
    RonError(#[from] serde_ron::error::SpannedError),
    /// The replay cooldown is negative or not a number.
    #[error("Invalid replay cooldown: {0} seconds")]
    InvalidCooldown(f32),
}

/// Parses and validates the content of a trigger file.
pub fn parse_trigger(bytes: &[u8]) -> Result<TriggerData, TriggerLoadError> {
    let ron_trigger = from_bytes::<RonTrigger>(bytes)?;

    let replay = match ron_trigger.replay {
        Some(replay) => {
            let cooldown = Duration::try_from_secs_f32(replay.cooldown)
                .map_err(|_| TriggerLoadError::InvalidCooldown(replay.cooldown))?;
            Some(ReplayPolicy {
                cooldown,
                only_on_skip: replay.only_on_skip,
                secondary: replay.secondary.map(Into::into),
            })
        }
        None => None,
    };

    Ok(TriggerData {
        trigger: DialogueTrigger {
            speaker: ron_trigger.speaker,
            portrait: ron_trigger.portrait,
            lines: ron_trigger.lines,
            replay,
            fire_event_on_completion: ron_trigger.fire_event_on_completion,
        },
    })
}

impl AssetLoader for TriggerLoader {
    type Asset = TriggerData;
    type Settings = ();
    type Error = TriggerLoadError;

    fn load<'a>(
        &'a self,
        reader: &'a mut Reader,
        _settings: &'a Self::Settings,
        _load_context: &'a mut LoadContext,
    ) -> BoxedFuture<'a, Result<Self::Asset, Self::Error>> {
        Box::pin(async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            parse_trigger(&bytes)
        })
    }

    fn extensions(&self) -> &[&str] {
        &["trigger.ron"]
    }
}
