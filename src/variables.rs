//! Shared values that outlive scenes, such as flags set by conversations.

use bevy::prelude::{Resource, Vec3};
use serde::Deserialize;

/// A value with a description and an optional default restored on enable.
///
/// Wrap it in a resource, or use it as a field, to share state between systems
/// and conversations (for instance a flag raised by a [`DialogueEndEvent`] observer).
///
/// [`DialogueEndEvent`]: crate::prelude::DialogueEndEvent
#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Variable<T> {
    /// The current value.
    pub value: T,
    /// A short note about what the variable is for.
    pub description: String,
    /// Whether [`Variable::enable`] restores the default value.
    pub reset_to_default: bool,
    /// The value restored on enable.
    pub default_value: T,
}

impl<T: Clone + Default> Variable<T> {
    /// Creates a variable holding `value`, with no default.
    pub fn new(value: T) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    /// Restores `default_value` every time the variable is enabled.
    pub fn with_default(mut self, default_value: T) -> Self {
        self.default_value = default_value;
        self.reset_to_default = true;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Called when the variable comes into use, e.g. on scene start.
    pub fn enable(&mut self) {
        if self.reset_to_default {
            self.value = self.default_value.clone();
        }
    }

    /// Replaces the value.
    pub fn set(&mut self, value: T) {
        self.value = value;
    }

    /// The current value.
    pub fn get(&self) -> &T {
        &self.value
    }
}

/// A shared boolean.
pub type BoolVariable = Variable<bool>;
/// A shared integer.
pub type IntVariable = Variable<i32>;
/// A shared string.
pub type StringVariable = Variable<String>;
/// A shared 3D vector.
pub type Vec3Variable = Variable<Vec3>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_restores_default_when_asked() {
        let mut var = IntVariable::new(3).with_default(10);
        var.set(7);
        assert_eq!(*var.get(), 7);
        var.enable();
        assert_eq!(*var.get(), 10);
    }

    #[test]
    fn enable_keeps_value_without_default() {
        let mut var = BoolVariable::new(true).with_description("bridge fixed");
        var.enable();
        assert!(*var.get());
        assert_eq!(var.description, "bridge fixed");
    }

    #[test]
    fn deserializes_from_ron() {
        let var: StringVariable = serde_ron::from_str(
            r#"(value: "Bev", reset_to_default: true, default_value: "Nobody")"#,
        )
        .unwrap();
        assert_eq!(var.value, "Bev");
        assert!(var.reset_to_default);
        assert_eq!(var.description, "");
    }
}
