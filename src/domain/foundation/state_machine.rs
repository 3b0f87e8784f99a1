//! Lifecycle graphs for status enums.

use std::fmt::Debug;

use thiserror::Error;

/// A status enum whose legal moves form a fixed graph.
///
/// Implementors list each state's successors; membership checks and
/// guarded transitions come from that table.
pub trait StateMachine: Copy + PartialEq + Debug + 'static {
    fn successors(&self) -> &'static [Self];

    fn can_transition_to(&self, target: &Self) -> bool {
        self.successors().contains(target)
    }

    fn transition_to(&self, target: Self) -> Result<Self, IllegalTransition<Self>> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(IllegalTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// A state with no way out.
    fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move from {from:?} to {to:?}")]
pub struct IllegalTransition<S: Debug> {
    pub from: S,
    pub to: S,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
        Amber,
        Off,
    }

    impl StateMachine for Light {
        fn successors(&self) -> &'static [Self] {
            match self {
                Light::Red => &[Light::Green, Light::Off],
                Light::Green => &[Light::Amber, Light::Off],
                Light::Amber => &[Light::Red, Light::Off],
                Light::Off => &[],
            }
        }
    }

    #[test]
    fn follows_the_successor_table() {
        assert_eq!(Light::Red.transition_to(Light::Green), Ok(Light::Green));
        assert_eq!(
            Light::Red.transition_to(Light::Amber),
            Err(IllegalTransition {
                from: Light::Red,
                to: Light::Amber
            })
        );
    }

    #[test]
    fn error_names_both_states() {
        let err = Light::Off.transition_to(Light::Red).unwrap_err();
        assert_eq!(err.to_string(), "cannot move from Off to Red");
    }

    #[test]
    fn terminal_states_have_no_successors() {
        assert!(Light::Off.is_terminal());
        assert!(!Light::Amber.is_terminal());
    }
}
