//! Per-algorithm customization hooks.
//!
//! A handful of SAGA tools need host-side tweaks that do not fit the
//! description file: rewriting a parameter before translation, or
//! patching the assembled command list. Those live as extensions in a
//! registry populated at startup; not having an extension is the common
//! case and is silently fine.

use crate::{error::Result, naming::COMMAND_LINE_PREFIX, types::AlgorithmDescriptor};
use std::collections::HashMap;

/// Customization hooks for one algorithm. Both methods default to
/// no-ops so an extension only implements what it needs.
pub trait AlgorithmExtension: Send + Sync {
    /// Invoked with the descriptor before parameter translation.
    fn pre_process_inputs(&self, alg: &mut AlgorithmDescriptor) -> Result<()> {
        let _ = alg;
        Ok(())
    }

    /// Invoked with the fully assembled command list; the return value
    /// replaces it.
    fn edit_commands(&self, commands: Vec<String>) -> Vec<String> {
        commands
    }
}

/// Registry of extensions, keyed by the algorithm's command line
/// identifier with the namespace prefix stripped and `.` mapped to `_`.
#[derive(Default)]
pub struct ExtensionRegistry {
    entries: HashMap<String, Box<dyn AlgorithmExtension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        command_line_name: &str,
        extension: Box<dyn AlgorithmExtension>,
    ) {
        self.entries
            .insert(extension_key(command_line_name), extension);
    }

    /// Looks up the extension for an algorithm; `None` for the vast
    /// majority of tools.
    pub fn lookup(&self, command_line_name: &str) -> Option<&dyn AlgorithmExtension> {
        self.entries
            .get(&extension_key(command_line_name))
            .map(|extension| extension.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn extension_key(command_line_name: &str) -> String {
    command_line_name
        .strip_prefix(COMMAND_LINE_PREFIX)
        .unwrap_or(command_line_name)
        .replace('.', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AppendFlag;

    impl AlgorithmExtension for AppendFlag {
        fn edit_commands(&self, mut commands: Vec<String>) -> Vec<String> {
            if let Some(last) = commands.last_mut() {
                last.push_str(" -EXTRA 1");
            }
            commands
        }
    }

    #[test]
    fn test_lookup_strips_prefix_and_dots() {
        let mut registry = ExtensionRegistry::new();
        registry.register("saga:fourier.filter", Box::new(AppendFlag));

        assert!(registry.lookup("saga:fourier.filter").is_some());
        assert!(registry.lookup("fourier_filter").is_some());
        assert!(registry.lookup("saga:other").is_none());
    }

    #[test]
    fn test_edit_commands_replaces_list() {
        let mut registry = ExtensionRegistry::new();
        registry.register("saga:test", Box::new(AppendFlag));

        let ext = registry.lookup("saga:test").unwrap();
        let commands = ext.edit_commands(vec!["grid_tools \"Test\"".into()]);
        assert_eq!(commands, vec!["grid_tools \"Test\" -EXTRA 1".to_string()]);
    }

    #[test]
    fn test_default_hooks_are_noops() {
        struct Passive;
        impl AlgorithmExtension for Passive {}

        let ext = Passive;
        let commands = vec!["a".to_string()];
        assert_eq!(ext.edit_commands(commands.clone()), commands);
    }
}
