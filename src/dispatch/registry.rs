use std::collections::HashMap;
use std::sync::Arc;

use crate::dispatch::command::Command;

/// Command name -> handler table plus the alias -> canonical-name table.
/// Populated once at startup; read-only afterwards.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, Arc<dyn Command>>,
    aliases: HashMap<&'static str, &'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command and all of its aliases.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        let spec = command.spec();
        for alias in spec.aliases {
            self.aliases.insert(alias, spec.name);
        }
        self.commands.insert(spec.name, command);
    }

    /// Resolves a name to its handler, directly or through an alias.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Command>> {
        if let Some(command) = self.commands.get(name) {
            return Some(command.clone());
        }
        let canonical = self.aliases.get(name)?;
        self.commands.get(canonical).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.commands.values()
    }
}
